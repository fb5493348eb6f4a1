//! Supporting utilities used by models.
//!
//! - [`constraint`]: Numeric constraints checked at construction time.
//! - [`psychro`]: Moist-air property relations (saturation curve, humidity ratio).

pub mod constraint;
pub mod psychro;
