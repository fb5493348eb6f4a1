//! # Twine AHU
//!
//! Steady-state air-handling unit models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The air-handling unit mixes outdoor and recirculated air, cools and
//! dehumidifies it in a coil with a bypass, reheats it, and supplies it to a
//! single thermal zone. The operating point is the solution of a linear system
//! of mass and energy balances whose only nonlinearity, the saturation curve
//! at the coil apparatus dew point, is resolved by fixed-point iteration.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Model-specific utility code starts in a model's internal `core` module and
//! moves to [`support`] once it is useful beyond that model.

pub mod models;
pub mod support;
