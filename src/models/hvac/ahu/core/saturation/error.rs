use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::models::hvac::ahu::core::LinearError;

/// Errors that can occur while solving for the saturated operating point.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SaturationError {
    /// A linear solve failed.
    #[error(transparent)]
    Linear(#[from] LinearError),

    /// The iteration limit was reached before the saturation gap closed.
    #[error("saturation iteration did not converge after {iters} iterations: gap={gap}")]
    NonConvergence {
        /// Number of linear solves performed.
        iters: usize,

        /// Last humidity ratio gap to the saturation curve, in kg/kg.
        gap: f64,

        /// Last saturation temperature estimate.
        temperature: ThermodynamicTemperature,
    },
}
