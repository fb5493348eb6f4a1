use uom::si::{
    f64::{Ratio, ThermodynamicTemperature},
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

/// Configuration for the saturation fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationConfig {
    /// Initial guess for the coil saturation temperature.
    pub initial_guess: ThermodynamicTemperature,

    /// Largest accepted gap between the solved saturation humidity ratio and
    /// the saturation curve at the solved saturation temperature.
    pub tolerance: Ratio,

    /// Maximum number of linear solves.
    pub max_iters: usize,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            initial_guess: ThermodynamicTemperature::new::<degree_celsius>(5.0),
            tolerance: Ratio::new::<ratio>(0.01e-3),
            max_iters: 100,
        }
    }
}
