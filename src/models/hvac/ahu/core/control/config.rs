use twine_solvers::optimization::golden_section;
use uom::si::{
    f64::{MassRate, Ratio},
    mass_rate::kilogram_per_second,
    ratio::ratio,
};

use crate::models::hvac::ahu::core::SaturationConfig;

/// What a control solve does when no value meets the setpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnNoSolution {
    /// Fail with [`ControlError::NoSolutionFound`](super::ControlError::NoSolutionFound).
    #[default]
    Error,

    /// Return the best point found, marked as not converged.
    BestEffort,
}

/// Configuration for the setpoint control solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Upper bound of the mass flow search. The lower bound is zero.
    pub max_mass_flow: MassRate,

    /// Largest accepted setpoint error `|r|` when searching on mass flow.
    ///
    /// The error is in the setpoint's units (°C or kg/kg). Meeting it also
    /// keeps the cost `½ r²` below the same threshold.
    pub mass_flow_tol: f64,

    /// Largest accepted setpoint error `|r|` when searching on the bypass fraction.
    pub bypass_tol: f64,

    /// Starting point of the bypass search.
    ///
    /// Mass flow searches start from the scenario's working mass flow rate.
    pub bypass_initial_guess: Ratio,

    /// Behavior when the best point misses the threshold.
    pub on_no_solution: OnNoSolution,

    /// Golden section search settings.
    pub search: golden_section::Config,

    /// Saturation iteration settings used for every evaluation.
    pub saturation: SaturationConfig,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            max_mass_flow: MassRate::new::<kilogram_per_second>(100.0),
            mass_flow_tol: 1e-4,
            bypass_tol: 1e-5,
            bypass_initial_guess: Ratio::new::<ratio>(0.1),
            on_no_solution: OnNoSolution::Error,
            search: golden_section::Config::default(),
            saturation: SaturationConfig::default(),
        }
    }
}
