use uom::si::{
    f64::{MassRate, Ratio},
    mass_rate::kilogram_per_second,
    ratio::ratio,
};

use crate::models::hvac::ahu::core::{Scenario, ScenarioError};

use super::ControlConfig;

/// The parameter a control solve adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlVariable {
    /// Supply dry-air mass flow rate, in kg/s.
    MassFlow,

    /// Fraction of the mixed air bypassing the cooling coil.
    Bypass,
}

impl ControlVariable {
    /// Returns this variable's working value in `scenario`, in plain units.
    #[must_use]
    pub fn value(self, scenario: &Scenario) -> f64 {
        match self {
            Self::MassFlow => scenario.actual().mass_flow.get::<kilogram_per_second>(),
            Self::Bypass => scenario.actual().bypass.get::<ratio>(),
        }
    }

    pub(super) fn bounds(self, config: &ControlConfig) -> [f64; 2] {
        match self {
            Self::MassFlow => [0.0, config.max_mass_flow.get::<kilogram_per_second>()],
            Self::Bypass => [0.0, 1.0],
        }
    }

    pub(super) fn initial_guess(self, scenario: &Scenario, config: &ControlConfig) -> f64 {
        match self {
            Self::MassFlow => self.value(scenario),
            Self::Bypass => config.bypass_initial_guess.get::<ratio>(),
        }
    }

    pub(super) fn tolerance(self, config: &ControlConfig) -> f64 {
        match self {
            Self::MassFlow => config.mass_flow_tol,
            Self::Bypass => config.bypass_tol,
        }
    }

    /// Returns a copy of `scenario` with this variable set to `value`.
    pub(super) fn apply(self, scenario: &Scenario, value: f64) -> Result<Scenario, ScenarioError> {
        match self {
            Self::MassFlow => scenario.with_mass_flow(MassRate::new::<kilogram_per_second>(value)),
            Self::Bypass => scenario.with_bypass(Ratio::new::<ratio>(value)),
        }
    }
}
