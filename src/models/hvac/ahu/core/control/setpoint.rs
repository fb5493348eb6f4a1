use uom::si::{
    f64::{Power, Ratio, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    models::hvac::ahu::core::{Scenario, ScenarioError, Station},
    support::psychro::Psychrometrics,
};

/// The quantity a control solve drives to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setpoint {
    /// Supply air temperature `θS`.
    SupplyTemperature(ThermodynamicTemperature),

    /// Indoor relative humidity, evaluated at the indoor temperature setpoint.
    ///
    /// The humidity controller is switched off while solving, since the
    /// control variable takes over its role.
    IndoorHumidity(Ratio),
}

impl Setpoint {
    /// Position of the controlled quantity in the unknown vector.
    pub(super) fn index(self) -> usize {
        match self {
            Self::SupplyTemperature(_) => Station::Supply.temperature_index(),
            Self::IndoorHumidity(_) => Station::Indoor.humidity_index(),
        }
    }

    /// Target value in the units of the unknown vector.
    pub(super) fn target<P: Psychrometrics>(self, psychro: &P, scenario: &Scenario) -> f64 {
        match self {
            Self::SupplyTemperature(temperature) => temperature.get::<degree_celsius>(),
            Self::IndoorHumidity(humidity) => psychro.humidity_ratio(
                scenario
                    .inputs()
                    .indoor_temperature_setpoint
                    .get::<degree_celsius>(),
                humidity.get::<ratio>(),
            ),
        }
    }

    /// Returns the scenario the search starts from.
    pub(super) fn prepare(self, scenario: &Scenario) -> Result<Scenario, ScenarioError> {
        match self {
            Self::SupplyTemperature(_) => Ok(*scenario),
            Self::IndoorHumidity(_) => scenario.with_humidity_gain(Power::new::<watt>(0.0)),
        }
    }
}
