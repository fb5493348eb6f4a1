//! Air-handling unit model.
//!
//! This module provides a [`twine_core::Model`] implementation for a
//! constant-air-volume air-handling unit serving a single thermal zone.
//! The computational core is in the internal `core` module.
//!
//! # Example
//!
//! ```
//! use twine_ahu::models::hvac::ahu::{
//!     AirHandlingUnit, AirProperties, Inputs, Parameters, Scenario, Setpoint, Station,
//! };
//! use twine_ahu::support::psychro::HylandWexler;
//! use twine_core::Model;
//! use uom::si::{
//!     f64::{MassRate, Power, Ratio, ThermalConductance, ThermodynamicTemperature},
//!     mass_rate::kilogram_per_second,
//!     power::watt,
//!     ratio::ratio,
//!     thermal_conductance::watt_per_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let parameters = Parameters {
//!     mass_flow: MassRate::new::<kilogram_per_second>(3.1),
//!     outdoor_air_flow: MassRate::new::<kilogram_per_second>(1.0),
//!     bypass: Ratio::new::<ratio>(0.1),
//!     temperature_gain: ThermalConductance::new::<watt_per_kelvin>(1e10),
//!     humidity_gain: Power::new::<watt>(0.0),
//! };
//! let inputs = Inputs {
//!     outdoor_temperature: ThermodynamicTemperature::new::<degree_celsius>(32.0),
//!     outdoor_relative_humidity: Ratio::new::<ratio>(0.5),
//!     indoor_temperature_setpoint: ThermodynamicTemperature::new::<degree_celsius>(24.0),
//!     indoor_humidity_setpoint: Ratio::new::<ratio>(0.5),
//!     infiltration: MassRate::new::<kilogram_per_second>(1.35),
//!     envelope_ua: ThermalConductance::new::<watt_per_kelvin>(675.0),
//!     sensible_load: Power::new::<watt>(34_000.0),
//!     latent_load: Power::new::<watt>(4_000.0),
//!     air: AirProperties::default(),
//! };
//! let scenario = Scenario::new(parameters, inputs)?;
//!
//! let ahu = AirHandlingUnit::new(HylandWexler::default());
//! let state = ahu.call(&scenario)?;
//! assert!(state.temperature(Station::Saturation) < state.temperature(Station::Mixed));
//!
//! let target = ThermodynamicTemperature::new::<degree_celsius>(18.0);
//! let solution = ahu.control_mass_flow(&scenario, Setpoint::SupplyTemperature(target))?;
//! assert!(solution.is_converged());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

pub use self::core::{
    AirProperties, ChartLocation, ChartPoint, ControlConfig, ControlError, ControlSolution,
    ControlStatus, ControlVariable, HeatFlow, Inputs, LinearError, LinearSystem, Matrix,
    OnNoSolution, PROCESSES, Parameters, SaturationConfig, SaturationError, Scenario,
    ScenarioError, SearchStatus, Setpoint, State, Station, Summary, UNKNOWNS, Vector,
};

use twine_core::Model;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use crate::support::psychro::{HylandWexler, Psychrometrics};

/// Air-handling unit model with a psychrometric property provider.
///
/// As a [`Model`], the unit maps a [`Scenario`] to its saturated operating
/// point [`State`]. Control solves and chart summaries are available as
/// inherent methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirHandlingUnit<P = HylandWexler> {
    psychro: P,
    config: ControlConfig,
}

impl Default for AirHandlingUnit<HylandWexler> {
    fn default() -> Self {
        Self::new(HylandWexler::default())
    }
}

impl<P: Psychrometrics> AirHandlingUnit<P> {
    /// Creates a unit with the default solver configuration.
    #[must_use]
    pub fn new(psychro: P) -> Self {
        Self::with_config(psychro, ControlConfig::default())
    }

    /// Creates a unit with the given solver configuration.
    #[must_use]
    pub fn with_config(psychro: P, config: ControlConfig) -> Self {
        Self { psychro, config }
    }

    /// Returns the psychrometric property provider.
    #[must_use]
    pub fn psychro(&self) -> &P {
        &self.psychro
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Builds the balance system with the saturation curve linearized at
    /// `saturation_temperature`.
    #[must_use]
    pub fn linear_system(
        &self,
        scenario: &Scenario,
        saturation_temperature: ThermodynamicTemperature,
    ) -> LinearSystem {
        self::core::build(
            scenario,
            &self.psychro,
            saturation_temperature.get::<degree_celsius>(),
        )
    }

    /// Solves the saturated operating point starting from `initial_guess`.
    ///
    /// # Errors
    ///
    /// Returns a [`SaturationError`] if a linear solve fails or the
    /// iteration does not converge.
    pub fn operating_point_from(
        &self,
        scenario: &Scenario,
        initial_guess: ThermodynamicTemperature,
    ) -> Result<State, SaturationError> {
        self::core::iterate(scenario, &self.psychro, initial_guess, &self.config.saturation)
    }

    /// Adjusts the mass flow rate to meet `setpoint`.
    ///
    /// # Errors
    ///
    /// See [`ControlError`].
    pub fn control_mass_flow(
        &self,
        scenario: &Scenario,
        setpoint: Setpoint,
    ) -> Result<ControlSolution, ControlError> {
        self.control(scenario, ControlVariable::MassFlow, setpoint)
    }

    /// Adjusts the coil bypass fraction to meet `setpoint`.
    ///
    /// # Errors
    ///
    /// See [`ControlError`].
    pub fn control_bypass(
        &self,
        scenario: &Scenario,
        setpoint: Setpoint,
    ) -> Result<ControlSolution, ControlError> {
        self.control(scenario, ControlVariable::Bypass, setpoint)
    }

    /// Adjusts `variable` to meet `setpoint`.
    ///
    /// # Errors
    ///
    /// See [`ControlError`].
    pub fn control(
        &self,
        scenario: &Scenario,
        variable: ControlVariable,
        setpoint: Setpoint,
    ) -> Result<ControlSolution, ControlError> {
        self::core::solve_control(scenario, variable, setpoint, &self.psychro, &self.config)
    }

    /// Summarizes an operating point for charts and reports.
    #[must_use]
    pub fn summary(&self, scenario: &Scenario, state: &State) -> Summary {
        Summary::new(&self.psychro, scenario, state)
    }
}

impl<P: Psychrometrics> Model for AirHandlingUnit<P> {
    type Input = Scenario;
    type Output = State;
    type Error = SaturationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.operating_point_from(input, self.config.saturation.initial_guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassRate, Ratio},
        mass_rate::kilogram_per_second,
        ratio::ratio,
    };

    use super::core::test_support::design_scenario;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn model_call_solves_the_operating_point() {
        let ahu = AirHandlingUnit::new(HylandWexler::default());
        let scenario = design_scenario();

        let state = ahu.call(&scenario).unwrap();

        // Linearized at the solved temperature, the tangent row measures
        // the remaining gap to the saturation curve.
        let system = ahu.linear_system(&scenario, state.temperature(Station::Saturation));
        let residuals = system.residuals(&state);
        assert!(residuals[4].abs() < 0.01e-3);
        assert_relative_eq!(
            state.temperature(Station::Indoor).get::<degree_celsius>(),
            24.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn control_then_summary() {
        let ahu = AirHandlingUnit::new(HylandWexler::default());

        let solution = ahu
            .control_mass_flow(&design_scenario(), Setpoint::SupplyTemperature(celsius(18.0)))
            .unwrap();
        let summary = ahu.summary(&solution.scenario, &solution.state);

        assert_relative_eq!(
            summary.mass_flow.get::<kilogram_per_second>(),
            solution.value
        );
        assert_relative_eq!(
            summary
                .point(ChartLocation::Station(Station::Supply))
                .temperature
                .get::<degree_celsius>(),
            18.0,
            epsilon = 1e-2
        );
    }

    #[test]
    fn custom_config_applies_to_control() {
        let config = ControlConfig {
            max_mass_flow: MassRate::new::<kilogram_per_second>(5.0),
            ..ControlConfig::default()
        };
        let ahu = AirHandlingUnit::with_config(HylandWexler::default(), config);

        let result =
            ahu.control_mass_flow(&design_scenario(), Setpoint::SupplyTemperature(celsius(18.0)));

        let best = result.unwrap_err().best_effort().unwrap();
        assert_relative_eq!(best.value, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn bypass_control_meets_indoor_humidity() {
        let ahu = AirHandlingUnit::new(HylandWexler::default());

        let solution = ahu
            .control_bypass(
                &design_scenario(),
                Setpoint::IndoorHumidity(Ratio::new::<ratio>(0.5)),
            )
            .unwrap();

        assert!(solution.is_converged());
        assert!((0.0..=1.0).contains(&solution.scenario.actual().bypass.get::<ratio>()));
    }
}
