//! Parameters and inputs defining one operating scenario.

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        AvailableEnergy, MassRate, Power, Ratio, SpecificHeatCapacity, ThermalConductance,
        ThermodynamicTemperature,
    },
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::constraint::{
    Constrained, Constraint, ConstraintError, NonNegative, UnitInterval,
};

/// Adjustable parameters of the air-handling unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Dry-air mass flow rate supplied to the zone.
    pub mass_flow: MassRate,

    /// Fresh (outdoor) dry-air mass flow rate.
    pub outdoor_air_flow: MassRate,

    /// Fraction of the mixed-air flow routed around the cooling coil.
    pub bypass: Ratio,

    /// Gain `Kθ` of the indoor temperature controller acting on the cooling coil.
    pub temperature_gain: ThermalConductance,

    /// Gain `Kw` of the indoor humidity controller acting on the reheat coil.
    ///
    /// Expressed as power per unit humidity ratio (W per kg/kg).
    /// Zero disables the controller.
    pub humidity_gain: Power,
}

/// Boundary conditions and loads of the served building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    /// Outdoor dry-bulb temperature.
    pub outdoor_temperature: ThermodynamicTemperature,

    /// Outdoor relative humidity.
    pub outdoor_relative_humidity: Ratio,

    /// Indoor temperature setpoint.
    pub indoor_temperature_setpoint: ThermodynamicTemperature,

    /// Indoor relative humidity setpoint.
    pub indoor_humidity_setpoint: Ratio,

    /// Infiltration dry-air mass flow rate.
    pub infiltration: MassRate,

    /// Overall envelope conductance.
    pub envelope_ua: ThermalConductance,

    /// Auxiliary sensible load on the zone.
    pub sensible_load: Power,

    /// Auxiliary latent load on the zone.
    pub latent_load: Power,

    /// Moist-air constants used by the balances.
    pub air: AirProperties,
}

/// Moist-air constants used by the energy balances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirProperties {
    /// Specific heat of air.
    pub specific_heat: SpecificHeatCapacity,

    /// Latent heat of vaporization of water.
    pub latent_heat: AvailableEnergy,
}

impl Default for AirProperties {
    fn default() -> Self {
        Self {
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1_000.0),
            latent_heat: AvailableEnergy::new::<joule_per_kilogram>(2_496e3),
        }
    }
}

/// Errors from validating a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("invalid {field}: {source}")]
    Constraint {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}

/// A validated scenario: design parameters, working parameters, and inputs.
///
/// The design parameters are a fixed snapshot taken at construction.
/// The working ("actual") parameters start equal to the design and are
/// changed only by building a new scenario with one of the `with_*` methods,
/// so a scenario can be shared freely between independent evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    design: Parameters,
    actual: Parameters,
    inputs: Inputs,
}

impl Scenario {
    /// Creates a scenario whose working parameters equal the design.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if any value is non-finite, a flow rate,
    /// conductance, or gain is negative, or a relative humidity or the
    /// bypass fraction lies outside `[0, 1]`.
    pub fn new(parameters: Parameters, inputs: Inputs) -> Result<Self, ScenarioError> {
        validate(&parameters, &inputs)?;
        Ok(Self {
            design: parameters,
            actual: parameters,
            inputs,
        })
    }

    /// Returns the design parameters.
    #[must_use]
    pub fn design(&self) -> &Parameters {
        &self.design
    }

    /// Returns the working parameters.
    #[must_use]
    pub fn actual(&self) -> &Parameters {
        &self.actual
    }

    /// Returns the inputs.
    #[must_use]
    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Returns a copy with the working mass flow rate replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the mass flow rate is negative or not finite.
    pub fn with_mass_flow(&self, mass_flow: MassRate) -> Result<Self, ScenarioError> {
        self.with_actual(Parameters {
            mass_flow,
            ..self.actual
        })
    }

    /// Returns a copy with the working bypass fraction replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the fraction lies outside `[0, 1]`.
    pub fn with_bypass(&self, bypass: Ratio) -> Result<Self, ScenarioError> {
        self.with_actual(Parameters {
            bypass,
            ..self.actual
        })
    }

    /// Returns a copy with the working humidity controller gain replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the gain is negative or not finite.
    pub fn with_humidity_gain(&self, humidity_gain: Power) -> Result<Self, ScenarioError> {
        self.with_actual(Parameters {
            humidity_gain,
            ..self.actual
        })
    }

    /// Returns a copy with new inputs, keeping both parameter sets.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the inputs are invalid.
    pub fn with_inputs(&self, inputs: Inputs) -> Result<Self, ScenarioError> {
        validate(&self.actual, &inputs)?;
        Ok(Self { inputs, ..*self })
    }

    /// Returns a copy with the working parameters reset to the design.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            actual: self.design,
            ..*self
        }
    }

    fn with_actual(&self, actual: Parameters) -> Result<Self, ScenarioError> {
        validate(&actual, &self.inputs)?;
        Ok(Self { actual, ..*self })
    }

    /// Plain-number view of the working parameters and inputs.
    pub(super) fn raw(&self) -> Raw {
        Raw::new(&self.actual, &self.inputs)
    }
}

/// Working values in the units used by the balance equations.
///
/// Temperatures in °C, flows in kg/s, conductances in W/K, powers in W,
/// fractions and humidity ratios as plain ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Raw {
    pub(super) m: f64,
    pub(super) mo: f64,
    pub(super) beta: f64,
    pub(super) k_theta: f64,
    pub(super) k_w: f64,
    pub(super) theta_o: f64,
    pub(super) phi_o: f64,
    pub(super) theta_i_sp: f64,
    pub(super) phi_i_sp: f64,
    pub(super) mi: f64,
    pub(super) ua: f64,
    pub(super) q_sa: f64,
    pub(super) q_la: f64,
    pub(super) c: f64,
    pub(super) l: f64,
}

impl Raw {
    fn new(parameters: &Parameters, inputs: &Inputs) -> Self {
        Self {
            m: parameters.mass_flow.get::<kilogram_per_second>(),
            mo: parameters.outdoor_air_flow.get::<kilogram_per_second>(),
            beta: parameters.bypass.get::<ratio>(),
            k_theta: parameters.temperature_gain.get::<watt_per_kelvin>(),
            k_w: parameters.humidity_gain.get::<watt>(),
            theta_o: inputs.outdoor_temperature.get::<degree_celsius>(),
            phi_o: inputs.outdoor_relative_humidity.get::<ratio>(),
            theta_i_sp: inputs.indoor_temperature_setpoint.get::<degree_celsius>(),
            phi_i_sp: inputs.indoor_humidity_setpoint.get::<ratio>(),
            mi: inputs.infiltration.get::<kilogram_per_second>(),
            ua: inputs.envelope_ua.get::<watt_per_kelvin>(),
            q_sa: inputs.sensible_load.get::<watt>(),
            q_la: inputs.latent_load.get::<watt>(),
            c: inputs
                .air
                .specific_heat
                .get::<joule_per_kilogram_kelvin>(),
            l: inputs.air.latent_heat.get::<joule_per_kilogram>(),
        }
    }

    fn values(&self) -> [(&'static str, f64); 15] {
        [
            ("mass flow", self.m),
            ("outdoor air flow", self.mo),
            ("bypass", self.beta),
            ("temperature gain", self.k_theta),
            ("humidity gain", self.k_w),
            ("outdoor temperature", self.theta_o),
            ("outdoor relative humidity", self.phi_o),
            ("indoor temperature setpoint", self.theta_i_sp),
            ("indoor humidity setpoint", self.phi_i_sp),
            ("infiltration", self.mi),
            ("envelope UA", self.ua),
            ("sensible load", self.q_sa),
            ("latent load", self.q_la),
            ("specific heat", self.c),
            ("latent heat", self.l),
        ]
    }
}

/// Checks that every value is finite, then the sign and range constraints.
fn validate(parameters: &Parameters, inputs: &Inputs) -> Result<(), ScenarioError> {
    for (field, value) in Raw::new(parameters, inputs).values() {
        if !value.is_finite() {
            return Err(ScenarioError::NotFinite { field });
        }
    }

    check::<_, NonNegative>("mass flow", parameters.mass_flow)?;
    check::<_, NonNegative>("outdoor air flow", parameters.outdoor_air_flow)?;
    check::<_, UnitInterval>("bypass", parameters.bypass)?;
    check::<_, NonNegative>("temperature gain", parameters.temperature_gain)?;
    check::<_, NonNegative>("humidity gain", parameters.humidity_gain)?;

    check::<_, UnitInterval>("outdoor relative humidity", inputs.outdoor_relative_humidity)?;
    check::<_, UnitInterval>("indoor humidity setpoint", inputs.indoor_humidity_setpoint)?;
    check::<_, NonNegative>("infiltration", inputs.infiltration)?;
    check::<_, NonNegative>("envelope UA", inputs.envelope_ua)?;
    check::<_, NonNegative>("specific heat", inputs.air.specific_heat)?;
    check::<_, NonNegative>("latent heat", inputs.air.latent_heat)?;

    Ok(())
}

fn check<T, C: Constraint<T>>(field: &'static str, value: T) -> Result<(), ScenarioError> {
    Constrained::<T, C>::new(value)
        .map(|_| ())
        .map_err(|source| ScenarioError::Constraint { field, source })
}
