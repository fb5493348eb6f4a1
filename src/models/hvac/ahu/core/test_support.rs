use uom::si::{
    f64::{MassRate, Power, Ratio, ThermalConductance, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use super::{AirProperties, Inputs, Parameters, Scenario};

/// Design parameters of the reference cooling-season unit.
pub(crate) fn design_parameters() -> Parameters {
    Parameters {
        mass_flow: MassRate::new::<kilogram_per_second>(3.1),
        outdoor_air_flow: MassRate::new::<kilogram_per_second>(1.0),
        bypass: Ratio::new::<ratio>(0.1),
        temperature_gain: ThermalConductance::new::<watt_per_kelvin>(1e10),
        humidity_gain: Power::new::<watt>(0.0),
    }
}

/// Summer design day for the reference building.
pub(crate) fn design_inputs() -> Inputs {
    Inputs {
        outdoor_temperature: ThermodynamicTemperature::new::<degree_celsius>(32.0),
        outdoor_relative_humidity: Ratio::new::<ratio>(0.5),
        indoor_temperature_setpoint: ThermodynamicTemperature::new::<degree_celsius>(24.0),
        indoor_humidity_setpoint: Ratio::new::<ratio>(0.5),
        infiltration: MassRate::new::<kilogram_per_second>(1.35),
        envelope_ua: ThermalConductance::new::<watt_per_kelvin>(675.0),
        sensible_load: Power::new::<watt>(34_000.0),
        latent_load: Power::new::<watt>(4_000.0),
        air: AirProperties::default(),
    }
}

pub(crate) fn design_scenario() -> Scenario {
    Scenario::new(design_parameters(), design_inputs()).expect("design scenario is valid")
}
