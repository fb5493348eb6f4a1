use nalgebra::SVector;
use uom::si::{
    f64::{Power, Ratio, ThermodynamicTemperature},
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

/// Number of unknowns in the balance system.
pub const UNKNOWNS: usize = 16;

/// An air station along the unit, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Station {
    /// Outlet of the outdoor/recirculated air mixing box.
    Mixed,
    /// Saturated air leaving the wet part of the cooling coil.
    Saturation,
    /// Coil-leaving air after the bypass stream rejoins.
    CoilLeaving,
    /// Supply air leaving the reheat coil.
    Supply,
    /// Indoor (zone) air.
    Indoor,
}

impl Station {
    /// All stations, in flow order.
    pub const ALL: [Station; 5] = [
        Station::Mixed,
        Station::Saturation,
        Station::CoilLeaving,
        Station::Supply,
        Station::Indoor,
    ];

    /// Position of the station's temperature in the unknown vector.
    #[must_use]
    pub const fn temperature_index(self) -> usize {
        2 * (self as usize)
    }

    /// Position of the station's humidity ratio in the unknown vector.
    #[must_use]
    pub const fn humidity_index(self) -> usize {
        2 * (self as usize) + 1
    }

    /// Short label used on psychrometric charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Station::Mixed => "M",
            Station::Saturation => "s",
            Station::CoilLeaving => "C",
            Station::Supply => "S",
            Station::Indoor => "I",
        }
    }
}

/// A heat flow rate solved for by the balance system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatFlow {
    /// Total load of the cooling coil (negative when cooling).
    CoilTotal = 10,
    /// Sensible load of the cooling coil.
    CoilSensible,
    /// Latent load of the cooling coil.
    CoilLatent,
    /// Sensible load of the reheat coil.
    ReheatSensible,
    /// Sensible heat delivered to the zone by the supply air.
    ZoneSensible,
    /// Latent heat delivered to the zone by the supply air.
    ZoneLatent,
}

impl HeatFlow {
    /// All heat flows, in unknown-vector order.
    pub const ALL: [HeatFlow; 6] = [
        HeatFlow::CoilTotal,
        HeatFlow::CoilSensible,
        HeatFlow::CoilLatent,
        HeatFlow::ReheatSensible,
        HeatFlow::ZoneSensible,
        HeatFlow::ZoneLatent,
    ];

    /// Position of the heat flow in the unknown vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Solved operating point of the unit.
///
/// The unknowns are ordered as the station temperature and humidity ratio
/// pairs `θM, wM, θs, ws, θC, wC, θS, wS, θI, wI`, followed by the heat flows
/// `QtCC, QsCC, QlCC, QsHC, QsTZ, QlTZ`.
/// Values are in °C, kg/kg, and W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    values: [f64; UNKNOWNS],
}

impl State {
    /// Wraps a solved unknown vector.
    #[must_use]
    pub fn from_array(values: [f64; UNKNOWNS]) -> Self {
        Self { values }
    }

    /// Returns the unknown vector in plain units.
    #[must_use]
    pub fn as_array(&self) -> &[f64; UNKNOWNS] {
        &self.values
    }

    /// Returns the dry-bulb temperature at `station`.
    #[must_use]
    pub fn temperature(&self, station: Station) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.values[station.temperature_index()])
    }

    /// Returns the humidity ratio at `station`.
    #[must_use]
    pub fn humidity_ratio(&self, station: Station) -> Ratio {
        Ratio::new::<ratio>(self.values[station.humidity_index()])
    }

    /// Returns the heat flow rate `flow`.
    #[must_use]
    pub fn heat_flow(&self, flow: HeatFlow) -> Power {
        Power::new::<watt>(self.values[flow.index()])
    }

    pub(super) fn to_vector(self) -> SVector<f64, UNKNOWNS> {
        SVector::from_column_slice(&self.values)
    }
}

impl From<SVector<f64, UNKNOWNS>> for State {
    fn from(vector: SVector<f64, UNKNOWNS>) -> Self {
        let mut values = [0.0; UNKNOWNS];
        values.copy_from_slice(vector.as_slice());
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn indices_cover_every_unknown() {
        let mut seen = [false; UNKNOWNS];
        for station in Station::ALL {
            seen[station.temperature_index()] = true;
            seen[station.humidity_index()] = true;
        }
        for flow in HeatFlow::ALL {
            seen[flow.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn typed_accessors_read_the_right_slots() {
        let mut values = [0.0; UNKNOWNS];
        values[4] = 7.8;
        values[5] = 0.006;
        values[14] = 50_200.0;
        let state = State::from_array(values);

        assert_relative_eq!(
            state
                .temperature(Station::CoilLeaving)
                .get::<degree_celsius>(),
            7.8,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            state.humidity_ratio(Station::CoilLeaving).get::<ratio>(),
            0.006
        );
        assert_relative_eq!(state.heat_flow(HeatFlow::ZoneSensible).get::<watt>(), 50_200.0);
        assert_eq!(State::from(state.to_vector()), state);
    }
}
