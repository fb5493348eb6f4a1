//! Report of a solved operating point for psychrometric charts and tables.

use uom::si::{
    f64::{MassRate, Power, Ratio, ThermodynamicTemperature},
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::psychro::{Psychrometrics, dew_point};

use super::{
    scenario::Scenario,
    state::{HeatFlow, State, Station},
};

/// Where a chart point sits in the air path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartLocation {
    Outdoor,
    Station(Station),
}

impl ChartLocation {
    /// Chart points in plotting order: outdoor air, then every station.
    pub const ALL: [ChartLocation; 6] = [
        ChartLocation::Outdoor,
        ChartLocation::Station(Station::Mixed),
        ChartLocation::Station(Station::Saturation),
        ChartLocation::Station(Station::CoilLeaving),
        ChartLocation::Station(Station::Supply),
        ChartLocation::Station(Station::Indoor),
    ];

    /// Short label used on psychrometric charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ChartLocation::Outdoor => "o",
            ChartLocation::Station(station) => station.label(),
        }
    }

    /// Position in [`ChartLocation::ALL`].
    const fn index(self) -> usize {
        match self {
            ChartLocation::Outdoor => 0,
            ChartLocation::Station(station) => 1 + station as usize,
        }
    }
}

/// Processes drawn between chart points, as `(from, to)` pairs.
///
/// Mixing processes are drawn from each inlet to the mixed state, and the
/// coil-leaving state is reached both along the coil and along the bypass.
pub const PROCESSES: [(ChartLocation, ChartLocation); 7] = {
    use ChartLocation::{Outdoor, Station as At};
    [
        (Outdoor, At(Station::Mixed)),
        (At(Station::Indoor), At(Station::Mixed)),
        (At(Station::Mixed), At(Station::Saturation)),
        (At(Station::Saturation), At(Station::CoilLeaving)),
        (At(Station::Mixed), At(Station::CoilLeaving)),
        (At(Station::CoilLeaving), At(Station::Supply)),
        (At(Station::Supply), At(Station::Indoor)),
    ]
};

/// A moist-air state plotted on a psychrometric chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Where the point sits in the air path.
    pub location: ChartLocation,

    /// Dry-bulb temperature.
    pub temperature: ThermodynamicTemperature,

    /// Humidity ratio, in kg of water per kg of dry air.
    pub humidity_ratio: Ratio,

    /// Relative humidity at `temperature`.
    pub relative_humidity: Ratio,

    /// Dew point, or `None` for air too dry to have one in the searched range.
    pub dew_point: Option<ThermodynamicTemperature>,
}

impl ChartPoint {
    fn new<P: Psychrometrics>(
        psychro: &P,
        location: ChartLocation,
        temperature: f64,
        humidity_ratio: f64,
    ) -> Self {
        Self {
            location,
            temperature: ThermodynamicTemperature::new::<degree_celsius>(temperature),
            humidity_ratio: Ratio::new::<ratio>(humidity_ratio),
            relative_humidity: Ratio::new::<ratio>(
                psychro.relative_humidity(temperature, humidity_ratio),
            ),
            dew_point: dew_point(psychro, humidity_ratio).ok(),
        }
    }
}

/// Key results of an operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Chart points, in [`ChartLocation::ALL`] order.
    pub points: [ChartPoint; 6],

    /// Coil saturation temperature.
    pub apparatus_dew_point: ThermodynamicTemperature,

    /// Total cooling coil load (negative when cooling).
    pub coil_load: Power,

    /// Working supply mass flow rate.
    pub mass_flow: MassRate,

    /// Working outdoor air mass flow rate.
    pub outdoor_air_flow: MassRate,

    /// Working coil bypass fraction.
    pub bypass: Ratio,

    /// Every solved heat flow, in unknown-vector order.
    pub heat_flows: [(HeatFlow, Power); 6],
}

impl Summary {
    /// Summarizes `state`, the operating point of `scenario`.
    #[must_use]
    pub fn new<P: Psychrometrics>(psychro: &P, scenario: &Scenario, state: &State) -> Self {
        let raw = scenario.raw();
        let x = state.as_array();

        let outdoor = ChartPoint::new(
            psychro,
            ChartLocation::Outdoor,
            raw.theta_o,
            psychro.humidity_ratio(raw.theta_o, raw.phi_o),
        );
        let at = |station: Station| {
            ChartPoint::new(
                psychro,
                ChartLocation::Station(station),
                x[station.temperature_index()],
                x[station.humidity_index()],
            )
        };

        let points = [
            outdoor,
            at(Station::Mixed),
            at(Station::Saturation),
            at(Station::CoilLeaving),
            at(Station::Supply),
            at(Station::Indoor),
        ];

        Self {
            points,
            apparatus_dew_point: state.temperature(Station::Saturation),
            coil_load: state.heat_flow(HeatFlow::CoilTotal),
            mass_flow: scenario.actual().mass_flow,
            outdoor_air_flow: scenario.actual().outdoor_air_flow,
            bypass: scenario.actual().bypass,
            heat_flows: HeatFlow::ALL.map(|flow| (flow, state.heat_flow(flow))),
        }
    }

    /// Returns the chart point at `location`.
    #[must_use]
    pub fn point(&self, location: ChartLocation) -> &ChartPoint {
        &self.points[location.index()]
    }

    /// Returns the chart points joined by each process in [`PROCESSES`].
    pub fn processes(&self) -> impl Iterator<Item = (&ChartPoint, &ChartPoint)> {
        PROCESSES
            .into_iter()
            .map(move |(from, to)| (self.point(from), self.point(to)))
    }
}
