//! Fixed-point iteration on the coil saturation temperature.
//!
//! The balance system replaces the saturation curve by its tangent at a
//! guessed temperature. Each pass solves the linear system, takes the solved
//! saturation temperature as the next linearization point, and stops once the
//! solved saturation humidity ratio lies on the curve within tolerance.

mod config;
mod error;

pub use config::SaturationConfig;
pub use error::SaturationError;

use tracing::{debug, trace};
use uom::si::{
    f64::ThermodynamicTemperature, ratio::ratio, thermodynamic_temperature::degree_celsius,
};

use crate::support::psychro::Psychrometrics;

use super::{
    equations::build,
    scenario::Scenario,
    state::{State, Station},
};

/// Solves the operating point of `scenario`, starting the saturation
/// linearization at `initial_guess`.
///
/// # Errors
///
/// Returns [`SaturationError::Linear`] if a linear solve fails, or
/// [`SaturationError::NonConvergence`] if the gap to the saturation curve
/// does not close within `config.max_iters` passes or the saturation
/// temperature leaves the range `psychro` can evaluate.
pub fn iterate<P: Psychrometrics>(
    scenario: &Scenario,
    psychro: &P,
    initial_guess: ThermodynamicTemperature,
    config: &SaturationConfig,
) -> Result<State, SaturationError> {
    let tolerance = config.tolerance.get::<ratio>();
    let mut theta_s = initial_guess.get::<degree_celsius>();
    let mut gap = f64::NAN;

    for iter in 1..=config.max_iters {
        // The property model has no tangent past its valid range.
        if !(psychro.saturation_slope(theta_s).is_finite()
            && psychro.saturation_value(theta_s).is_finite())
        {
            return Err(non_convergence(iter - 1, gap, theta_s));
        }

        let state = build(scenario, psychro, theta_s).solve()?;

        let x = state.as_array();
        theta_s = x[Station::Saturation.temperature_index()];
        let w_s = x[Station::Saturation.humidity_index()];
        gap = (psychro.saturation_value(theta_s) - w_s).abs();
        trace!(iter, theta_s, gap, "saturation pass");

        if gap < tolerance {
            debug!(iters = iter, theta_s, "saturation converged");
            return Ok(state);
        }
    }

    Err(non_convergence(config.max_iters, gap, theta_s))
}

fn non_convergence(iters: usize, gap: f64, theta_s: f64) -> SaturationError {
    SaturationError::NonConvergence {
        iters,
        gap,
        temperature: ThermodynamicTemperature::new::<degree_celsius>(theta_s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{MassRate, Power, ThermalConductance},
        mass_rate::kilogram_per_second,
        power::watt,
        thermal_conductance::watt_per_kelvin,
    };

    use crate::{
        models::hvac::ahu::core::{HeatFlow, LinearError, Parameters, test_support::*},
        support::psychro::HylandWexler,
    };

    fn solve(scenario: &Scenario) -> Result<State, SaturationError> {
        let config = SaturationConfig::default();
        iterate(scenario, &HylandWexler::default(), config.initial_guess, &config)
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn design_point_lands_on_the_saturation_curve() {
        let psychro = HylandWexler::default();
        let state = solve(&design_scenario()).unwrap();

        let theta_s = state
            .temperature(Station::Saturation)
            .get::<degree_celsius>();
        let w_s = state.humidity_ratio(Station::Saturation).get::<ratio>();

        assert!((psychro.saturation_value(theta_s) - w_s).abs() < 0.01e-3);
        assert_relative_eq!(theta_s, 5.72, epsilon = 0.05);
        assert_relative_eq!(
            state.temperature(Station::Mixed).get::<degree_celsius>(),
            26.58,
            epsilon = 0.05
        );
        assert_relative_eq!(
            state.temperature(Station::Supply).get::<degree_celsius>(),
            7.81,
            epsilon = 0.05
        );
        assert_relative_eq!(
            state.heat_flow(HeatFlow::CoilTotal).get::<watt>(),
            -95_800.0,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            state.heat_flow(HeatFlow::ZoneSensible).get::<watt>(),
            50_200.0,
            max_relative = 1e-3
        );
    }

    #[test]
    fn restarting_from_a_solution_reproduces_it() {
        let scenario = design_scenario();
        let first = solve(&scenario).unwrap();

        let config = SaturationConfig {
            max_iters: 1,
            ..SaturationConfig::default()
        };
        let again = iterate(
            &scenario,
            &HylandWexler::default(),
            first.temperature(Station::Saturation),
            &config,
        )
        .expect("a converged temperature should converge in one pass");

        for station in Station::ALL {
            assert_relative_eq!(
                again.temperature(station).get::<degree_celsius>(),
                first.temperature(station).get::<degree_celsius>(),
                epsilon = 1e-2
            );
            assert_relative_eq!(
                again.humidity_ratio(station).get::<ratio>(),
                first.humidity_ratio(station).get::<ratio>(),
                epsilon = 1e-5
            );
        }
        for flow in HeatFlow::ALL {
            assert_relative_eq!(
                again.heat_flow(flow).get::<watt>(),
                first.heat_flow(flow).get::<watt>(),
                epsilon = 1.0,
                max_relative = 1e-3
            );
        }
    }

    #[test]
    fn distant_guesses_reach_the_same_point() {
        let config = SaturationConfig::default();
        let reference = solve(&design_scenario()).unwrap();

        for guess in [-20.0, 20.0, 30.0] {
            let state = iterate(
                &design_scenario(),
                &HylandWexler::default(),
                celsius(guess),
                &config,
            )
            .unwrap();
            assert_relative_eq!(
                state.temperature(Station::Saturation).get::<degree_celsius>(),
                reference
                    .temperature(Station::Saturation)
                    .get::<degree_celsius>(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn iteration_limit_reports_non_convergence() {
        let config = SaturationConfig {
            max_iters: 1,
            ..SaturationConfig::default()
        };

        let result = iterate(
            &design_scenario(),
            &HylandWexler::default(),
            celsius(30.0),
            &config,
        );

        match result {
            Err(SaturationError::NonConvergence { iters, gap, .. }) => {
                assert_eq!(iters, 1);
                assert!(gap >= 0.01e-3);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn guess_outside_the_property_range_is_non_convergence() {
        let result = iterate(
            &design_scenario(),
            &HylandWexler::default(),
            celsius(-300.0),
            &SaturationConfig::default(),
        );

        match result {
            Err(SaturationError::NonConvergence {
                iters, temperature, ..
            }) => {
                assert_eq!(iters, 0);
                assert_relative_eq!(temperature.get::<degree_celsius>(), -300.0, epsilon = 1e-9);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn zero_gains_still_solve() {
        let parameters = Parameters {
            temperature_gain: ThermalConductance::new::<watt_per_kelvin>(0.0),
            humidity_gain: Power::new::<watt>(0.0),
            ..design_parameters()
        };
        let scenario = Scenario::new(parameters, design_inputs()).unwrap();

        let state = solve(&scenario).unwrap();

        // Without the temperature controller the coil does no work.
        assert_relative_eq!(
            state.heat_flow(HeatFlow::CoilTotal).get::<watt>(),
            0.0,
            epsilon = 1e-6
        );
        assert!(state.as_array().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn zero_mass_flow_is_singular() {
        let scenario = design_scenario()
            .with_mass_flow(MassRate::new::<kilogram_per_second>(0.0))
            .unwrap();

        assert_eq!(
            solve(&scenario),
            Err(SaturationError::Linear(LinearError::SingularSystem))
        );
    }
}
