//! Setpoint tracking by bounded search on one unit parameter.
//!
//! A control solve adjusts either the supply mass flow rate or the coil
//! bypass fraction so that a controlled quantity (the supply temperature or
//! the indoor humidity) reaches its target. Each evaluation solves the full
//! saturated operating point, so the search runs over the same nonlinear
//! model used everywhere else.
//!
//! The search minimizes `½ r²` within the variable's bounds using golden
//! section search. The result counts as converged only when the returned
//! state is within the per-variable threshold of the setpoint. A miss is
//! reported as [`ControlError::NoSolutionFound`] unless the config opts into
//! [`OnNoSolution::BestEffort`].

mod config;
mod error;
mod problem;
mod search;
mod setpoint;
mod solution;
mod variable;

pub use config::{ControlConfig, OnNoSolution};
pub use error::ControlError;
pub use setpoint::Setpoint;
pub use solution::{ControlSolution, ControlStatus, SearchStatus};
pub use variable::ControlVariable;

use tracing::{debug, warn};

use crate::support::psychro::Psychrometrics;

use super::{saturation, scenario::Scenario, state::Station};

use problem::{ControlProblem, OperatingPointModel};
use search::search;

/// Finds the value of `variable` that drives `setpoint` to its target.
///
/// The returned scenario is a copy of `scenario` with the chosen value
/// applied; for humidity setpoints it also has the humidity controller
/// switched off. The input scenario is never modified.
///
/// # Errors
///
/// Returns [`ControlError::NoSolutionFound`] if the returned state misses
/// the setpoint threshold and the config does not allow best-effort results.
/// Other variants report invalid bounds or an operating point failure the
/// search could not steer around.
pub fn solve<P: Psychrometrics>(
    scenario: &Scenario,
    variable: ControlVariable,
    setpoint: Setpoint,
    psychro: &P,
    config: &ControlConfig,
) -> Result<ControlSolution, ControlError> {
    let base = setpoint.prepare(scenario)?;
    let target = setpoint.target(psychro, &base);
    let tolerance = variable.tolerance(config);

    let model = OperatingPointModel::new(psychro, &config.saturation);
    let problem = ControlProblem::new(base, variable, setpoint.index(), target);

    let best = search(
        &model,
        &problem,
        variable.bounds(config),
        variable.initial_guess(&base, config),
        tolerance,
        &config.search,
    )?;

    // Finalize with one more pass at the chosen value, restarted from the
    // saturation temperature the search ended on.
    let state = saturation::iterate(
        &best.input,
        psychro,
        best.output.temperature(Station::Saturation),
        &config.saturation,
    )
    .map_err(|source| ControlError::Saturation { x: best.x, source })?;

    let residual = problem.residual(&state);
    let cost = 0.5 * residual.powi(2);
    let status = if residual.abs() < tolerance {
        ControlStatus::Converged
    } else {
        ControlStatus::NotConverged
    };

    let solution = ControlSolution {
        status,
        variable,
        setpoint,
        value: best.x,
        residual,
        cost,
        search: best.status,
        iters: best.iters,
        scenario: best.input,
        state,
    };

    match (status, config.on_no_solution) {
        (ControlStatus::Converged, _) => {
            debug!(
                ?variable,
                value = solution.value,
                residual,
                iters = solution.iters,
                "control converged"
            );
            Ok(solution)
        }
        (ControlStatus::NotConverged, OnNoSolution::BestEffort) => {
            warn!(
                ?variable,
                value = solution.value,
                residual,
                tolerance,
                search_cost = best.cost,
                "control missed setpoint, returning best effort"
            );
            Ok(solution)
        }
        (ControlStatus::NotConverged, OnNoSolution::Error) => {
            warn!(
                ?variable,
                value = solution.value,
                residual,
                tolerance,
                search_cost = best.cost,
                "control missed setpoint"
            );
            Err(ControlError::NoSolutionFound {
                best: Box::new(solution),
            })
        }
    }
}
