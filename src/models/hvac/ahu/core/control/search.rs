use tracing::trace;
use twine_solvers::optimization::{EvalError, evaluate, golden_section};

use crate::{
    models::hvac::ahu::core::{Scenario, State},
    support::psychro::Psychrometrics,
};

use super::{
    ControlError, SearchStatus,
    problem::{ControlProblem, OperatingPointModel},
};

/// Best point found by a control search.
pub(super) struct Search {
    pub(super) x: f64,
    pub(super) cost: f64,
    pub(super) input: Scenario,
    pub(super) output: State,
    pub(super) status: SearchStatus,
    pub(super) iters: usize,
}

/// Minimizes the control cost over `bounds`.
///
/// The initial guess is evaluated first and kept without searching if its
/// residual already meets `tolerance`. Otherwise golden section search runs
/// over the whole interval, with failed operating points treated as worse
/// than the current best, and the better of the two points is returned.
pub(super) fn search<P: Psychrometrics>(
    model: &OperatingPointModel<'_, P>,
    problem: &ControlProblem,
    bounds: [f64; 2],
    initial_guess: f64,
    tolerance: f64,
    config: &golden_section::Config,
) -> Result<Search, ControlError> {
    let [lower, upper] = bounds;
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(ControlError::InvalidBounds { lower, upper });
    }
    if initial_guess.is_nan() {
        return Err(ControlError::InvalidInitialGuess);
    }

    let x0 = initial_guess.clamp(lower, upper);
    let start = evaluate(model, problem, [x0]).map_err(|error| match error {
        EvalError::Model(source) => ControlError::Saturation { x: x0, source },
        EvalError::Problem(source) => ControlError::Scenario(source),
    })?;

    let start_residual = problem.residual(&start.snapshot.output);
    trace!(x = x0, residual = start_residual, "control search start");
    if start_residual.abs() < tolerance {
        return Ok(Search {
            x: x0,
            cost: start.objective,
            input: start.snapshot.input,
            output: start.snapshot.output,
            status: SearchStatus::InitialGuess,
            iters: 0,
        });
    }

    let solution = golden_section::minimize(
        model,
        problem,
        bounds,
        config,
        |event: &golden_section::Event<'_, _, _>| match event {
            golden_section::Event::Evaluated { point, .. } => {
                trace!(x = point.x, cost = point.objective, "control search step");
                None
            }
            golden_section::Event::ModelFailed { .. }
            | golden_section::Event::ProblemFailed { .. } => {
                // Singular or non-converging points are steered around.
                trace!(x = event.x(), "control search step failed");
                Some(golden_section::Action::AssumeWorse)
            }
        },
    )
    .map_err(ControlError::Search)?;

    let status = SearchStatus::GoldenSection(solution.status);
    if start.objective < solution.objective {
        return Ok(Search {
            x: x0,
            cost: start.objective,
            input: start.snapshot.input,
            output: start.snapshot.output,
            status,
            iters: solution.iters,
        });
    }

    Ok(Search {
        x: solution.x,
        cost: solution.objective,
        input: solution.snapshot.input,
        output: solution.snapshot.output,
        status,
        iters: solution.iters,
    })
}
