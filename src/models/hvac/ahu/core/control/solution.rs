use twine_solvers::optimization::golden_section;

use crate::models::hvac::ahu::core::{Scenario, State};

use super::{ControlVariable, Setpoint};

/// Whether a control solve met its setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStatus {
    /// The returned state is within the threshold of the setpoint.
    Converged,

    /// The best point found misses the threshold.
    NotConverged,
}

/// How the search settled on its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The initial guess already met the threshold, so no search was run.
    InitialGuess,

    /// Golden section search over the bounds ended with this status.
    GoldenSection(golden_section::Status),
}

/// The outcome of a control solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSolution {
    /// Whether `state` meets the setpoint.
    pub status: ControlStatus,

    /// The adjusted parameter.
    pub variable: ControlVariable,

    /// The setpoint being tracked.
    pub setpoint: Setpoint,

    /// Chosen value of the control variable, always within its bounds.
    pub value: f64,

    /// Controlled quantity of `state` minus its target, in °C or kg/kg.
    pub residual: f64,

    /// Least-squares cost `½ residual²`.
    pub cost: f64,

    /// How the search ended.
    pub search: SearchStatus,

    /// Golden section iterations, zero if the initial guess was kept.
    pub iters: usize,

    /// Scenario with the chosen value applied.
    pub scenario: Scenario,

    /// Operating point of `scenario`.
    pub state: State,
}

impl ControlSolution {
    /// Returns `true` if the setpoint was met.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == ControlStatus::Converged
    }
}
