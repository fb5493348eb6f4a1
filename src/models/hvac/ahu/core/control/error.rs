use thiserror::Error;
use twine_solvers::optimization::golden_section;

use crate::models::hvac::ahu::core::{SaturationError, ScenarioError};

use super::ControlSolution;

/// Errors that can occur during a control solve.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The search interval is empty or not finite.
    #[error("invalid search interval: [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },

    /// The starting value is not a number.
    #[error("initial guess is not a number")]
    InvalidInitialGuess,

    /// The scenario could not be prepared for the search.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// The operating point could not be solved at the initial guess or at
    /// the chosen value.
    #[error("operating point failed at x={x}")]
    Saturation {
        x: f64,
        #[source]
        source: SaturationError,
    },

    /// The search could not evaluate enough points to make progress.
    #[error("control search failed")]
    Search(#[source] golden_section::Error),

    /// No value within the bounds met the threshold.
    ///
    /// Carries the best point found.
    #[error("no solution found: best residual={}", .best.residual)]
    NoSolutionFound { best: Box<ControlSolution> },
}

impl ControlError {
    /// Returns the best-effort solution carried by [`ControlError::NoSolutionFound`].
    #[must_use]
    pub fn best_effort(self) -> Option<ControlSolution> {
        match self {
            Self::NoSolutionFound { best } => Some(*best),
            _ => None,
        }
    }
}
