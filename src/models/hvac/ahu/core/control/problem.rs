use twine_core::{Model, OptimizationProblem};

use crate::{
    models::hvac::ahu::core::{
        SaturationConfig, SaturationError, Scenario, ScenarioError, State, saturation,
    },
    support::psychro::Psychrometrics,
};

use super::ControlVariable;

/// Solves the saturated operating point of a scenario.
pub(super) struct OperatingPointModel<'a, P> {
    psychro: &'a P,
    config: &'a SaturationConfig,
}

impl<'a, P> OperatingPointModel<'a, P> {
    pub(super) fn new(psychro: &'a P, config: &'a SaturationConfig) -> Self {
        Self { psychro, config }
    }
}

impl<P: Psychrometrics> Model for OperatingPointModel<'_, P> {
    type Input = Scenario;
    type Output = State;
    type Error = SaturationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        saturation::iterate(input, self.psychro, self.config.initial_guess, self.config)
    }
}

/// Maps a control value onto a scenario and scores the setpoint error.
///
/// The objective is the least-squares cost `½ r²` of the residual
/// `r = measured - target`.
pub(super) struct ControlProblem {
    base: Scenario,
    variable: ControlVariable,
    index: usize,
    target: f64,
}

impl ControlProblem {
    pub(super) fn new(
        base: Scenario,
        variable: ControlVariable,
        index: usize,
        target: f64,
    ) -> Self {
        Self {
            base,
            variable,
            index,
            target,
        }
    }

    /// Controlled quantity of `state` minus its target.
    pub(super) fn residual(&self, state: &State) -> f64 {
        state.as_array()[self.index] - self.target
    }
}

impl OptimizationProblem<1> for ControlProblem {
    type Input = Scenario;
    type Output = State;
    type Error = ScenarioError;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        self.variable.apply(&self.base, x[0])
    }

    fn objective(&self, _input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error> {
        Ok(0.5 * self.residual(output).powi(2))
    }
}
