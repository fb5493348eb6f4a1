//! Dew point temperature by inversion of the saturation curve.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use super::Psychrometrics;

/// Temperature bracket searched for the dew point, in °C.
const BRACKET: [f64; 2] = [-60.0, 90.0];

/// Errors that can occur while computing a dew point.
#[derive(Debug, Error)]
pub enum DewPointError {
    /// The humidity ratio lies outside the saturation curve over the bracket.
    #[error("humidity ratio {humidity_ratio} is outside the dew point search range")]
    OutOfRange {
        /// Requested humidity ratio, kg/kg.
        humidity_ratio: f64,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("dew point search hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best humidity ratio residual achieved, kg/kg.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Returns the dew point temperature of air with the given humidity ratio.
///
/// The dew point is the temperature at which the saturation curve reaches
/// `humidity_ratio`. It is found by bisection over -60 °C to 90 °C.
///
/// # Errors
///
/// Returns [`DewPointError::OutOfRange`] if the humidity ratio is not finite
/// or not reachable by the saturation curve within the search range, and
/// other [`DewPointError`] variants if the bisection fails.
pub fn dew_point<P: Psychrometrics>(
    psychro: &P,
    humidity_ratio: f64,
) -> Result<ThermodynamicTemperature, DewPointError> {
    let [low, high] = BRACKET;
    let reachable = humidity_ratio.is_finite()
        && humidity_ratio >= psychro.saturation_value(low)
        && humidity_ratio <= psychro.saturation_value(high);
    if !reachable {
        return Err(DewPointError::OutOfRange { humidity_ratio });
    }

    let model = SaturationCurve { psychro };
    let problem = DewPointProblem { humidity_ratio };
    let config = bisection::Config {
        max_iters: 200,
        x_abs_tol: 1e-9,
        x_rel_tol: 0.0,
        residual_tol: 1e-12,
    };

    let solution = bisection::solve(
        &model,
        &problem,
        BRACKET,
        &config,
        |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(DewPointError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(ThermodynamicTemperature::new::<degree_celsius>(solution.x))
}

/// The saturation curve `w = f(θ)` as a model.
struct SaturationCurve<'a, P> {
    psychro: &'a P,
}

impl<P: Psychrometrics> Model for SaturationCurve<'_, P> {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, temperature: &f64) -> Result<f64, Infallible> {
        Ok(self.psychro.saturation_value(*temperature))
    }
}

/// Residual `f(θ) - w` for a target humidity ratio.
struct DewPointProblem {
    humidity_ratio: f64,
}

impl EquationProblem<1> for DewPointProblem {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, saturated: &f64) -> Result<[f64; 1], Infallible> {
        Ok([saturated - self.humidity_ratio])
    }
}
