use nalgebra::{SMatrix, SVector};
use thiserror::Error;

use super::state::{State, UNKNOWNS};

/// Coefficient matrix of the balance system.
pub type Matrix = SMatrix<f64, UNKNOWNS, UNKNOWNS>;

/// Right-hand side (or residual) vector of the balance system.
pub type Vector = SVector<f64, UNKNOWNS>;

/// Errors from solving the balance system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinearError {
    /// The coefficient matrix is singular or the solution is not finite.
    ///
    /// A zero mass flow rate or a fully bypassed coil makes the coil and
    /// mixing balances degenerate.
    #[error("balance system is singular")]
    SingularSystem,
}

/// The linear balance system `A·x = b` of one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSystem {
    matrix: Matrix,
    rhs: Vector,
}

impl LinearSystem {
    pub(super) fn new(matrix: Matrix, rhs: Vector) -> Self {
        Self { matrix, rhs }
    }

    /// Returns the coefficient matrix `A`.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Returns the right-hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> &Vector {
        &self.rhs
    }

    /// Returns `A·x - b` for the given state.
    #[must_use]
    pub fn residuals(&self, state: &State) -> Vector {
        self.matrix * state.to_vector() - self.rhs
    }

    /// Solves the system by LU decomposition with partial pivoting.
    ///
    /// # Errors
    ///
    /// Returns [`LinearError::SingularSystem`] if the matrix is singular or
    /// the solution contains non-finite values.
    pub fn solve(&self) -> Result<State, LinearError> {
        let x = self
            .matrix
            .lu()
            .solve(&self.rhs)
            .ok_or(LinearError::SingularSystem)?;

        if x.iter().all(|value| value.is_finite()) {
            Ok(State::from(x))
        } else {
            Err(LinearError::SingularSystem)
        }
    }
}
