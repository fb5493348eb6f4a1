//! Steady-state air-handling unit solver.
//!
//! A constant-air-volume unit mixes outdoor and recirculated air, cools and
//! dehumidifies part of the mixed stream in a wet coil, bypasses the rest,
//! reheats, and supplies the zone. The balances over the unit and the zone
//! form a 16-unknown linear system once the saturation curve at the coil
//! outlet is linearized; a fixed-point iteration on the coil saturation
//! temperature recovers the nonlinear solution.
//!
//! On top of the operating point solve, a control solve adjusts the mass
//! flow rate or the bypass fraction to meet a supply temperature or indoor
//! humidity setpoint.

mod control;
mod equations;
mod saturation;
mod scenario;
mod state;
mod summary;
mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub use control::{
    ControlConfig, ControlError, ControlSolution, ControlStatus, ControlVariable, OnNoSolution,
    SearchStatus, Setpoint,
};
pub use saturation::{SaturationConfig, SaturationError};
pub use scenario::{AirProperties, Inputs, Parameters, Scenario, ScenarioError};
pub use state::{HeatFlow, State, Station, UNKNOWNS};
pub use summary::{ChartLocation, ChartPoint, PROCESSES, Summary};
pub use system::{LinearError, LinearSystem, Matrix, Vector};

pub(crate) use control::solve as solve_control;
pub(crate) use equations::build;
pub(crate) use saturation::iterate;
