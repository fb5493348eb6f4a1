//! Heating, ventilation, and air-conditioning models.

pub mod ahu;
