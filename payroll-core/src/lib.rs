//! Salary-versus-profit retention engine for closely held companies.
//!
//! The engine compares paying revenue out as salary to family-member
//! employees (taxed on a progressive personal schedule) with keeping it as
//! company profit (taxed at a flat corporate rate), and sweeps a headcount by
//! salary lattice to show which allocation keeps the most after tax.

pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::{Engine, ScenarioModel};
pub use models::*;
