//! Pure calculation logic: personal tax, scenario evaluation and the
//! optimization sweep.

pub mod common;
pub mod personal_tax;
pub mod scenario;
pub mod sweep;

pub use personal_tax::{BracketSlice, PersonalTaxBreakdown, PersonalTaxCalculator};
pub use scenario::ScenarioEvaluator;
pub use sweep::OptimizationSweep;
