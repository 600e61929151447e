use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when validating a [`SweepGrid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepGridError {
    #[error("sweep needs at least one headcount")]
    NoHeadcounts,

    #[error("sweep needs at least one salary step")]
    NoSalarySteps,

    #[error("headcount must be positive")]
    ZeroHeadcount,

    #[error("salary step must be non-negative, got {0}")]
    NegativeSalaryStep(Decimal),
}

/// The two axes of an optimization sweep.
///
/// The default is a 6 × 8 lattice: one to six family members, and salary
/// steps that include the largest salary still free of personal tax
/// (12,75,000 under the default regime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepGrid {
    pub headcounts: Vec<u32>,
    pub salary_steps: Vec<Decimal>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            headcounts: (1..=6).collect(),
            salary_steps: vec![
                dec!(0),
                dec!(500000),
                dec!(1000000),
                dec!(1275000),
                dec!(1500000),
                dec!(2000000),
                dec!(2500000),
                dec!(3000000),
            ],
        }
    }
}

impl SweepGrid {
    /// Rejects grids the front-end should never hand to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`SweepGridError`] if either axis is empty, a headcount is
    /// zero, or a salary step is negative.
    pub fn validate(&self) -> Result<(), SweepGridError> {
        if self.headcounts.is_empty() {
            return Err(SweepGridError::NoHeadcounts);
        }
        if self.salary_steps.is_empty() {
            return Err(SweepGridError::NoSalarySteps);
        }
        if self.headcounts.contains(&0) {
            return Err(SweepGridError::ZeroHeadcount);
        }
        if let Some(step) = self.salary_steps.iter().find(|s| **s < Decimal::ZERO) {
            return Err(SweepGridError::NegativeSalaryStep(*step));
        }
        Ok(())
    }
}
