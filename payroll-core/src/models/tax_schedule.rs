use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Errors that can occur when building a [`TaxSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxScheduleError {
    /// The schedule has no brackets at all.
    #[error("tax schedule has no brackets")]
    Empty,

    /// A marginal rate is outside [0, 1].
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    /// An upper bound is not strictly above the previous one (or not positive).
    #[error("bracket {index} upper bound {bound} must be greater than {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    /// An unbounded bracket appears before the end of the schedule.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedNotLast(usize),

    /// The last bracket has an upper bound, so income above it is not covered.
    #[error("last bracket must be unbounded, got upper bound {0}")]
    BoundedTop(Decimal),
}

/// A progressive schedule covering `[0, ∞)` with contiguous brackets.
///
/// Construction validates that upper bounds strictly increase and that the
/// schedule ends with an unbounded bracket, so the bracket walk in
/// [`PersonalTaxCalculator`](crate::calculations::PersonalTaxCalculator)
/// never runs out of brackets.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{TaxBracket, TaxSchedule, TaxScheduleError};
///
/// let schedule = TaxSchedule::new(vec![
///     TaxBracket::bounded(dec!(400000), dec!(0.00)),
///     TaxBracket::unbounded(dec!(0.05)),
/// ])
/// .unwrap();
/// assert_eq!(schedule.brackets().len(), 2);
///
/// let open_ended = TaxSchedule::new(vec![TaxBracket::bounded(dec!(400000), dec!(0.05))]);
/// assert_eq!(open_ended, Err(TaxScheduleError::BoundedTop(dec!(400000))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Validates and wraps an ordered list of brackets.
    ///
    /// # Errors
    ///
    /// Returns [`TaxScheduleError`] if the list is empty, a rate is outside
    /// [0, 1], bounds do not strictly increase from zero, or the schedule is
    /// not terminated by exactly one unbounded bracket.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxScheduleError> {
        let Some(last) = brackets.last() else {
            return Err(TaxScheduleError::Empty);
        };
        if let Some(bound) = last.upper_bound {
            return Err(TaxScheduleError::BoundedTop(bound));
        }

        let last_index = brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TaxScheduleError::InvalidRate {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.upper_bound {
                Some(bound) if bound <= previous => {
                    return Err(TaxScheduleError::NonIncreasingBound {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(bound) => previous = bound,
                None if index != last_index => {
                    return Err(TaxScheduleError::UnboundedNotLast(index));
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Brackets in ascending order; the last one is always unbounded.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Iterates `(lower, upper, rate)` with the implied lower bound filled in.
    pub fn slabs(&self) -> impl Iterator<Item = (Decimal, Option<Decimal>, Decimal)> + '_ {
        let mut lower = Decimal::ZERO;
        self.brackets.iter().map(move |bracket| {
            let slab = (lower, bracket.upper_bound, bracket.rate);
            if let Some(upper) = bracket.upper_bound {
                lower = upper;
            }
            slab
        })
    }
}

impl Default for TaxSchedule {
    /// The modeled personal schedule, from 0% up to a 30% top slab.
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(dec!(400000), dec!(0.00)),
                TaxBracket::bounded(dec!(800000), dec!(0.05)),
                TaxBracket::bounded(dec!(1200000), dec!(0.10)),
                TaxBracket::bounded(dec!(1600000), dec!(0.15)),
                TaxBracket::bounded(dec!(2000000), dec!(0.20)),
                TaxBracket::bounded(dec!(2400000), dec!(0.25)),
                TaxBracket::unbounded(dec!(0.30)),
            ],
        }
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxSchedule {
    type Error = TaxScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxSchedule> for Vec<TaxBracket> {
    fn from(schedule: TaxSchedule) -> Self {
        schedule.brackets
    }
}
