//! Personal income tax on a family member's salary.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross salary, clamped to zero if negative |
//! | 2    | Taxable income: gross minus standard deduction (minimum 0) |
//! | 3    | Rebate: taxable income at or below the threshold owes exactly 0 |
//! | 4    | Bracket tax: each slab's share of taxable income × its marginal rate |
//! | 5    | Final tax: bracket tax × cess multiplier, rounded to 2 places |
//!
//! The rebate in step 3 is all-or-nothing. One rupee of taxable income above
//! the threshold brings back the full bracket tax on everything above the
//! zero-rate slab, so liability jumps rather than phasing in. Salary advice
//! downstream depends on that jump.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use payroll_core::PersonalTaxRegime;
//! use payroll_core::calculations::PersonalTaxCalculator;
//!
//! let regime = PersonalTaxRegime::default();
//! let calculator = PersonalTaxCalculator::new(&regime);
//!
//! // 12,00,000 - 75,000 = 11,25,000 taxable, inside the rebate.
//! assert_eq!(calculator.compute_tax(dec!(1200000)), Decimal::ZERO);
//!
//! // 29,25,000 taxable: 4,57,500 across the slabs, plus 4% cess.
//! assert_eq!(calculator.compute_tax(dec!(3000000)), dec!(475800.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PersonalTaxRegime;
use crate::calculations::common::{non_negative, round_half_up};

/// The part of taxable income that fell into one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower: Decimal,

    /// `None` for the unbounded top bracket.
    pub upper: Option<Decimal>,

    pub rate: Decimal,

    /// Income taxed at `rate`.
    pub taxed_amount: Decimal,

    /// `taxed_amount × rate`, before cess.
    pub tax: Decimal,
}

/// Step-by-step view of a personal tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTaxBreakdown {
    /// Gross salary after clamping to zero.
    pub gross_income: Decimal,

    pub taxable_income: Decimal,

    /// True when the rebate zeroed the liability. `slices` is empty then.
    pub rebate_applied: bool,

    pub slices: Vec<BracketSlice>,

    /// Sum of slice taxes, before cess.
    pub bracket_tax: Decimal,

    pub total_tax: Decimal,
}

impl PersonalTaxBreakdown {
    fn rebated(
        gross_income: Decimal,
        taxable_income: Decimal,
    ) -> Self {
        Self {
            gross_income,
            taxable_income,
            rebate_applied: true,
            slices: Vec::new(),
            bracket_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
        }
    }
}

/// Calculator for personal income tax under a [`PersonalTaxRegime`].
///
/// Infallible: every input is coerced into range, and the schedule is
/// guaranteed to cover all income by [`TaxSchedule`](crate::TaxSchedule).
#[derive(Debug, Clone, Copy)]
pub struct PersonalTaxCalculator<'a> {
    regime: &'a PersonalTaxRegime,
}

impl<'a> PersonalTaxCalculator<'a> {
    pub fn new(regime: &'a PersonalTaxRegime) -> Self {
        Self { regime }
    }

    /// Tax owed on a gross annual salary.
    pub fn compute_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        self.breakdown(gross_income).total_tax
    }

    /// Runs the full calculation and keeps the intermediate values.
    pub fn breakdown(
        &self,
        gross_income: Decimal,
    ) -> PersonalTaxBreakdown {
        let gross_income = non_negative(gross_income);
        let taxable_income = self.taxable_income(gross_income);

        if self.is_rebated(taxable_income) {
            return PersonalTaxBreakdown::rebated(gross_income, taxable_income);
        }

        let slices = self.bracket_slices(taxable_income);
        let bracket_tax: Decimal = slices.iter().map(|slice| slice.tax).sum();
        let total_tax = self.apply_cess(bracket_tax);

        PersonalTaxBreakdown {
            gross_income,
            taxable_income,
            rebate_applied: false,
            slices,
            bracket_tax,
            total_tax,
        }
    }

    /// Largest gross salary that still owes no tax.
    pub fn zero_tax_ceiling(&self) -> Decimal {
        self.regime
            .standard_deduction
            .saturating_add(self.regime.rebate_threshold)
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        non_negative(gross_income - self.regime.standard_deduction)
    }

    fn is_rebated(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income <= self.regime.rebate_threshold
    }

    /// Walks the schedule upwards until taxable income is used up.
    fn bracket_slices(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BracketSlice> {
        let mut slices = Vec::new();
        for (lower, upper, rate) in self.regime.schedule.slabs() {
            if taxable_income <= lower {
                break;
            }
            let top = upper.map_or(taxable_income, |bound| bound.min(taxable_income));
            let taxed_amount = top - lower;
            slices.push(BracketSlice {
                lower,
                upper,
                rate,
                taxed_amount,
                tax: taxed_amount * rate,
            });
        }
        slices
    }

    fn apply_cess(
        &self,
        bracket_tax: Decimal,
    ) -> Decimal {
        round_half_up(bracket_tax.saturating_mul(self.regime.cess_multiplier))
    }
}
