//! Evaluation of a single salary-versus-profit scenario.
//!
//! Sums and products saturate at [`Decimal::MAX`] instead of overflowing, so
//! any amount the caller can express still yields a result.
//!
//! # Calculation Steps
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Total salary outflow: headcount × salary per head |
//! | 2    | Total expenses: fixed + flexible + line 1 |
//! | 3    | Pre-tax profit: revenue − line 2 (minimum 0, losses earn no credit) |
//! | 4    | Corporate tax: line 3 × effective corporate rate |
//! | 5    | Post-tax profit: line 3 − line 4 |
//! | 6    | Personal tax per head on the salary |
//! | 7    | Net salary per head: salary − line 6 |
//! | 8    | Family net salary: headcount × line 7 |
//! | 9    | Total retained: line 5 + line 8 |
//! | 10   | Efficiency ratio: line 9 ÷ revenue (0 when revenue is 0) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::{RegimeConfig, ScenarioInput};
//! use payroll_core::calculations::ScenarioEvaluator;
//!
//! let regime = RegimeConfig::default();
//! let evaluator = ScenarioEvaluator::new(&regime);
//!
//! let result = evaluator.evaluate(&ScenarioInput {
//!     revenue: dec!(5000000),
//!     fixed_expenses: dec!(1000000),
//!     flexible_expenses: dec!(500000),
//!     headcount: 2,
//!     salary_per_head: dec!(1200000),
//! });
//!
//! assert_eq!(result.pre_tax_profit, dec!(1100000));
//! assert_eq!(result.corporate_tax, dec!(276848.00));
//! assert_eq!(result.total_retained, dec!(3223152.00));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::PersonalTaxCalculator;
use crate::calculations::common::{non_negative, round_half_up};
use crate::{RegimeConfig, ScenarioInput, ScenarioResult};

/// Evaluates scenarios against a [`RegimeConfig`].
///
/// Holds no state between calls, so identical inputs always give identical
/// results and the evaluator can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioEvaluator<'a> {
    regime: &'a RegimeConfig,
}

impl<'a> ScenarioEvaluator<'a> {
    pub fn new(regime: &'a RegimeConfig) -> Self {
        Self { regime }
    }

    /// Computes every derived figure for one scenario.
    pub fn evaluate(
        &self,
        input: &ScenarioInput,
    ) -> ScenarioResult {
        let revenue = non_negative(input.revenue);
        let salary_per_head = non_negative(input.salary_per_head);
        let headcount = Decimal::from(input.headcount);

        let total_salary_outflow = headcount.saturating_mul(salary_per_head);
        let total_expenses = non_negative(input.fixed_expenses)
            .saturating_add(non_negative(input.flexible_expenses))
            .saturating_add(total_salary_outflow);

        let pre_tax_profit = self.pre_tax_profit(revenue, total_expenses);
        let corporate_tax = self.corporate_tax(pre_tax_profit);
        let post_tax_profit = pre_tax_profit - corporate_tax;

        let personal_tax_per_head =
            PersonalTaxCalculator::new(&self.regime.personal).compute_tax(salary_per_head);
        let net_salary_per_head = salary_per_head - personal_tax_per_head;
        let total_family_net_salary = headcount.saturating_mul(net_salary_per_head);

        let total_retained = post_tax_profit.saturating_add(total_family_net_salary);
        let efficiency_ratio = self.efficiency_ratio(total_retained, revenue);

        trace!(
            headcount = input.headcount,
            %salary_per_head,
            %total_retained,
            "evaluated scenario"
        );

        ScenarioResult {
            total_salary_outflow,
            total_expenses,
            pre_tax_profit,
            corporate_tax,
            post_tax_profit,
            personal_tax_per_head,
            net_salary_per_head,
            total_family_net_salary,
            total_retained,
            efficiency_ratio,
        }
    }

    fn pre_tax_profit(
        &self,
        revenue: Decimal,
        total_expenses: Decimal,
    ) -> Decimal {
        non_negative(revenue - total_expenses)
    }

    fn corporate_tax(
        &self,
        pre_tax_profit: Decimal,
    ) -> Decimal {
        round_half_up(pre_tax_profit.saturating_mul(self.regime.corporate.effective_rate))
    }

    fn efficiency_ratio(
        &self,
        total_retained: Decimal,
        revenue: Decimal,
    ) -> Decimal {
        if revenue.is_zero() {
            Decimal::ZERO
        } else {
            total_retained.checked_div(revenue).unwrap_or(Decimal::MAX)
        }
    }
}
