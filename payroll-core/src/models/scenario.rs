use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One allocation of the company's revenue.
///
/// Negative amounts are clamped to zero by the evaluator. The headcount is
/// expected to be positive; callers reject zero before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Gross annual revenue of the company.
    pub revenue: Decimal,

    /// Expenses that do not move with the salary decision (rent, licences).
    pub fixed_expenses: Decimal,

    /// Other operating expenses.
    pub flexible_expenses: Decimal,

    /// Family members drawing a salary.
    pub headcount: u32,

    /// Gross annual salary paid to each family member.
    pub salary_per_head: Decimal,
}

impl ScenarioInput {
    /// Returns a copy with the salary decision replaced, keeping the company
    /// figures fixed.
    pub fn with_allocation(
        self,
        headcount: u32,
        salary_per_head: Decimal,
    ) -> Self {
        Self {
            headcount,
            salary_per_head,
            ..self
        }
    }
}

/// Everything derived from a [`ScenarioInput`].
///
/// Always produced whole by
/// [`ScenarioEvaluator::evaluate`](crate::calculations::ScenarioEvaluator::evaluate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Headcount × salary per head.
    pub total_salary_outflow: Decimal,

    /// Fixed + flexible expenses + salary outflow.
    pub total_expenses: Decimal,

    /// Revenue minus total expenses, floored at zero.
    pub pre_tax_profit: Decimal,

    pub corporate_tax: Decimal,

    pub post_tax_profit: Decimal,

    pub personal_tax_per_head: Decimal,

    pub net_salary_per_head: Decimal,

    /// Headcount × net salary per head.
    pub total_family_net_salary: Decimal,

    /// Post-tax profit plus the family's net salaries.
    pub total_retained: Decimal,

    /// Total retained divided by revenue; zero when revenue is zero.
    pub efficiency_ratio: Decimal,
}
