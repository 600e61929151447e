//! The capability interface front-ends program against.

use rust_decimal::Decimal;

use crate::calculations::{
    OptimizationSweep, PersonalTaxBreakdown, PersonalTaxCalculator, ScenarioEvaluator,
};
use crate::{RegimeConfig, RegimeConfigError, ScenarioInput, ScenarioResult, SweepMatrix};

/// Operations a presentation layer needs from the retention model.
///
/// Every method is a pure function of its arguments. Implementations hold
/// only immutable configuration, so callers decide when to re-invoke and
/// may do so from any thread.
pub trait ScenarioModel {
    /// Personal tax owed on a gross salary.
    fn compute_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal;

    /// All derived figures for one allocation.
    fn evaluate(
        &self,
        input: &ScenarioInput,
    ) -> ScenarioResult;

    /// Retained value over the headcount × salary lattice.
    fn sweep(
        &self,
        revenue: Decimal,
        fixed_expenses: Decimal,
        flexible_expenses: Decimal,
        headcounts: &[u32],
        salary_steps: &[Decimal],
    ) -> SweepMatrix;
}

/// The retention model for one validated [`RegimeConfig`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{Engine, ScenarioInput, ScenarioModel};
///
/// let engine = Engine::default();
/// let input = ScenarioInput {
///     revenue: dec!(0),
///     fixed_expenses: dec!(0),
///     flexible_expenses: dec!(0),
///     headcount: 2,
///     salary_per_head: dec!(500000),
/// };
///
/// let result = engine.evaluate(&input);
/// assert_eq!(result.total_retained, dec!(1000000));
/// assert_eq!(result.efficiency_ratio, dec!(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    regime: RegimeConfig,
}

impl Engine {
    /// Creates an engine after validating the regime.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] if the regime's scalar parameters are
    /// out of range.
    pub fn new(regime: RegimeConfig) -> Result<Self, RegimeConfigError> {
        regime.validate()?;
        Ok(Self { regime })
    }

    pub fn regime(&self) -> &RegimeConfig {
        &self.regime
    }

    /// Personal tax with every intermediate step.
    pub fn tax_breakdown(
        &self,
        gross_income: Decimal,
    ) -> PersonalTaxBreakdown {
        self.personal_tax().breakdown(gross_income)
    }

    /// Largest salary per head that owes no personal tax.
    pub fn zero_tax_ceiling(&self) -> Decimal {
        self.personal_tax().zero_tax_ceiling()
    }

    fn personal_tax(&self) -> PersonalTaxCalculator<'_> {
        PersonalTaxCalculator::new(&self.regime.personal)
    }
}

impl ScenarioModel for Engine {
    fn compute_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        self.personal_tax().compute_tax(gross_income)
    }

    fn evaluate(
        &self,
        input: &ScenarioInput,
    ) -> ScenarioResult {
        ScenarioEvaluator::new(&self.regime).evaluate(input)
    }

    fn sweep(
        &self,
        revenue: Decimal,
        fixed_expenses: Decimal,
        flexible_expenses: Decimal,
        headcounts: &[u32],
        salary_steps: &[Decimal],
    ) -> SweepMatrix {
        OptimizationSweep::new(&self.regime).sweep(
            revenue,
            fixed_expenses,
            flexible_expenses,
            headcounts,
            salary_steps,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_rejects_invalid_regime() {
        let mut regime = RegimeConfig::default();
        regime.corporate.effective_rate = dec!(-0.1);

        let result = Engine::new(regime);

        assert_eq!(
            result.err(),
            Some(RegimeConfigError::InvalidCorporateRate(dec!(-0.1)))
        );
    }

    #[test]
    fn engine_is_usable_through_trait_object() {
        let engine = Engine::default();
        let model: &dyn ScenarioModel = &engine;

        assert_eq!(model.compute_tax(dec!(3000000)), dec!(475800.00));
    }

    #[test]
    fn tax_breakdown_matches_compute_tax() {
        let engine = Engine::default();

        let breakdown = engine.tax_breakdown(dec!(1800000));

        assert_eq!(breakdown.total_tax, engine.compute_tax(dec!(1800000)));
    }

    #[test]
    fn zero_tax_ceiling_uses_regime() {
        let engine = Engine::default();

        assert_eq!(engine.zero_tax_ceiling(), dec!(1275000));
    }
}
