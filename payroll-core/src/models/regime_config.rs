use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxSchedule;

/// Errors that can occur when validating a [`RegimeConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    /// The standard deduction must be non-negative.
    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),

    /// The rebate threshold must be non-negative.
    #[error("rebate threshold must be non-negative, got {0}")]
    NegativeRebateThreshold(Decimal),

    /// The cess multiplier must not reduce the tax.
    #[error("cess multiplier must be at least 1, got {0}")]
    InvalidCessMultiplier(Decimal),

    /// The corporate effective rate must be between 0 and 1.
    #[error("corporate rate must be between 0 and 1, got {0}")]
    InvalidCorporateRate(Decimal),
}

/// Parameters of the personal income tax.
///
/// Defaults model the current flat progressive schedule:
///
/// | Taxable income           | Rate |
/// |--------------------------|------|
/// | 0 – 4,00,000             | 0%   |
/// | 4,00,000 – 8,00,000      | 5%   |
/// | 8,00,000 – 12,00,000     | 10%  |
/// | 12,00,000 – 16,00,000    | 15%  |
/// | 16,00,000 – 20,00,000    | 20%  |
/// | 20,00,000 – 24,00,000    | 25%  |
/// | above 24,00,000          | 30%  |
///
/// with a 75,000 standard deduction, full rebate up to 12,00,000 taxable
/// income and a 4% cess on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalTaxRegime {
    /// Subtracted from gross salary before the schedule is applied.
    pub standard_deduction: Decimal,

    /// Taxable income at or below this amount owes nothing.
    pub rebate_threshold: Decimal,

    /// Applied to the bracket tax, e.g. `1.04` for a 4% cess.
    pub cess_multiplier: Decimal,

    pub schedule: TaxSchedule,
}

impl Default for PersonalTaxRegime {
    fn default() -> Self {
        Self {
            standard_deduction: dec!(75000),
            rebate_threshold: dec!(1200000),
            cess_multiplier: dec!(1.04),
            schedule: TaxSchedule::default(),
        }
    }
}

/// Parameters of the corporate income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorporateTaxRegime {
    /// Single effective rate inclusive of surcharge and cess.
    ///
    /// Defaults to 25.168% (22% base × 1.10 surcharge × 1.04 cess).
    pub effective_rate: Decimal,
}

impl Default for CorporateTaxRegime {
    fn default() -> Self {
        Self {
            effective_rate: dec!(0.25168),
        }
    }
}

/// The complete tax regime the engine evaluates scenarios against.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{RegimeConfig, RegimeConfigError};
///
/// let mut config = RegimeConfig::default();
/// assert_eq!(config.validate(), Ok(()));
///
/// config.personal.cess_multiplier = dec!(0.96);
/// assert_eq!(
///     config.validate(),
///     Err(RegimeConfigError::InvalidCessMultiplier(dec!(0.96)))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    pub personal: PersonalTaxRegime,
    pub corporate: CorporateTaxRegime,
}

impl RegimeConfig {
    /// Validates the scalar parameters.
    ///
    /// The schedule validates itself on construction, so only the values
    /// around it are checked here.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] if:
    /// - `standard_deduction` or `rebate_threshold` is negative
    /// - `cess_multiplier` is below 1
    /// - `effective_rate` is not in [0, 1]
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        let personal = &self.personal;
        if personal.standard_deduction < Decimal::ZERO {
            return Err(RegimeConfigError::NegativeStandardDeduction(
                personal.standard_deduction,
            ));
        }
        if personal.rebate_threshold < Decimal::ZERO {
            return Err(RegimeConfigError::NegativeRebateThreshold(
                personal.rebate_threshold,
            ));
        }
        if personal.cess_multiplier < Decimal::ONE {
            return Err(RegimeConfigError::InvalidCessMultiplier(
                personal.cess_multiplier,
            ));
        }
        let rate = self.corporate.effective_rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(RegimeConfigError::InvalidCorporateRate(rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TaxBracket;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RegimeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_schedule_has_seven_slabs_ending_at_thirty_percent() {
        let regime = PersonalTaxRegime::default();
        let brackets = regime.schedule.brackets();

        assert_eq!(brackets.len(), 7);
        assert_eq!(brackets[6], TaxBracket::unbounded(dec!(0.30)));
    }

    #[test]
    fn validate_rejects_negative_standard_deduction() {
        let mut config = RegimeConfig::default();
        config.personal.standard_deduction = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::NegativeStandardDeduction(dec!(-1)))
        );
    }

    #[test]
    fn validate_rejects_negative_rebate_threshold() {
        let mut config = RegimeConfig::default();
        config.personal.rebate_threshold = dec!(-500);

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::NegativeRebateThreshold(dec!(-500)))
        );
    }

    #[test]
    fn validate_rejects_corporate_rate_above_one() {
        let mut config = RegimeConfig::default();
        config.corporate.effective_rate = dec!(1.01);

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::InvalidCorporateRate(dec!(1.01)))
        );
    }

    #[test]
    fn validate_accepts_zero_corporate_rate() {
        let mut config = RegimeConfig::default();
        config.corporate.effective_rate = Decimal::ZERO;

        assert_eq!(config.validate(), Ok(()));
    }
}
