use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating a [`TaxYearConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    /// The net earnings factor must be in (0, 1].
    #[error("net earnings factor must be between 0 and 1, got {0}")]
    InvalidNetEarningsFactor(Decimal),

    /// The social security tax rate must be in [0, 1].
    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    /// The Medicare tax rate must be in [0, 1].
    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    /// The additional Medicare rate must be in [0, 1].
    #[error("additional medicare rate must be between 0 and 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    /// The payroll tax rate must be in [0, 1].
    #[error("payroll tax rate must be between 0 and 1, got {0}")]
    InvalidPayrollRate(Decimal),

    /// The social security wage base must be positive.
    #[error("social security wage base must be positive, got {0}")]
    InvalidSsWageBase(Decimal),

    /// The additional Medicare threshold must be positive.
    #[error("additional medicare threshold must be positive, got {0}")]
    InvalidAdditionalMedicareThreshold(Decimal),
}

/// Scalar rates and limits for one tax year.
///
/// The self-employment values apply to the LLC path; `payroll_tax_rate` is
/// the flat combined employer and employee rate applied to an S-Corp salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    /// Maximum earnings subject to social security tax.
    pub ss_wage_base: Decimal,

    /// Combined social security rate for self-employment, typically 12.4%.
    pub ss_tax_rate: Decimal,

    /// Combined Medicare rate for self-employment, typically 2.9%.
    pub medicare_tax_rate: Decimal,

    /// Portion of net profit treated as net earnings from self-employment,
    /// typically 92.35%.
    pub net_earnings_factor: Decimal,

    /// Surtax on income above `additional_medicare_threshold`.
    pub additional_medicare_rate: Decimal,

    /// Applied to raw income, not to net earnings.
    pub additional_medicare_threshold: Decimal,

    /// Employer plus employee payroll tax on salary, typically 15.3%.
    pub payroll_tax_rate: Decimal,
}

impl TaxYearConfig {
    pub fn tax_year_2024() -> Self {
        Self {
            tax_year: 2024,
            ss_wage_base: dec!(160200),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            net_earnings_factor: dec!(0.9235),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: dec!(200000),
            payroll_tax_rate: dec!(0.153),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxYearConfigError`] found, checking factors and
    /// rates before the dollar limits.
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(TaxYearConfigError::InvalidNetEarningsFactor(
                self.net_earnings_factor,
            ));
        }
        if !is_unit_rate(self.ss_tax_rate) {
            return Err(TaxYearConfigError::InvalidSocialSecurityRate(
                self.ss_tax_rate,
            ));
        }
        if !is_unit_rate(self.medicare_tax_rate) {
            return Err(TaxYearConfigError::InvalidMedicareRate(
                self.medicare_tax_rate,
            ));
        }
        if !is_unit_rate(self.additional_medicare_rate) {
            return Err(TaxYearConfigError::InvalidAdditionalMedicareRate(
                self.additional_medicare_rate,
            ));
        }
        if !is_unit_rate(self.payroll_tax_rate) {
            return Err(TaxYearConfigError::InvalidPayrollRate(
                self.payroll_tax_rate,
            ));
        }
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(TaxYearConfigError::InvalidSsWageBase(self.ss_wage_base));
        }
        if self.additional_medicare_threshold <= Decimal::ZERO {
            return Err(TaxYearConfigError::InvalidAdditionalMedicareThreshold(
                self.additional_medicare_threshold,
            ));
        }
        Ok(())
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}
