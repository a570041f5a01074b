//! Self-employment tax on LLC net income.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Net earnings: income × 92.35% |
//! | 2 | Social security: min(net earnings, wage base) × 12.4% |
//! | 3 | Medicare: net earnings × 2.9% |
//! | 4 | Additional Medicare: (income − 200,000) × 0.9%, on raw income, if positive |
//! | 5 | Total: steps 2 + 3 + 4 |
//!
//! The wage-base cap in step 2 and the threshold in step 4 are the two kinks
//! of an otherwise linear function.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use entity_core::TaxYearConfig;
//! use entity_core::calculations::SelfEmploymentTaxCalculator;
//!
//! let config = TaxYearConfig::tax_year_2024();
//! let calculator = SelfEmploymentTaxCalculator::new(&config);
//!
//! let result = calculator.calculate(dec!(100000));
//!
//! assert_eq!(result.net_earnings, dec!(92350));
//! assert_eq!(result.total, dec!(14129.55));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::TaxYearConfig;
use crate::calculations::common::non_negative;

/// Itemized self-employment tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentTax {
    /// Income × net earnings factor (step 1).
    pub net_earnings: Decimal,

    /// Capped at the wage base (step 2).
    pub social_security_tax: Decimal,

    /// Uncapped (step 3).
    pub medicare_tax: Decimal,

    /// Surtax on raw income above the threshold (step 4).
    pub additional_medicare_tax: Decimal,

    pub total: Decimal,
}

impl SelfEmploymentTax {
    fn zero() -> Self {
        Self {
            net_earnings: Decimal::ZERO,
            social_security_tax: Decimal::ZERO,
            medicare_tax: Decimal::ZERO,
            additional_medicare_tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfEmploymentTaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> SelfEmploymentTaxCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Calculates the itemized self-employment tax on `income`.
    ///
    /// Negative income owes nothing and returns an all-zero result.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> SelfEmploymentTax {
        if income < Decimal::ZERO {
            warn!(
                income = %income,
                "Self-employment income is negative; no SE tax applies"
            );
            return SelfEmploymentTax::zero();
        }

        let net_earnings = self.net_earnings(income);
        let social_security_tax = self.social_security_tax(net_earnings);
        let medicare_tax = self.medicare_tax(net_earnings);
        let additional_medicare_tax = self.additional_medicare_tax(income);

        SelfEmploymentTax {
            net_earnings,
            social_security_tax,
            medicare_tax,
            additional_medicare_tax,
            total: social_security_tax + medicare_tax + additional_medicare_tax,
        }
    }

    fn net_earnings(
        &self,
        income: Decimal,
    ) -> Decimal {
        income * self.config.net_earnings_factor
    }

    fn social_security_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        net_earnings.min(self.config.ss_wage_base) * self.config.ss_tax_rate
    }

    fn medicare_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        net_earnings * self.config.medicare_tax_rate
    }

    fn additional_medicare_tax(
        &self,
        income: Decimal,
    ) -> Decimal {
        non_negative(income - self.config.additional_medicare_threshold)
            * self.config.additional_medicare_rate
    }
}
