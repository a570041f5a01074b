//! Payroll tax on an S-Corp owner's salary.
//!
//! The combined employer and employee rate is applied flatly to the whole
//! salary. There is no wage-base cap and no additional Medicare surtax on
//! this path; those only shape the self-employment calculation.

use rust_decimal::Decimal;
use tracing::warn;

use crate::TaxYearConfig;

#[derive(Debug, Clone)]
pub struct PayrollTaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> PayrollTaxCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Payroll tax on `salary`, or zero when the salary is negative.
    pub fn calculate(
        &self,
        salary: Decimal,
    ) -> Decimal {
        if salary < Decimal::ZERO {
            warn!(salary = %salary, "Salary is negative; no payroll tax applies");
            return Decimal::ZERO;
        }
        salary * self.config.payroll_tax_rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn calculate_applies_flat_rate() {
        let config = TaxYearConfig::tax_year_2024();
        let calculator = PayrollTaxCalculator::new(&config);

        assert_eq!(calculator.calculate(dec!(50000)), dec!(7650));
    }

    #[test]
    fn calculate_ignores_wage_base() {
        let config = TaxYearConfig::tax_year_2024();
        let calculator = PayrollTaxCalculator::new(&config);

        // No cap at 160,200 and no surtax above 200,000
        assert_eq!(calculator.calculate(dec!(300000)), dec!(45900));
    }

    #[test]
    fn calculate_returns_zero_for_zero_salary() {
        let config = TaxYearConfig::tax_year_2024();
        let calculator = PayrollTaxCalculator::new(&config);

        assert_eq!(calculator.calculate(dec!(0)), dec!(0));
    }

    #[test]
    fn calculate_returns_zero_for_negative_salary() {
        let config = TaxYearConfig::tax_year_2024();
        let calculator = PayrollTaxCalculator::new(&config);

        assert_eq!(calculator.calculate(dec!(-100)), dec!(0));
    }
}
