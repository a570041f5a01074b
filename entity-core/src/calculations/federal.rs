//! Federal progressive income tax.
//!
//! Each bracket taxes only the slice of income that falls inside it, at that
//! bracket's marginal rate:
//!
//! | Bracket (2024) | Rate |
//! |----------------|------|
//! | 0 – 11,000 | 10% |
//! | 11,000 – 44,725 | 12% |
//! | 44,725 – 95,375 | 22% |
//! | 95,375 – 182,050 | 24% |
//! | 182,050 – 231,250 | 32% |
//! | 231,250 – 578,125 | 35% |
//! | 578,125 and up | 37% |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use entity_core::calculations::FederalIncomeTaxCalculator;
//! use entity_core::federal_brackets_2024;
//!
//! let brackets = federal_brackets_2024();
//! let calculator = FederalIncomeTaxCalculator::new(&brackets);
//!
//! // 1,100 + 4,047 + 11,143 + 1,110
//! assert_eq!(calculator.calculate(dec!(100000)), dec!(17400));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::TaxBracket;

/// Applies an ascending, contiguous bracket schedule to an income.
#[derive(Debug, Clone)]
pub struct FederalIncomeTaxCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> FederalIncomeTaxCalculator<'a> {
    /// Brackets must be sorted by `min_income` and contiguous, with the last
    /// bracket unbounded. [`crate::TaxTables::new`] enforces this.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Total federal income tax on `income`.
    ///
    /// Zero or negative income is an empty taxable range and yields zero.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income < Decimal::ZERO {
            warn!(income = %income, "Negative income has no federal tax");
        }

        let mut tax = Decimal::ZERO;
        for bracket in self.brackets {
            if income <= bracket.min_income {
                break;
            }
            tax += bracket.taxable_slice(income) * bracket.tax_rate;
        }
        tax
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::federal_brackets_2024;

    #[test]
    fn calculate_returns_zero_for_zero_income() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        assert_eq!(calculator.calculate(dec!(0)), dec!(0));
    }

    #[test]
    fn calculate_returns_zero_for_negative_income() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        assert_eq!(calculator.calculate(dec!(-5000)), dec!(0));
    }

    #[test]
    fn calculate_first_bracket() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        assert_eq!(calculator.calculate(dec!(10000)), dec!(1000));
    }

    #[test]
    fn calculate_at_bracket_boundary() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        assert_eq!(calculator.calculate(dec!(11000)), dec!(1100));
        assert_eq!(calculator.calculate(dec!(44725)), dec!(5147));
    }

    #[test]
    fn calculate_middle_bracket() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        // 1,100 + 29,000 × 12%
        assert_eq!(calculator.calculate(dec!(40000)), dec!(4580));
        assert_eq!(calculator.calculate(dec!(100000)), dec!(17400));
    }

    #[test]
    fn calculate_highest_bracket() {
        let brackets = federal_brackets_2024();
        let calculator = FederalIncomeTaxCalculator::new(&brackets);

        // 174,242.25 through the 35% bracket + 121,875 × 37%
        assert_eq!(calculator.calculate(dec!(700000)), dec!(219336));
    }

    #[test]
    fn calculate_with_empty_schedule_is_zero() {
        let calculator = FederalIncomeTaxCalculator::new(&[]);

        assert_eq!(calculator.calculate(dec!(50000)), dec!(0));
    }
}
