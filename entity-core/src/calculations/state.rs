//! Flat state income tax.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::StateTaxRates;

#[derive(Debug, Clone)]
pub struct StateTaxCalculator<'a> {
    rates: &'a StateTaxRates,
}

impl<'a> StateTaxCalculator<'a> {
    pub fn new(rates: &'a StateTaxRates) -> Self {
        Self { rates }
    }

    /// State tax on `income` for the state with code `state`.
    ///
    /// Codes missing from the table, including malformed ones, are taxed at
    /// 0%. Negative income owes nothing.
    pub fn calculate(
        &self,
        income: Decimal,
        state: &str,
    ) -> Decimal {
        if income < Decimal::ZERO {
            warn!(income = %income, state, "Negative income has no state tax");
            return Decimal::ZERO;
        }

        if self.rates.get(state).is_none() {
            debug!(state, "Unknown state code; treating as no state income tax");
        }
        income * self.rates.rate_or_zero(state)
    }
}
