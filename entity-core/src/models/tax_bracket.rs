use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate band of the federal income tax schedule.
///
/// `max_income` is `None` for the top, unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Portion of `income` that falls inside this bracket.
    ///
    /// Only meaningful when `income > min_income`.
    pub fn taxable_slice(
        &self,
        income: Decimal,
    ) -> Decimal {
        let upper = match self.max_income {
            Some(max) => income.min(max),
            None => income,
        };
        upper - self.min_income
    }
}
