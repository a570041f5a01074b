use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which structure carries the lower total tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    SCorp,
    Llc,
}

impl Recommendation {
    /// `SCorp` only when electing S-Corp status strictly saves money.
    pub fn from_savings(savings: Decimal) -> Self {
        if savings > Decimal::ZERO {
            Self::SCorp
        } else {
            Self::Llc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SCorp => "scorp",
            Self::Llc => "llc",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::SCorp => "S-Corp",
            Self::Llc => "LLC",
        })
    }
}

/// Itemized taxes when all income is self-employment income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlcBreakdown {
    pub federal_income_tax: Decimal,
    pub self_employment_tax: Decimal,
    pub state_tax: Decimal,
}

impl LlcBreakdown {
    pub fn total(&self) -> Decimal {
        self.federal_income_tax + self.self_employment_tax + self.state_tax
    }
}

/// Itemized taxes when income is split into salary and distributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SCorpBreakdown {
    pub federal_income_tax: Decimal,
    pub payroll_tax: Decimal,
    pub state_tax: Decimal,

    /// Salary after capping at total income.
    pub salary: Decimal,
    pub distributions: Decimal,
}

impl SCorpBreakdown {
    pub fn total(&self) -> Decimal {
        self.federal_income_tax + self.payroll_tax + self.state_tax
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub llc: LlcBreakdown,
    pub scorp: SCorpBreakdown,
}

/// Outcome of comparing the two structures for one set of inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub llc_total_tax: Decimal,
    pub scorp_total_tax: Decimal,

    /// `llc_total_tax - scorp_total_tax`; negative when the S-Corp costs more.
    pub savings: Decimal,
    pub recommendation: Recommendation,
    pub breakdown: TaxBreakdown,
}

/// Each total as a percentage of the larger of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeBurden {
    pub llc: Decimal,
    pub scorp: Decimal,
}

impl TaxResult {
    pub fn from_breakdown(breakdown: TaxBreakdown) -> Self {
        let llc_total_tax = breakdown.llc.total();
        let scorp_total_tax = breakdown.scorp.total();
        let savings = llc_total_tax - scorp_total_tax;

        Self {
            llc_total_tax,
            scorp_total_tax,
            savings,
            recommendation: Recommendation::from_savings(savings),
            breakdown,
        }
    }

    pub fn total_income(&self) -> Decimal {
        self.breakdown.scorp.salary + self.breakdown.scorp.distributions
    }

    /// Salary as a percentage of total income, or zero with no income.
    pub fn salary_share(&self) -> Decimal {
        let income = self.total_income();
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.breakdown.scorp.salary / income * Decimal::ONE_HUNDRED
    }

    pub fn relative_burden(&self) -> RelativeBurden {
        let larger = self.llc_total_tax.max(self.scorp_total_tax);
        if larger <= Decimal::ZERO {
            return RelativeBurden {
                llc: Decimal::ZERO,
                scorp: Decimal::ZERO,
            };
        }
        RelativeBurden {
            llc: self.llc_total_tax / larger * Decimal::ONE_HUNDRED,
            scorp: self.scorp_total_tax / larger * Decimal::ONE_HUNDRED,
        }
    }
}

/// One salary level evaluated by a salary sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPoint {
    pub salary: Decimal,
    pub scorp_total_tax: Decimal,
    pub savings: Decimal,
}
