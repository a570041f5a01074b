//! LLC versus S-Corp comparison.
//!
//! Both paths pay federal income tax and state tax on the full income. The
//! LLC path adds self-employment tax on the full income; the S-Corp path
//! adds payroll tax on the salary only, capped at total income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use entity_core::{Recommendation, TaxEngine};
//!
//! let engine = TaxEngine::tax_year_2024();
//! let result = engine.compare(dec!(100000), dec!(50000), "FL").unwrap();
//!
//! assert_eq!(result.llc_total_tax, dec!(31529.55));
//! assert_eq!(result.scorp_total_tax, dec!(25050));
//! assert_eq!(result.recommendation, Recommendation::SCorp);
//! ```

use std::sync::{Arc, LazyLock};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::{
    FederalIncomeTaxCalculator, PayrollTaxCalculator, SelfEmploymentTaxCalculator,
    StateTaxCalculator,
};
use crate::{
    LlcBreakdown, SCorpBreakdown, SalaryPoint, StateTaxRates, TaxBracket, TaxBreakdown, TaxResult,
    TaxTableError, TaxTables, TaxYearConfig,
};

/// Inputs outside the domain the comparison is defined on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("total income must not be negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("salary must not be negative, got {0}")]
    NegativeSalary(Decimal),

    #[error("salary step must be positive, got {0}")]
    InvalidStep(Decimal),

    #[error(
        "a step of {step} over {total_income} needs more than {max} salary points",
        max = MAX_SWEEP_POINTS
    )]
    SweepTooLarge { total_income: Decimal, step: Decimal },
}

/// Upper bound on the number of points a single salary sweep produces.
pub const MAX_SWEEP_POINTS: usize = 100_000;

static TAX_YEAR_2024: LazyLock<TaxEngine> = LazyLock::new(TaxEngine::tax_year_2024);

/// Compares both structures using the built-in 2024 tables.
///
/// # Errors
///
/// See [`TaxEngine::compare`].
pub fn compare(
    total_income: Decimal,
    salary: Decimal,
    state: &str,
) -> Result<TaxResult, DomainError> {
    TAX_YEAR_2024.compare(total_income, salary, state)
}

/// Runs comparisons against one immutable set of [`TaxTables`].
///
/// Clones share the tables, so an engine can be handed to any number of
/// threads.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    tables: Arc<TaxTables>,
}

impl TaxEngine {
    /// Wraps tables that were already validated by [`TaxTables::new`].
    pub fn new(tables: TaxTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Validates the parts and builds an engine around them.
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError`] when the tables are inconsistent.
    pub fn from_parts(
        config: TaxYearConfig,
        brackets: Vec<TaxBracket>,
        state_rates: StateTaxRates,
    ) -> Result<Self, TaxTableError> {
        TaxTables::new(config, brackets, state_rates).map(Self::new)
    }

    pub fn tax_year_2024() -> Self {
        Self::new(TaxTables::tax_year_2024())
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Compares LLC and S-Corp taxes for one income, salary and state.
    ///
    /// A salary above `total_income` is capped to it. Unknown state codes pay
    /// no state tax.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeIncome`] or
    /// [`DomainError::NegativeSalary`] for negative inputs.
    pub fn compare(
        &self,
        total_income: Decimal,
        salary: Decimal,
        state: &str,
    ) -> Result<TaxResult, DomainError> {
        if total_income < Decimal::ZERO {
            return Err(DomainError::NegativeIncome(total_income));
        }
        if salary < Decimal::ZERO {
            return Err(DomainError::NegativeSalary(salary));
        }

        let adjusted_salary = salary.min(total_income);
        if adjusted_salary < salary {
            debug!(
                salary = %salary,
                total_income = %total_income,
                "Salary exceeds total income; capping"
            );
        }

        let tables = &*self.tables;
        let federal_income_tax =
            FederalIncomeTaxCalculator::new(tables.brackets()).calculate(total_income);
        let state_tax = StateTaxCalculator::new(tables.state_rates()).calculate(total_income, state);
        let self_employment_tax = SelfEmploymentTaxCalculator::new(tables.config())
            .calculate(total_income)
            .total;
        let payroll_tax = PayrollTaxCalculator::new(tables.config()).calculate(adjusted_salary);

        let result = TaxResult::from_breakdown(TaxBreakdown {
            llc: LlcBreakdown {
                federal_income_tax,
                self_employment_tax,
                state_tax,
            },
            scorp: SCorpBreakdown {
                federal_income_tax,
                payroll_tax,
                state_tax,
                salary: adjusted_salary,
                distributions: total_income - adjusted_salary,
            },
        });

        debug!(
            total_income = %total_income,
            salary = %adjusted_salary,
            state,
            llc_total = %result.llc_total_tax,
            scorp_total = %result.scorp_total_tax,
            recommendation = result.recommendation.as_str(),
            "Compared LLC and S-Corp taxes"
        );

        Ok(result)
    }

    /// Evaluates the S-Corp path at salaries `0, step, 2·step, …` up to
    /// `total_income`, always ending with a point at `total_income`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidStep`] when `step` is not positive,
    /// [`DomainError::NegativeIncome`] for negative income, or
    /// [`DomainError::SweepTooLarge`] when the sweep would exceed
    /// [`MAX_SWEEP_POINTS`].
    pub fn salary_sweep(
        &self,
        total_income: Decimal,
        state: &str,
        step: Decimal,
    ) -> Result<Vec<SalaryPoint>, DomainError> {
        if step <= Decimal::ZERO {
            return Err(DomainError::InvalidStep(step));
        }
        if total_income < Decimal::ZERO {
            return Err(DomainError::NegativeIncome(total_income));
        }

        // One point per step after zero, plus the zero-salary point.
        let max_steps = Decimal::from(MAX_SWEEP_POINTS - 1);
        if total_income
            .checked_div(step)
            .is_none_or(|steps| steps.ceil() > max_steps)
        {
            return Err(DomainError::SweepTooLarge { total_income, step });
        }

        let mut points = Vec::new();
        let mut salary = Decimal::ZERO;
        loop {
            let result = self.compare(total_income, salary, state)?;
            points.push(SalaryPoint {
                salary,
                scorp_total_tax: result.scorp_total_tax,
                savings: result.savings,
            });

            if salary >= total_income {
                break;
            }
            salary = salary
                .checked_add(step)
                .map_or(total_income, |next| next.min(total_income));
        }

        Ok(points)
    }

    /// Sweep point with the lowest S-Corp total, preferring the lower salary
    /// on ties.
    ///
    /// # Errors
    ///
    /// Same as [`TaxEngine::salary_sweep`].
    pub fn best_salary(
        &self,
        total_income: Decimal,
        state: &str,
        step: Decimal,
    ) -> Result<SalaryPoint, DomainError> {
        let points = self.salary_sweep(total_income, state, step)?;
        // The sweep always contains the zero-salary point.
        Ok(lowest_scorp_total(&points).unwrap_or(&points[0]).clone())
    }
}

/// Point with the lowest S-Corp total, the earliest one on ties.
///
/// Returns `None` only for an empty slice.
pub fn lowest_scorp_total(points: &[SalaryPoint]) -> Option<&SalaryPoint> {
    points.iter().min_by_key(|point| point.scorp_total_tax)
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::tax_year_2024()
    }
}
