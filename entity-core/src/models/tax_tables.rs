use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use super::{StateTaxRates, TaxBracket, TaxYearConfig, TaxYearConfigError};

/// Errors found while validating a set of [`TaxTables`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("no federal tax brackets were provided")]
    NoBrackets,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NonContiguousBracket {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} is empty or inverted ({min} to {max})")]
    EmptyBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeLast(usize),

    #[error("the last bracket must be unbounded, it ends at {0}")]
    LastBracketBounded(Decimal),

    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidBracketRate { index: usize, rate: Decimal },

    #[error("state code '{0}' must be two uppercase letters")]
    InvalidStateCode(String),

    #[error("state {state} rate must be in [0, 1), got {rate}")]
    InvalidStateRate { state: String, rate: Decimal },

    #[error("invalid tax year config: {0}")]
    Config(#[from] TaxYearConfigError),

    #[error("top federal, state and employment rates add up to {0}, which must stay below 1")]
    CombinedRateTooHigh(Decimal),
}

/// Every rate table the comparison needs for one tax year.
///
/// Constructed once and never mutated. Replacing tables means building a
/// new value and a new engine around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    config: TaxYearConfig,
    brackets: Vec<TaxBracket>,
    state_rates: StateTaxRates,
}

impl TaxTables {
    /// Builds validated tables.
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError`] if the config is invalid, the brackets do not
    /// form a contiguous ascending cover of `[0, ∞)`, or any rate falls
    /// outside `[0, 1)`.
    pub fn new(
        config: TaxYearConfig,
        brackets: Vec<TaxBracket>,
        state_rates: StateTaxRates,
    ) -> Result<Self, TaxTableError> {
        config.validate()?;
        validate_brackets(&brackets)?;
        validate_state_rates(&state_rates)?;
        validate_combined_rate(&config, &brackets, &state_rates)?;

        Ok(Self {
            config,
            brackets,
            state_rates,
        })
    }

    /// Single-filer federal schedule, state top rates and payroll constants
    /// for tax year 2024.
    pub fn tax_year_2024() -> Self {
        Self {
            config: TaxYearConfig::tax_year_2024(),
            brackets: federal_brackets_2024(),
            state_rates: StateTaxRates::tax_year_2024(),
        }
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn state_rates(&self) -> &StateTaxRates {
        &self.state_rates
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::tax_year_2024()
    }
}

/// Federal income tax brackets for tax year 2024.
pub fn federal_brackets_2024() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(dec!(0), Some(dec!(11000)), dec!(0.10)),
        TaxBracket::new(dec!(11000), Some(dec!(44725)), dec!(0.12)),
        TaxBracket::new(dec!(44725), Some(dec!(95375)), dec!(0.22)),
        TaxBracket::new(dec!(95375), Some(dec!(182050)), dec!(0.24)),
        TaxBracket::new(dec!(182050), Some(dec!(231250)), dec!(0.32)),
        TaxBracket::new(dec!(231250), Some(dec!(578125)), dec!(0.35)),
        TaxBracket::new(dec!(578125), None, dec!(0.37)),
    ]
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), TaxTableError> {
    let first = brackets.first().ok_or(TaxTableError::NoBrackets)?;
    if first.min_income != Decimal::ZERO {
        return Err(TaxTableError::FirstBracketNotZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut previous_max: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
            return Err(TaxTableError::InvalidBracketRate {
                index,
                rate: bracket.tax_rate,
            });
        }

        if let Some(expected) = previous_max {
            if bracket.min_income != expected {
                return Err(TaxTableError::NonContiguousBracket {
                    index,
                    expected,
                    found: bracket.min_income,
                });
            }
        }

        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(TaxTableError::EmptyBracket {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(max) if index == last_index => {
                return Err(TaxTableError::LastBracketBounded(max));
            }
            Some(max) => previous_max = Some(max),
            None if index != last_index => {
                return Err(TaxTableError::UnboundedBeforeLast(index));
            }
            None => {}
        }
    }

    Ok(())
}

fn validate_state_rates(rates: &StateTaxRates) -> Result<(), TaxTableError> {
    for (code, rate) in rates.iter() {
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(TaxTableError::InvalidStateCode(code.to_string()));
        }
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(TaxTableError::InvalidStateRate {
                state: code.to_string(),
                rate,
            });
        }
    }
    Ok(())
}

/// Total tax on either path is bounded by income times the top federal
/// rate, the top state rate and the larger employment rate. Keeping that sum
/// below 1 keeps every total below its income.
fn validate_combined_rate(
    config: &TaxYearConfig,
    brackets: &[TaxBracket],
    state_rates: &StateTaxRates,
) -> Result<(), TaxTableError> {
    let top_bracket_rate = brackets
        .iter()
        .map(|b| b.tax_rate)
        .max()
        .unwrap_or(Decimal::ZERO);
    let top_state_rate = state_rates
        .iter()
        .map(|(_, rate)| rate)
        .max()
        .unwrap_or(Decimal::ZERO);
    let self_employment_rate = config.net_earnings_factor
        * (config.ss_tax_rate + config.medicare_tax_rate)
        + config.additional_medicare_rate;
    let employment_rate = self_employment_rate.max(config.payroll_tax_rate);

    let combined = top_bracket_rate + top_state_rate + employment_rate;
    if combined >= Decimal::ONE {
        return Err(TaxTableError::CombinedRateTooHigh(combined));
    }
    Ok(())
}
