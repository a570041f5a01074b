mod state_tax_rate;
mod tax_bracket;
mod tax_result;
mod tax_tables;
mod tax_year_config;

pub use state_tax_rate::{StateTaxRates, US_STATES, state_name};
pub use tax_bracket::TaxBracket;
pub use tax_result::{
    LlcBreakdown, Recommendation, RelativeBurden, SCorpBreakdown, SalaryPoint, TaxBreakdown,
    TaxResult,
};
pub use tax_tables::{TaxTableError, TaxTables, federal_brackets_2024};
pub use tax_year_config::{TaxYearConfig, TaxYearConfigError};
