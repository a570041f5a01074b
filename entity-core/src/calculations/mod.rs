//! Calculators for each component of the LLC and S-Corp tax totals.
//!
//! Each calculator borrows the tables it needs and is a pure function of its
//! inputs. [`crate::TaxEngine`] combines them into a comparison.

pub mod common;
pub mod federal;
pub mod payroll;
pub mod self_emp;
pub mod state;

pub use federal::FederalIncomeTaxCalculator;
pub use payroll::PayrollTaxCalculator;
pub use self_emp::{SelfEmploymentTax, SelfEmploymentTaxCalculator};
pub use state::StateTaxCalculator;
