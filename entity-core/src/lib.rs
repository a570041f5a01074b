pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::{DomainError, MAX_SWEEP_POINTS, TaxEngine, compare, lowest_scorp_total};
pub use models::*;
