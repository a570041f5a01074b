//! Command-line presentation layer for the LLC versus S-Corp comparison.

pub mod report;
pub mod utils;
