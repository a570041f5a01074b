mod loader;

pub use loader::{StateRateRecord, TableFiles, TaxBracketRecord, TaxTableLoader, TaxTableLoaderError};
