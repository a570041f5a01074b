use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use entity_core::{
    StateTaxRates, TaxBracket, TaxTableError, TaxTables, TaxYearConfig, federal_brackets_2024,
    state_name,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when loading tax tables from CSV.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tax year config file has no rows")]
    MissingConfigRow,

    #[error("Tax year config file must have exactly one row, found {0}")]
    ExtraConfigRows(usize),

    #[error("State '{0}' appears more than once")]
    DuplicateState(String),

    #[error("Invalid tax tables: {0}")]
    Table(#[from] TaxTableError),
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a federal brackets CSV file.
///
/// - `min_income`: the lower edge of the bracket
/// - `max_income`: the upper edge (empty for the unbounded top bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
}

/// A single row of a state rates CSV file: `state,rate`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateRateRecord {
    pub state: String,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Paths of replacement table files. Any part left as `None` keeps the
/// built-in 2024 values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFiles {
    pub brackets: Option<PathBuf>,
    pub state_rates: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl TableFiles {
    pub fn is_empty(&self) -> bool {
        self.brackets.is_none() && self.state_rates.is_none() && self.config.is_none()
    }
}

/// Builds [`TaxTables`] from CSV data.
///
/// Every load produces a complete, validated set of tables; nothing is
/// patched into an existing set.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse state rate records from a CSV reader.
    pub fn parse_state_rates<R: Read>(reader: R) -> Result<Vec<StateRateRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: StateRateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse the single-row tax year config CSV.
    pub fn parse_config<R: Read>(reader: R) -> Result<TaxYearConfig, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = csv_reader
            .deserialize::<TaxYearConfig>()
            .collect::<Result<Vec<_>, _>>()?;

        match rows.len() {
            0 => Err(TaxTableLoaderError::MissingConfigRow),
            1 => Ok(rows.remove(0)),
            n => Err(TaxTableLoaderError::ExtraConfigRows(n)),
        }
    }

    /// Assemble and validate tables from parsed records.
    ///
    /// State codes that are not one of the 50 states are kept but logged.
    pub fn build(
        config: TaxYearConfig,
        brackets: &[TaxBracketRecord],
        state_rates: &[StateRateRecord],
    ) -> Result<TaxTables, TaxTableLoaderError> {
        let brackets = brackets.iter().map(TaxBracket::from).collect();
        let state_rates = Self::collect_state_rates(state_rates)?;

        Ok(TaxTables::new(config, brackets, state_rates)?)
    }

    /// Load tables from files, keeping built-in 2024 values for any part
    /// without a file.
    pub fn load(files: &TableFiles) -> Result<TaxTables, TaxTableLoaderError> {
        let config = match &files.config {
            Some(path) => Self::parse_config(open(path)?)?,
            None => TaxYearConfig::tax_year_2024(),
        };

        let brackets = match &files.brackets {
            Some(path) => Self::parse_brackets(open(path)?)?
                .iter()
                .map(TaxBracket::from)
                .collect(),
            None => federal_brackets_2024(),
        };

        let state_rates = match &files.state_rates {
            Some(path) => Self::collect_state_rates(&Self::parse_state_rates(open(path)?)?)?,
            None => StateTaxRates::tax_year_2024(),
        };

        let tables = TaxTables::new(config, brackets, state_rates)?;
        info!(
            tax_year = tables.config().tax_year,
            brackets = tables.brackets().len(),
            states = tables.state_rates().len(),
            "Loaded tax tables"
        );
        Ok(tables)
    }

    fn collect_state_rates(records: &[StateRateRecord]) -> Result<StateTaxRates, TaxTableLoaderError> {
        let mut seen = HashSet::new();
        let mut rates = StateTaxRates::new();

        for record in records {
            let code = record.state.trim();
            if !seen.insert(code.to_string()) {
                return Err(TaxTableLoaderError::DuplicateState(code.to_string()));
            }
            if state_name(code).is_none() {
                warn!(state = code, "State code is not one of the 50 states; loading anyway");
            }
            rates.insert(code, record.rate);
        }

        Ok(rates)
    }
}

fn open(path: &Path) -> Result<File, TaxTableLoaderError> {
    File::open(path).map_err(|source| TaxTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_BRACKETS_CSV: &str = r#"min_income,max_income,rate
0,11000,0.10
11000,44725,0.12
44725,95375,0.22
95375,182050,0.24
182050,231250,0.32
231250,578125,0.35
578125,,0.37
"#;

    const TEST_CONFIG_CSV: &str = "tax_year,ss_wage_base,ss_tax_rate,medicare_tax_rate,net_earnings_factor,additional_medicare_rate,additional_medicare_threshold,payroll_tax_rate
2024,160200,0.124,0.029,0.9235,0.009,200000,0.153
";

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "min_income,max_income,rate\n0,11000,0.10";

        let records = TaxTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![TaxBracketRecord {
                min_income: dec!(0),
                max_income: Some(dec!(11000)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let csv = "min_income,max_income,rate\n578125,,0.37";

        let records = TaxTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].min_income, dec!(578125));
        assert_eq!(records[0].rate, dec!(0.37));
    }

    #[test]
    fn test_parse_full_bracket_schedule() {
        let records =
            TaxTableLoader::parse_brackets(TEST_BRACKETS_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 7);
        let brackets: Vec<TaxBracket> = records.iter().map(TaxBracket::from).collect();
        assert_eq!(brackets, federal_brackets_2024());
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "min_income,max_income\n0,11000";

        let result = TaxTableLoader::parse_brackets(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let TaxTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "min_income,max_income,rate\nabc,11000,0.10";

        let result = TaxTableLoader::parse_brackets(csv.as_bytes());

        assert!(matches!(result, Err(TaxTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "min_income,max_income,rate\n";

        let records = TaxTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_state_rates() {
        let csv = "state,rate\nCA,0.133\nFL,0\n";

        let records = TaxTableLoader::parse_state_rates(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![
                StateRateRecord {
                    state: "CA".to_string(),
                    rate: dec!(0.133),
                },
                StateRateRecord {
                    state: "FL".to_string(),
                    rate: dec!(0),
                },
            ]
        );
    }

    #[test]
    fn test_parse_config() {
        let config = TaxTableLoader::parse_config(TEST_CONFIG_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(config, TaxYearConfig::tax_year_2024());
    }

    #[test]
    fn test_parse_config_requires_a_row() {
        let header = TEST_CONFIG_CSV.lines().next().unwrap();

        let result = TaxTableLoader::parse_config(header.as_bytes());

        assert!(matches!(result, Err(TaxTableLoaderError::MissingConfigRow)));
    }

    #[test]
    fn test_parse_config_rejects_extra_rows() {
        let csv = format!(
            "{}2025,176100,0.124,0.029,0.9235,0.009,200000,0.153\n",
            TEST_CONFIG_CSV
        );

        let result = TaxTableLoader::parse_config(csv.as_bytes());

        assert!(matches!(result, Err(TaxTableLoaderError::ExtraConfigRows(2))));
    }

    #[test]
    fn test_build_rejects_duplicate_state() {
        let states = vec![
            StateRateRecord {
                state: "CA".to_string(),
                rate: dec!(0.133),
            },
            StateRateRecord {
                state: "CA".to_string(),
                rate: dec!(0.10),
            },
        ];
        let brackets = TaxTableLoader::parse_brackets(TEST_BRACKETS_CSV.as_bytes()).unwrap();

        let result = TaxTableLoader::build(TaxYearConfig::tax_year_2024(), &brackets, &states);

        match result {
            Err(TaxTableLoaderError::DuplicateState(ref state)) => assert_eq!(state, "CA"),
            other => panic!("expected DuplicateState, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_non_contiguous_brackets() {
        let csv = "min_income,max_income,rate\n0,11000,0.10\n12000,,0.12\n";
        let brackets = TaxTableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let result = TaxTableLoader::build(TaxYearConfig::tax_year_2024(), &brackets, &[]);

        assert!(matches!(
            result,
            Err(TaxTableLoaderError::Table(
                TaxTableError::NonContiguousBracket { index: 1, .. }
            ))
        ));
    }

    #[test]
    fn test_build_keeps_codes_outside_the_50_states() {
        let brackets = TaxTableLoader::parse_brackets(TEST_BRACKETS_CSV.as_bytes()).unwrap();
        let states = vec![StateRateRecord {
            state: "DC".to_string(),
            rate: dec!(0.1075),
        }];

        let tables = TaxTableLoader::build(TaxYearConfig::tax_year_2024(), &brackets, &states)
            .expect("DC should load");

        assert_eq!(tables.state_rates().get("DC"), Some(dec!(0.1075)));
    }

    #[test]
    fn test_load_without_files_uses_2024_tables() {
        let tables = TaxTableLoader::load(&TableFiles::default()).expect("defaults should load");

        assert_eq!(tables, TaxTables::tax_year_2024());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let files = TableFiles {
            brackets: Some(PathBuf::from("does/not/exist.csv")),
            ..TableFiles::default()
        };

        let result = TaxTableLoader::load(&files);

        match result {
            Err(TaxTableLoaderError::Io { ref path, .. }) => {
                assert_eq!(path, &PathBuf::from("does/not/exist.csv"));
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
