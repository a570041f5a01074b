use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The 50 U.S. state codes and their names, in the order states are listed
/// to users.
pub const US_STATES: [(&str, &str); 50] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Returns the display name for a state code, if it is one of [`US_STATES`].
pub fn state_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Flat state income tax rates keyed by two-letter state code.
///
/// Lookups are exact and case-sensitive. A code that is not in the table
/// is a miss, which callers treat as a 0% jurisdiction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxRates(BTreeMap<String, Decimal>);

impl StateTaxRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top marginal rates for tax year 2024.
    pub fn tax_year_2024() -> Self {
        [
            ("AL", dec!(0.05)),
            ("AK", dec!(0)),
            ("AZ", dec!(0.045)),
            ("AR", dec!(0.069)),
            ("CA", dec!(0.133)),
            ("CO", dec!(0.0455)),
            ("CT", dec!(0.069)),
            ("DE", dec!(0.066)),
            ("FL", dec!(0)),
            ("GA", dec!(0.0575)),
            ("HI", dec!(0.11)),
            ("ID", dec!(0.058)),
            ("IL", dec!(0.0495)),
            ("IN", dec!(0.0323)),
            ("IA", dec!(0.0853)),
            ("KS", dec!(0.057)),
            ("KY", dec!(0.05)),
            ("LA", dec!(0.06)),
            ("ME", dec!(0.0715)),
            ("MD", dec!(0.0575)),
            ("MA", dec!(0.05)),
            ("MI", dec!(0.0425)),
            ("MN", dec!(0.0985)),
            ("MS", dec!(0.05)),
            ("MO", dec!(0.054)),
            ("MT", dec!(0.0675)),
            ("NE", dec!(0.0684)),
            ("NV", dec!(0)),
            ("NH", dec!(0)),
            ("NJ", dec!(0.1075)),
            ("NM", dec!(0.059)),
            ("NY", dec!(0.109)),
            ("NC", dec!(0.0525)),
            ("ND", dec!(0.029)),
            ("OH", dec!(0.0399)),
            ("OK", dec!(0.05)),
            ("OR", dec!(0.099)),
            ("PA", dec!(0.0307)),
            ("RI", dec!(0.0599)),
            ("SC", dec!(0.07)),
            ("SD", dec!(0)),
            ("TN", dec!(0)),
            ("TX", dec!(0)),
            ("UT", dec!(0.0495)),
            ("VT", dec!(0.0875)),
            ("VA", dec!(0.0575)),
            ("WA", dec!(0)),
            ("WV", dec!(0.065)),
            ("WI", dec!(0.0765)),
            ("WY", dec!(0)),
        ]
        .into_iter()
        .collect()
    }

    /// Inserts or replaces the rate for `code`, returning the previous rate.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        rate: Decimal,
    ) -> Option<Decimal> {
        self.0.insert(code.into(), rate)
    }

    pub fn get(
        &self,
        code: &str,
    ) -> Option<Decimal> {
        self.0.get(code).copied()
    }

    /// Rate for `code`, or zero when the code is not in the table.
    pub fn rate_or_zero(
        &self,
        code: &str,
    ) -> Decimal {
        self.get(code).unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for StateTaxRates {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, rate)| (code.into(), rate))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn tax_year_2024_covers_every_state() {
        let rates = StateTaxRates::tax_year_2024();

        assert_eq!(rates.len(), 50);
        for (code, _) in US_STATES {
            assert!(rates.get(code).is_some(), "missing rate for {code}");
        }
    }

    #[test]
    fn rate_or_zero_returns_table_rate() {
        let rates = StateTaxRates::tax_year_2024();

        assert_eq!(rates.rate_or_zero("CA"), dec!(0.133));
        assert_eq!(rates.rate_or_zero("NY"), dec!(0.109));
    }

    #[test]
    fn rate_or_zero_defaults_unknown_code_to_zero() {
        let rates = StateTaxRates::tax_year_2024();

        assert_eq!(rates.rate_or_zero("XX"), Decimal::ZERO);
        assert_eq!(rates.rate_or_zero(""), Decimal::ZERO);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let rates = StateTaxRates::tax_year_2024();

        assert_eq!(rates.get("ca"), None);
        assert_eq!(rates.rate_or_zero("ca"), Decimal::ZERO);
    }

    #[test]
    fn insert_replaces_existing_rate() {
        let mut rates = StateTaxRates::tax_year_2024();

        let previous = rates.insert("CA", dec!(0.10));

        assert_eq!(previous, Some(dec!(0.133)));
        assert_eq!(rates.rate_or_zero("CA"), dec!(0.10));
    }

    #[test]
    fn state_name_resolves_known_codes() {
        assert_eq!(state_name("NH"), Some("New Hampshire"));
        assert_eq!(state_name("XX"), None);
    }
}
