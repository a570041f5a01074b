use rust_decimal::Decimal;
use thiserror::Error;

use entity_core::calculations::common::{round_half_up, round_to_dollars};

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator) and a leading `$`.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as whole US dollars with thousands separators,
/// e.g. `-$1,234`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_dollars(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a percentage with one decimal place, e.g. `50.0%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", round_half_up(value))
}

/// Formats a fractional rate as a percentage, e.g. `0.0455` as `4.55%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("100,000").unwrap(), dec!(100000));
    }

    #[test]
    fn parse_decimal_accepts_dollar_sign() {
        assert_eq!(parse_decimal("$50,000").unwrap(), dec!(50000));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_keeps_negative_sign() {
        assert_eq!(parse_decimal("-5").unwrap(), dec!(-5));
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(1000)), "$1,000");
        assert_eq!(format_currency(dec!(14129.55)), "$14,130");
        assert_eq!(format_currency(dec!(1234567.4)), "$1,234,567");
    }

    #[test]
    fn format_currency_negative_amounts() {
        assert_eq!(format_currency(dec!(-468.18)), "-$468");
        assert_eq!(format_currency(dec!(-0.2)), "$0");
    }

    #[test]
    fn format_percent_one_decimal() {
        assert_eq!(format_percent(dec!(50)), "50.0%");
        assert_eq!(format_percent(dec!(33.333)), "33.3%");
    }

    #[test]
    fn format_rate_as_percentage() {
        assert_eq!(format_rate(dec!(0.0455)), "4.55%");
        assert_eq!(format_rate(dec!(0.133)), "13.3%");
        assert_eq!(format_rate(dec!(0)), "0%");
    }
}
