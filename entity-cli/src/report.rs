//! Plain-text rendering of comparison results and rate tables.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use entity_core::{
    Recommendation, SalaryPoint, StateTaxRates, TaxBracket, TaxResult, lowest_scorp_total,
    state_name,
};

use crate::utils::{format_currency, format_percent, format_rate};

const LABEL_WIDTH: usize = 22;
const BAR_WIDTH: u32 = 30;

fn line(
    label: &str,
    value: impl AsRef<str>,
) -> String {
    format!("  {label:<width$}{:>12}", value.as_ref(), width = LABEL_WIDTH)
}

fn state_label(state: &str) -> String {
    match state_name(state) {
        Some(name) => format!("{state} - {name}"),
        None => format!("{state} - not in the rate table, no state tax"),
    }
}

fn bar(percent: Decimal) -> String {
    let filled = (percent * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH as usize);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH as usize - filled)
    )
}

/// One-sentence recommendation, e.g. "Elect S-Corp: saves $6,480 per year".
pub fn recommendation_line(result: &TaxResult) -> String {
    match result.recommendation {
        Recommendation::SCorp => format!(
            "Elect {}: saves {} per year",
            result.recommendation,
            format_currency(result.savings)
        ),
        Recommendation::Llc => format!(
            "Stay an {}: {} would cost {} more per year",
            result.recommendation,
            Recommendation::SCorp,
            format_currency(result.savings.abs())
        ),
    }
}

/// Renders the itemized comparison for one set of inputs.
pub fn render_comparison(
    result: &TaxResult,
    state: &str,
) -> String {
    let llc = &result.breakdown.llc;
    let scorp = &result.breakdown.scorp;
    let burden = result.relative_burden();

    let lines = vec![
        format!("LLC vs S-Corp ({})", state_label(state)),
        String::new(),
        line("Total income", format_currency(result.total_income())),
        line("Salary", format_currency(scorp.salary)),
        line("Distributions", format_currency(scorp.distributions)),
        line("Salary share", format_percent(result.salary_share())),
        String::new(),
        "LLC".to_string(),
        line("Federal income tax", format_currency(llc.federal_income_tax)),
        line("Self-employment tax", format_currency(llc.self_employment_tax)),
        line("State tax", format_currency(llc.state_tax)),
        line("Total", format_currency(result.llc_total_tax)),
        String::new(),
        "S-Corp".to_string(),
        line("Federal income tax", format_currency(scorp.federal_income_tax)),
        line("Payroll tax", format_currency(scorp.payroll_tax)),
        line("State tax", format_currency(scorp.state_tax)),
        line("Total", format_currency(result.scorp_total_tax)),
        String::new(),
        format!("  LLC     {} {}", bar(burden.llc), format_percent(burden.llc)),
        format!("  S-Corp  {} {}", bar(burden.scorp), format_percent(burden.scorp)),
        String::new(),
        recommendation_line(result),
    ];

    lines.join("\n")
}

/// Renders a salary sweep with the lowest S-Corp total marked.
pub fn render_sweep(points: &[SalaryPoint]) -> String {
    let best = lowest_scorp_total(points);
    let mut lines = vec![format!(
        "  {:>12}  {:>14}  {:>12}",
        "Salary", "S-Corp total", "Savings"
    )];
    for point in points {
        let marker = if best == Some(point) { "  <- lowest" } else { "" };
        lines.push(format!(
            "  {:>12}  {:>14}  {:>12}{marker}",
            format_currency(point.salary),
            format_currency(point.scorp_total_tax),
            format_currency(point.savings),
        ));
    }
    if let Some(best) = best {
        lines.push(String::new());
        lines.push(format!(
            "Lowest S-Corp total at a salary of {}",
            format_currency(best.salary)
        ));
    }
    lines.join("\n")
}

/// Lists every state in the table with its name and rate.
pub fn render_states(rates: &StateTaxRates) -> String {
    rates
        .iter()
        .map(|(code, rate)| {
            format!(
                "  {code}  {:<16}{:>8}",
                state_name(code).unwrap_or("-"),
                format_rate(rate)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lists the federal bracket schedule.
pub fn render_brackets(brackets: &[TaxBracket]) -> String {
    brackets
        .iter()
        .map(|b| {
            let upper = match b.max_income {
                Some(max) => format_currency(max),
                None => "and up".to_string(),
            };
            format!(
                "  {:>12} - {:<12}{:>6}",
                format_currency(b.min_income),
                upper,
                format_rate(b.tax_rate)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use entity_core::{TaxEngine, federal_brackets_2024};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bar_is_full_at_one_hundred_percent() {
        assert_eq!(bar(dec!(100)), format!("[{}]", "#".repeat(30)));
    }

    #[test]
    fn bar_is_empty_at_zero() {
        assert_eq!(bar(dec!(0)), format!("[{}]", " ".repeat(30)));
    }

    #[test]
    fn bar_rounds_to_nearest_cell() {
        assert_eq!(bar(dec!(50)), format!("[{}{}]", "#".repeat(15), " ".repeat(15)));
    }

    #[test]
    fn recommendation_line_for_scorp() {
        let result = TaxEngine::tax_year_2024()
            .compare(dec!(100000), dec!(50000), "FL")
            .unwrap();

        assert_eq!(recommendation_line(&result), "Elect S-Corp: saves $6,480 per year");
    }

    #[test]
    fn recommendation_line_for_llc() {
        let result = TaxEngine::tax_year_2024()
            .compare(dec!(40000), dec!(40000), "CA")
            .unwrap();

        assert_eq!(
            recommendation_line(&result),
            "Stay an LLC: S-Corp would cost $468 more per year"
        );
    }

    #[test]
    fn render_comparison_itemizes_both_paths() {
        let result = TaxEngine::tax_year_2024()
            .compare(dec!(100000), dec!(50000), "CA")
            .unwrap();

        let text = render_comparison(&result, "CA");

        assert!(text.starts_with("LLC vs S-Corp (CA - California)"));
        assert!(text.contains("Self-employment tax"));
        assert!(text.contains("$14,130"));
        assert!(text.contains("Payroll tax"));
        assert!(text.contains("$7,650"));
        assert!(text.contains("$13,300"));
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn render_comparison_flags_unknown_state() {
        let result = TaxEngine::tax_year_2024()
            .compare(dec!(100000), dec!(50000), "XX")
            .unwrap();

        let text = render_comparison(&result, "XX");

        assert!(text.contains("XX - not in the rate table"));
    }

    #[test]
    fn render_sweep_marks_best_point() {
        let engine = TaxEngine::tax_year_2024();
        let points = engine.salary_sweep(dec!(2000), "FL", dec!(1000)).unwrap();

        let text = render_sweep(&points);

        assert_eq!(text.matches("<- lowest").count(), 1);
        assert!(text.ends_with("Lowest S-Corp total at a salary of $0"));
    }

    #[test]
    fn render_sweep_marks_point_matching_best_salary() {
        let engine = TaxEngine::tax_year_2024();
        let points = engine.salary_sweep(dec!(30000), "CA", dec!(10000)).unwrap();
        let best = engine.best_salary(dec!(30000), "CA", dec!(10000)).unwrap();

        let text = render_sweep(&points);

        let marked: Vec<_> = text.lines().filter(|l| l.ends_with("<- lowest")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].trim_start().starts_with(&format_currency(best.salary)));
    }

    #[test]
    fn render_sweep_of_no_points_has_only_header() {
        let text = render_sweep(&[]);

        assert_eq!(text.lines().count(), 1);
        assert!(!text.contains("Lowest"));
    }

    #[test]
    fn render_states_lists_every_state() {
        let text = render_states(&StateTaxRates::tax_year_2024());

        assert_eq!(text.lines().count(), 50);
        assert!(text.contains("California"));
        assert!(text.contains("13.3%"));
    }

    #[test]
    fn render_brackets_marks_top_bracket_unbounded() {
        let text = render_brackets(&federal_brackets_2024());

        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().last().unwrap().contains("and up"));
        assert!(text.contains("$578,125"));
    }
}
