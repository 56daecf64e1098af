use std::fmt;

use crate::core::{Inputs, Projection};

pub const TITLE: &str = "FreedomCalc.ai";
pub const CAPTION: &str = "Financial Independence & Retire Early (FIRE) Simulator";
pub const CURRENCY_SYMBOL: &str = "₹";

const TABLE_HEADERS: [&str; 4] = [
    "Year",
    "Portfolio Value (Nominal)",
    "Invested Amount",
    "Real Purchasing Power",
];

/// Plain-text rendering of one projection: headline metrics, analysis, table.
pub struct Report<'a> {
    pub inputs: &'a Inputs,
    pub projection: &'a Projection,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.projection.summary;

        writeln!(f, "{TITLE}")?;
        writeln!(f, "{CAPTION}")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<24}{} Years",
            "Years to Freedom", summary.years_to_freedom
        )?;
        writeln!(
            f,
            "{:<24}{}",
            "Projected Corpus",
            format_currency(summary.projected_corpus)
        )?;
        writeln!(
            f,
            "{:<24}{}  (4% safe withdrawal rule)",
            "Passive Monthly Income",
            format_currency(summary.passive_monthly_income)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "To retire at {}, you need to stay consistent.",
            self.inputs.retire_age
        )?;
        writeln!(
            f,
            "While you will invest {}, compound interest will generate {} for you.",
            format_currency(summary.total_invested),
            format_currency(summary.interest_earned_total)
        )?;

        if self.projection.records.is_empty() {
            writeln!(f)?;
            return writeln!(f, "No years to project before retirement.");
        }

        let rows: Vec<[String; 4]> = self
            .projection
            .records
            .iter()
            .map(|r| {
                [
                    r.year.to_string(),
                    group_thousands(r.portfolio_value_nominal as i64),
                    group_thousands(r.invested_amount as i64),
                    group_thousands(r.real_purchasing_power as i64),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        writeln!(f)?;
        write_row(f, &TABLE_HEADERS, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;
        for row in &rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S],
    widths: &[usize; 4],
) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell.as_ref(), width = *width))
        .collect();
    writeln!(f, "{}", line.join("  "))
}

/// `₹ 1,234,567`: whole units, comma-grouped.
pub fn format_currency(value: f64) -> String {
    format!("{CURRENCY_SYMBOL} {}", group_thousands(value.round() as i64))
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_projection;

    fn sample_inputs() -> Inputs {
        Inputs {
            current_age: 24,
            retire_age: 26,
            current_savings: 50_000.0,
            monthly_investment: 10_000.0,
            expected_return_pct: 12.0,
            inflation_rate_pct: 6.0,
        }
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(18_992_076), "18,992,076");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn format_currency_rounds_to_whole_units() {
        assert_eq!(format_currency(63_306.919), "₹ 63,307");
        assert_eq!(format_currency(50_000.0), "₹ 50,000");
    }

    #[test]
    fn report_lists_metrics_analysis_and_rows() {
        let inputs = sample_inputs();
        let projection = run_projection(&inputs);
        let text = Report {
            inputs: &inputs,
            projection: &projection,
        }
        .to_string();

        assert!(text.starts_with("FreedomCalc.ai\n"));
        assert!(text.contains("Years to Freedom        2 Years"));
        assert!(text.contains("Projected Corpus        ₹ 317,120"));
        assert!(text.contains("To retire at 26"));
        assert!(text.contains("While you will invest ₹ 290,000"));
        assert!(text.contains("compound interest will generate ₹ 27,120"));
        assert!(text.contains("Portfolio Value (Nominal)"));

        let last_line = text.lines().last().expect("table rows");
        let cells: Vec<&str> = last_line.split_whitespace().collect();
        assert_eq!(cells, vec!["26", "317,120", "290,000", "282,236"]);
    }

    #[test]
    fn report_without_years_skips_table() {
        let mut inputs = sample_inputs();
        inputs.retire_age = 24;
        let projection = run_projection(&inputs);
        let text = Report {
            inputs: &inputs,
            projection: &projection,
        }
        .to_string();

        assert!(text.contains("0 Years"));
        assert!(text.contains("Projected Corpus        ₹ 50,000"));
        assert!(text.contains("No years to project before retirement."));
        assert!(!text.contains("Real Purchasing Power"));
    }
}
