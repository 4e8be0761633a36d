//! Renders an `Analysis` as a plain-text dashboard or as JSON.

use crate::analysis::{Analysis, Recommendation, SavingsRate};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, TargetBudget};
use crate::source::InputSource;
use crate::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const TITLE: &str = "FinMate - Your Smart Money Friend";

/// The number of characters in the longest bar of a chart.
const BAR_WIDTH: u32 = 30;

/// How the report is written to stdout.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A human-readable dashboard.
    #[default]
    Text,
    /// The report as pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Everything shown to the user for one run of the pipeline.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Report {
    source: String,
    desired_rate: SavingsRate,
    #[serde(flatten)]
    analysis: Analysis,
    /// The recommendation sentences, in category order.
    sentences: Vec<String>,
}

impl Report {
    pub fn new(source: &InputSource, desired_rate: SavingsRate, analysis: Analysis) -> Self {
        let sentences = analysis.recommendation.sentences();
        Self {
            source: source.to_string(),
            desired_rate,
            analysis,
            sentences,
        }
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self).pub_result(ErrorType::Report),
        }
    }

    fn fmt_overview(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kpis = &self.analysis.kpis;
        heading(f, "Overview")?;
        let rows = vec![
            vec!["Total Income".to_string(), Amount::new(kpis.income).whole_dollars()],
            vec!["Total Expenses".to_string(), Amount::new(kpis.expenses).whole_dollars()],
            vec!["Net Savings".to_string(), Amount::new(kpis.net_savings).whole_dollars()],
            vec!["Savings Rate".to_string(), percent(kpis.savings_rate)],
        ];
        write!(f, "{}", table(&["Metric", "Value"], &rows))?;
        if !kpis.has_income() {
            writeln!(f)?;
            writeln!(
                f,
                "Warning: No income detected in the data. Please include at least one row with \
                type = 'income' or enter income in manual mode."
            )?;
        }
        Ok(())
    }

    fn fmt_spending(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let categories = &self.analysis.categories;
        heading(f, "Spending by Category")?;
        writeln!(f, "Total spend ($) by category")?;
        if categories.is_empty() {
            writeln!(f, "  No expense data to display.")?;
        } else {
            let bars: Vec<(&str, Decimal, String)> = categories
                .iter()
                .map(|c| {
                    (
                        c.category.as_str(),
                        c.amount,
                        Amount::new(c.amount).whole_dollars(),
                    )
                })
                .collect();
            write!(f, "{}", bar_chart(&bars))?;
        }

        writeln!(f)?;
        writeln!(f, "Share of income by category")?;
        if !self.analysis.kpis.has_income() || categories.is_empty() {
            writeln!(
                f,
                "  Share of income requires income and expense data to compute shares."
            )?;
        } else {
            let bars: Vec<(&str, Decimal, String)> = categories
                .iter()
                .map(|c| {
                    (
                        c.category.as_str(),
                        c.share_of_income,
                        percent(c.share_of_income * Decimal::ONE_HUNDRED),
                    )
                })
                .collect();
            write!(f, "{}", bar_chart(&bars))?;
        }
        Ok(())
    }

    fn fmt_status(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        heading(f, "Budget Status by Category")?;
        let rows: Vec<Vec<String>> = self
            .analysis
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    Amount::new(c.amount).whole_dollars(),
                    one_decimal(c.share_of_income * Decimal::ONE_HUNDRED),
                    c.status.to_string(),
                ]
            })
            .collect();
        write!(
            f,
            "{}",
            table(
                &["Category", "Amount ($)", "Share of Income (%)", "Status"],
                &rows
            )
        )
    }

    fn fmt_recommendations(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        heading(f, "Recommendations")?;
        match &self.analysis.recommendation {
            Recommendation::NoIncome => writeln!(
                f,
                "Cannot compute recommendations without income. Add income rows or use manual \
                mode to enter your monthly income."
            ),
            Recommendation::GoalMet { desired_rate } => writeln!(
                f,
                "Great job! You're already meeting or exceeding your savings goal of \
                {desired_rate} 🎉"
            ),
            Recommendation::NearTarget {
                desired_rate,
                savings_gap,
            } => {
                gap_sentence(f, *desired_rate, *savings_gap)?;
                writeln!(
                    f,
                    "Your categories are close to the recommended targets. Consider small \
                    reductions in non-essential categories to close the savings gap."
                )
            }
            Recommendation::Cuts {
                desired_rate,
                savings_gap,
                rows,
            } => {
                gap_sentence(f, *desired_rate, *savings_gap)?;
                writeln!(f)?;
                writeln!(f, "Suggested category-wise adjustments:")?;
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.category.clone(),
                            Amount::new(r.current_amount).whole_dollars(),
                            Amount::new(r.target_amount).whole_dollars(),
                            Amount::new(r.excess_amount).whole_dollars(),
                            Amount::new(r.suggested_cut).whole_dollars(),
                        ]
                    })
                    .collect();
                write!(
                    f,
                    "{}",
                    table(
                        &[
                            "Category",
                            "Current Spend ($)",
                            "Recommended Spend ($)",
                            "Excess Spend ($)",
                            "Suggested Cut ($)",
                        ],
                        &rows
                    )
                )?;
                if !self.sentences.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "Suggestions:")?;
                    for sentence in &self.sentences {
                        writeln!(f, "- {sentence}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "Savings goal: {} of income", self.desired_rate)?;
        self.fmt_overview(f)?;
        self.fmt_spending(f)?;
        self.fmt_status(f)?;
        self.fmt_recommendations(f)
    }
}

/// Renders the target budget as a table.
pub fn targets_table(budget: &TargetBudget) -> String {
    let rows: Vec<Vec<String>> = budget
        .iter()
        .map(|(category, share)| {
            vec![
                category.to_string(),
                percent(share * Decimal::ONE_HUNDRED),
            ]
        })
        .collect();
    format!(
        "{}\nAny other category: {}\n",
        table(&["Category", "Target Share of Income"], &rows),
        percent(budget.default_share() * Decimal::ONE_HUNDRED)
    )
}

fn heading(f: &mut Formatter<'_>, title: &str) -> std::fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "=".repeat(title.len()))
}

fn gap_sentence(f: &mut Formatter<'_>, rate: SavingsRate, gap: Decimal) -> std::fmt::Result {
    writeln!(
        f,
        "To reach your savings goal of {rate}, you need to save about {} more in this period.",
        Amount::new(gap).whole_dollars()
    )
}

/// `8.25` -> `8.2`
fn one_decimal(value: Decimal) -> String {
    let rounded = value.round_dp(1);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let num = rounded.abs().to_f64().unwrap_or_default();
    format!("{sign}{}", format_num::format_num!(".1f", num))
}

/// `8.25` -> `8.2%`
fn percent(value: Decimal) -> String {
    format!("{}%", one_decimal(value))
}

/// Renders a markdown table. Columns are padded to the widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ix, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(ix) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("|-{}-|\n", rule.join("-|-")));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Renders one horizontal bar per `(label, value, caption)`, scaled to the largest value.
fn bar_chart(bars: &[(&str, Decimal, String)]) -> String {
    let label_width = bars
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or_default();
    let max = bars
        .iter()
        .map(|(_, value, _)| *value)
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for (label, value, caption) in bars {
        let len = if max > Decimal::ZERO {
            (*value / max * Decimal::from(BAR_WIDTH))
                .round()
                .to_usize()
                .unwrap_or_default()
        } else {
            0
        };
        out.push_str(&format!(
            "  {label:<label_width$}  {:<width$}  {caption}\n",
            "#".repeat(len),
            width = BAR_WIDTH as usize
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Status;
    use crate::source::ManualScenario;
    use crate::test::transactions;

    fn report(source: InputSource, percent: u8) -> Report {
        let transactions = source.resolve().unwrap();
        let rate = SavingsRate::new(percent).unwrap();
        let analysis = Analysis::run(&transactions, &TargetBudget::standard(), rate);
        Report::new(&source, rate, analysis)
    }

    #[test]
    fn test_manual_text_report() {
        let text = report(InputSource::Manual(ManualScenario::default()), 20).to_string();
        assert!(text.starts_with(TITLE));
        assert!(text.contains("Source: manual scenario"));
        assert!(text.contains("| Total Income   | $1,800 |"), "{text}");
        assert!(text.contains("| Total Expenses | $1,930 |"), "{text}");
        assert!(text.contains("| Net Savings    | -$130  |"), "{text}");
        assert!(text.contains("| Savings Rate   | -7.2%  |"), "{text}");
        assert!(text.contains("| Rent          | $1,200     | 66.7                | Critical |"), "{text}");
        assert!(text.contains("you need to save about $490 more in this period."));
        assert!(text.contains("- Reduce Rent spending by about $480, from $1200 to $720."));
        assert!(!text.contains("No income detected"));
    }

    #[test]
    fn test_sample_report() {
        let report = report(InputSource::Sample, 20);
        let text = report.to_string();
        assert!(text.contains("Source: sample data (sample_data.csv)"));
        assert!(text.contains("| Total Income   | $3,300 |"), "{text}");
        // Rent 1450 of 3300 and Shopping 440.74 of 3300 are both Caution
        assert_eq!(
            report.sentences(),
            &[
                "Reduce Rent spending by about $130, from $1450 to $1320.".to_string(),
                "Reduce Shopping spending by about $111, from $441 to $330.".to_string(),
            ]
        );
    }

    #[test]
    fn test_goal_met_text() {
        let scenario = ManualScenario {
            rent: Decimal::from(700),
            ..ManualScenario::default()
        };
        let text = report(InputSource::Manual(scenario), 10).to_string();
        assert!(text.contains(
            "Great job! You're already meeting or exceeding your savings goal of 10% 🎉"
        ));
        assert!(!text.contains("Suggestions:"));
    }

    #[test]
    fn test_no_income_text() {
        let scenario = ManualScenario {
            income: Decimal::ZERO,
            ..ManualScenario::default()
        };
        let text = report(InputSource::Manual(scenario), 20).to_string();
        assert!(text.contains("Warning: No income detected in the data."));
        assert!(text.contains("Share of income requires income and expense data"));
        assert!(text.contains("Cannot compute recommendations without income."));
        assert!(text.contains("| N/A    |"), "{text}");
    }

    #[test]
    fn test_no_expenses_text() {
        let t = transactions(&[("Income", "1000", "income")]);
        let rate = SavingsRate::default();
        let analysis = Analysis::run(&t, &TargetBudget::standard(), rate);
        let text = Report::new(&InputSource::Sample, rate, analysis).to_string();
        assert!(text.contains("No expense data to display."));
        assert!(text.contains("Great job!"));
    }

    #[test]
    fn test_largest_amounts_against_smallest_income() {
        let t = transactions(&[
            ("Income", "0.01", "income"),
            ("Rent", "1000000000000", "expense"),
            ("Rent", "1000000000000", "expense"),
            ("Travel", "1000000000000", "expense"),
        ]);
        let rate = SavingsRate::new(SavingsRate::MAX).unwrap();
        let analysis = Analysis::run(&t, &TargetBudget::standard(), rate);
        assert_eq!(analysis.categories[0].status, Status::Critical);
        assert_eq!(analysis.recommendation.rows().len(), 2);
        let report = Report::new(&InputSource::Sample, rate, analysis);
        assert!(report.render(OutputFormat::Text).is_ok());
        assert!(report.render(OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_json_report() {
        let json = report(InputSource::Manual(ManualScenario::default()), 20)
            .render(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "manual scenario");
        assert_eq!(value["desired_rate"], 20);
        assert_eq!(value["kpis"]["expenses"], "1930");
        assert_eq!(value["recommendation"]["outcome"], "cuts");
        assert_eq!(value["recommendation"]["rows"][0]["category"], "Rent");
        assert_eq!(value["categories"][3]["status"], "Critical");
        assert_eq!(
            value["sentences"][0],
            "Reduce Rent spending by about $480, from $1200 to $720."
        );
    }

    #[test]
    fn test_targets_table() {
        let text = targets_table(&TargetBudget::standard());
        assert!(text.contains("| Rent          | 40.0%"), "{text}");
        assert!(text.contains("| Subscriptions | 5.0%"), "{text}");
        assert!(text.contains("Any other category: 10.0%"));
    }

    #[test]
    fn test_table_layout() {
        let text = table(
            &["Name", "Value"],
            &[vec!["a".to_string(), "12345678".to_string()]],
        );
        assert_eq!(
            text,
            "| Name | Value    |\n|------|----------|\n| a    | 12345678 |\n"
        );
    }

    #[test]
    fn test_bar_chart_scales_to_largest() {
        let chart = bar_chart(&[
            ("Rent", Decimal::from(100), "$100".to_string()),
            ("Food", Decimal::from(50), "$50".to_string()),
        ]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].matches('#').count(), 30);
        assert_eq!(lines[1].matches('#').count(), 15);
    }

    #[test]
    fn test_output_format_strings() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }
}
