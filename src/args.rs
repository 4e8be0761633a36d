//! These structs provide the CLI interface for the finmate CLI.

use crate::analysis::SavingsRate;
use crate::report::OutputFormat;
use crate::source::ManualScenario;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// finmate: Your smart money friend on the command line.
///
/// Reads a month of income and expense transactions, shows where the money went, flags categories
/// that take more than their share of income, and suggests how much to cut from each one to reach
/// a savings goal.
///
/// Transactions come from a CSV file with the columns date, category, amount and type (income or
/// expense), from the bundled sample data, or from a manual scenario entered as flags.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze transactions from a CSV file, or from the bundled sample data when no file is given.
    ///
    /// The file needs a header row with the columns date, category, amount and type. Dates are
    /// ISO dates like 2025-11-01, amounts are non-negative numbers, and type is either income or
    /// expense. Other columns are ignored.
    Analyze(AnalyzeArgs),
    /// Analyze a one-month scenario entered as income and spending per category.
    Manual(ManualArgs),
    /// Show the target share of income for each spending category.
    Targets,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Options that control the savings goal and how the report is printed.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The desired savings rate, as a whole percentage of income from 5 to 50.
    #[arg(long, env = "FINMATE_SAVINGS_RATE", default_value_t = SavingsRate::default())]
    savings_rate: SavingsRate,

    /// How to print the report.
    #[arg(long, value_enum, env = "FINMATE_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ReportArgs {
    pub fn new(savings_rate: SavingsRate, format: OutputFormat) -> Self {
        Self {
            savings_rate,
            format,
        }
    }

    pub fn savings_rate(&self) -> SavingsRate {
        self.savings_rate
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `finmate analyze` command.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// The CSV file to analyze. When omitted, the bundled sample data is used.
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Do not fall back to the bundled sample data when no file is given.
    #[arg(long)]
    no_sample: bool,

    #[clap(flatten)]
    report: ReportArgs,
}

impl AnalyzeArgs {
    pub fn new(file: Option<PathBuf>, no_sample: bool, report: ReportArgs) -> Self {
        Self {
            file,
            no_sample,
            report,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn use_sample(&self) -> bool {
        !self.no_sample
    }

    pub fn report(&self) -> &ReportArgs {
        &self.report
    }
}

/// (Not shown): Args for the `finmate manual` command.
#[derive(Debug, Parser, Clone)]
pub struct ManualArgs {
    /// Monthly income ($).
    #[arg(long, default_value = "1800")]
    income: Decimal,

    /// Rent ($).
    #[arg(long, default_value = "1200")]
    rent: Decimal,

    /// Groceries ($).
    #[arg(long, default_value = "250")]
    groceries: Decimal,

    /// Eating Out ($).
    #[arg(long, default_value = "150")]
    eating_out: Decimal,

    /// Transport ($).
    #[arg(long, default_value = "90")]
    transport: Decimal,

    /// Shopping ($).
    #[arg(long, default_value = "150")]
    shopping: Decimal,

    /// Subscriptions ($).
    #[arg(long, default_value = "30")]
    subscriptions: Decimal,

    /// Other ($).
    #[arg(long, default_value = "60")]
    other: Decimal,

    #[clap(flatten)]
    report: ReportArgs,
}

impl ManualArgs {
    pub fn scenario(&self) -> ManualScenario {
        ManualScenario {
            income: self.income,
            rent: self.rent,
            groceries: self.groceries,
            eating_out: self.eating_out,
            transport: self.transport,
            shopping: self.shopping,
            subscriptions: self.subscriptions,
            other: self.other,
        }
    }

    pub fn report(&self) -> &ReportArgs {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("finmate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_analyze_defaults() {
        let args = parse(&["analyze"]);
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        let Command::Analyze(analyze) = args.command() else {
            panic!("expected analyze");
        };
        assert_eq!(analyze.file(), None);
        assert!(analyze.use_sample());
        assert_eq!(analyze.report().savings_rate(), SavingsRate::default());
        assert_eq!(analyze.report().format(), OutputFormat::Text);
    }

    #[test]
    fn test_analyze_file() {
        let args = parse(&[
            "--log-level",
            "debug",
            "analyze",
            "--file",
            "nov.csv",
            "--no-sample",
            "--savings-rate",
            "35",
            "--format",
            "json",
        ]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        let Command::Analyze(analyze) = args.command() else {
            panic!("expected analyze");
        };
        assert_eq!(analyze.file(), Some(Path::new("nov.csv")));
        assert!(!analyze.use_sample());
        assert_eq!(analyze.report().savings_rate().percent(), 35);
        assert_eq!(analyze.report().format(), OutputFormat::Json);
    }

    #[test]
    fn test_savings_rate_out_of_range() {
        let result = Args::try_parse_from(["finmate", "analyze", "--savings-rate", "60"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_manual_defaults() {
        let args = parse(&["manual"]);
        let Command::Manual(manual) = args.command() else {
            panic!("expected manual");
        };
        assert_eq!(manual.scenario(), ManualScenario::default());
    }

    #[test]
    fn test_manual_values() {
        let args = parse(&["manual", "--income", "2500.50", "--eating-out", "0"]);
        let Command::Manual(manual) = args.command() else {
            panic!("expected manual");
        };
        let scenario = manual.scenario();
        assert_eq!(scenario.income, "2500.50".parse::<Decimal>().unwrap());
        assert_eq!(scenario.eating_out, Decimal::ZERO);
        assert_eq!(scenario.rent, Decimal::from(1200));
    }
}
