//! Where transactions come from: a CSV file, the bundled sample, or a manual one-month scenario.
//!
//! Whichever source is chosen is resolved into a `Transactions` table once, before any analysis
//! runs.

use crate::error::{ErrorType, IntoResult};
use crate::model::{
    Amount, Transaction, TransactionType, Transactions, INCOME_CATEGORY,
    KNOWN_CATEGORIES,
};
use crate::{fs, Result};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tracing::{debug, info};

/// The sample transactions compiled into the binary.
const SAMPLE_CSV: &str = include_str!("../data/sample_data.csv");

/// The file name the sample data is shown as.
pub const SAMPLE_NAME: &str = "sample_data.csv";

/// The date given to every row of a manual scenario.
const MANUAL_DATE: (i32, u32, u32) = (2025, 11, 1);

/// The selected source of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InputSource {
    File { path: PathBuf },
    Sample,
    Manual(ManualScenario),
}

impl InputSource {
    /// Chooses between a CSV file and the bundled sample. A file wins over the sample. It is an
    /// error to supply no file and decline the sample.
    pub fn select(file: Option<PathBuf>, use_sample: bool) -> Result<Self> {
        match (file, use_sample) {
            (Some(path), _) => Ok(InputSource::File { path }),
            (None, true) => Ok(InputSource::Sample),
            (None, false) => Err(anyhow!(
                "Please provide a CSV file or use the bundled sample data"
            ))
            .pub_result(ErrorType::Input),
        }
    }

    /// Reads or builds the transaction table for this source.
    pub fn resolve(&self) -> Result<Transactions> {
        let transactions = match self {
            InputSource::File { path } => {
                let reader = fs::open(path).pub_result(ErrorType::Io)?;
                Transactions::from_csv(reader)
                    .with_context(|| format!("Unable to parse transactions in {}", path.display()))
                    .pub_result(ErrorType::Parse)?
            }
            InputSource::Sample => Transactions::from_csv(SAMPLE_CSV.as_bytes())
                .context("The bundled sample data is invalid")
                .pub_result(ErrorType::Parse)?,
            InputSource::Manual(scenario) => scenario.to_transactions()?,
        };
        info!("Loaded {} transactions from {self}", transactions.len());
        Ok(transactions)
    }
}

impl Display for InputSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::File { path } => write!(f, "{}", path.display()),
            InputSource::Sample => write!(f, "sample data ({SAMPLE_NAME})"),
            InputSource::Manual(_) => write!(f, "manual scenario"),
        }
    }
}

/// A one-month scenario: income plus spending in each of the known categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualScenario {
    pub income: Decimal,
    pub rent: Decimal,
    pub groceries: Decimal,
    pub eating_out: Decimal,
    pub transport: Decimal,
    pub shopping: Decimal,
    pub subscriptions: Decimal,
    pub other: Decimal,
}

impl Default for ManualScenario {
    fn default() -> Self {
        Self {
            income: Decimal::from(1800),
            rent: Decimal::from(1200),
            groceries: Decimal::from(250),
            eating_out: Decimal::from(150),
            transport: Decimal::from(90),
            shopping: Decimal::from(150),
            subscriptions: Decimal::from(30),
            other: Decimal::from(60),
        }
    }
}

impl ManualScenario {
    /// Spending per category, in `KNOWN_CATEGORIES` order.
    fn spending(&self) -> [Decimal; 7] {
        [
            self.rent,
            self.groceries,
            self.eating_out,
            self.transport,
            self.shopping,
            self.subscriptions,
            self.other,
        ]
    }

    /// One income row plus one expense row for each category with non-zero spending.
    pub fn to_transactions(&self) -> Result<Transactions> {
        let (y, m, d) = MANUAL_DATE;
        let date = NaiveDate::from_ymd_opt(y, m, d).context("Invalid manual scenario date")?;

        let mut data = vec![Transaction::new(
            date,
            INCOME_CATEGORY,
            Amount::new(self.income),
            TransactionType::Income,
        )
        .pub_result(ErrorType::Input)?];

        for (category, amount) in KNOWN_CATEGORIES.iter().zip(self.spending()) {
            if !amount.is_zero() {
                data.push(
                    Transaction::new(date, *category, Amount::new(amount), TransactionType::Expense)
                        .with_context(|| format!("Invalid amount for {category}"))
                        .pub_result(ErrorType::Input)?,
                );
            } else {
                debug!("Skipping {category}, no spending entered");
            }
        }
        Ok(Transactions::new(data))
    }
}
