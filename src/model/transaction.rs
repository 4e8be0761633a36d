use crate::model::Amount;
use crate::Result;
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, trace};

/// The category label used for income rows.
pub const INCOME_CATEGORY: &str = "Income";

/// The largest amount a single transaction may carry, one trillion dollars. Together with cent
/// precision this keeps every total and share the analysis computes within `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Whether a transaction adds to income or to expenses.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single normalized transaction row.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    date: NaiveDate,
    category: String,
    amount: Amount,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
}

impl Transaction {
    /// Creates a transaction. Amounts must be between zero and `MAX_AMOUNT` and are rounded to
    /// whole cents.
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: impl Into<Amount>,
        transaction_type: TransactionType,
    ) -> Result<Self> {
        let amount = amount.into();
        if amount.is_negative() {
            bail!("Transaction amounts cannot be negative, found {amount}");
        }
        if amount.value() > MAX_AMOUNT {
            bail!(
                "Transaction amounts cannot exceed {}, found {}",
                Amount::new(MAX_AMOUNT),
                amount.value()
            );
        }
        let amount = Amount::new(
            amount
                .value()
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        );
        Ok(Self {
            date,
            category: category.into(),
            amount,
            transaction_type,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// The transaction table that every analysis runs over.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transactions {
    data: Vec<Transaction>,
}

impl Transactions {
    pub fn new(data: Vec<Transaction>) -> Self {
        Self { data }
    }

    /// Reads `date,category,amount,type` rows from CSV data that has a header row. Columns may
    /// appear in any order and extra columns are ignored.
    pub fn from_csv(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut data = Vec::new();
        for (ix, result) in rdr.deserialize::<CsvRecord>().enumerate() {
            // Row 1 is the header
            let row = ix + 2;
            let record = result.with_context(|| format!("Unable to read CSV row {row}"))?;
            trace!("Row {row}: {record:?}");
            let transaction = record
                .into_transaction()
                .with_context(|| format!("Invalid transaction in CSV row {row}"))?;
            data.push(transaction);
        }
        debug!("Read {} transactions from CSV", data.len());
        Ok(Self { data })
    }

    pub fn data(&self) -> &[Transaction] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn income(&self) -> impl Iterator<Item = &Transaction> {
        self.data.iter().filter(|t| t.is_income())
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.data.iter().filter(|t| t.is_expense())
    }
}

impl FromIterator<Transaction> for Transactions {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A row of the input CSV file before its date has been parsed.
#[derive(Debug, Clone, Deserialize)]
struct CsvRecord {
    date: String,
    category: String,
    amount: Amount,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
}

impl CsvRecord {
    fn into_transaction(self) -> Result<Transaction> {
        let date = parse_date(&self.date)?;
        Transaction::new(date, self.category, self.amount, self.transaction_type)
    }
}

/// Parses an ISO date. Timestamps are accepted and truncated to their date.
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::from_str(s) {
        return Ok(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
        return Ok(date_time.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(date_time.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    bail!("Unable to parse '{s}' as a date")
}
