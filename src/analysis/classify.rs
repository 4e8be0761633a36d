//! Groups expenses by category and rates each category against its target share of income.
//!
//! Tolerance bands are absolute percentage points added to each category's own target, so a
//! category with a 5% target and one with a 40% target get the same 2pp and 5pp headroom.

use crate::model::{TargetBudget, Transactions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Share of income above target that is still `Ok`, in hundredths.
const OK_BAND: i64 = 2;

/// Share of income above target that is still `Caution`, in hundredths.
const CAUTION_BAND: i64 = 5;

/// How a category's spending compares with its target share of income.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Caution,
    Critical,
    /// There is no income to compare spending against.
    #[serde(rename = "N/A")]
    NotApplicable,
}

serde_plain::derive_display_from_serialize!(Status);
serde_plain::derive_fromstr_from_deserialize!(Status);

impl Status {
    /// True for the statuses that make a category a candidate for cuts.
    pub fn is_over_budget(&self) -> bool {
        matches!(self, Status::Caution | Status::Critical)
    }
}

/// Total spending in one category and how it rates against the target budget.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub amount: Decimal,
    /// Fraction of income, e.g. `0.42` for 42%. Zero when there is no income.
    pub share_of_income: Decimal,
    pub status: Status,
}

/// Rates a share of income against a target share. Both are fractions of income.
pub fn classify_category(share_of_income: Decimal, target: Decimal) -> Status {
    if share_of_income <= target + Decimal::new(OK_BAND, 2) {
        Status::Ok
    } else if share_of_income <= target + Decimal::new(CAUTION_BAND, 2) {
        Status::Caution
    } else {
        Status::Critical
    }
}

/// Sums expenses per category and classifies each one. The result is ordered by category name.
/// Every status is `NotApplicable` when `income` is not positive.
pub fn summarize(
    transactions: &Transactions,
    income: Decimal,
    budget: &TargetBudget,
) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions.expenses() {
        *totals.entry(t.category()).or_default() += t.amount().value();
    }

    let has_income = income > Decimal::ZERO;
    totals
        .into_iter()
        .map(|(category, amount)| {
            let (share_of_income, status) = if has_income {
                let share = amount / income;
                (share, classify_category(share, budget.target_share(category)))
            } else {
                (Decimal::ZERO, Status::NotApplicable)
            };
            trace!("{category}: {amount} ({share_of_income}) -> {status}");
            CategorySummary {
                category: category.to_string(),
                amount,
                share_of_income,
                status,
            }
        })
        .collect()
}
