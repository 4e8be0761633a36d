//! Proposes spending cuts that close the gap between actual and desired savings.
//!
//! The savings gap is split across over-budget categories in proportion to each one's excess over
//! its target amount. The split is scaled by `min(1, gap / total_excess)`, so no category is asked
//! to cut below its target and the cuts never add up to more than the gap.

use crate::analysis::{CategorySummary, Kpis};
use crate::model::{Amount, TargetBudget};
use crate::Result;
use anyhow::bail;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// A desired savings rate as a whole percentage of income, from 5 to 50.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SavingsRate(u8);

impl SavingsRate {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 50;

    pub fn new(percent: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&percent) {
            bail!(
                "The savings rate must be between {}% and {}%, got {percent}%",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// The rate as a fraction of income, e.g. `0.2` for 20%.
    pub fn fraction(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }
}

impl Default for SavingsRate {
    fn default() -> Self {
        Self(20)
    }
}

impl Display for SavingsRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for SavingsRate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let percent: u8 = s
            .strip_suffix('%')
            .unwrap_or(s)
            .parse()
            .map_err(|_| anyhow::anyhow!("'{s}' is not a whole-number percentage"))?;
        Self::new(percent)
    }
}

impl TryFrom<u8> for SavingsRate {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SavingsRate> for u8 {
    fn from(value: SavingsRate) -> Self {
        value.0
    }
}

/// A suggested cut for one over-budget category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub category: String,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    /// How far `current_amount` is above `target_amount`, never negative.
    pub excess_amount: Decimal,
    pub suggested_cut: Decimal,
}

impl RecommendationRow {
    /// The advice for this category, or `None` when there is nothing to cut.
    pub fn sentence(&self) -> Option<String> {
        if self.suggested_cut <= Decimal::ZERO {
            return None;
        }
        Some(format!(
            "Reduce {} spending by about {}, from {} to {}.",
            self.category,
            Amount::new(self.suggested_cut).plain_dollars(),
            Amount::new(self.current_amount).plain_dollars(),
            Amount::new(self.target_amount).plain_dollars(),
        ))
    }
}

/// The outcome of the recommendation engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    /// There is no income, so no savings goal can be computed.
    NoIncome,
    /// Net savings already meet the desired rate.
    GoalMet { desired_rate: SavingsRate },
    /// There is a savings gap but no category is measurably over its target.
    NearTarget {
        desired_rate: SavingsRate,
        savings_gap: Decimal,
    },
    /// Cuts spread across the over-budget categories.
    Cuts {
        desired_rate: SavingsRate,
        savings_gap: Decimal,
        rows: Vec<RecommendationRow>,
    },
}

impl Recommendation {
    /// The rows of a `Cuts` recommendation, empty otherwise.
    pub fn rows(&self) -> &[RecommendationRow] {
        match self {
            Recommendation::Cuts { rows, .. } => rows,
            _ => &[],
        }
    }

    /// The advice sentences for every category that has a positive suggested cut.
    pub fn sentences(&self) -> Vec<String> {
        self.rows().iter().filter_map(|r| r.sentence()).collect()
    }

    /// The sum of all suggested cuts.
    pub fn total_cut(&self) -> Decimal {
        self.rows().iter().map(|r| r.suggested_cut).sum()
    }
}

/// Computes the cuts needed to reach `desired_rate`, given the KPIs and classified categories.
pub fn recommend(
    summaries: &[CategorySummary],
    kpis: &Kpis,
    desired_rate: SavingsRate,
    budget: &TargetBudget,
) -> Recommendation {
    if !kpis.has_income() {
        debug!("No income, skipping recommendations");
        return Recommendation::NoIncome;
    }
    let income = kpis.income;

    let target_savings = income * desired_rate.fraction();
    let savings_gap = target_savings - kpis.net_savings;
    debug!(
        "Target savings {target_savings}, net savings {}, gap {savings_gap}",
        kpis.net_savings
    );
    if savings_gap <= Decimal::ZERO {
        return Recommendation::GoalMet { desired_rate };
    }

    let mut rows: Vec<RecommendationRow> = summaries
        .iter()
        .filter(|s| s.status.is_over_budget())
        .map(|s| {
            let target_amount = budget.target_share(&s.category) * income;
            RecommendationRow {
                category: s.category.clone(),
                current_amount: s.amount,
                target_amount,
                excess_amount: (s.amount - target_amount).max(Decimal::ZERO),
                suggested_cut: Decimal::ZERO,
            }
        })
        .collect();

    let total_excess: Decimal = rows.iter().map(|r| r.excess_amount).sum();
    if total_excess <= Decimal::ZERO {
        return Recommendation::NearTarget {
            desired_rate,
            savings_gap,
        };
    }

    let scale = (savings_gap / total_excess).min(Decimal::ONE);
    debug!("Total excess {total_excess}, scale factor {scale}");
    for row in rows.iter_mut() {
        row.suggested_cut = row.excess_amount * scale;
    }

    Recommendation::Cuts {
        desired_rate,
        savings_gap,
        rows,
    }
}
