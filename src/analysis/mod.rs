//! The analytics pipeline: KPIs, then category statuses, then recommendations.
//!
//! Every stage is a pure function of the transaction table, the target budget and the desired
//! savings rate, so running the pipeline twice on the same input gives the same result.

mod classify;
mod kpi;
mod recommend;

pub use classify::{classify_category, summarize, CategorySummary, Status};
pub use kpi::Kpis;
pub use recommend::{recommend, Recommendation, RecommendationRow, SavingsRate};

use crate::model::{TargetBudget, Transactions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The full result of analyzing a transaction table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub kpis: Kpis,
    pub categories: Vec<CategorySummary>,
    pub recommendation: Recommendation,
}

impl Analysis {
    pub fn run(
        transactions: &Transactions,
        budget: &TargetBudget,
        desired_rate: SavingsRate,
    ) -> Self {
        let kpis = Kpis::compute(transactions);
        debug!(
            "Income {}, expenses {}, net savings {}",
            kpis.income, kpis.expenses, kpis.net_savings
        );
        if !kpis.has_income() {
            warn!("No income found in {} transactions", transactions.len());
        }
        let categories = summarize(transactions, kpis.income, budget);
        let recommendation = recommend(&categories, &kpis, desired_rate, budget);
        Self {
            kpis,
            categories,
            recommendation,
        }
    }

    /// The categories that are over their target, i.e. `Caution` or `Critical`.
    pub fn over_budget(&self) -> impl Iterator<Item = &CategorySummary> {
        self.categories.iter().filter(|c| c.status.is_over_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{manual_transactions, transactions};
    use rust_decimal::Decimal;

    #[test]
    fn test_run_manual_scenario() {
        let analysis = Analysis::run(
            &manual_transactions(),
            &TargetBudget::standard(),
            SavingsRate::default(),
        );
        assert_eq!(analysis.kpis.expenses, Decimal::from(1930));
        assert_eq!(analysis.categories.len(), 7);
        let over: Vec<&str> = analysis.over_budget().map(|c| c.category.as_str()).collect();
        assert_eq!(over, vec!["Rent"]);
        assert_eq!(analysis.recommendation.total_cut(), Decimal::from(480));
    }

    #[test]
    fn test_run_is_idempotent() {
        let t = manual_transactions();
        let budget = TargetBudget::standard();
        let rate = SavingsRate::new(30).unwrap();
        assert_eq!(
            Analysis::run(&t, &budget, rate),
            Analysis::run(&t, &budget, rate)
        );
    }

    #[test]
    fn test_run_without_income_degrades() {
        let analysis = Analysis::run(
            &transactions(&[("Rent", "900", "expense")]),
            &TargetBudget::standard(),
            SavingsRate::default(),
        );
        assert!(!analysis.kpis.has_income());
        assert_eq!(analysis.categories[0].status, Status::NotApplicable);
        assert_eq!(analysis.recommendation, Recommendation::NoIncome);
        assert_eq!(analysis.over_budget().count(), 0);
    }
}
