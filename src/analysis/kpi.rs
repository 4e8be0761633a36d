use crate::model::Transactions;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline numbers for a transaction table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_savings: Decimal,
    /// Net savings as a percentage of income, or zero when there is no income.
    pub savings_rate: Decimal,
}

impl Kpis {
    pub fn compute(transactions: &Transactions) -> Self {
        let income: Decimal = transactions.income().map(|t| t.amount().value()).sum();
        let expenses: Decimal = transactions.expenses().map(|t| t.amount().value()).sum();
        let net_savings = income - expenses;
        let savings_rate = if income > Decimal::ZERO {
            net_savings / income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        Self {
            income,
            expenses,
            net_savings,
            savings_rate,
        }
    }

    /// False when income is zero, in which case shares, statuses and recommendations cannot be
    /// computed.
    pub fn has_income(&self) -> bool {
        self.income > Decimal::ZERO
    }
}
