//! Types that represent the core data model, such as `Transaction` and `TargetBudget`.
mod amount;
mod budget;
mod transaction;

pub use amount::{Amount, AmountError};
pub use budget::{TargetBudget, KNOWN_CATEGORIES};
pub use transaction::{
    Transaction, TransactionType, Transactions, INCOME_CATEGORY, MAX_AMOUNT,
};
