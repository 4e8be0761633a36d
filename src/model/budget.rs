use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven categories that have a target share and can be entered in a manual scenario, in the
/// order they are presented.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "Rent",
    "Groceries",
    "Eating Out",
    "Transport",
    "Shopping",
    "Subscriptions",
    "Other",
];

/// Target shares in hundredths of income, parallel to `KNOWN_CATEGORIES`.
const STANDARD_SHARES: [i64; 7] = [40, 15, 10, 10, 10, 5, 10];

/// Hundredths of income expected of a category that has no entry in the table.
const DEFAULT_SHARE: i64 = 10;

/// The share of income each spending category is expected to consume.
///
/// This is read-only configuration. It is built once, at startup, and handed to the classifier and
/// the recommendation engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TargetBudget {
    shares: BTreeMap<String, Decimal>,
    default_share: Decimal,
}

impl TargetBudget {
    /// The standard budget: Rent 40%, Groceries 15%, Eating Out 10%, Transport 10%, Shopping 10%,
    /// Subscriptions 5%, Other 10%. Anything else is expected to take 10%.
    pub fn standard() -> Self {
        let shares = KNOWN_CATEGORIES
            .iter()
            .zip(STANDARD_SHARES)
            .map(|(category, share)| (category.to_string(), Decimal::new(share, 2)))
            .collect();
        Self {
            shares,
            default_share: Decimal::new(DEFAULT_SHARE, 2),
        }
    }

    /// The target share of income for `category`, falling back to the default share.
    pub fn target_share(&self, category: &str) -> Decimal {
        self.shares
            .get(category)
            .copied()
            .unwrap_or(self.default_share)
    }

    pub fn default_share(&self) -> Decimal {
        self.default_share
    }

    /// Iterates over the categories that have an explicit target, alphabetically.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.shares.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for TargetBudget {
    fn default() -> Self {
        Self::standard()
    }
}
