//! Amount type for handling monetary values with optional dollar signs.
//!
//! This module provides the `Amount` type which wraps `Decimal`, parses values that may or may not
//! include a dollar sign and commas, and formats values the way the report shows them.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a dollar amount.
///
/// Parsing is lenient about dollar signs, thousands separators and surrounding whitespace.
///
/// # Examples
///
/// ```
/// # use finmate::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("$1,930").unwrap();
/// let b = Amount::from_str("1930.00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "$1,930.00");
/// assert_eq!(a.whole_dollars(), "$1,930");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// The value rounded to whole dollars, e.g. `479.6` -> `480`.
    pub fn rounded(&self) -> Decimal {
        self.value().round_dp(0)
    }

    /// Formats as whole dollars with thousands separators, e.g. `-$1,930`.
    pub fn whole_dollars(&self) -> String {
        let sign = if self.rounded().is_sign_negative() && !self.rounded().is_zero() {
            "-"
        } else {
            ""
        };
        let num = self.rounded().abs().to_f64().unwrap_or_default();
        format!("{sign}${}", format_num::format_num!(",.0f", num))
    }

    /// Formats as whole dollars without separators, e.g. `$1930`.
    pub fn plain_dollars(&self) -> String {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-${}", rounded.abs())
        } else {
            format!("${}", rounded.abs())
        }
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // "-$50.00", "$50.00", "-50.00" and "50.00" are all accepted
        let without_dollar = match trimmed.strip_prefix('-') {
            Some(after_minus) => match after_minus.strip_prefix('$') {
                Some(after_dollar) => format!("-{after_dollar}"),
                None => trimmed.to_string(),
            },
            None => trimmed.strip_prefix('$').unwrap_or(trimmed).to_string(),
        };

        let without_commas = without_dollar.replace(',', "");
        let value = Decimal::from_str(&without_commas)
            .or_else(|_| Decimal::from_scientific(&without_commas))
            .map_err(AmountError)?;
        Ok(Amount::new(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value().abs().to_f64().unwrap_or_default();
        write!(f, "{sign}${}", format_num::format_num!(",.2f", num))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.value, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_plain_integer() {
        let amount = Amount::from_str("1200").unwrap();
        assert_eq!(amount.value(), dec("1200"));
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), dec("-50.00"));
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
    }

    #[test]
    fn test_parse_whitespace_and_commas() {
        let amount = Amount::from_str("  $1,234,567.89  ").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(Amount::from_str("twelve").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec("1930")).to_string(), "$1,930.00");
        assert_eq!(Amount::new(dec("-130.5")).to_string(), "-$130.50");
        assert_eq!(Amount::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_whole_dollars() {
        assert_eq!(Amount::new(dec("1930")).whole_dollars(), "$1,930");
        assert_eq!(Amount::new(dec("-130")).whole_dollars(), "-$130");
        assert_eq!(Amount::new(dec("479.6")).whole_dollars(), "$480");
        assert_eq!(Amount::new(dec("-0.2")).whole_dollars(), "$0");
    }

    #[test]
    fn test_plain_dollars() {
        assert_eq!(Amount::new(dec("1200")).plain_dollars(), "$1200");
        assert_eq!(Amount::new(dec("720.00")).plain_dollars(), "$720");
        assert_eq!(Amount::new(dec("12345.7")).plain_dollars(), "$12346");
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Amount::new(dec("5")).is_positive());
        assert!(Amount::new(dec("-5")).is_negative());
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"$50.00\"").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }
}
