//! Customer-facing order number type.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    /// The input is not exactly six characters long.
    #[error("order number must be exactly {len} digits", len = OrderNumber::LENGTH)]
    WrongLength,
    /// The input contains a character that is not an ASCII digit.
    #[error("order number must contain only ASCII digits")]
    NonDigit,
    /// The input starts with a zero.
    #[error("order number cannot start with a zero")]
    LeadingZero,
}

/// A customer-facing order number.
///
/// Always a string of exactly six ASCII digits with a non-zero first digit,
/// i.e. a value in 100000-999999. Order numbers are drawn at random when an
/// order is placed and are NOT guaranteed unique: the store carries no
/// uniqueness constraint, and the checkout workflow deliberately performs no
/// collision check before insert.
///
/// ## Examples
///
/// ```
/// use amber_lane_core::OrderNumber;
///
/// let number = OrderNumber::parse("482913").unwrap();
/// assert_eq!(number.as_str(), "482913");
///
/// assert!(OrderNumber::parse("012345").is_err()); // leading zero
/// assert!(OrderNumber::parse("12345").is_err());  // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Number of digits in an order number.
    pub const LENGTH: usize = 6;
    /// Smallest valid order number.
    pub const MIN: u32 = 100_000;
    /// Largest valid order number.
    pub const MAX: u32 = 999_999;

    /// Draw a random order number, uniform over 100000-999999.
    ///
    /// No uniqueness check is performed against existing orders; a collision
    /// surfaces later as an order-insert failure if the store rejects it.
    #[must_use]
    pub fn random() -> Self {
        let n = rand::rng().random_range(Self::MIN..=Self::MAX);
        Self(n.to_string())
    }

    /// Parse an `OrderNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly six ASCII digits or
    /// starts with a zero.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        if s.len() != Self::LENGTH {
            return Err(OrderNumberError::WrongLength);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::NonDigit);
        }

        if s.starts_with('0') {
            return Err(OrderNumberError::LeadingZero);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(OrderNumber::parse("100000").is_ok());
        assert!(OrderNumber::parse("482913").is_ok());
        assert!(OrderNumber::parse("999999").is_ok());
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            OrderNumber::parse("12345"),
            Err(OrderNumberError::WrongLength)
        ));
        assert!(matches!(
            OrderNumber::parse("1234567"),
            Err(OrderNumberError::WrongLength)
        ));
        assert!(matches!(
            OrderNumber::parse(""),
            Err(OrderNumberError::WrongLength)
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            OrderNumber::parse("12a456"),
            Err(OrderNumberError::NonDigit)
        ));
        assert!(matches!(
            OrderNumber::parse("ORD-12"),
            Err(OrderNumberError::NonDigit)
        ));
    }

    #[test]
    fn test_parse_leading_zero() {
        assert!(matches!(
            OrderNumber::parse("012345"),
            Err(OrderNumberError::LeadingZero)
        ));
    }

    #[test]
    fn test_random_always_in_range() {
        for _ in 0..1000 {
            let number = OrderNumber::random();
            let digits = number.as_str();

            assert_eq!(digits.len(), OrderNumber::LENGTH);
            assert!(digits.bytes().all(|b| b.is_ascii_digit()));

            let value: u32 = digits.parse().unwrap();
            assert!((OrderNumber::MIN..=OrderNumber::MAX).contains(&value));
        }
    }

    #[test]
    fn test_random_parses_as_itself() {
        let number = OrderNumber::random();
        let reparsed = OrderNumber::parse(number.as_str()).unwrap();
        assert_eq!(reparsed, number);
    }

    #[test]
    fn test_serde_roundtrip() {
        let number = OrderNumber::parse("123456").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"123456\"");

        let parsed: OrderNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn test_display() {
        let number = OrderNumber::parse("123456").unwrap();
        assert_eq!(format!("{number}"), "123456");
    }
}
