//! Price keys for the order book
//!
//! Prices arrive from callers as `f64` and are used verbatim as map keys:
//! two prices identify the same level exactly when their bit patterns
//! compare equal. `Price` gives the raw `f64` the total order a sorted map
//! needs and keeps invalid values (non-finite or non-positive) out of the
//! books entirely.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated order-book price.
///
/// Every `Price` is a positive finite number; construction rejects NaN,
/// infinities, zero, and negative values, so a `NaN` can never poison the
/// ordering of a side book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(OrderedFloat<f64>);

impl Price {
    /// Create a new Price from an `f64`
    ///
    /// # Panics
    /// Panics if the value is non-finite or not strictly positive
    pub fn new(value: f64) -> Self {
        assert!(
            value.is_finite() && value > 0.0,
            "Price must be a positive finite number"
        );
        Self(OrderedFloat(value))
    }

    /// Try to create a Price, returning None if invalid
    pub fn try_new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(OrderedFloat(value)))
        } else {
            None
        }
    }

    /// Get the inner `f64` value
    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }
}

// Serialized as a plain f64; deserialization re-applies validation so a
// decoded Price carries the same guarantees as a constructed one.
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::try_new(value)
            .ok_or_else(|| serde::de::Error::custom("price must be a positive finite number"))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::new(100.5);
        assert_eq!(price.as_f64(), 100.5);
    }

    #[test]
    #[should_panic(expected = "Price must be a positive finite number")]
    fn test_price_negative_panics() {
        Price::new(-100.0);
    }

    #[test]
    fn test_price_try_new_rejects_invalid() {
        assert!(Price::try_new(0.0).is_none());
        assert!(Price::try_new(-1.0).is_none());
        assert!(Price::try_new(f64::NAN).is_none());
        assert!(Price::try_new(f64::INFINITY).is_none());
        assert!(Price::try_new(f64::NEG_INFINITY).is_none());
        assert!(Price::try_new(100.0).is_some());
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::new(99.0);
        let high = Price::new(101.0);
        assert!(low < high);
        assert_eq!(Price::new(100.0), Price::new(100.0));
    }

    #[test]
    fn test_one_ulp_is_a_distinct_price() {
        let price = 100.0f64;
        let below = f64::from_bits(price.to_bits() - 1);
        assert_ne!(Price::new(price), Price::new(below));
        assert!(Price::new(below) < Price::new(price));
    }

    #[test]
    fn test_price_serialization() {
        let price = Price::new(50000.25);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "50000.25");

        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    #[test]
    fn test_price_deserialization_rejects_invalid() {
        assert!(serde_json::from_str::<Price>("0.0").is_err());
        assert!(serde_json::from_str::<Price>("-42.0").is_err());
    }
}
