//! Order lifecycle types
//!
//! An order record is immutable except for its remaining quantity. The
//! arrival sequence stamped at acceptance is the time-priority tie-breaker
//! and never changes for the life of the record.

use crate::numeric::Price;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// Pricing behavior of an order
///
/// A limit order carries its price constraint; a market order crosses any
/// level and never rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum OrderType {
    /// Match up to the given price; any residual rests at it
    #[serde(rename = "LIMIT")]
    Limit(Price),
    /// Match at any price; any residual is discarded
    #[serde(rename = "MARKET")]
    Market,
}

impl OrderType {
    /// The limit price, if this order has one
    pub fn limit_price(&self) -> Option<Price> {
        match self {
            OrderType::Limit(price) => Some(*price),
            OrderType::Market => None,
        }
    }

    /// Check whether this is a market order
    pub fn is_market(&self) -> bool {
        matches!(self, OrderType::Market)
    }
}

/// A live order record
///
/// `order_id` is caller-supplied and unique among currently-live orders.
/// `sequence` is drawn from the engine's event counter at acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    pub side: Side,
    pub order_type: OrderType,
    pub remaining_quantity: u64,
    pub sequence: u64,
}

impl Order {
    /// Create a limit order record
    pub fn limit(order_id: u64, side: Side, price: Price, quantity: u64, sequence: u64) -> Self {
        Self {
            order_id,
            side,
            order_type: OrderType::Limit(price),
            remaining_quantity: quantity,
            sequence,
        }
    }

    /// Create a market order record
    pub fn market(order_id: u64, side: Side, quantity: u64, sequence: u64) -> Self {
        Self {
            order_id,
            side,
            order_type: OrderType::Market,
            remaining_quantity: quantity,
            sequence,
        }
    }

    /// The limit price, if this order has one
    pub fn limit_price(&self) -> Option<Price> {
        self.order_type.limit_price()
    }

    /// Check if the order has no quantity left
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Consume quantity after a match
    ///
    /// # Panics
    /// Panics in debug builds if the fill exceeds the remaining quantity
    pub fn fill(&mut self, quantity: u64) {
        debug_assert!(
            quantity <= self.remaining_quantity,
            "fill exceeds remaining quantity"
        );
        self.remaining_quantity -= quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::BUY.opposite(), Side::SELL);
        assert_eq!(Side::SELL.opposite(), Side::BUY);
    }

    #[test]
    fn test_order_type_limit_price() {
        let limit = OrderType::Limit(Price::new(100.0));
        assert_eq!(limit.limit_price(), Some(Price::new(100.0)));
        assert!(!limit.is_market());

        let market = OrderType::Market;
        assert_eq!(market.limit_price(), None);
        assert!(market.is_market());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::limit(1, Side::BUY, Price::new(100.0), 50, 0);
        assert!(!order.is_filled());

        order.fill(30);
        assert_eq!(order.remaining_quantity, 20);
        assert!(!order.is_filled());

        order.fill(20);
        assert!(order.is_filled());
    }

    #[test]
    fn test_market_order_has_no_price() {
        let order = Order::market(7, Side::SELL, 25, 3);
        assert_eq!(order.limit_price(), None);
        assert_eq!(order.remaining_quantity, 25);
    }

    #[test]
    fn test_order_serialization() {
        let order = Order::limit(42, Side::SELL, Price::new(3000.5), 10, 17);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
