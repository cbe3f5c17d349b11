//! Crossing detection logic
//!
//! A limit order only consumes levels its price reaches; a market order
//! carries no constraint and crosses unconditionally.

use types::numeric::Price;
use types::order::{OrderType, Side};

/// Check if an incoming order may trade against the best opposite level
///
/// For a limit buy the level must cost no more than the limit; for a
/// limit sell it must pay no less.
pub fn crosses(incoming_side: Side, incoming_type: OrderType, resting_price: Price) -> bool {
    match incoming_type {
        OrderType::Market => true,
        OrderType::Limit(limit) => match incoming_side {
            Side::BUY => limit >= resting_price,
            Side::SELL => limit <= resting_price,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_crosses_cheaper_ask() {
        let limit = OrderType::Limit(Price::new(101.0));
        assert!(crosses(Side::BUY, limit, Price::new(100.0)));
    }

    #[test]
    fn test_exact_price_crosses() {
        let limit = OrderType::Limit(Price::new(100.0));
        assert!(crosses(Side::BUY, limit, Price::new(100.0)));
        assert!(crosses(Side::SELL, limit, Price::new(100.0)));
    }

    #[test]
    fn test_buy_below_ask_does_not_cross() {
        let limit = OrderType::Limit(Price::new(99.0));
        assert!(!crosses(Side::BUY, limit, Price::new(100.0)));
    }

    #[test]
    fn test_sell_above_bid_does_not_cross() {
        let limit = OrderType::Limit(Price::new(101.0));
        assert!(!crosses(Side::SELL, limit, Price::new(100.0)));
    }

    #[test]
    fn test_one_ulp_short_does_not_cross() {
        let ask = 100.0f64;
        let just_below = f64::from_bits(ask.to_bits() - 1);
        let limit = OrderType::Limit(Price::new(just_below));
        assert!(!crosses(Side::BUY, limit, Price::new(ask)));
    }

    #[test]
    fn test_market_always_crosses() {
        assert!(crosses(Side::BUY, OrderType::Market, Price::new(1e9)));
        assert!(crosses(Side::SELL, OrderType::Market, Price::new(1e-9)));
    }
}
