//! Rejection taxonomy for the command surface
//!
//! The engine reports every rejection to callers as a bare `false`; this
//! enum is the vocabulary behind that boolean and feeds diagnostics.

use thiserror::Error;

/// Why a command was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum OrderError {
    #[error("order id {order_id} is already live")]
    DuplicateOrderId { order_id: u64 },

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("price {price} is not a positive finite number")]
    InvalidPrice { price: f64 },

    #[error("no live order with id {order_id}")]
    UnknownOrderId { order_id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = OrderError::DuplicateOrderId { order_id: 42 };
        assert_eq!(err.to_string(), "order id 42 is already live");
    }

    #[test]
    fn test_invalid_price_display() {
        let err = OrderError::InvalidPrice { price: -1.0 };
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_unknown_id_display() {
        let err = OrderError::UnknownOrderId { order_id: 7 };
        assert_eq!(err.to_string(), "no live order with id 7");
    }
}
