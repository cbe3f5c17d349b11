//! Trade execution records
//!
//! A trade is the atomic exchange between a resting order and an incoming
//! order. The print price belongs to the passive party, and the sequence
//! is drawn from the same counter that stamps order arrivals, so arrivals
//! and trades share one total order of events.

use serde::{Deserialize, Serialize};

/// A single execution between two orders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    /// Execution price: the passive (earlier-arrival) order's price
    pub price: f64,
    pub quantity: u64,
    /// Global monotonic event sequence
    pub sequence: u64,
}

impl Trade {
    /// Create a new trade record
    pub fn new(
        buy_order_id: u64,
        sell_order_id: u64,
        price: f64,
        quantity: u64,
        sequence: u64,
    ) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            sequence,
        }
    }

    /// Traded value (price × quantity)
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
