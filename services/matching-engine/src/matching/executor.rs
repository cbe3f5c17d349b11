//! Event sequencing and trade construction
//!
//! One counter stamps both order arrivals and trades, so every externally
//! visible event has a place in a single total order.

use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::RestingEntry;

/// Owns the shared event counter and builds trade records
#[derive(Debug, Clone, Default)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new executor with the counter at zero
    pub fn new() -> Self {
        Self {
            sequence_counter: 0,
        }
    }

    /// Next value of the arrival/trade counter (monotonically increasing)
    pub fn next_sequence(&mut self) -> u64 {
        let sequence = self.sequence_counter;
        self.sequence_counter += 1;
        sequence
    }

    /// Build the trade for one matching-loop iteration
    ///
    /// The print price belongs to the passive party: whichever of the two
    /// orders carries the smaller arrival sequence. An incoming market
    /// order has no price of its own, so the resting price applies
    /// regardless of sequence.
    pub fn execute_trade(
        &mut self,
        incoming: &Order,
        resting: &RestingEntry,
        resting_price: Price,
        quantity: u64,
    ) -> Trade {
        let price = match incoming.limit_price() {
            Some(limit) if incoming.sequence < resting.sequence => limit,
            _ => resting_price,
        };

        let (buy_order_id, sell_order_id) = match incoming.side {
            Side::BUY => (incoming.order_id, resting.order_id),
            Side::SELL => (resting.order_id, incoming.order_id),
        };

        Trade::new(
            buy_order_id,
            sell_order_id,
            price.as_f64(),
            quantity,
            self.next_sequence(),
        )
    }
}
