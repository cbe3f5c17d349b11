//! Matching engine core
//!
//! Owns both side books, the live-order index, and the trade history for a
//! single instrument, and drives the matching loop. Commands are validated
//! before any effect: a rejected command returns `false` and leaves the
//! engine untouched. All operations run to completion synchronously;
//! callers serialize commands and read market data between them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::OrderError;
use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook};
use crate::matching::crossing;
use crate::matching::executor::MatchExecutor;

/// Where a live order rests: its side and its level's price
///
/// The queue entry found through this locator is the single owner of the
/// order's remaining quantity.
#[derive(Debug, Clone, Copy)]
struct RestingOrder {
    side: Side,
    price: Price,
}

/// Price-time priority matching engine for one instrument
///
/// Better prices match first; at equal prices, earlier arrivals match
/// first. Between any two commands the book is never crossed, every level
/// is non-empty, and every cached level volume equals the sum of its
/// queue.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    symbol: String,
    bids: BidBook,
    asks: AskBook,
    /// order id → locator for every live resting order
    orders: HashMap<u64, RestingOrder>,
    executor: MatchExecutor,
    trades: Vec<Trade>,
}

impl MatchingEngine {
    /// Create an engine for the given instrument symbol
    ///
    /// The symbol is opaque to the engine and only surfaces in
    /// diagnostics.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BidBook::new(),
            asks: AskBook::new(),
            orders: HashMap::new(),
            executor: MatchExecutor::new(),
            trades: Vec::new(),
        }
    }

    // ---------------------------------------------------------------
    // Command surface
    // ---------------------------------------------------------------

    /// Submit a limit order
    ///
    /// Matches against the opposite side as far as the price allows; any
    /// residual rests in the book. Returns `false` without effect if the
    /// id is already live, the quantity is zero, or the price is not a
    /// positive finite number.
    pub fn add_limit_order(&mut self, order_id: u64, side: Side, price: f64, quantity: u64) -> bool {
        match self.try_add_limit(order_id, side, price, quantity) {
            Ok(()) => true,
            Err(reason) => {
                debug!(symbol = %self.symbol, order_id, %reason, "limit order rejected");
                false
            }
        }
    }

    /// Submit a market order
    ///
    /// Matches against the opposite side without a price constraint; any
    /// residual is discarded rather than rested. Returns `false` without
    /// effect if the id is already live or the quantity is zero.
    pub fn add_market_order(&mut self, order_id: u64, side: Side, quantity: u64) -> bool {
        match self.try_add_market(order_id, side, quantity) {
            Ok(()) => true,
            Err(reason) => {
                debug!(symbol = %self.symbol, order_id, %reason, "market order rejected");
                false
            }
        }
    }

    /// Cancel a resting order
    ///
    /// Returns `false` if the id is not live.
    pub fn cancel_order(&mut self, order_id: u64) -> bool {
        match self.try_cancel(order_id) {
            Ok(()) => true,
            Err(reason) => {
                debug!(symbol = %self.symbol, order_id, %reason, "cancel rejected");
                false
            }
        }
    }

    /// Change a resting order's quantity
    ///
    /// A decrease mutates the order in place and keeps its time priority.
    /// An increase re-enters the order at the tail of its level with a
    /// fresh arrival sequence, losing time priority. A new quantity of
    /// zero cancels. Returns `false` if the id is not live.
    pub fn modify_order(&mut self, order_id: u64, new_quantity: u64) -> bool {
        match self.try_modify(order_id, new_quantity) {
            Ok(()) => true,
            Err(reason) => {
                debug!(symbol = %self.symbol, order_id, %reason, "modify rejected");
                false
            }
        }
    }

    fn try_add_limit(
        &mut self,
        order_id: u64,
        side: Side,
        price: f64,
        quantity: u64,
    ) -> Result<(), OrderError> {
        let price = Price::try_new(price).ok_or(OrderError::InvalidPrice { price })?;
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity);
        }
        if self.orders.contains_key(&order_id) {
            return Err(OrderError::DuplicateOrderId { order_id });
        }

        let sequence = self.executor.next_sequence();
        let mut order = Order::limit(order_id, side, price, quantity, sequence);
        self.run_matching(&mut order);

        if !order.is_filled() {
            match side {
                Side::BUY => self
                    .bids
                    .insert(price, order_id, order.remaining_quantity, sequence),
                Side::SELL => self
                    .asks
                    .insert(price, order_id, order.remaining_quantity, sequence),
            }
            self.orders.insert(order_id, RestingOrder { side, price });
        }
        Ok(())
    }

    fn try_add_market(&mut self, order_id: u64, side: Side, quantity: u64) -> Result<(), OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity);
        }
        if self.orders.contains_key(&order_id) {
            return Err(OrderError::DuplicateOrderId { order_id });
        }

        let sequence = self.executor.next_sequence();
        let mut order = Order::market(order_id, side, quantity, sequence);
        self.run_matching(&mut order);
        // Market orders never rest: the unfilled remainder is dropped.
        Ok(())
    }

    fn try_cancel(&mut self, order_id: u64) -> Result<(), OrderError> {
        let resting = self
            .orders
            .remove(&order_id)
            .ok_or(OrderError::UnknownOrderId { order_id })?;
        match resting.side {
            Side::BUY => self.bids.remove(order_id, resting.price),
            Side::SELL => self.asks.remove(order_id, resting.price),
        };
        Ok(())
    }

    fn try_modify(&mut self, order_id: u64, new_quantity: u64) -> Result<(), OrderError> {
        let resting = *self
            .orders
            .get(&order_id)
            .ok_or(OrderError::UnknownOrderId { order_id })?;

        if new_quantity == 0 {
            return self.try_cancel(order_id);
        }

        let level = match resting.side {
            Side::BUY => self.bids.level_mut(resting.price),
            Side::SELL => self.asks.level_mut(resting.price),
        };
        let level = level.ok_or(OrderError::UnknownOrderId { order_id })?;
        let current = level
            .quantity_of(order_id)
            .ok_or(OrderError::UnknownOrderId { order_id })?;

        if new_quantity < current {
            // In-place shrink: queue position and arrival sequence kept.
            level.set_quantity(order_id, new_quantity);
            Ok(())
        } else if new_quantity > current {
            // Re-enter as a fresh arrival at the tail of the level; the
            // re-add runs the full matching loop like any limit order.
            self.try_cancel(order_id)?;
            self.try_add_limit(order_id, resting.side, resting.price.as_f64(), new_quantity)
        } else {
            Ok(())
        }
    }

    // ---------------------------------------------------------------
    // Matching loop
    // ---------------------------------------------------------------

    fn run_matching(&mut self, order: &mut Order) {
        let Self {
            bids,
            asks,
            orders,
            executor,
            trades,
            ..
        } = self;
        match order.side {
            Side::BUY => Self::match_against_asks(asks, orders, executor, trades, order),
            Side::SELL => Self::match_against_bids(bids, orders, executor, trades, order),
        }
    }

    /// Consume ask liquidity with an incoming buy until the order fills,
    /// the side empties, or the price constraint stops it
    fn match_against_asks(
        asks: &mut AskBook,
        orders: &mut HashMap<u64, RestingOrder>,
        executor: &mut MatchExecutor,
        trades: &mut Vec<Trade>,
        order: &mut Order,
    ) {
        while !order.is_filled() {
            let Some((best_price, level)) = asks.best_level_mut() else {
                break;
            };
            if !crossing::crosses(order.side, order.order_type, best_price) {
                break;
            }
            let Some(resting) = level.peek_head().copied() else {
                break;
            };

            let traded = order.remaining_quantity.min(resting.remaining_quantity);
            trades.push(executor.execute_trade(order, &resting, best_price, traded));
            order.fill(traded);

            if traded == resting.remaining_quantity {
                level.pop_head();
                let emptied = level.is_empty();
                orders.remove(&resting.order_id);
                if emptied {
                    asks.remove_level(best_price);
                }
            } else {
                level.fill_head(traded);
            }
        }
    }

    /// Consume bid liquidity with an incoming sell until the order fills,
    /// the side empties, or the price constraint stops it
    fn match_against_bids(
        bids: &mut BidBook,
        orders: &mut HashMap<u64, RestingOrder>,
        executor: &mut MatchExecutor,
        trades: &mut Vec<Trade>,
        order: &mut Order,
    ) {
        while !order.is_filled() {
            let Some((best_price, level)) = bids.best_level_mut() else {
                break;
            };
            if !crossing::crosses(order.side, order.order_type, best_price) {
                break;
            }
            let Some(resting) = level.peek_head().copied() else {
                break;
            };

            let traded = order.remaining_quantity.min(resting.remaining_quantity);
            trades.push(executor.execute_trade(order, &resting, best_price, traded));
            order.fill(traded);

            if traded == resting.remaining_quantity {
                level.pop_head();
                let emptied = level.is_empty();
                orders.remove(&resting.order_id);
                if emptied {
                    bids.remove_level(best_price);
                }
            } else {
                level.fill_head(traded);
            }
        }
    }

    // ---------------------------------------------------------------
    // Market-data queries
    // ---------------------------------------------------------------

    /// Price of the best (highest) bid level
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best_price().map(|price| price.as_f64())
    }

    /// Price of the best (lowest) ask level
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best_price().map(|price| price.as_f64())
    }

    /// Arithmetic mean of best bid and best ask
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Best ask minus best bid
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregate bid volume at an exact price, 0 if no level exists
    pub fn bid_volume_at(&self, price: f64) -> u64 {
        Price::try_new(price).map_or(0, |price| self.bids.volume_at(price))
    }

    /// Aggregate ask volume at an exact price, 0 if no level exists
    pub fn ask_volume_at(&self, price: f64) -> u64 {
        Price::try_new(price).map_or(0, |price| self.asks.volume_at(price))
    }

    /// Sum of aggregate volume across all bid levels
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.total_volume()
    }

    /// Sum of aggregate volume across all ask levels
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.total_volume()
    }

    /// Up to `depth` (price, volume) pairs, best bid first
    pub fn top_bids(&self, depth: usize) -> Vec<(f64, u64)> {
        self.bids.depth_snapshot(depth)
    }

    /// Up to `depth` (price, volume) pairs, best ask first
    pub fn top_asks(&self, depth: usize) -> Vec<(f64, u64)> {
        self.asks.depth_snapshot(depth)
    }

    /// Both sides of the top of book in one view
    pub fn depth_snapshot(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            symbol: self.symbol.clone(),
            bids: self.top_bids(depth),
            asks: self.top_asks(depth),
        }
    }

    /// Every trade emitted so far, in execution order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of live resting orders
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of trades emitted so far
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// The instrument symbol this engine serves
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Top-of-book view for market-data consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub symbol: String,
    /// (price, aggregate volume) pairs, best bid first
    pub bids: Vec<(f64, u64)>,
    /// (price, aggregate volume) pairs, best ask first
    pub asks: Vec<(f64, u64)>,
}
