//! Limit order book matching engine
//!
//! Single-instrument, single-threaded price-time priority matching: better
//! prices match first, and at equal prices earlier arrivals match first.
//! An engine instance owns the two side books, the live-order index, and
//! the trade history; callers serialize commands against it and read
//! market data between commands.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - Cached level volumes always equal the sum of their queues
//! - The book is never crossed between commands

pub mod book;
pub mod engine;
pub mod matching;

pub use engine::{DepthSnapshot, MatchingEngine};
