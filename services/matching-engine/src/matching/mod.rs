//! Matching logic
//!
//! Cross detection decides whether an incoming order may trade against the
//! best opposite level; the executor sequences events and builds trades.

pub mod crossing;
pub mod executor;

pub use executor::MatchExecutor;
