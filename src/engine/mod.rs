//! Matching engine.
//!
//! The engine is purely list-level: it decides which resting orders trade
//! against an incoming order or swap, and by how much. It never touches
//! balances or identities, so it can be tested against bare
//! [`OrderList`](crate::orderbook::OrderList)s.

pub(crate) mod matcher;

pub(crate) use matcher::{match_resting, match_swap, Fill};
