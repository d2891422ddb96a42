//! # tickbook
//!
//! Price-time-priority limit order book and matching engine for a single
//! token0/token1 pair, with fixed-point tick arithmetic and pluggable
//! settlement.
//!
//! ## Architecture
//!
//! - **Types**: tick parameters, order nodes, identities, events, errors
//! - **OrderBook**: sentinel-linked per-side ledgers plus the public facade
//! - **Engine**: the resting-order and swap matching loops
//! - **Settlement**: the venue/callback boundary and the claimable ledger
//!
//! ## Guarantees
//!
//! - Exact integer arithmetic end to end; no floating point
//! - Every mutating operation is all-or-nothing
//! - Order ids are monotone and never reused
//! - A counter-party that refuses payment cannot block settlement

pub mod engine;
pub mod orderbook;
pub mod settlement;
pub mod types;

pub use orderbook::{OrderBook, OrderInfo, PageEntry, HEAD_ID};
pub use settlement::{sim::SimVenue, ClaimableLedger, NoPayment, PaymentCallback, Venue};
pub use types::{AccountId, Asset, BookError, Event, OrderType, Side, TickParams};
