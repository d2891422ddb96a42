//! Core data types for tickbook.
//!
//! All amounts are unsigned integers: base units inside order records, raw
//! token units (u128) at the settlement boundary. No floating point.
//!
//! ## Types
//!
//! - [`OrderNode`]: a slot in one side's order ledger
//! - [`Side`] / [`Asset`] / [`OrderType`]: order classification
//! - [`TickParams`]: per-book fixed-point conversion constants
//! - [`AccountId`] / [`IdentityTable`]: identity interning
//! - [`Event`]: emitted lifecycle events
//! - [`BookError`]: the error taxonomy

pub mod error;
pub mod events;
pub mod identity;
pub mod order;
pub mod ticks;

pub use error::BookError;
pub use events::Event;
pub use identity::{AccountId, IdentityTable, FIRST_HANDLE, HANDLE_INACTIVE, HANDLE_SENTINEL};
pub use order::{pack_creator, Asset, OrderNode, OrderType, Side};
pub use ticks::{TickParams, MAX_PRICE_BASE, MAX_TICK_EXPONENT};
