//! Order book implementation.
//!
//! ## Design
//!
//! Each side of the book is an [`OrderList`]: a doubly-linked list of
//! order nodes threaded through a hash map, anchored by head and tail
//! sentinels and kept sorted by price, ties broken by insertion order.
//! Order ids are assigned by a monotone counter and never reused, which
//! is what makes insertion hints safe: a hint can be stale but never
//! ambiguous.
//!
//! [`OrderBook`] layers identity interning, settlement, events, and the
//! all-or-nothing rollback on top of the two lists.

pub mod book;
pub mod list;

pub use book::{OrderBook, OrderInfo, PageEntry};
pub use list::{OrderList, FIRST_ORDER_ID, HEAD_ID, TAIL_ID};
