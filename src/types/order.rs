//! Order types for the tickbook matching engine.
//!
//! ## Representation
//!
//! An [`OrderNode`] is the unit of storage in the per-side order ledger.
//! Amounts are compact base units (see the ticks module), identities are
//! interned handles, and `prev`/`next` are order ids linking the node into
//! its side's sorted list. Nodes are plain integers throughout so they are
//! `Copy` and cheap to snapshot.

use serde::{Deserialize, Serialize};

use crate::types::identity::{HANDLE_INACTIVE, HANDLE_SENTINEL};

// ============================================================================
// Side enum
// ============================================================================

/// Order side.
///
/// An ask sells token0 for token1; a bid buys token0 with token1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Ask => Side::Bid,
            Side::Bid => Side::Ask,
        }
    }

    /// List ordering: does an entry at `candidate` price sort at or before
    /// an entry at `new` price on this side? Asks sort ascending, bids
    /// descending; equality keeps the earlier entry first.
    #[inline]
    pub(crate) fn precedes_or_equal(self, candidate: u64, new: u64) -> bool {
        match self {
            Side::Ask => candidate <= new,
            Side::Bid => candidate >= new,
        }
    }

    /// Does a resting order on this side at `maker_price` cross a taker
    /// whose declared limit is `taker_limit`?
    #[inline]
    pub(crate) fn crosses(self, maker_price: u64, taker_limit: u64) -> bool {
        match self {
            Side::Ask => maker_price <= taker_limit,
            Side::Bid => maker_price >= taker_limit,
        }
    }

    /// Price carried by this side's head sentinel (best-possible bound).
    #[inline]
    pub(crate) fn head_sentinel_price(self) -> u64 {
        match self {
            Side::Ask => 0,
            Side::Bid => u64::MAX,
        }
    }

    /// Price carried by this side's tail sentinel (worst-possible bound).
    #[inline]
    pub(crate) fn tail_sentinel_price(self) -> u64 {
        match self {
            Side::Ask => u64::MAX,
            Side::Bid => 0,
        }
    }

    /// Asset a taker on this side pays with.
    #[inline]
    pub fn debit_asset(self) -> Asset {
        match self {
            Side::Ask => Asset::Token0,
            Side::Bid => Asset::Token1,
        }
    }

    /// Asset a taker on this side receives.
    #[inline]
    pub fn credit_asset(self) -> Asset {
        self.debit_asset().other()
    }
}

// ============================================================================
// Asset enum
// ============================================================================

/// One of the pair's two assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Token0,
    Token1,
}

impl Asset {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Asset::Token0 => Asset::Token1,
            Asset::Token1 => Asset::Token0,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Lifecycle policy of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Match immediately, rest the remainder. Settles via external transfers.
    Limit,
    /// Like `Limit`, but settles only through the claimable-balance ledger.
    PerformanceLimit,
    /// Fully filled immediately or the whole placement fails.
    FillOrKill,
    /// Match immediately, drop the remainder.
    ImmediateOrCancel,
}

impl OrderType {
    /// Whether an unfilled remainder rests on the book.
    #[inline]
    pub fn rests(self) -> bool {
        matches!(self, OrderType::Limit | OrderType::PerformanceLimit)
    }

    /// Whether settlement bypasses external transfers.
    #[inline]
    pub fn performance_mode(self) -> bool {
        matches!(self, OrderType::PerformanceLimit)
    }
}

// ============================================================================
// OrderNode struct
// ============================================================================

/// A slot in one side's order ledger.
///
/// Slots are never physically removed: a filled or cancelled order keeps its
/// id forever and is deactivated in place by zeroing `owner_handle` and
/// cutting its links. The two sentinel slots (ids 0 and 1) carry
/// `owner_handle == HANDLE_SENTINEL` and are permanently unremovable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNode {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    /// Remaining quantity in base units. Active orders always have > 0.
    pub amount0_base: u64,
    /// Limit price in price-tick units.
    pub price_base: u64,
    /// Interned owner handle; 0 = inactive slot, 1 = sentinel.
    pub owner_handle: u32,
    /// Packed `(creator_handle << 1) | performance_mode`.
    pub creator_bits: u32,
    /// Previous order id in this side's list.
    pub prev: u64,
    /// Next order id in this side's list.
    pub next: u64,
}

impl OrderNode {
    pub fn new(
        id: u64,
        amount0_base: u64,
        price_base: u64,
        owner_handle: u32,
        creator_handle: u32,
        performance_mode: bool,
    ) -> Self {
        Self {
            id,
            amount0_base,
            price_base,
            owner_handle,
            creator_bits: pack_creator(creator_handle, performance_mode),
            prev: 0,
            next: 0,
        }
    }

    /// Active means a real order with funds locked behind it.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.owner_handle > HANDLE_SENTINEL
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.owner_handle == HANDLE_SENTINEL
    }

    /// Creator handle, 0 when the owner placed the order itself.
    #[inline]
    pub fn creator_handle(&self) -> u32 {
        self.creator_bits >> 1
    }

    /// Whether settlement for this order uses the claimable ledger only.
    #[inline]
    pub fn performance_mode(&self) -> bool {
        self.creator_bits & 1 == 1
    }

    /// Mark the slot inactive. Links are cut separately so a batched match
    /// loop can keep traversing through just-consumed nodes.
    #[inline]
    pub fn deactivate(&mut self) {
        self.owner_handle = HANDLE_INACTIVE;
        self.amount0_base = 0;
    }
}

/// Pack a creator handle and the performance-mode flag into one word.
#[inline]
pub fn pack_creator(creator_handle: u32, performance_mode: bool) -> u32 {
    debug_assert!(creator_handle <= u32::MAX >> 1);
    (creator_handle << 1) | u32::from(performance_mode)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Ask.opposite(), Side::Bid);
        assert_eq!(Side::Bid.opposite(), Side::Ask);
    }

    #[test]
    fn test_side_ordering_predicates() {
        // Ask list sorts ascending; equal price keeps the earlier entry first
        assert!(Side::Ask.precedes_or_equal(100, 150));
        assert!(Side::Ask.precedes_or_equal(150, 150));
        assert!(!Side::Ask.precedes_or_equal(151, 150));

        assert!(Side::Bid.precedes_or_equal(150, 100));
        assert!(Side::Bid.precedes_or_equal(100, 100));
        assert!(!Side::Bid.precedes_or_equal(99, 100));
    }

    #[test]
    fn test_side_crosses() {
        // Maker ask at 1450 crosses a bid limit of 1450 or higher
        assert!(Side::Ask.crosses(1450, 1450));
        assert!(Side::Ask.crosses(1450, 1500));
        assert!(!Side::Ask.crosses(1450, 1400));

        assert!(Side::Bid.crosses(1400, 1400));
        assert!(Side::Bid.crosses(1400, 1350));
        assert!(!Side::Bid.crosses(1400, 1450));
    }

    #[test]
    fn test_debit_credit_assets() {
        assert_eq!(Side::Ask.debit_asset(), Asset::Token0);
        assert_eq!(Side::Ask.credit_asset(), Asset::Token1);
        assert_eq!(Side::Bid.debit_asset(), Asset::Token1);
        assert_eq!(Side::Bid.credit_asset(), Asset::Token0);
    }

    #[test]
    fn test_order_type_policy() {
        assert!(OrderType::Limit.rests());
        assert!(OrderType::PerformanceLimit.rests());
        assert!(!OrderType::FillOrKill.rests());
        assert!(!OrderType::ImmediateOrCancel.rests());
        assert!(OrderType::PerformanceLimit.performance_mode());
        assert!(!OrderType::Limit.performance_mode());
    }

    #[test]
    fn test_creator_packing() {
        let node = OrderNode::new(5, 10, 1450, 2, 7, true);
        assert_eq!(node.creator_handle(), 7);
        assert!(node.performance_mode());

        let node = OrderNode::new(5, 10, 1450, 2, 0, false);
        assert_eq!(node.creator_handle(), 0);
        assert!(!node.performance_mode());
    }

    #[test]
    fn test_deactivate_clears_owner_and_amount() {
        let mut node = OrderNode::new(5, 10, 1450, 2, 0, false);
        assert!(node.is_active());
        node.deactivate();
        assert!(!node.is_active());
        assert_eq!(node.amount0_base, 0);
    }
}
