//! Sentinel-anchored sorted order list for one side of the book.
//!
//! ## Design
//!
//! Each side is a doubly-linked list threaded through an id-keyed slot map.
//! Two permanent sentinel slots bound the list: id 0 (head, best-possible
//! price) and id 1 (tail, worst-possible price). Sentinels turn "empty
//! list" and "insert at either extreme" into ordinary middle insertions;
//! the head's `next` always points at the current best order or the tail.
//!
//! Real order ids start at 2, are assigned monotonically, and are never
//! reused. Slots are never physically removed: a filled or cancelled order
//! is deactivated in place, so any id that was ever valid remains a safe
//! (if stale) starting point for a hinted scan.
//!
//! ## Ordering
//!
//! Strictly sorted by price (ascending for asks, descending for bids),
//! ties broken by insertion order, which is also id order. The matching
//! engine relies on this: makers consumed by a match are always a
//! contiguous prefix, so the head pointer is rewritten once per match loop
//! instead of once per removed node.

use std::collections::HashMap;

use crate::types::error::BookError;
use crate::types::identity::HANDLE_SENTINEL;
use crate::types::order::{OrderNode, Side};

/// Id of the head sentinel (best-price bound).
pub const HEAD_ID: u64 = 0;

/// Id of the tail sentinel (worst-price bound).
pub const TAIL_ID: u64 = 1;

/// First id assignable to a real order.
pub const FIRST_ORDER_ID: u64 = 2;

/// One side's order ledger.
#[derive(Debug, Clone)]
pub struct OrderList {
    side: Side,
    slots: HashMap<u64, OrderNode>,
}

impl OrderList {
    /// Create an empty list: two sentinels linked to each other.
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Create an empty list with pre-allocated slot capacity.
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        let mut slots = HashMap::with_capacity(capacity + 2);
        slots.insert(
            HEAD_ID,
            OrderNode {
                id: HEAD_ID,
                amount0_base: 0,
                price_base: side.head_sentinel_price(),
                owner_handle: HANDLE_SENTINEL,
                creator_bits: 0,
                prev: HEAD_ID,
                next: TAIL_ID,
            },
        );
        slots.insert(
            TAIL_ID,
            OrderNode {
                id: TAIL_ID,
                amount0_base: 0,
                price_base: side.tail_sentinel_price(),
                owner_handle: HANDLE_SENTINEL,
                creator_bits: 0,
                prev: HEAD_ID,
                next: TAIL_ID,
            },
        );
        Self { side, slots }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<&OrderNode> {
        self.slots.get(&id)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut OrderNode> {
        self.slots.get_mut(&id)
    }

    /// Whether `id` is an active (matchable, cancellable) order here.
    #[inline]
    pub fn is_active(&self, id: u64) -> bool {
        self.slots.get(&id).is_some_and(|n| n.is_active())
    }

    /// Id of the current best order, or [`TAIL_ID`] when the side is empty.
    #[inline]
    pub fn head_next(&self) -> u64 {
        self.node(HEAD_ID).next
    }

    /// Best active order, if any.
    pub fn best(&self) -> Option<&OrderNode> {
        let first = self.head_next();
        (first != TAIL_ID).then(|| self.node(first))
    }

    /// Number of active orders. Linear; used by queries and tests.
    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Iterate active orders from best to worst.
    pub fn iter_active(&self) -> ActiveIter<'_> {
        ActiveIter {
            list: self,
            cur: self.head_next(),
        }
    }

    #[inline]
    fn node(&self, id: u64) -> &OrderNode {
        self.slots.get(&id).expect("order list link out of bounds")
    }

    #[inline]
    fn node_mut(&mut self, id: u64) -> &mut OrderNode {
        self.slots.get_mut(&id).expect("order list link out of bounds")
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Link `node` into sorted position, scanning forward from the slot
    /// after `hint_id`.
    ///
    /// The hint is an optimization, not a correctness requirement: a stale
    /// hint (an order that has since been filled or cancelled) or a
    /// misplaced one degrades to a scan from the head. A hint id at or
    /// above the new id is rejected with [`BookError::InvalidHint`].
    pub fn insert(&mut self, node: OrderNode, hint_id: u64) -> Result<(), BookError> {
        if hint_id >= node.id {
            return Err(BookError::InvalidHint {
                hint: hint_id,
                new: node.id,
            });
        }
        debug_assert!(node.is_active() && node.amount0_base > 0);

        let (mut prev_id, mut cur_id) = match self.slots.get(&hint_id) {
            // A usable hint is the head itself or an active order that
            // sorts at-or-before the new price.
            Some(h)
                if hint_id == HEAD_ID
                    || (h.is_active()
                        && self.side.precedes_or_equal(h.price_base, node.price_base)) =>
            {
                (hint_id, h.next)
            }
            _ => (HEAD_ID, self.head_next()),
        };

        loop {
            let cur = self.node(cur_id);
            if cur_id == TAIL_ID || !self.side.precedes_or_equal(cur.price_base, node.price_base) {
                break;
            }
            prev_id = cur_id;
            cur_id = cur.next;
        }

        let id = node.id;
        let mut node = node;
        node.prev = prev_id;
        node.next = cur_id;
        self.slots.insert(id, node);
        self.node_mut(prev_id).next = id;
        self.node_mut(cur_id).prev = id;
        Ok(())
    }

    /// Unlink and deactivate an active order in O(1).
    ///
    /// Returns the node as it was before deactivation. Sentinels are
    /// permanently unremovable; an unknown or already-deactivated id is
    /// [`BookError::OrderNotActive`].
    pub fn erase(&mut self, id: u64) -> Result<OrderNode, BookError> {
        if id == HEAD_ID || id == TAIL_ID {
            return Err(BookError::CannotEraseSentinel);
        }
        let node = *self
            .slots
            .get(&id)
            .filter(|n| n.is_active())
            .ok_or(BookError::OrderNotActive(id))?;

        self.node_mut(node.prev).next = node.next;
        self.node_mut(node.next).prev = node.prev;
        let slot = self.node_mut(id);
        slot.deactivate();
        slot.prev = HEAD_ID;
        slot.next = HEAD_ID;
        Ok(node)
    }

    /// Deactivate a fully-consumed maker but keep its links so the match
    /// loop can continue through it. Paired with [`OrderList::cut_links`]
    /// and [`OrderList::splice_front`] after the loop.
    #[inline]
    pub(crate) fn deactivate_keep_links(&mut self, id: u64) {
        debug_assert!(id >= FIRST_ORDER_ID);
        self.node_mut(id).deactivate();
    }

    /// Zero a deactivated node's links.
    #[inline]
    pub(crate) fn cut_links(&mut self, id: u64) {
        let slot = self.node_mut(id);
        debug_assert!(!slot.is_active());
        slot.prev = HEAD_ID;
        slot.next = HEAD_ID;
    }

    /// Rewrite the head pointer once after a match loop consumed the list
    /// prefix up to (not including) `new_first`.
    pub(crate) fn splice_front(&mut self, new_first: u64) {
        self.node_mut(HEAD_ID).next = new_first;
        self.node_mut(new_first).prev = HEAD_ID;
    }

    // ========================================================================
    // Position lookup
    // ========================================================================

    /// Id of the order after which a new order at `price_base` would be
    /// inserted right now. Intended for callers that want to precompute a
    /// cheap insert hint off-engine.
    pub fn suggest_hint(&self, price_base: u64) -> u64 {
        let mut prev_id = HEAD_ID;
        let mut cur_id = self.head_next();
        loop {
            let cur = self.node(cur_id);
            if cur_id == TAIL_ID || !self.side.precedes_or_equal(cur.price_base, price_base) {
                return prev_id;
            }
            prev_id = cur_id;
            cur_id = cur.next;
        }
    }
}

/// Iterator over active orders, best first.
pub struct ActiveIter<'a> {
    list: &'a OrderList,
    cur: u64,
}

impl<'a> Iterator for ActiveIter<'a> {
    type Item = &'a OrderNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == TAIL_ID {
            return None;
        }
        let node = self.list.node(self.cur);
        self.cur = node.next;
        Some(node)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
