//! Lifecycle events emitted by book operations.
//!
//! Events accumulate on the book's internal log and are drained by the
//! caller after a successful operation. The log is covered by the
//! all-or-nothing rollback, so a failed operation emits nothing.

use serde::{Deserialize, Serialize};

use crate::types::identity::AccountId;
use crate::types::order::{Asset, OrderType, Side};

/// An externally visible state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new order id was assigned, before any matching ran.
    OrderCreated {
        id: u64,
        owner: AccountId,
        side: Side,
        amount0_base: u64,
        price_base: u64,
        order_type: OrderType,
    },

    /// An active order was cancelled and its remainder refunded.
    OrderCanceled { id: u64, owner: AccountId, side: Side },

    /// One maker order was (partially) consumed by a taker.
    Swap {
        maker_order_id: u64,
        maker: AccountId,
        taker: AccountId,
        /// Side of the resting maker order.
        maker_side: Side,
        amount0: u128,
        amount1: u128,
    },

    /// A claimable balance grew, either by deposit or by transfer fallback.
    BalanceIncreased {
        account: AccountId,
        asset: Asset,
        amount: u128,
    },

    /// A claimable balance was spent or withdrawn.
    BalanceDecreased {
        account: AccountId,
        asset: Asset,
        amount: u128,
    },

    /// Both assets were lent out and repaid within one operation.
    FlashLoan {
        recipient: AccountId,
        amount0: u128,
        amount1: u128,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = Event::Swap {
            maker_order_id: 2,
            maker: AccountId(10),
            taker: AccountId(20),
            maker_side: Side::Ask,
            amount0: 1_000,
            amount1: 1_450_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
