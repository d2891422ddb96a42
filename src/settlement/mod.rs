//! Settlement boundary: how value enters and leaves the book.
//!
//! The book itself never holds token balances. It talks to a [`Venue`],
//! which custodies the two assets, and to a per-operation
//! [`PaymentCallback`], which is how a taker supplies payment mid-flight
//! (the flash-loan style "pull" model: the book measures its own balance
//! before and after the callback rather than trusting the caller).
//!
//! ## Failure asymmetry
//!
//! Collecting a debit is load-bearing: if the measured balance delta falls
//! short, the whole operation fails and rolls back. Paying out is not: a
//! refused outbound transfer is absorbed into the recipient's claimable
//! balance so that one unreachable counter-party can never wedge
//! settlement for everyone else. Claimable funds are withdrawn later with
//! [`OrderBook::withdraw_claimable`](crate::orderbook::OrderBook::withdraw_claimable).

use std::collections::HashMap;

use crate::orderbook::OrderBook;
use crate::types::error::BookError;
use crate::types::identity::AccountId;
use crate::types::order::Asset;

pub mod sim;

// ============================================================================
// Venue
// ============================================================================

/// Custody of the two assets backing a book.
///
/// Amounts are raw token units. Transfer methods return `false` instead of
/// an error: the book decides whether a refusal is fatal.
pub trait Venue {
    /// Raw balance currently held for the book in `asset`.
    fn book_balance(&self, asset: Asset) -> u128;

    /// Move `amount` from the book's holdings to `to`.
    fn transfer_out(&mut self, asset: Asset, to: AccountId, amount: u128) -> bool;

    /// Move `amount` from `from` into the book's holdings.
    fn transfer_in(&mut self, asset: Asset, from: AccountId, amount: u128) -> bool;
}

// ============================================================================
// PaymentCallback
// ============================================================================

/// Per-operation hook through which a taker funds the book.
///
/// The book hands the callback a mutable reference to itself. Any attempt
/// to call back into a mutating book operation from inside trips the
/// reentrancy guard and returns [`BookError::Reentrancy`] to the hook, not
/// to the outer caller.
pub trait PaymentCallback {
    /// Supply `amount` of `asset` to the venue's book holdings.
    ///
    /// The book verifies the resulting balance delta; under-supplying
    /// fails the operation with [`BookError::DebitShortfall`].
    fn supply(&mut self, book: &mut OrderBook, venue: &mut dyn Venue, asset: Asset, amount: u128) {
        let _ = (book, venue, asset, amount);
    }

    /// Called after both flash-loan amounts have been paid out. The hook
    /// must return the funds before it returns control.
    fn on_flash_loan(
        &mut self,
        book: &mut OrderBook,
        venue: &mut dyn Venue,
        amount0: u128,
        amount1: u128,
    ) {
        let _ = (book, venue, amount0, amount1);
    }
}

/// Callback for operations that need no external funding, such as
/// performance-mode placements paid from the claimable ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPayment;

impl PaymentCallback for NoPayment {}

// ============================================================================
// ClaimableLedger
// ============================================================================

/// Internal balances held by the book on behalf of accounts.
///
/// Funds land here by explicit deposit, by cancellation refunds and trade
/// proceeds of performance-mode orders, and as the fallback for refused
/// outbound transfers. Keyed by interned identity handle.
#[derive(Debug, Clone, Default)]
pub struct ClaimableLedger {
    balances: HashMap<(u32, Asset), u128>,
}

impl ClaimableLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, handle: u32, asset: Asset) -> u128 {
        self.balances.get(&(handle, asset)).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, handle: u32, asset: Asset, amount: u128) {
        if amount == 0 {
            return;
        }
        *self.balances.entry((handle, asset)).or_insert(0) += amount;
    }

    /// Spend from a balance, failing without partial effect if it is short.
    pub fn debit(&mut self, handle: u32, asset: Asset, amount: u128) -> Result<(), BookError> {
        let entry = self.balances.entry((handle, asset)).or_insert(0);
        if *entry < amount {
            return Err(BookError::InsufficientClaimableBalance {
                need: amount,
                available: *entry,
            });
        }
        *entry -= amount;
        Ok(())
    }

    /// Sum of every account's balance in `asset`.
    pub fn total(&self, asset: Asset) -> u128 {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
