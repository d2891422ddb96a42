//! In-memory venue for tests, benches, and the demo binary.
//!
//! Models external token balances per account plus the book's own
//! holdings, and can be told to refuse transfers to specific accounts to
//! exercise the claimable-balance fallback path.

use std::collections::{HashMap, HashSet};

use crate::orderbook::OrderBook;
use crate::settlement::{PaymentCallback, Venue};
use crate::types::identity::AccountId;
use crate::types::order::Asset;

/// Simulated two-asset custody.
#[derive(Debug, Clone, Default)]
pub struct SimVenue {
    accounts: HashMap<(AccountId, Asset), u128>,
    held: HashMap<Asset, u128>,
    refuse_credit: HashSet<AccountId>,
}

impl SimVenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` of `asset` into an account's external balance.
    pub fn fund(&mut self, account: AccountId, asset: Asset, amount: u128) {
        *self.accounts.entry((account, asset)).or_insert(0) += amount;
    }

    /// External balance of an account.
    pub fn balance(&self, account: AccountId, asset: Asset) -> u128 {
        self.accounts.get(&(account, asset)).copied().unwrap_or(0)
    }

    /// Make every outbound transfer to `account` fail, simulating a
    /// counter-party that rejects incoming tokens.
    pub fn refuse_transfers_to(&mut self, account: AccountId) {
        self.refuse_credit.insert(account);
    }

    pub fn allow_transfers_to(&mut self, account: AccountId) {
        self.refuse_credit.remove(&account);
    }

    /// Total supply across the book and all accounts, for conservation
    /// checks.
    pub fn total_supply(&self, asset: Asset) -> u128 {
        let external: u128 = self
            .accounts
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum();
        external + self.book_balance(asset)
    }
}

impl Venue for SimVenue {
    fn book_balance(&self, asset: Asset) -> u128 {
        self.held.get(&asset).copied().unwrap_or(0)
    }

    fn transfer_out(&mut self, asset: Asset, to: AccountId, amount: u128) -> bool {
        if self.refuse_credit.contains(&to) {
            return false;
        }
        let held = self.held.entry(asset).or_insert(0);
        if *held < amount {
            return false;
        }
        *held -= amount;
        *self.accounts.entry((to, asset)).or_insert(0) += amount;
        true
    }

    fn transfer_in(&mut self, asset: Asset, from: AccountId, amount: u128) -> bool {
        let balance = self.accounts.entry((from, asset)).or_insert(0);
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        *self.held.entry(asset).or_insert(0) += amount;
        true
    }
}

/// Callback that pays every requested debit out of one account's external
/// balance. An underfunded account simply supplies nothing, which the
/// book's balance-delta check turns into a shortfall error.
#[derive(Debug, Clone, Copy)]
pub struct FundFromAccount(pub AccountId);

impl PaymentCallback for FundFromAccount {
    fn supply(&mut self, _book: &mut OrderBook, venue: &mut dyn Venue, asset: Asset, amount: u128) {
        venue.transfer_in(asset, self.0, amount);
    }
}
