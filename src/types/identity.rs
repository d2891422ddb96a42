//! Identity interning.
//!
//! Order records and the claimable-balance ledger key on a compact `u32`
//! handle instead of the full external identity. Handles are assigned
//! lazily the first time an identity needs to persist state (a resting
//! order, a creator registration, a claimable credit) and are never
//! reassigned or freed.
//!
//! Handle `0` marks an inactive order slot and handle `1` belongs to the
//! sentinel entries, so real identities start at `2`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// External identity of an order owner or order-creating agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

/// Handle value of an inactive order slot.
pub const HANDLE_INACTIVE: u32 = 0;

/// Handle reserved for the sentinel entries.
pub const HANDLE_SENTINEL: u32 = 1;

/// First handle assignable to a real identity.
pub const FIRST_HANDLE: u32 = 2;

/// Bidirectional identity <-> handle table.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    handles: HashMap<AccountId, u32>,
    accounts: Vec<AccountId>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `account`, assigning the next free one on first use.
    pub fn intern(&mut self, account: AccountId) -> u32 {
        if let Some(&h) = self.handles.get(&account) {
            return h;
        }
        let handle = FIRST_HANDLE + self.accounts.len() as u32;
        self.handles.insert(account, handle);
        self.accounts.push(account);
        handle
    }

    /// Handle for `account` if it has ever been interned.
    #[inline]
    pub fn lookup(&self, account: AccountId) -> Option<u32> {
        self.handles.get(&account).copied()
    }

    /// Identity behind `handle`. Reserved handles resolve to `None`.
    #[inline]
    pub fn account_of(&self, handle: u32) -> Option<AccountId> {
        if handle < FIRST_HANDLE {
            return None;
        }
        self.accounts.get((handle - FIRST_HANDLE) as usize).copied()
    }

    /// Number of interned identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_sequential_handles() {
        let mut table = IdentityTable::new();
        assert_eq!(table.intern(AccountId(1000)), FIRST_HANDLE);
        assert_eq!(table.intern(AccountId(2000)), FIRST_HANDLE + 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut table = IdentityTable::new();
        let h1 = table.intern(AccountId(42));
        let h2 = table.intern(AccountId(42));
        assert_eq!(h1, h2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_and_reverse() {
        let mut table = IdentityTable::new();
        assert_eq!(table.lookup(AccountId(7)), None);

        let h = table.intern(AccountId(7));
        assert_eq!(table.lookup(AccountId(7)), Some(h));
        assert_eq!(table.account_of(h), Some(AccountId(7)));
    }

    #[test]
    fn test_reserved_handles_resolve_to_none() {
        let mut table = IdentityTable::new();
        table.intern(AccountId(7));
        assert_eq!(table.account_of(HANDLE_INACTIVE), None);
        assert_eq!(table.account_of(HANDLE_SENTINEL), None);
    }
}
