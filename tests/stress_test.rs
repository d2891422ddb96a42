//! Stress tests for the tickbook matching engine.
//!
//! These tests verify:
//! 1. System remains stable under a long mixed workload
//! 2. Determinism is preserved across runs
//! 3. Funds are conserved after every kind of operation
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::time::Instant;

use tickbook::settlement::sim::FundFromAccount;
use tickbook::{
    AccountId, Asset, Event, OrderBook, OrderType, Side, SimVenue, TickParams, Venue, HEAD_ID,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Operations per mixed-workload run
const STRESS_OP_COUNT: usize = 10_000;

/// Accounts trading against each other
const ACCOUNT_COUNT: u64 = 8;

/// How often the conservation law is re-checked
const CONSERVATION_INTERVAL: usize = 500;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// multiplier = divider = 1: amount0 = base * 100, amount1 = base * price.
fn unit_ticks() -> TickParams {
    TickParams::new(100, 10, 1_000).unwrap()
}

fn funded_venue() -> SimVenue {
    let mut venue = SimVenue::new();
    for account in 1..=ACCOUNT_COUNT {
        venue.fund(AccountId(account), Asset::Token0, u64::MAX as u128);
        venue.fund(AccountId(account), Asset::Token1, u64::MAX as u128);
    }
    venue
}

/// The venue must hold exactly the locked remainders plus every claimable
/// balance, and total supply must never change.
fn assert_conserved(book: &OrderBook, venue: &SimVenue, supply0: u128, supply1: u128) {
    assert_eq!(venue.total_supply(Asset::Token0), supply0);
    assert_eq!(venue.total_supply(Asset::Token1), supply1);
    for asset in [Asset::Token0, Asset::Token1] {
        assert_eq!(
            venue.book_balance(asset),
            book.total_locked(asset) + book.total_claimable(asset),
            "venue holdings drifted from book accounting for {asset:?}"
        );
    }
}

/// Run a deterministic mixed workload and return the full event log.
fn run_mixed_workload(seed: u64, ops: usize, check_conservation: bool) -> Vec<Event> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut book = OrderBook::with_capacity(unit_ticks(), ops);
    let mut venue = funded_venue();

    let supply0 = venue.total_supply(Asset::Token0);
    let supply1 = venue.total_supply(Asset::Token1);

    // Seed claimable balances so performance-mode placements can settle
    for account in 1..=ACCOUNT_COUNT {
        let owner = AccountId(account);
        for asset in [Asset::Token0, Asset::Token1] {
            book.deposit_claimable(owner, asset, 10_000_000, &mut FundFromAccount(owner), &mut venue)
                .unwrap();
        }
    }

    let mut resting: Vec<(u64, AccountId)> = Vec::new();
    let mut events = Vec::new();

    for op in 0..ops {
        let owner = AccountId(rng.gen_range(1..=ACCOUNT_COUNT));
        let side = if rng.gen_bool(0.5) {
            Side::Ask
        } else {
            Side::Bid
        };

        match rng.gen_range(0..10u32) {
            // Cancel a random resting order
            0 | 1 if !resting.is_empty() => {
                let idx = rng.gen_range(0..resting.len());
                let (order_id, order_owner) = resting.swap_remove(idx);
                // May already have been consumed by matching; both outcomes
                // are fine
                book.cancel_order(order_id, order_owner, &mut venue).unwrap();
            }
            // Market swap, exact input, no slippage bound
            2 => {
                let amount = rng.gen_range(1_000..500_000u128);
                let _ = book.swap_exact(
                    owner,
                    owner,
                    side,
                    true,
                    amount,
                    0,
                    &mut FundFromAccount(owner),
                    &mut venue,
                );
            }
            // Placement
            kind => {
                let order_type = match kind {
                    3 => OrderType::ImmediateOrCancel,
                    4 => OrderType::PerformanceLimit,
                    _ => OrderType::Limit,
                };
                let base = rng.gen_range(1..200u64);
                let price = rng.gen_range(1_000..2_000u64);
                let hint = book.suggest_hint(side, price);
                match book.place_order(
                    owner,
                    side,
                    base,
                    price,
                    order_type,
                    hint,
                    &mut FundFromAccount(owner),
                    &mut venue,
                ) {
                    Ok(id) => {
                        if book.is_active(id) {
                            resting.push((id, owner));
                        }
                    }
                    // A performance placement can outrun its claimable
                    // balance; nothing else is allowed to fail here
                    Err(err) => {
                        assert_eq!(order_type, OrderType::PerformanceLimit, "unexpected: {err}")
                    }
                }
            }
        }

        if check_conservation && op % CONSERVATION_INTERVAL == 0 {
            assert_conserved(&book, &venue, supply0, supply1);
        }
        events.extend(book.drain_events());
    }

    assert_conserved(&book, &venue, supply0, supply1);
    events
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Mixed placements, cancels, and swaps with the conservation law checked
/// throughout.
#[test]
fn stress_mixed_operations() {
    let start = Instant::now();
    let events = run_mixed_workload(42, STRESS_OP_COUNT, true);
    let elapsed = start.elapsed();

    println!("\n=== MIXED WORKLOAD ===");
    println!("  Operations:   {:>10}", STRESS_OP_COUNT);
    println!("  Events:       {:>10}", events.len());
    println!("  Elapsed:      {:>10.2?}", elapsed);

    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::Swap { .. })),
        "expected some matching to occur"
    );
}

/// Same seed, same event log. The engine has no hidden source of
/// nondeterminism (hash map iteration order never reaches decisions).
#[test]
fn verify_determinism() {
    const SEED: u64 = 12_345;
    const OPS: usize = 2_000;

    let run1 = run_mixed_workload(SEED, OPS, false);
    let run2 = run_mixed_workload(SEED, OPS, false);
    assert_eq!(run1, run2, "event logs must match for identical seeds");

    let run3 = run_mixed_workload(SEED + 1, OPS, false);
    assert_ne!(run1, run3, "different seeds should diverge");
}

/// With balanced flow in a tight price band the book must not grow
/// without bound.
#[test]
fn stress_book_stays_bounded() {
    const OPS: usize = 20_000;
    const MAX_BOOK_SIZE: usize = 10_000;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut book = OrderBook::with_capacity(unit_ticks(), OPS);
    let mut venue = funded_venue();

    let mut max_seen = 0;
    for _ in 0..OPS {
        let owner = AccountId(rng.gen_range(1..=ACCOUNT_COUNT));
        let side = if rng.gen_bool(0.5) {
            Side::Ask
        } else {
            Side::Bid
        };
        let base = rng.gen_range(1..50u64);
        // Tight band so most orders cross
        let price = rng.gen_range(1_490..1_510u64);
        book.place_order(
            owner,
            side,
            base,
            price,
            OrderType::Limit,
            HEAD_ID,
            &mut FundFromAccount(owner),
            &mut venue,
        )
        .unwrap();
        book.drain_events();

        let size = book.active_orders(Side::Ask) + book.active_orders(Side::Bid);
        max_seen = max_seen.max(size);
    }

    println!("\n=== BOUNDED BOOK ===");
    println!("  Max book size: {max_seen}");
    assert!(
        max_seen < MAX_BOOK_SIZE,
        "book grew too large: {max_seen} (max {MAX_BOOK_SIZE})"
    );
}
