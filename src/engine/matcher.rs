//! Core matching loops.
//!
//! Both entry points walk the *opposite* side's list from `head.next`, best
//! price first, ties by insertion order. Makers consumed by a loop are
//! always a contiguous prefix of the list, so the loop deactivates them in
//! place and rewrites the head pointer exactly once at the end
//! ([`OrderList::splice_front`]) instead of once per removed node.
//!
//! The loops only mutate the opposite-side list. Settlement (who pays whom,
//! and through which path) is the book's job; the loops report what traded
//! as a list of [`Fill`]s.

use tracing::trace;

use crate::orderbook::list::{OrderList, TAIL_ID};
use crate::types::error::BookError;
use crate::types::order::Side;
use crate::types::ticks::TickParams;

/// One maker order (partially) consumed by a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fill {
    pub maker_order_id: u64,
    pub maker_owner: u32,
    /// Maker settles through the claimable ledger, not external transfers.
    pub maker_perf: bool,
    /// Consumed quantity in base units.
    pub base: u64,
    /// Token0 moved by this fill.
    pub amount0: u128,
    /// Token1 moved by this fill, at the maker's price.
    pub amount1: u128,
}

/// Everything a match loop produced.
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchTotals {
    pub fills: Vec<Fill>,
    pub filled0: u128,
    pub filled1: u128,
}

/// Target denomination of a market swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapTarget {
    Amount0,
    Amount1,
}

/// Match an incoming limit-style order against the opposite side.
///
/// Walks while the incoming order has unfilled quantity and the best maker
/// crosses `limit_price`. Returns the fills and the unfilled base
/// remainder; the caller decides what the remainder means (rest, drop, or
/// fail the placement) based on the order type.
pub(crate) fn match_resting(
    opposite: &mut OrderList,
    ticks: &TickParams,
    limit_price: u64,
    amount0_base: u64,
) -> Result<(MatchTotals, u64), BookError> {
    let maker_side = opposite.side();
    let mut totals = MatchTotals::default();
    let mut consumed: Vec<u64> = Vec::new();
    let mut remaining = amount0_base;

    let mut cur = opposite.head_next();
    let mut survivor = cur;
    while remaining > 0 && cur != TAIL_ID {
        let maker = *opposite.get(cur).expect("order list link out of bounds");
        if !maker_side.crosses(maker.price_base, limit_price) {
            break;
        }

        let take = remaining.min(maker.amount0_base);
        let amount1 = ticks.to_amount1(take, maker.price_base)?;
        if take == 0 || amount1 == 0 {
            // Maker remainder below one quote tick at this price level.
            break;
        }

        totals.fills.push(Fill {
            maker_order_id: maker.id,
            maker_owner: maker.owner_handle,
            maker_perf: maker.performance_mode(),
            base: take,
            amount0: ticks.to_amount0(take),
            amount1,
        });
        totals.filled0 += ticks.to_amount0(take);
        totals.filled1 += amount1;
        remaining -= take;

        if take == maker.amount0_base {
            opposite.deactivate_keep_links(cur);
            consumed.push(cur);
            cur = maker.next;
            survivor = cur;
        } else {
            // Partially consumed maker stays the best; later entries are
            // worse-priced, so the loop is done.
            opposite
                .get_mut(cur)
                .expect("order list link out of bounds")
                .amount0_base -= take;
            break;
        }
    }

    unlink_consumed_prefix(opposite, &consumed, survivor);
    trace!(
        fills = totals.fills.len(),
        remaining,
        "resting match loop finished"
    );
    Ok((totals, remaining))
}

/// Match a market swap with an exact-input or exact-output target.
///
/// The target is denominated in whichever asset the combination of side and
/// direction implies. Rounding is asymmetric by design:
///
/// - exact-output targets round the base quantity *up* (the taker may
///   receive slightly more than requested; the maker is never shorted),
/// - exact-input targets round *down* (what goes out never exceeds what the
///   payment covers); an input residue below one tick is unspendable dust
///   and ends the loop successfully.
///
/// Fails with [`BookError::InsufficientLiquidity`] if the book is exhausted
/// before the target is met.
pub(crate) fn match_swap(
    opposite: &mut OrderList,
    ticks: &TickParams,
    taker_side: Side,
    exact_input: bool,
    amount: u128,
) -> Result<MatchTotals, BookError> {
    let target = match (taker_side, exact_input) {
        (Side::Ask, true) | (Side::Bid, false) => SwapTarget::Amount0,
        (Side::Ask, false) | (Side::Bid, true) => SwapTarget::Amount1,
    };

    let mut totals = MatchTotals::default();
    let mut consumed: Vec<u64> = Vec::new();
    let mut remaining = amount;
    let mut dust_stop = false;
    let mut last_price: Option<u64> = None;

    let mut cur = opposite.head_next();
    let mut survivor = cur;
    while remaining > 0 && cur != TAIL_ID {
        let maker = *opposite.get(cur).expect("order list link out of bounds");

        let want_base = match (target, exact_input) {
            (SwapTarget::Amount0, true) => ticks.base_for_amount0_floor(remaining)?,
            (SwapTarget::Amount0, false) => ticks.base_for_amount0_ceil(remaining)?,
            (SwapTarget::Amount1, true) => {
                ticks.base_for_amount1_floor(remaining, maker.price_base)?
            }
            (SwapTarget::Amount1, false) => {
                ticks.base_for_amount1_ceil(remaining, maker.price_base)?
            }
        };
        if want_base == 0 {
            // Only reachable on the floor paths: the residue cannot buy a
            // single base unit.
            dust_stop = true;
            break;
        }

        let take = want_base.min(maker.amount0_base);
        let amount0 = ticks.to_amount0(take);
        let amount1 = ticks.to_amount1(take, maker.price_base)?;
        if amount1 == 0 {
            break;
        }

        totals.fills.push(Fill {
            maker_order_id: maker.id,
            maker_owner: maker.owner_handle,
            maker_perf: maker.performance_mode(),
            base: take,
            amount0,
            amount1,
        });
        totals.filled0 += amount0;
        totals.filled1 += amount1;
        last_price = Some(maker.price_base);
        // Ceil rounding may overshoot the target by less than one tick.
        remaining = remaining.saturating_sub(match target {
            SwapTarget::Amount0 => amount0,
            SwapTarget::Amount1 => amount1,
        });

        if take == maker.amount0_base {
            opposite.deactivate_keep_links(cur);
            consumed.push(cur);
            cur = maker.next;
            survivor = cur;
        } else {
            // A partial take leaves the maker the best order; the next
            // pass either rounds the residue to zero or the loop
            // condition ends.
            opposite
                .get_mut(cur)
                .expect("order list link out of bounds")
                .amount0_base -= take;
        }
    }

    unlink_consumed_prefix(opposite, &consumed, survivor);
    // The loop can also end by exhausting the book in the iteration that
    // consumed the last meaningful unit of input. An exact-input residue
    // that cannot buy a single base unit is the same unspendable dust
    // whether or not a maker is left to price it against.
    if exact_input && !dust_stop && remaining > 0 {
        dust_stop = match (target, last_price) {
            (SwapTarget::Amount0, _) => ticks.base_for_amount0_floor(remaining)? == 0,
            (SwapTarget::Amount1, Some(price)) => {
                ticks.base_for_amount1_floor(remaining, price)? == 0
            }
            (SwapTarget::Amount1, None) => false,
        };
    }
    if remaining > 0 && !dust_stop {
        return Err(BookError::InsufficientLiquidity);
    }
    trace!(
        fills = totals.fills.len(),
        filled0 = totals.filled0,
        filled1 = totals.filled1,
        "swap match loop finished"
    );
    Ok(totals)
}

/// Cut the links of every consumed maker and rewrite the head pointer once.
fn unlink_consumed_prefix(list: &mut OrderList, consumed: &[u64], survivor: u64) {
    if consumed.is_empty() {
        return;
    }
    for &id in consumed {
        list.cut_links(id);
    }
    list.splice_front(survivor);
}

// ============================================================================
// Unit Tests
// ============================================================================
