//! The order book facade.
//!
//! [`OrderBook`] owns the two sorted order lists, the identity table, the
//! claimable ledger, and the event log, and exposes every public mutating
//! operation. It is the only module that combines matching with
//! settlement.
//!
//! ## All-or-nothing operations
//!
//! Every mutating entry point snapshots the book state on entry and
//! restores it if the operation returns an error, so a failed operation
//! leaves no trace: no consumed makers, no burned order ids, no events.
//! External transfers already executed by the venue are the venue's
//! concern; the book sequences the load-bearing debit before any payout
//! so a rolled-back operation has at worst pulled funds in, never pushed
//! them out and lost track.
//!
//! ## Reentrancy
//!
//! Payment callbacks receive `&mut OrderBook`. A guard flag makes any
//! nested mutating call fail with [`BookError::Reentrancy`] instead of
//! observing (or corrupting) mid-operation state.

use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::{match_resting, match_swap, Fill};
use crate::orderbook::list::{OrderList, FIRST_ORDER_ID, TAIL_ID};
use crate::settlement::{ClaimableLedger, PaymentCallback, Venue};
use crate::types::error::BookError;
use crate::types::events::Event;
use crate::types::identity::{AccountId, IdentityTable};
use crate::types::order::{Asset, OrderNode, OrderType, Side};
use crate::types::ticks::TickParams;

// ============================================================================
// Query result types
// ============================================================================

/// Snapshot of one active order, with real token amounts alongside the
/// base-unit quantities stored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderInfo {
    pub id: u64,
    pub side: Side,
    pub owner: AccountId,
    pub amount0_base: u64,
    pub price_base: u64,
    pub amount0: u128,
    pub amount1: u128,
    pub performance_mode: bool,
}

/// One row of a depth page. Pages are fixed-length; rows past the end of
/// the book are zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageEntry {
    pub id: u64,
    pub owner: AccountId,
    pub amount0: u128,
    pub amount1: u128,
    pub price_base: u64,
}

// ============================================================================
// Book state
// ============================================================================

/// Everything covered by the all-or-nothing rollback.
#[derive(Debug, Clone)]
struct BookState {
    next_order_id: u64,
    asks: OrderList,
    bids: OrderList,
    identities: IdentityTable,
    claimable: ClaimableLedger,
    events: Vec<Event>,
}

impl BookState {
    fn new(capacity: usize) -> Self {
        Self {
            next_order_id: FIRST_ORDER_ID,
            asks: OrderList::with_capacity(Side::Ask, capacity),
            bids: OrderList::with_capacity(Side::Bid, capacity),
            identities: IdentityTable::new(),
            claimable: ClaimableLedger::new(),
            events: Vec::new(),
        }
    }
}

// ============================================================================
// OrderBook
// ============================================================================

/// A price-time-priority book for one token0/token1 pair.
pub struct OrderBook {
    ticks: TickParams,
    state: BookState,
    entered: bool,
}

impl OrderBook {
    pub fn new(ticks: TickParams) -> Self {
        Self::with_capacity(ticks, 0)
    }

    pub fn with_capacity(ticks: TickParams, capacity: usize) -> Self {
        Self {
            ticks,
            state: BookState::new(capacity),
            entered: false,
        }
    }

    #[inline]
    pub fn ticks(&self) -> &TickParams {
        &self.ticks
    }

    /// Id the next accepted placement will receive.
    #[inline]
    pub fn next_order_id(&self) -> u64 {
        self.state.next_order_id
    }

    #[inline]
    fn list(&self, side: Side) -> &OrderList {
        match side {
            Side::Ask => &self.state.asks,
            Side::Bid => &self.state.bids,
        }
    }

    #[inline]
    fn list_mut(&mut self, side: Side) -> &mut OrderList {
        match side {
            Side::Ask => &mut self.state.asks,
            Side::Bid => &mut self.state.bids,
        }
    }

    // ------------------------------------------------------------------------
    // Guard / rollback plumbing
    // ------------------------------------------------------------------------

    fn begin(&mut self) -> Result<BookState, BookError> {
        if self.entered {
            return Err(BookError::Reentrancy);
        }
        self.entered = true;
        Ok(self.state.clone())
    }

    fn finish<T>(
        &mut self,
        snapshot: BookState,
        result: Result<T, BookError>,
    ) -> Result<T, BookError> {
        self.entered = false;
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    // ------------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------------

    /// Place an order owned by the caller. Returns the assigned order id.
    ///
    /// `hint_id` is a best-effort insertion hint for the resting position:
    /// the id of an order that should precede the new one, or
    /// [`HEAD_ID`](crate::orderbook::HEAD_ID) for a blind insert. A stale
    /// or misplaced hint degrades to a head scan; a hint at or above the
    /// new id is rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn place_order(
        &mut self,
        owner: AccountId,
        side: Side,
        amount0_base: u64,
        price_base: u64,
        order_type: OrderType,
        hint_id: u64,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<u64, BookError> {
        let snapshot = self.begin()?;
        let result = self.place_inner(
            None,
            owner,
            side,
            amount0_base,
            price_base,
            order_type,
            hint_id,
            ctx,
            venue,
        );
        self.finish(snapshot, result)
    }

    /// Place an order on behalf of `owner`. The creator is recorded on the
    /// resting order and may cancel it later; refunds and proceeds always
    /// go to the owner.
    #[allow(clippy::too_many_arguments)]
    pub fn place_order_for(
        &mut self,
        creator: AccountId,
        owner: AccountId,
        side: Side,
        amount0_base: u64,
        price_base: u64,
        order_type: OrderType,
        hint_id: u64,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<u64, BookError> {
        let snapshot = self.begin()?;
        let result = self.place_inner(
            Some(creator),
            owner,
            side,
            amount0_base,
            price_base,
            order_type,
            hint_id,
            ctx,
            venue,
        );
        self.finish(snapshot, result)
    }

    #[allow(clippy::too_many_arguments)]
    fn place_inner(
        &mut self,
        creator: Option<AccountId>,
        owner: AccountId,
        side: Side,
        amount0_base: u64,
        price_base: u64,
        order_type: OrderType,
        hint_id: u64,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<u64, BookError> {
        if amount0_base == 0 {
            return Err(BookError::InvalidAmount);
        }
        self.ticks.validate_price(price_base)?;
        if order_type.rests() {
            // A resting order must carry at least one quote unit of
            // notional or it could sit on the book forever, unmatchable.
            if self.ticks.to_amount1(amount0_base, price_base)? == 0 {
                return Err(BookError::InvalidAmount);
            }
            if hint_id >= self.state.next_order_id {
                return Err(BookError::InvalidHint {
                    hint: hint_id,
                    new: self.state.next_order_id,
                });
            }
        }

        let order_id = self.state.next_order_id;
        self.state.next_order_id += 1;
        self.state.events.push(Event::OrderCreated {
            id: order_id,
            owner,
            side,
            amount0_base,
            price_base,
            order_type,
        });

        let ticks = self.ticks;
        let opposite = side.opposite();
        let (totals, remaining) =
            match_resting(self.list_mut(opposite), &ticks, price_base, amount0_base)?;
        if order_type == OrderType::FillOrKill && remaining > 0 {
            return Err(BookError::FillOrKillNotFilled);
        }
        self.emit_swaps(&totals.fills, opposite, owner);

        let mut rested_base = 0;
        if remaining > 0 && order_type.rests() {
            let owner_handle = self.state.identities.intern(owner);
            let creator_handle = creator.map(|c| self.state.identities.intern(c)).unwrap_or(0);
            let node = OrderNode::new(
                order_id,
                remaining,
                price_base,
                owner_handle,
                creator_handle,
                order_type.performance_mode(),
            );
            self.list_mut(side).insert(node, hint_id)?;
            rested_base = remaining;
        }

        // Debit covers fills plus whatever rests; the maker legs and the
        // taker's proceeds are paid only after the debit is verified.
        let (debit_amount, credit_amount) = match side {
            Side::Ask => (
                totals.filled0 + ticks.to_amount0(rested_base),
                totals.filled1,
            ),
            Side::Bid => (
                totals.filled1 + ticks.to_amount1(rested_base, price_base)?,
                totals.filled0,
            ),
        };
        if debit_amount > 0 {
            if order_type.performance_mode() {
                let handle = self.state.identities.intern(owner);
                self.state.claimable.debit(handle, side.debit_asset(), debit_amount)?;
                self.state.events.push(Event::BalanceDecreased {
                    account: owner,
                    asset: side.debit_asset(),
                    amount: debit_amount,
                });
            } else {
                self.collect_debit(owner, side.debit_asset(), debit_amount, ctx, venue)?;
            }
        }

        self.credit_fills(&totals.fills, opposite, venue);
        if credit_amount > 0 {
            if order_type.performance_mode() {
                let handle = self.state.identities.intern(owner);
                self.state.claimable.credit(handle, side.credit_asset(), credit_amount);
                self.state.events.push(Event::BalanceIncreased {
                    account: owner,
                    asset: side.credit_asset(),
                    amount: credit_amount,
                });
            } else {
                self.credit_or_absorb(owner, side.credit_asset(), credit_amount, venue);
            }
        }

        debug!(
            order_id,
            %owner,
            ?side,
            ?order_type,
            filled_base = amount0_base - remaining,
            rested_base,
            "order placed"
        );
        Ok(order_id)
    }

    // ------------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------------

    /// Cancel an active order and refund its locked remainder.
    ///
    /// Returns `Ok(false)` without touching anything if the id is not
    /// active (already filled, already cancelled, or never existed), so
    /// racing cancels are harmless. Only the owner or the recorded
    /// creator may cancel.
    pub fn cancel_order(
        &mut self,
        order_id: u64,
        caller: AccountId,
        venue: &mut dyn Venue,
    ) -> Result<bool, BookError> {
        let snapshot = self.begin()?;
        let result = self.cancel_inner(order_id, caller, venue);
        self.finish(snapshot, result)
    }

    fn cancel_inner(
        &mut self,
        order_id: u64,
        caller: AccountId,
        venue: &mut dyn Venue,
    ) -> Result<bool, BookError> {
        let side = match self.side_of(order_id) {
            Some(side) => side,
            None => return Ok(false),
        };
        let node = *self
            .list(side)
            .get(order_id)
            .expect("active order present in its list");
        let owner = self
            .state
            .identities
            .account_of(node.owner_handle)
            .expect("active order owner interned");

        let authorized = caller == owner
            || (node.creator_handle() != 0
                && self.state.identities.lookup(caller) == Some(node.creator_handle()));
        if !authorized {
            return Err(BookError::Unauthorized);
        }

        let (asset, refund) = match side {
            Side::Ask => (Asset::Token0, self.ticks.to_amount0(node.amount0_base)),
            Side::Bid => (
                Asset::Token1,
                self.ticks.to_amount1(node.amount0_base, node.price_base)?,
            ),
        };
        self.list_mut(side).erase(order_id)?;

        if node.performance_mode() {
            self.state.claimable.credit(node.owner_handle, asset, refund);
            self.state.events.push(Event::BalanceIncreased {
                account: owner,
                asset,
                amount: refund,
            });
        } else {
            self.credit_or_absorb(owner, asset, refund, venue);
        }
        self.state.events.push(Event::OrderCanceled {
            id: order_id,
            owner,
            side,
        });
        debug!(order_id, %owner, ?side, refund, "order cancelled");
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Swaps
    // ------------------------------------------------------------------------

    /// Execute a market swap with an exact-input or exact-output target.
    ///
    /// With `exact_input`, `amount` is what the taker pays and
    /// `limit_amount` the minimum acceptable output; otherwise `amount` is
    /// the requested output and `limit_amount` the maximum acceptable
    /// input. Proceeds go to `recipient`, which may differ from the payer.
    /// Returns `(amount0, amount1)` actually traded.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_exact(
        &mut self,
        taker: AccountId,
        recipient: AccountId,
        side: Side,
        exact_input: bool,
        amount: u128,
        limit_amount: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(u128, u128), BookError> {
        let snapshot = self.begin()?;
        let result = self.swap_inner(
            taker,
            recipient,
            side,
            exact_input,
            amount,
            limit_amount,
            ctx,
            venue,
        );
        self.finish(snapshot, result)
    }

    #[allow(clippy::too_many_arguments)]
    fn swap_inner(
        &mut self,
        taker: AccountId,
        recipient: AccountId,
        side: Side,
        exact_input: bool,
        amount: u128,
        limit_amount: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(u128, u128), BookError> {
        if amount == 0 {
            return Err(BookError::InvalidAmount);
        }
        let ticks = self.ticks;
        let opposite = side.opposite();
        let totals = match_swap(self.list_mut(opposite), &ticks, side, exact_input, amount)?;
        self.emit_swaps(&totals.fills, opposite, taker);

        let (input, output) = match side {
            Side::Ask => (totals.filled0, totals.filled1),
            Side::Bid => (totals.filled1, totals.filled0),
        };
        if exact_input {
            if output < limit_amount {
                return Err(BookError::NotEnoughOutput {
                    got: output,
                    min: limit_amount,
                });
            }
        } else if input > limit_amount {
            return Err(BookError::TooMuchRequested {
                need: input,
                max: limit_amount,
            });
        }

        if input > 0 {
            self.collect_debit(taker, side.debit_asset(), input, ctx, venue)?;
        }
        self.credit_fills(&totals.fills, opposite, venue);
        if output > 0 {
            self.credit_or_absorb(recipient, side.credit_asset(), output, venue);
        }

        debug!(
            %taker,
            ?side,
            exact_input,
            amount0 = totals.filled0,
            amount1 = totals.filled1,
            "swap executed"
        );
        Ok((totals.filled0, totals.filled1))
    }

    // ------------------------------------------------------------------------
    // Claimable balances
    // ------------------------------------------------------------------------

    /// Pre-fund a claimable balance, typically ahead of performance-mode
    /// placements.
    pub fn deposit_claimable(
        &mut self,
        owner: AccountId,
        asset: Asset,
        amount: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        let snapshot = self.begin()?;
        let result = self.deposit_inner(owner, asset, amount, ctx, venue);
        self.finish(snapshot, result)
    }

    fn deposit_inner(
        &mut self,
        owner: AccountId,
        asset: Asset,
        amount: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        if amount == 0 {
            return Err(BookError::InvalidAmount);
        }
        self.collect_debit(owner, asset, amount, ctx, venue)?;
        let handle = self.state.identities.intern(owner);
        self.state.claimable.credit(handle, asset, amount);
        self.state.events.push(Event::BalanceIncreased {
            account: owner,
            asset,
            amount,
        });
        Ok(())
    }

    /// Withdraw from the caller's claimable balance. Unlike settlement
    /// payouts there is no fallback here: a refused transfer fails the
    /// withdrawal and the balance stays claimable.
    pub fn withdraw_claimable(
        &mut self,
        caller: AccountId,
        asset: Asset,
        amount: u128,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        let snapshot = self.begin()?;
        let result = self.withdraw_inner(caller, asset, amount, venue);
        self.finish(snapshot, result)
    }

    fn withdraw_inner(
        &mut self,
        caller: AccountId,
        asset: Asset,
        amount: u128,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        if amount == 0 {
            return Err(BookError::InvalidAmount);
        }
        let handle = match self.state.identities.lookup(caller) {
            Some(handle) => handle,
            None => {
                return Err(BookError::InsufficientClaimableBalance {
                    need: amount,
                    available: 0,
                })
            }
        };
        self.state.claimable.debit(handle, asset, amount)?;
        if !venue.transfer_out(asset, caller, amount) {
            return Err(BookError::TransferFailed);
        }
        self.state.events.push(Event::BalanceDecreased {
            account: caller,
            asset,
            amount,
        });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Flash loans
    // ------------------------------------------------------------------------

    /// Lend out both assets for the duration of one callback. The venue's
    /// book balances must be fully restored by the time the callback
    /// returns or the operation fails and rolls back.
    pub fn flash_borrow(
        &mut self,
        recipient: AccountId,
        amount0: u128,
        amount1: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        let snapshot = self.begin()?;
        let result = self.flash_inner(recipient, amount0, amount1, ctx, venue);
        self.finish(snapshot, result)
    }

    fn flash_inner(
        &mut self,
        recipient: AccountId,
        amount0: u128,
        amount1: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        if amount0 == 0 && amount1 == 0 {
            return Err(BookError::InvalidAmount);
        }
        let before0 = venue.book_balance(Asset::Token0);
        let before1 = venue.book_balance(Asset::Token1);
        if amount0 > 0 && !venue.transfer_out(Asset::Token0, recipient, amount0) {
            return Err(BookError::TransferFailed);
        }
        if amount1 > 0 && !venue.transfer_out(Asset::Token1, recipient, amount1) {
            return Err(BookError::TransferFailed);
        }
        ctx.on_flash_loan(self, venue, amount0, amount1);
        if venue.book_balance(Asset::Token0) < before0 || venue.book_balance(Asset::Token1) < before1
        {
            return Err(BookError::FlashLoanNotRepaid);
        }
        self.state.events.push(Event::FlashLoan {
            recipient,
            amount0,
            amount1,
        });
        debug!(%recipient, amount0, amount1, "flash loan repaid");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Settlement helpers
    // ------------------------------------------------------------------------

    /// Pull `amount` of `asset` into the book through the callback and
    /// verify the venue's balance delta covers it.
    fn collect_debit(
        &mut self,
        payer: AccountId,
        asset: Asset,
        amount: u128,
        ctx: &mut dyn PaymentCallback,
        venue: &mut dyn Venue,
    ) -> Result<(), BookError> {
        let before = venue.book_balance(asset);
        ctx.supply(self, venue, asset, amount);
        let got = venue.book_balance(asset).saturating_sub(before);
        if got < amount {
            warn!(%payer, ?asset, need = amount, got, "debit shortfall");
            return Err(BookError::DebitShortfall { need: amount, got });
        }
        Ok(())
    }

    /// Pay out `amount`, absorbing a refused transfer into the recipient's
    /// claimable balance so settlement for everyone else proceeds.
    fn credit_or_absorb(
        &mut self,
        account: AccountId,
        asset: Asset,
        amount: u128,
        venue: &mut dyn Venue,
    ) {
        if amount == 0 {
            return;
        }
        if venue.transfer_out(asset, account, amount) {
            return;
        }
        warn!(%account, ?asset, amount, "transfer refused; crediting claimable balance");
        let handle = self.state.identities.intern(account);
        self.state.claimable.credit(handle, asset, amount);
        self.state.events.push(Event::BalanceIncreased {
            account,
            asset,
            amount,
        });
    }

    /// Pay every consumed maker its side of the trade.
    fn credit_fills(&mut self, fills: &[Fill], maker_side: Side, venue: &mut dyn Venue) {
        let asset = maker_side.credit_asset();
        for fill in fills {
            let account = self
                .state
                .identities
                .account_of(fill.maker_owner)
                .expect("maker identity interned");
            let amount = match maker_side {
                Side::Ask => fill.amount1,
                Side::Bid => fill.amount0,
            };
            if fill.maker_perf {
                self.state.claimable.credit(fill.maker_owner, asset, amount);
                self.state.events.push(Event::BalanceIncreased {
                    account,
                    asset,
                    amount,
                });
            } else {
                self.credit_or_absorb(account, asset, amount, venue);
            }
        }
    }

    fn emit_swaps(&mut self, fills: &[Fill], maker_side: Side, taker: AccountId) {
        for fill in fills {
            let maker = self
                .state
                .identities
                .account_of(fill.maker_owner)
                .expect("maker identity interned");
            self.state.events.push(Event::Swap {
                maker_order_id: fill.maker_order_id,
                maker,
                taker,
                maker_side,
                amount0: fill.amount0,
                amount1: fill.amount1,
            });
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Look up an active order.
    pub fn get_order(&self, order_id: u64) -> Option<OrderInfo> {
        let side = self.side_of(order_id)?;
        let node = self.list(side).get(order_id)?;
        Some(OrderInfo {
            id: node.id,
            side,
            owner: self.state.identities.account_of(node.owner_handle)?,
            amount0_base: node.amount0_base,
            price_base: node.price_base,
            amount0: self.ticks.to_amount0(node.amount0_base),
            amount1: self
                .ticks
                .to_amount1(node.amount0_base, node.price_base)
                .ok()?,
            performance_mode: node.performance_mode(),
        })
    }

    #[inline]
    pub fn is_active(&self, order_id: u64) -> bool {
        self.state.asks.is_active(order_id) || self.state.bids.is_active(order_id)
    }

    /// Which side an active order rests on.
    pub fn side_of(&self, order_id: u64) -> Option<Side> {
        if self.state.asks.is_active(order_id) {
            Some(Side::Ask)
        } else if self.state.bids.is_active(order_id) {
            Some(Side::Bid)
        } else {
            None
        }
    }

    /// Id of the order that would precede a new order at `price_base`,
    /// usable as a placement hint.
    pub fn suggest_hint(&self, side: Side, price_base: u64) -> u64 {
        self.list(side).suggest_hint(price_base)
    }

    /// Best (lowest) ask order id, if any.
    pub fn best_ask(&self) -> Option<u64> {
        self.state.asks.best().map(|node| node.id)
    }

    /// Best (highest) bid order id, if any.
    pub fn best_bid(&self) -> Option<u64> {
        self.state.bids.best().map(|node| node.id)
    }

    #[inline]
    pub fn active_orders(&self, side: Side) -> usize {
        self.list(side).active_count()
    }

    /// Walk one side in price-time order starting at `start_id` (inclusive)
    /// or from the top with `start_id == 0`. Always returns exactly
    /// `limit` rows, zero-filled past the end of the book.
    pub fn paginate(
        &self,
        side: Side,
        start_id: u64,
        limit: usize,
    ) -> Result<Vec<PageEntry>, BookError> {
        let list = self.list(side);
        let start = if start_id == 0 {
            list.head_next()
        } else {
            if !list.is_active(start_id) {
                return Err(BookError::StartNotActive(start_id));
            }
            start_id
        };

        let mut entries = vec![PageEntry::default(); limit];
        let mut cur = start;
        let mut row = 0;
        while row < limit && cur != TAIL_ID {
            let node = list.get(cur).expect("order list link out of bounds");
            entries[row] = PageEntry {
                id: node.id,
                owner: self
                    .state
                    .identities
                    .account_of(node.owner_handle)
                    .unwrap_or_default(),
                amount0: self.ticks.to_amount0(node.amount0_base),
                amount1: self.ticks.to_amount1(node.amount0_base, node.price_base)?,
                price_base: node.price_base,
            };
            cur = node.next;
            row += 1;
        }
        Ok(entries)
    }

    /// Claimable balance of an account in `asset`.
    pub fn claimable_balance(&self, account: AccountId, asset: Asset) -> u128 {
        match self.state.identities.lookup(account) {
            Some(handle) => self.state.claimable.get(handle, asset),
            None => 0,
        }
    }

    /// Raw units of `asset` locked behind resting orders. Together with
    /// [`OrderBook::total_claimable`] this is what the venue must hold for
    /// the book; when the tick combination divides, truncation on partial
    /// fills can leave the venue holding slightly more, never less.
    pub fn total_locked(&self, asset: Asset) -> u128 {
        let list = match asset {
            Asset::Token0 => &self.state.asks,
            Asset::Token1 => &self.state.bids,
        };
        list.iter_active()
            .map(|node| match asset {
                Asset::Token0 => self.ticks.to_amount0(node.amount0_base),
                Asset::Token1 => self
                    .ticks
                    .to_amount1(node.amount0_base, node.price_base)
                    .expect("resting notional representable"),
            })
            .sum()
    }

    /// Sum of all claimable balances in `asset`.
    pub fn total_claimable(&self, asset: Asset) -> u128 {
        self.state.claimable.total(asset)
    }

    /// Take the accumulated event log, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.state.events)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
