//! End-to-end scenarios through the public API.

use tickbook::settlement::sim::{FundFromAccount, SimVenue};
use tickbook::{
    AccountId, Asset, BookError, Event, OrderBook, OrderType, Side, TickParams, Venue, HEAD_ID,
};

const ALICE: AccountId = AccountId(1);
const BOB: AccountId = AccountId(2);
const CAROL: AccountId = AccountId(3);

/// multiplier = divider = 1: amount0 = base * 100, amount1 = base * price.
fn unit_ticks() -> TickParams {
    TickParams::new(100, 10, 1_000).unwrap()
}

/// size_tick * price_tick < token0_one: quote amounts divide by 100.
fn divider_ticks() -> TickParams {
    TickParams::new(10, 10, 10_000).unwrap()
}

fn funded_venue() -> SimVenue {
    let mut venue = SimVenue::new();
    for account in [ALICE, BOB, CAROL] {
        venue.fund(account, Asset::Token0, 10_000_000);
        venue.fund(account, Asset::Token1, 10_000_000);
    }
    venue
}

fn place(
    book: &mut OrderBook,
    venue: &mut SimVenue,
    owner: AccountId,
    side: Side,
    base: u64,
    price: u64,
    order_type: OrderType,
) -> Result<u64, BookError> {
    book.place_order(
        owner,
        side,
        base,
        price,
        order_type,
        HEAD_ID,
        &mut FundFromAccount(owner),
        venue,
    )
}

#[test]
fn spread_rests_then_taker_crosses_at_maker_price() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    // A 1400/1450 spread: neither side crosses
    let ask = place(&mut book, &mut venue, ALICE, Side::Ask, 10, 1_450, OrderType::Limit).unwrap();
    let bid = place(&mut book, &mut venue, BOB, Side::Bid, 10, 1_400, OrderType::Limit).unwrap();
    assert_eq!((ask, bid), (2, 3));
    assert_eq!(book.best_ask(), Some(ask));
    assert_eq!(book.best_bid(), Some(bid));

    // Carol is willing to pay 1500 but executes at the maker's 1450
    let before = venue.balance(CAROL, Asset::Token1);
    place(
        &mut book,
        &mut venue,
        CAROL,
        Side::Bid,
        10,
        1_500,
        OrderType::ImmediateOrCancel,
    )
    .unwrap();
    assert_eq!(before - venue.balance(CAROL, Asset::Token1), 10 * 1_450);
    assert!(!book.is_active(ask));
    // Bob's bid was never touched
    assert_eq!(book.best_bid(), Some(bid));
}

#[test]
fn price_time_priority_across_levels() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    let a = place(&mut book, &mut venue, ALICE, Side::Ask, 5, 1_500, OrderType::Limit).unwrap();
    let b = place(&mut book, &mut venue, BOB, Side::Ask, 5, 1_450, OrderType::Limit).unwrap();
    let c = place(&mut book, &mut venue, CAROL, Side::Ask, 5, 1_450, OrderType::Limit).unwrap();

    // Page order: best price first, ties by arrival
    let page = book.paginate(Side::Ask, 0, 3).unwrap();
    assert_eq!([page[0].id, page[1].id, page[2].id], [b, c, a]);

    // A 12-base taker consumes b fully, c fully, and 2 from a
    place(
        &mut book,
        &mut venue,
        ALICE,
        Side::Bid,
        12,
        1_500,
        OrderType::ImmediateOrCancel,
    )
    .unwrap();
    assert!(!book.is_active(b));
    assert!(!book.is_active(c));
    assert_eq!(book.get_order(a).unwrap().amount0_base, 3);
}

#[test]
fn hinted_insertion_lands_mid_book() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    let a = place(&mut book, &mut venue, ALICE, Side::Ask, 5, 1_400, OrderType::Limit).unwrap();
    let c = place(&mut book, &mut venue, ALICE, Side::Ask, 5, 1_600, OrderType::Limit).unwrap();

    // Hint points at the order that should precede the new one
    let hint = book.suggest_hint(Side::Ask, 1_500);
    assert_eq!(hint, a);
    let b = book
        .place_order(
            BOB,
            Side::Ask,
            5,
            1_500,
            OrderType::Limit,
            hint,
            &mut FundFromAccount(BOB),
            &mut venue,
        )
        .unwrap();

    let page = book.paginate(Side::Ask, 0, 3).unwrap();
    assert_eq!([page[0].id, page[1].id, page[2].id], [a, b, c]);
}

#[test]
fn stale_hint_still_inserts_correctly() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    let a = place(&mut book, &mut venue, ALICE, Side::Ask, 5, 1_400, OrderType::Limit).unwrap();
    place(&mut book, &mut venue, BOB, Side::Ask, 5, 1_450, OrderType::Limit).unwrap();

    // Consume order `a`, then reuse its id as a hint
    place(
        &mut book,
        &mut venue,
        CAROL,
        Side::Bid,
        5,
        1_400,
        OrderType::ImmediateOrCancel,
    )
    .unwrap();
    assert!(!book.is_active(a));

    let d = book
        .place_order(
            CAROL,
            Side::Ask,
            5,
            1_500,
            OrderType::Limit,
            a,
            &mut FundFromAccount(CAROL),
            &mut venue,
        )
        .unwrap();
    let page = book.paginate(Side::Ask, 0, 2).unwrap();
    assert_eq!(page[1].id, d);
}

#[test]
fn exact_output_over_delivers_less_than_one_base_unit() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    // Bid maker at an awkward price
    place(&mut book, &mut venue, ALICE, Side::Bid, 10, 1_333, OrderType::Limit).unwrap();

    // Bob wants exactly 4000 token1 out; 3 base pays 3999, so he sells 4
    let (amount0, amount1) = book
        .swap_exact(
            BOB,
            BOB,
            Side::Ask,
            false,
            4_000,
            1_000_000,
            &mut FundFromAccount(BOB),
            &mut venue,
        )
        .unwrap();
    assert_eq!(amount0, 400);
    assert_eq!(amount1, 4 * 1_333);
    assert!(amount1 - 4_000 < 1_333);
}

#[test]
fn divider_ticks_trade_conserves_funds() {
    let mut book = OrderBook::new(divider_ticks());
    let mut venue = funded_venue();
    let supply1 = venue.total_supply(Asset::Token1);

    // At price 150 with divider 100, 7 base owes floor(10.5) = 10 token1
    place(&mut book, &mut venue, ALICE, Side::Ask, 7, 150, OrderType::Limit).unwrap();
    let before = venue.balance(BOB, Asset::Token1);
    place(&mut book, &mut venue, BOB, Side::Bid, 7, 150, OrderType::Limit).unwrap();

    assert_eq!(before - venue.balance(BOB, Asset::Token1), 10);
    assert_eq!(venue.balance(ALICE, Asset::Token1), 10_000_000 + 10);
    assert_eq!(venue.total_supply(Asset::Token1), supply1);
    assert_eq!(venue.book_balance(Asset::Token1), 0);
}

#[test]
fn divider_ticks_reject_dust_prices() {
    let mut book = OrderBook::new(divider_ticks());
    let mut venue = funded_venue();

    // Any price below 100 would round one base unit's quote to zero
    let err = place(&mut book, &mut venue, ALICE, Side::Ask, 10, 99, OrderType::Limit).unwrap_err();
    assert_eq!(err, BookError::InvalidPrice);
}

#[test]
fn creator_workflow_with_performance_mode() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    // Carol manages Alice's funds: deposit, place on her behalf, cancel
    book.deposit_claimable(
        ALICE,
        Asset::Token0,
        5_000,
        &mut FundFromAccount(ALICE),
        &mut venue,
    )
    .unwrap();
    let id = book
        .place_order_for(
            CAROL,
            ALICE,
            Side::Ask,
            30,
            1_450,
            OrderType::PerformanceLimit,
            HEAD_ID,
            &mut tickbook::NoPayment,
            &mut venue,
        )
        .unwrap();
    assert_eq!(book.claimable_balance(ALICE, Asset::Token0), 2_000);
    assert_eq!(book.get_order(id).unwrap().owner, ALICE);

    assert!(book.cancel_order(id, CAROL, &mut venue).unwrap());
    assert_eq!(book.claimable_balance(ALICE, Asset::Token0), 5_000);
}

#[test]
fn event_log_serializes_to_json() {
    let mut book = OrderBook::new(unit_ticks());
    let mut venue = funded_venue();

    place(&mut book, &mut venue, ALICE, Side::Ask, 10, 1_450, OrderType::Limit).unwrap();
    place(&mut book, &mut venue, BOB, Side::Bid, 10, 1_450, OrderType::Limit).unwrap();

    let events = book.drain_events();
    let json = serde_json::to_string(&events).unwrap();
    let back: Vec<Event> = serde_json::from_str(&json).unwrap();
    assert_eq!(events, back);
    assert!(json.contains("Swap"));
}
