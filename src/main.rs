//! Demo binary: runs a short trading session against a simulated venue.

use tickbook::settlement::sim::FundFromAccount;
use tickbook::{
    AccountId, Asset, BookError, OrderBook, OrderType, Side, SimVenue, TickParams, HEAD_ID,
};

fn main() -> Result<(), BookError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tickbook=debug".into()),
        )
        .init();

    // 0.001 token0 per base unit, price quoted in 10 token1 steps
    let ticks = TickParams::new(100, 10, 1_000)?;
    let mut book = OrderBook::new(ticks);
    let mut venue = SimVenue::new();

    let alice = AccountId(1);
    let bob = AccountId(2);
    venue.fund(alice, Asset::Token0, 1_000_000);
    venue.fund(bob, Asset::Token1, 1_000_000);

    let ask = book.place_order(
        alice,
        Side::Ask,
        50,
        1_450,
        OrderType::Limit,
        HEAD_ID,
        &mut FundFromAccount(alice),
        &mut venue,
    )?;
    println!("alice resting ask: id={ask}");

    let bid = book.place_order(
        bob,
        Side::Bid,
        20,
        1_450,
        OrderType::ImmediateOrCancel,
        HEAD_ID,
        &mut FundFromAccount(bob),
        &mut venue,
    )?;
    println!("bob IoC bid: id={bid}");

    let (amount0, amount1) = book.swap_exact(
        bob,
        bob,
        Side::Bid,
        true,
        10_000,
        0,
        &mut FundFromAccount(bob),
        &mut venue,
    )?;
    println!("bob swap: {amount0} token0 for {amount1} token1");

    book.cancel_order(ask, alice, &mut venue)?;
    println!("alice cancelled the remainder");

    for event in book.drain_events() {
        println!("event: {event:?}");
    }
    println!(
        "final balances: alice token1={}, bob token0={}",
        venue.balance(alice, Asset::Token1),
        venue.balance(bob, Asset::Token0),
    );
    Ok(())
}
