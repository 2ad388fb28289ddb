// ============================================================================
// Basic Usage Example
// ============================================================================

use quote_dex::interfaces::attributes;
use quote_dex::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    println!("=== Quote DEX Example ===\n");

    let ledger = Arc::new(InMemoryLedger::new());
    let events = Arc::new(EventBuffer::new());

    let owner = AccountId::from_bytes([0x11; 20]);
    let taker = AccountId::from_bytes([0x22; 20]);
    let token_y = AccountId::from_bytes([0x33; 20]);

    let exchange = ExchangeBuilder::new(owner, "uatom")
        .with_token("Y", token_y)
        .build(ledger.clone())
        .expect("valid configuration");

    println!("Settlement address: {}", exchange.settlement_address());
    println!("Base denomination:  {}\n", exchange.base_denom());

    ledger
        .deposit(&taker, &"100X".parse().expect("valid coin"))
        .expect("genesis deposit");
    ledger
        .deposit(&exchange.settlement_address(), &"40Y".parse().expect("valid coin"))
        .expect("genesis deposit");

    // Fill three quotes in consecutive blocks; the last one runs out of inventory
    let ctx = BlockContext::new(1_700_000_000, events.clone());
    for (block, (sell, buy)) in [("30X", "15Y"), ("30X", "20Y"), ("30X", "20Y")]
        .iter()
        .enumerate()
    {
        let sell: DecCoin = sell.parse().expect("valid coin");
        let buy: DecCoin = buy.parse().expect("valid coin");

        match exchange.execute_trade(&ctx.at(1_700_000_000 + block as i64 * 6), taker, sell, "Y", buy) {
            Ok(trade) => println!(
                "Trade #{}: {} -> {} at {}",
                trade.sequence, trade.taker_amount, trade.maker_amount, trade.executed_at
            ),
            Err(e) => println!("Rejected: {} ({:?})", e, e.leg()),
        }
    }

    println!("\n=== Balances ===");
    println!("Taker X:      {}", ledger.balance(&taker, "X"));
    println!("Token Y acct: {}", exchange.balance(&token_y, "Y"));
    println!(
        "Settlement:   {}X {}Y",
        ledger.balance(&exchange.settlement_address(), "X"),
        ledger.balance(&exchange.settlement_address(), "Y")
    );
    println!("Unregistered: {:?}", exchange.balance(&taker, "Z"));

    println!("\n=== Events ===");
    for event in events.events() {
        println!(
            "{} taker_amount={} maker_amount={}",
            event.kind,
            event.attribute(attributes::TAKER_AMOUNT).unwrap_or("-"),
            event.attribute(attributes::MAKER_AMOUNT).unwrap_or("-"),
        );
    }

    assert_eq!(exchange.trade_count(), 2);
    assert_eq!(ledger.balance(&taker, "X"), Decimal::from(40));
}
