// ============================================================================
// Trade Execution Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Settlement Modes - Atomic batch versus two transfer calls
// 2. Rejections - Cost of the validation path
// 3. Trade Log Reads - Cursor reads over a growing log
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quote_dex::prelude::*;
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

fn account(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 20])
}

/// Exchange with a taker and inventory deep enough for any benchmark run
fn funded_exchange(mode: SettlementMode) -> (Exchange, BlockContext) {
    let ledger = Arc::new(InMemoryLedger::new());
    let mut builder = ExchangeBuilder::new(account(9), "uatom").with_token("Y", account(2));
    if mode == SettlementMode::Sequential {
        builder = builder.sequential_settlement();
    }
    let exchange = builder.build(ledger.clone()).unwrap();

    let funding = Decimal::from(i64::MAX / 4);
    ledger
        .deposit(&account(1), &DecCoin::new("X", funding))
        .unwrap();
    ledger
        .deposit(&exchange.settlement_address(), &DecCoin::new("Y", funding))
        .unwrap();

    (exchange, BlockContext::new(0, Arc::new(NoOpEventSink)))
}

fn benchmark_settlement_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement_mode");

    for mode in [SettlementMode::Atomic, SettlementMode::Sequential] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", mode)),
            &mode,
            |b, &mode| {
                let (exchange, ctx) = funded_exchange(mode);
                b.iter(|| {
                    black_box(
                        exchange
                            .execute_trade(
                                &ctx,
                                account(1),
                                DecCoin::new("X", Decimal::ONE),
                                "Y",
                                DecCoin::new("Y", Decimal::ONE),
                            )
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn benchmark_rejections(c: &mut Criterion) {
    let (exchange, ctx) = funded_exchange(SettlementMode::Atomic);

    c.bench_function("reject_unsupported_token", |b| {
        b.iter(|| {
            black_box(exchange.execute_trade(
                &ctx,
                account(1),
                DecCoin::new("X", Decimal::ONE),
                "Z",
                DecCoin::new("Z", Decimal::ONE),
            ))
        });
    });

    c.bench_function("reject_insufficient_funds", |b| {
        b.iter(|| {
            black_box(exchange.execute_trade(
                &ctx,
                account(3),
                DecCoin::new("X", Decimal::ONE),
                "Y",
                DecCoin::new("Y", Decimal::ONE),
            ))
        });
    });
}

fn benchmark_trade_log_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("trades_since");

    for log_size in [100u64, 1000, 10000].iter() {
        let (exchange, ctx) = funded_exchange(SettlementMode::Atomic);
        for _ in 0..*log_size {
            exchange
                .execute_trade(
                    &ctx,
                    account(1),
                    DecCoin::new("X", Decimal::ONE),
                    "Y",
                    DecCoin::new("Y", Decimal::ONE),
                )
                .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(log_size),
            log_size,
            |b, &log_size| {
                // Last ten trades, as a polling reader would fetch them
                b.iter(|| black_box(exchange.trades_since(log_size - 10)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_settlement_modes,
    benchmark_rejections,
    benchmark_trade_log_reads,
);
criterion_main!(benches);
