// ============================================================================
// Quote DEX Library
// Single-owner quote/fill exchange settling through an external ledger
// ============================================================================

//! # Quote DEX
//!
//! A custodial quote/fill exchange module for a replicated state machine.
//!
//! ## Features
//!
//! - **Central counterparty settlement** through a derived settlement address
//! - **Atomic or two-call settlement** of the taker and maker legs
//! - **Append-only trade log** with a read cursor
//! - **Audit events** emitted through the host's event sink
//! - **Pluggable collaborators** for the ledger, block context, address
//!   derivation and trade storage
//!
//! ## Example
//!
//! ```rust
//! use quote_dex::prelude::*;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let owner = AccountId::from_bytes([1; 20]);
//! let maker = AccountId::from_bytes([2; 20]);
//! let taker = AccountId::from_bytes([3; 20]);
//!
//! let exchange = ExchangeBuilder::new(owner, "uatom")
//!     .with_token("Y", maker)
//!     .build(ledger.clone())
//!     .unwrap();
//!
//! // Fund the taker and give the exchange inventory to pay out
//! ledger.deposit(&taker, &DecCoin::new("X", dec!(100))).unwrap();
//! ledger.deposit(&exchange.settlement_address(), &DecCoin::new("Y", dec!(40))).unwrap();
//!
//! let ctx = BlockContext::new(1_700_000_000, Arc::new(EventBuffer::new()));
//! let trade = exchange
//!     .execute_trade(&ctx, taker, DecCoin::new("X", dec!(40)), "Y", DecCoin::new("Y", dec!(40)))
//!     .unwrap();
//!
//! assert_eq!(trade.sequence, 0);
//! assert_eq!(ledger.balance(&maker, "Y"), dec!(40));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod ledger;
pub mod utils;

/// Module name, also used as the default settlement address salt
pub const MODULE_NAME: &str = "dex";

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AccountId, DecCoin, ExchangeConfig, PendingTrade, SettlementMode, Trade, TradeLeg,
    };
    pub use crate::engine::{
        create_from_config, Exchange, ExchangeBuilder, ExecutionError, ExecutionResult,
    };
    pub use crate::interfaces::{
        AddressDerivation, BlockContext, Event, EventBuffer, EventSink, ExecutionContext,
        InMemoryTradeLog, Ledger, LedgerError, LoggingEventSink, NoOpEventSink,
        Sha256AddressDerivation, TradeStore,
    };
    pub use crate::ledger::InMemoryLedger;
}
