// ============================================================================
// Interfaces Module
// Contracts for the host-provided collaborators
// ============================================================================

mod address;
mod context;
mod event_sink;
mod ledger;
mod trade_store;

pub use address::{settlement_address, AddressDerivation, Sha256AddressDerivation};
pub use context::{BlockContext, ExecutionContext};
pub use event_sink::{
    attributes, Event, EventBuffer, EventSink, LoggingEventSink, NoOpEventSink, EVENT_TYPE_TRADE,
};
pub use ledger::{Ledger, LedgerError, LegFailure, Transfer};
pub use trade_store::{InMemoryTradeLog, TradeStore};
