// ============================================================================
// Event Sink Interface
// Typed-attribute events handed to the host event bus
// ============================================================================

use crate::domain::Trade;
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Event type emitted for every committed trade
pub const EVENT_TYPE_TRADE: &str = "trade";

/// Attribute keys of the trade event, in emission order
pub mod attributes {
    pub const TAKER_ADDRESS: &str = "taker_address";
    pub const MAKER_ADDRESS: &str = "maker_address";
    pub const TAKER_AMOUNT: &str = "taker_amount";
    pub const MAKER_AMOUNT: &str = "maker_amount";
    pub const TAKER_TOKEN_SYMBOL: &str = "taker_token_symbol";
    pub const MAKER_TOKEN_SYMBOL: &str = "maker_token_symbol";
    pub const TIMESTAMP: &str = "timestamp";
}

/// A domain event: a type plus ordered string attributes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// First value stored under `key`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Audit event for a committed trade
    pub fn trade(trade: &Trade) -> Self {
        Self::new(EVENT_TYPE_TRADE)
            .with_attribute(attributes::TAKER_ADDRESS, trade.taker_account.to_string())
            .with_attribute(attributes::MAKER_ADDRESS, trade.maker_account.to_string())
            .with_attribute(attributes::TAKER_AMOUNT, trade.taker_amount.to_string())
            .with_attribute(attributes::MAKER_AMOUNT, trade.maker_amount.to_string())
            .with_attribute(attributes::TAKER_TOKEN_SYMBOL, trade.taker_symbol.as_str())
            .with_attribute(attributes::MAKER_TOKEN_SYMBOL, trade.maker_symbol.as_str())
            .with_attribute(attributes::TIMESTAMP, trade.executed_at.to_string())
    }
}

/// Fire-and-forget event consumer
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Discards every event
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: &Event) {}
}

/// Writes events to the `tracing` subscriber
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: &Event) {
        tracing::debug!(kind = %event.kind, attributes = ?event.attributes, "exchange event");
    }
}

/// Collects events in emission order, like a host event manager
#[derive(Default)]
pub struct EventBuffer {
    events: Mutex<Vec<Event>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Remove and return everything emitted so far
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventBuffer {
    fn emit(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }
}
