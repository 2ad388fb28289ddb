// ============================================================================
// Execution Context Interface
// Logical time and event emission for the enclosing transaction
// ============================================================================

use super::EventSink;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Scope of a single externally-serialized request
pub trait ExecutionContext {
    /// Logical block time in seconds; never wall-clock
    fn block_time(&self) -> i64;

    fn event_sink(&self) -> &dyn EventSink;
}

/// Execution context pinned to a block time
#[derive(Clone)]
pub struct BlockContext {
    time: i64,
    sink: Arc<dyn EventSink>,
}

impl BlockContext {
    pub fn new(time: i64, sink: Arc<dyn EventSink>) -> Self {
        Self { time, sink }
    }

    pub fn from_datetime(time: DateTime<Utc>, sink: Arc<dyn EventSink>) -> Self {
        Self::new(time.timestamp(), sink)
    }

    /// Same sink, later block
    pub fn at(&self, time: i64) -> Self {
        Self::new(time, Arc::clone(&self.sink))
    }
}

impl ExecutionContext for BlockContext {
    fn block_time(&self) -> i64 {
        self.time
    }

    fn event_sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }
}
