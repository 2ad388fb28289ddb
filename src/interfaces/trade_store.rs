// ============================================================================
// Trade Store Interface
// Append-only trade history with a read cursor
// ============================================================================

use crate::domain::{PendingTrade, Trade};
use parking_lot::RwLock;

/// Append-only, ordered store of committed trades.
///
/// Sequence numbers start at zero and equal the trade's position; a reader
/// that has seen `n` trades resumes with `since(n)`.
pub trait TradeStore: Send + Sync {
    /// Commit `pending` at the next position and return the stored record
    fn append(&self, pending: PendingTrade) -> Trade;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every trade in execution order
    fn all(&self) -> Vec<Trade>;

    /// Trades whose sequence is `cursor` or later
    fn since(&self, cursor: u64) -> Vec<Trade>;
}

/// Process-lifetime trade log
#[derive(Default)]
pub struct InMemoryTradeLog {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeStore for InMemoryTradeLog {
    fn append(&self, pending: PendingTrade) -> Trade {
        let mut trades = self.trades.write();
        let trade = pending.commit(trades.len() as u64);
        trades.push(trade.clone());
        trade
    }

    fn len(&self) -> usize {
        self.trades.read().len()
    }

    fn all(&self) -> Vec<Trade> {
        self.trades.read().clone()
    }

    fn since(&self, cursor: u64) -> Vec<Trade> {
        let trades = self.trades.read();
        let start = usize::try_from(cursor).unwrap_or(usize::MAX).min(trades.len());
        trades[start..].to_vec()
    }
}
