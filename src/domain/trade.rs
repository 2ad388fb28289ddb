// ============================================================================
// Trade Domain Model
// ============================================================================

use super::{AccountId, DecCoin};
use chrono::{DateTime, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two transfers of a trade an outcome refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TradeLeg {
    /// Taker to settlement address
    Taker,
    /// Settlement address to the registered maker account
    Maker,
}

impl TradeLeg {
    /// Position of the leg within a settlement batch
    pub fn index(&self) -> usize {
        match self {
            TradeLeg::Taker => 0,
            TradeLeg::Maker => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TradeLeg::Taker),
            1 => Some(TradeLeg::Maker),
            _ => None,
        }
    }
}

impl fmt::Display for TradeLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeLeg::Taker => f.write_str("taker"),
            TradeLeg::Maker => f.write_str("maker"),
        }
    }
}

/// A trade that has passed validation but whose funds have not moved yet.
///
/// Only the trade log can turn it into a [`Trade`], so a committed trade
/// always has a position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTrade {
    pub taker_account: AccountId,
    pub maker_account: AccountId,
    pub taker_amount: DecCoin,
    pub maker_amount: DecCoin,
    pub executed_at: i64,
}

impl PendingTrade {
    pub fn new(
        taker_account: AccountId,
        maker_account: AccountId,
        taker_amount: DecCoin,
        maker_amount: DecCoin,
        executed_at: i64,
    ) -> Self {
        Self {
            taker_account,
            maker_account,
            taker_amount,
            maker_amount,
            executed_at,
        }
    }

    /// Commit at log position `sequence`
    pub fn commit(self, sequence: u64) -> Trade {
        Trade {
            sequence,
            taker_symbol: self.taker_amount.denom.clone(),
            maker_symbol: self.maker_amount.denom.clone(),
            taker_account: self.taker_account,
            maker_account: self.maker_account,
            taker_amount: self.taker_amount,
            maker_amount: self.maker_amount,
            executed_at: self.executed_at,
        }
    }
}

/// A committed bilateral trade
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Zero-based position in the trade log
    pub sequence: u64,

    /// Account that sold `taker_amount`
    pub taker_account: AccountId,

    /// Counterparty of the taker; the exchange settlement address
    pub maker_account: AccountId,

    pub taker_amount: DecCoin,
    pub maker_amount: DecCoin,

    /// Denomination of `taker_amount`
    pub taker_symbol: String,

    /// Denomination of `maker_amount`
    pub maker_symbol: String,

    /// Logical block time in seconds
    pub executed_at: i64,
}

impl Trade {
    /// Block time as a UTC timestamp, if it is in chrono's range
    pub fn executed_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.executed_at, 0)
    }
}
