// ============================================================================
// Execution Errors
// ============================================================================

use crate::domain::{AccountId, DecCoin, TradeLeg};
use crate::interfaces::LedgerError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a trade request was not executed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("insufficient funds: {account} holds {available}, trade requires {required}")]
    InsufficientFunds {
        account: AccountId,
        required: DecCoin,
        available: Decimal,
    },

    #[error("maker token not supported: {symbol}")]
    UnsupportedToken { symbol: String },

    #[error("{leg} leg transfer failed")]
    TransferFailed {
        leg: TradeLeg,
        #[source]
        source: LedgerError,
    },
}

impl ExecutionError {
    /// Leg that failed, for transfer failures
    pub fn leg(&self) -> Option<TradeLeg> {
        match self {
            ExecutionError::TransferFailed { leg, .. } => Some(*leg),
            _ => None,
        }
    }
}

/// Result type alias for trade execution
pub type ExecutionResult<T> = Result<T, ExecutionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ExecutionError::UnsupportedToken {
            symbol: "Z".to_string(),
        };
        assert_eq!(err.to_string(), "maker token not supported: Z");
        assert_eq!(err.leg(), None);
    }

    #[test]
    fn test_transfer_failure_keeps_source() {
        let err = ExecutionError::TransferFailed {
            leg: TradeLeg::Maker,
            source: LedgerError::Unavailable("bank halted".to_string()),
        };

        assert_eq!(err.to_string(), "maker leg transfer failed");
        assert_eq!(err.leg(), Some(TradeLeg::Maker));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("ledger unavailable: bank halted".to_string())
        );
    }
}
