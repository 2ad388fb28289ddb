// ============================================================================
// Ledger Interface
// Balance queries and transfers provided by the host bank module
// ============================================================================

use crate::domain::{AccountId, DecCoin};
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a single ledger operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {account} holds {available}{denom}, cannot send {requested}{denom}")]
    InsufficientFunds {
        account: AccountId,
        denom: String,
        available: Decimal,
        requested: Decimal,
    },

    #[error("cannot transfer negative amount {0}")]
    NegativeAmount(DecCoin),

    #[error("balance of {account} in {denom} would overflow")]
    Overflow { account: AccountId, denom: String },

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// A failed leg inside a multi-entry transfer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transfer leg {index} failed: {error}")]
pub struct LegFailure {
    /// Position of the failing entry in the submitted batch
    pub index: usize,
    #[source]
    pub error: LedgerError,
}

/// One debit/credit entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: DecCoin,
}

impl Transfer {
    pub fn new(from: AccountId, to: AccountId, amount: DecCoin) -> Self {
        Self { from, to, amount }
    }
}

/// Balance-keeping collaborator.
///
/// Each `transfer` is atomic on its own and its effect is visible to
/// subsequent calls. `transfer_all` applies a batch of entries in order as one
/// unit: either every entry takes effect or none does.
pub trait Ledger: Send + Sync {
    /// Balance of `account` in `denom`
    fn balance(&self, account: &AccountId, denom: &str) -> Decimal;

    /// Balance of `holder` in the token custodied by `token_account`.
    ///
    /// Ledgers that key balances by denomination alone ignore `token_account`.
    fn token_balance(
        &self,
        holder: &AccountId,
        _token_account: &AccountId,
        denom: &str,
    ) -> Decimal {
        self.balance(holder, denom)
    }

    /// Move `amount` from `from` to `to`
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: &DecCoin) -> Result<(), LedgerError>;

    /// Apply every entry of `transfers` in order, or none of them
    fn transfer_all(&self, transfers: &[Transfer]) -> Result<(), LegFailure>;
}
