// ============================================================================
// In-Memory Ledger
// Thread-safe bank ledger with a transfer journal
// ============================================================================

use crate::domain::{AccountId, DecCoin};
use crate::interfaces::{Ledger, LedgerError, LegFailure, Transfer};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;

type BalanceKey = (AccountId, String);

#[derive(Default)]
struct LedgerState {
    balances: HashMap<BalanceKey, Decimal>,
    journal: Vec<Transfer>,
}

impl LedgerState {
    fn balance(&self, account: &AccountId, denom: &str) -> Decimal {
        self.balances
            .get(&(*account, denom.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Balances of sender and receiver after `transfer`, computed without writing
    fn settle(&self, transfer: &Transfer) -> Result<(Decimal, Decimal), LedgerError> {
        let denom = &transfer.amount.denom;
        let from_balance = self.balance(&transfer.from, denom);
        check_against(from_balance, transfer)?;

        if transfer.from == transfer.to {
            return Ok((from_balance, from_balance));
        }

        let from_after = debit(from_balance, transfer)?;
        let to_after = credit(self.balance(&transfer.to, denom), transfer)?;
        Ok((from_after, to_after))
    }

    fn set(&mut self, account: AccountId, denom: &str, amount: Decimal) {
        self.balances.insert((account, denom.to_string()), amount);
    }

    fn apply(&mut self, transfer: &Transfer) -> Result<(), LedgerError> {
        let (from_after, to_after) = self.settle(transfer)?;
        self.set(transfer.from, &transfer.amount.denom, from_after);
        self.set(transfer.to, &transfer.amount.denom, to_after);
        self.journal.push(transfer.clone());
        Ok(())
    }
}

fn check_against(available: Decimal, transfer: &Transfer) -> Result<(), LedgerError> {
    if transfer.amount.is_negative() {
        return Err(LedgerError::NegativeAmount(transfer.amount.clone()));
    }

    if available < transfer.amount.amount {
        return Err(LedgerError::InsufficientFunds {
            account: transfer.from,
            denom: transfer.amount.denom.clone(),
            available,
            requested: transfer.amount.amount,
        });
    }

    Ok(())
}

fn debit(balance: Decimal, transfer: &Transfer) -> Result<Decimal, LedgerError> {
    balance
        .checked_sub(transfer.amount.amount)
        .ok_or_else(|| overflow(transfer.from, &transfer.amount.denom))
}

fn credit(balance: Decimal, transfer: &Transfer) -> Result<Decimal, LedgerError> {
    balance
        .checked_add(transfer.amount.amount)
        .ok_or_else(|| overflow(transfer.to, &transfer.amount.denom))
}

fn overflow(account: AccountId, denom: &str) -> LedgerError {
    LedgerError::Overflow {
        account,
        denom: denom.to_string(),
    }
}

/// Reference [`Ledger`] keeping balances in memory.
///
/// Every successful transfer is recorded in a journal in application order.
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air (genesis funding)
    pub fn deposit(&self, account: &AccountId, amount: &DecCoin) -> Result<(), LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(amount.clone()));
        }

        let mut state = self.state.write();
        let funded = state
            .balance(account, &amount.denom)
            .checked_add(amount.amount)
            .ok_or_else(|| overflow(*account, &amount.denom))?;
        state.set(*account, &amount.denom, funded);
        Ok(())
    }

    /// Transfers applied so far, oldest first
    pub fn journal(&self) -> Vec<Transfer> {
        self.state.read().journal.clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.state.read().journal.len()
    }

    /// Sum of every balance held in `denom`, or `None` if it exceeds `Decimal::MAX`
    pub fn total_supply(&self, denom: &str) -> Option<Decimal> {
        self.state
            .read()
            .balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .try_fold(Decimal::ZERO, |total, (_, amount)| total.checked_add(*amount))
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: &AccountId, denom: &str) -> Decimal {
        self.state.read().balance(account, denom)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: &DecCoin) -> Result<(), LedgerError> {
        let transfer = Transfer::new(*from, *to, amount.clone());
        self.state.write().apply(&transfer)
    }

    fn transfer_all(&self, transfers: &[Transfer]) -> Result<(), LegFailure> {
        let mut state = self.state.write();

        // Dry run against projected balances so later legs see earlier ones
        let mut projected: HashMap<BalanceKey, Decimal> = HashMap::new();
        for (index, transfer) in transfers.iter().enumerate() {
            let denom = &transfer.amount.denom;
            let from_key = (transfer.from, denom.clone());
            let to_key = (transfer.to, denom.clone());
            let from_balance = projected
                .get(&from_key)
                .copied()
                .unwrap_or_else(|| state.balance(&transfer.from, denom));

            let leg = |error: LedgerError| LegFailure { index, error };
            check_against(from_balance, transfer).map_err(leg)?;
            if transfer.from == transfer.to {
                continue;
            }

            let to_balance = projected
                .get(&to_key)
                .copied()
                .unwrap_or_else(|| state.balance(&transfer.to, denom));
            let from_after = debit(from_balance, transfer).map_err(leg)?;
            let to_after = credit(to_balance, transfer).map_err(leg)?;

            projected.insert(from_key, from_after);
            projected.insert(to_key, to_after);
        }

        for ((account, denom), amount) in projected {
            state.set(account, &denom, amount);
        }
        state.journal.extend_from_slice(transfers);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ACCOUNT_ID_LEN;
    use rust_decimal_macros::dec;

    fn account(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; ACCOUNT_ID_LEN])
    }

    #[test]
    fn test_deposit_and_transfer() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", dec!(100))).unwrap();

        ledger
            .transfer(&account(1), &account(2), &DecCoin::new("X", dec!(40)))
            .unwrap();

        assert_eq!(ledger.balance(&account(1), "X"), dec!(60));
        assert_eq!(ledger.balance(&account(2), "X"), dec!(40));
        assert_eq!(ledger.balance(&account(2), "Y"), Decimal::ZERO);
        assert_eq!(ledger.total_supply("X"), Some(dec!(100)));
        assert_eq!(ledger.transfer_count(), 1);
    }

    #[test]
    fn test_overdraft_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", dec!(10))).unwrap();

        let err = ledger
            .transfer(&account(1), &account(2), &DecCoin::new("X", dec!(10.01)))
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                account: account(1),
                denom: "X".to_string(),
                available: dec!(10),
                requested: dec!(10.01),
            }
        );
        assert_eq!(ledger.balance(&account(1), "X"), dec!(10));
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let ledger = InMemoryLedger::new();
        let err = ledger
            .transfer(&account(1), &account(2), &DecCoin::new("X", dec!(-5)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NegativeAmount(_)));
    }

    #[test]
    fn test_transfer_all_is_all_or_nothing() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", dec!(50))).unwrap();

        let batch = vec![
            Transfer::new(account(1), account(2), DecCoin::new("X", dec!(50))),
            Transfer::new(account(2), account(3), DecCoin::new("Y", dec!(1))),
        ];

        let failure = ledger.transfer_all(&batch).unwrap_err();
        assert_eq!(failure.index, 1);
        assert!(matches!(failure.error, LedgerError::InsufficientFunds { .. }));

        assert_eq!(ledger.balance(&account(1), "X"), dec!(50));
        assert_eq!(ledger.balance(&account(2), "X"), Decimal::ZERO);
        assert_eq!(ledger.transfer_count(), 0);
    }

    #[test]
    fn test_transfer_all_sees_earlier_legs() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", dec!(30))).unwrap();

        // Second leg spends funds that only arrive with the first
        let batch = vec![
            Transfer::new(account(1), account(2), DecCoin::new("X", dec!(30))),
            Transfer::new(account(2), account(3), DecCoin::new("X", dec!(30))),
        ];

        ledger.transfer_all(&batch).unwrap();

        assert_eq!(ledger.balance(&account(1), "X"), Decimal::ZERO);
        assert_eq!(ledger.balance(&account(2), "X"), Decimal::ZERO);
        assert_eq!(ledger.balance(&account(3), "X"), dec!(30));
        assert_eq!(ledger.journal(), batch);
    }

    #[test]
    fn test_transfer_overflow_leaves_balances_untouched() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", Decimal::MAX)).unwrap();
        ledger.deposit(&account(2), &DecCoin::new("X", Decimal::MAX)).unwrap();

        let err = ledger
            .transfer(&account(1), &account(2), &DecCoin::new("X", Decimal::ONE))
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::Overflow {
                account: account(2),
                denom: "X".to_string(),
            }
        );
        assert_eq!(ledger.balance(&account(1), "X"), Decimal::MAX);
        assert_eq!(ledger.balance(&account(2), "X"), Decimal::MAX);
        assert!(ledger.journal().is_empty());
        assert_eq!(ledger.total_supply("X"), None);
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", Decimal::MAX)).unwrap();

        let err = ledger
            .deposit(&account(1), &DecCoin::new("X", Decimal::ONE))
            .unwrap_err();

        assert!(matches!(err, LedgerError::Overflow { .. }));
        assert_eq!(ledger.balance(&account(1), "X"), Decimal::MAX);
        assert!(ledger
            .deposit(&account(1), &DecCoin::new("X", dec!(-1)))
            .is_err());
    }

    #[test]
    fn test_transfer_all_overflow_is_all_or_nothing() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", dec!(10))).unwrap();
        ledger.deposit(&account(3), &DecCoin::new("X", Decimal::MAX)).unwrap();

        let batch = vec![
            Transfer::new(account(1), account(2), DecCoin::new("X", dec!(10))),
            Transfer::new(account(2), account(3), DecCoin::new("X", dec!(10))),
        ];

        let failure = ledger.transfer_all(&batch).unwrap_err();
        assert_eq!(failure.index, 1);
        assert_eq!(
            failure.error,
            LedgerError::Overflow {
                account: account(3),
                denom: "X".to_string(),
            }
        );

        assert_eq!(ledger.balance(&account(1), "X"), dec!(10));
        assert_eq!(ledger.balance(&account(2), "X"), Decimal::ZERO);
        assert_eq!(ledger.transfer_count(), 0);
    }

    #[test]
    fn test_self_transfer_is_journaled_without_moving_funds() {
        let ledger = InMemoryLedger::new();
        ledger.deposit(&account(1), &DecCoin::new("X", Decimal::MAX)).unwrap();

        ledger
            .transfer(&account(1), &account(1), &DecCoin::new("X", dec!(5)))
            .unwrap();

        assert_eq!(ledger.balance(&account(1), "X"), Decimal::MAX);
        assert_eq!(ledger.transfer_count(), 1);
    }
}
