// ============================================================================
// Exchange
// Quote/fill trade execution against an external ledger
// ============================================================================

use super::errors::{ExecutionError, ExecutionResult};
use crate::domain::{
    AccountId, DecCoin, PendingTrade, SettlementMode, Trade, TradeLeg, DEFAULT_ADDRESS_SALT,
};
use crate::interfaces::{
    settlement_address, Event, ExecutionContext, InMemoryTradeLog, Ledger, LedgerError,
    Sha256AddressDerivation, TradeStore, Transfer,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Single-owner exchange acting as central counterparty for every trade.
///
/// Both legs of a trade route through the settlement address: the taker pays
/// into it and the registered token account is paid out of it.
pub struct Exchange {
    owner: AccountId,

    /// Reference currency of the exchange
    base_asset: DecCoin,

    /// Custodial account every trade settles through
    settlement_address: AccountId,

    settlement_mode: SettlementMode,

    /// Token symbol -> account paid on the maker leg
    registered_tokens: RwLock<HashMap<String, AccountId>>,

    trade_log: Arc<dyn TradeStore>,

    ledger: Arc<dyn Ledger>,

    /// Held from the balance check until the trade is logged; released
    /// before the event is emitted so sinks may call back into the exchange
    execution_lock: Mutex<()>,
}

impl Exchange {
    /// Create an exchange with SHA-256 address derivation, the default salt,
    /// atomic settlement and an in-memory trade log
    pub fn new(owner: AccountId, base_asset: DecCoin, ledger: Arc<dyn Ledger>) -> Self {
        let settlement =
            settlement_address(&Sha256AddressDerivation, &owner, DEFAULT_ADDRESS_SALT);

        Self::from_parts(
            owner,
            base_asset,
            settlement,
            SettlementMode::default(),
            ledger,
            Arc::new(InMemoryTradeLog::new()),
        )
    }

    pub(crate) fn from_parts(
        owner: AccountId,
        base_asset: DecCoin,
        settlement_address: AccountId,
        settlement_mode: SettlementMode,
        ledger: Arc<dyn Ledger>,
        trade_log: Arc<dyn TradeStore>,
    ) -> Self {
        debug!(
            %owner,
            %settlement_address,
            ?settlement_mode,
            "exchange created"
        );

        Self {
            owner,
            base_asset,
            settlement_address,
            settlement_mode,
            registered_tokens: RwLock::new(HashMap::new()),
            trade_log,
            ledger,
            execution_lock: Mutex::new(()),
        }
    }

    // ========================================================================
    // Token Registry
    // ========================================================================

    /// Map `symbol` to the account paid on maker legs; replaces any previous mapping
    pub fn register_token(&self, symbol: impl Into<String>, settlement_account: AccountId) {
        let symbol = symbol.into();
        let previous = self
            .registered_tokens
            .write()
            .insert(symbol.clone(), settlement_account);

        match previous {
            Some(old) if old != settlement_account => {
                info!(%symbol, %old, new = %settlement_account, "token re-registered")
            },
            Some(_) => {},
            None => info!(%symbol, account = %settlement_account, "token registered"),
        }
    }

    pub fn registered_token(&self, symbol: &str) -> Option<AccountId> {
        self.registered_tokens.read().get(symbol).copied()
    }

    /// Registry snapshot sorted by symbol
    pub fn registered_tokens(&self) -> Vec<(String, AccountId)> {
        let mut tokens: Vec<_> = self
            .registered_tokens
            .read()
            .iter()
            .map(|(symbol, account)| (symbol.clone(), *account))
            .collect();
        tokens.sort_by(|a, b| a.0.cmp(&b.0));
        tokens
    }

    // ========================================================================
    // Trade Execution
    // ========================================================================

    /// Sell `taker_amount` from `taker_account` for `maker_amount` of `maker_symbol`.
    ///
    /// The quoted `maker_amount` is trusted as given; no price check is made
    /// between the legs. The recorded maker symbol is the denomination of
    /// `maker_amount`.
    pub fn execute_trade<C>(
        &self,
        ctx: &C,
        taker_account: AccountId,
        taker_amount: DecCoin,
        maker_symbol: &str,
        maker_amount: DecCoin,
    ) -> ExecutionResult<Trade>
    where
        C: ExecutionContext + ?Sized,
    {
        let guard = self.execution_lock.lock();

        let available = self.ledger.balance(&taker_account, &taker_amount.denom);
        let is_negative = available.is_sign_negative() && !available.is_zero();
        if is_negative || available < taker_amount.magnitude() {
            warn!(
                taker = %taker_account,
                required = %taker_amount,
                %available,
                "trade rejected: insufficient funds"
            );
            return Err(ExecutionError::InsufficientFunds {
                account: taker_account,
                required: taker_amount,
                available,
            });
        }

        let maker_account = match self.registered_token(maker_symbol) {
            Some(account) => account,
            None => {
                warn!(symbol = %maker_symbol, "trade rejected: unsupported maker token");
                return Err(ExecutionError::UnsupportedToken {
                    symbol: maker_symbol.to_string(),
                });
            },
        };

        let pending = PendingTrade::new(
            taker_account,
            self.settlement_address,
            taker_amount,
            maker_amount,
            ctx.block_time(),
        );

        self.settle(&pending, maker_account)?;

        let trade = self.trade_log.append(pending);
        drop(guard);

        ctx.event_sink().emit(&Event::trade(&trade));

        info!(
            sequence = trade.sequence,
            taker = %trade.taker_account,
            taker_amount = %trade.taker_amount,
            maker_amount = %trade.maker_amount,
            executed_at = trade.executed_at,
            "trade executed"
        );

        Ok(trade)
    }

    /// Move both legs of `pending` through the ledger in order
    fn settle(&self, pending: &PendingTrade, maker_account: AccountId) -> ExecutionResult<()> {
        let taker_leg = Transfer::new(
            pending.taker_account,
            self.settlement_address,
            pending.taker_amount.clone(),
        );
        let maker_leg = Transfer::new(
            self.settlement_address,
            maker_account,
            pending.maker_amount.clone(),
        );

        match self.settlement_mode {
            SettlementMode::Atomic => self
                .ledger
                .transfer_all(&[taker_leg, maker_leg])
                .map_err(|failure| {
                    let leg = TradeLeg::from_index(failure.index).unwrap_or(TradeLeg::Maker);
                    leg_failed(leg, failure.error)
                }),
            SettlementMode::Sequential => {
                self.ledger
                    .transfer(&taker_leg.from, &taker_leg.to, &taker_leg.amount)
                    .map_err(|e| leg_failed(TradeLeg::Taker, e))?;

                self.ledger
                    .transfer(&maker_leg.from, &maker_leg.to, &maker_leg.amount)
                    .map_err(|e| {
                        warn!(
                            settlement = %self.settlement_address,
                            stranded = %taker_leg.amount,
                            taker = %taker_leg.from,
                            "maker leg failed after taker leg settled; funds need reconciliation"
                        );
                        leg_failed(TradeLeg::Maker, e)
                    })
            },
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every committed trade in execution order
    pub fn trades(&self) -> Vec<Trade> {
        self.trade_log.all()
    }

    /// Trades with sequence `cursor` or later
    pub fn trades_since(&self, cursor: u64) -> Vec<Trade> {
        self.trade_log.since(cursor)
    }

    pub fn trade_count(&self) -> usize {
        self.trade_log.len()
    }

    /// Holdings of `account` in a registered token, queried through the
    /// account registered under `symbol`.
    ///
    /// Returns [`DecCoin::empty`] when `symbol` is not registered.
    pub fn balance(&self, account: &AccountId, symbol: &str) -> DecCoin {
        match self.registered_token(symbol) {
            Some(token_account) => DecCoin::new(
                symbol,
                self.ledger.token_balance(account, &token_account, symbol),
            ),
            None => DecCoin::empty(),
        }
    }

    /// Holdings of the account registered under `symbol`, in that token
    pub fn settlement_balance(&self, symbol: &str) -> DecCoin {
        match self.registered_token(symbol) {
            Some(account) => DecCoin::new(symbol, self.ledger.balance(&account, symbol)),
            None => DecCoin::empty(),
        }
    }

    pub fn settlement_address(&self) -> AccountId {
        self.settlement_address
    }

    pub fn base_denom(&self) -> &str {
        &self.base_asset.denom
    }

    pub fn base_asset(&self) -> &DecCoin {
        &self.base_asset
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn settlement_mode(&self) -> SettlementMode {
        self.settlement_mode
    }
}

fn leg_failed(leg: TradeLeg, source: LedgerError) -> ExecutionError {
    ExecutionError::TransferFailed { leg, source }
}
