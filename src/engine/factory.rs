// ============================================================================
// Exchange Factory
// Creates exchanges with proper configuration
// ============================================================================

use crate::domain::{AccountId, ConfigError, DecCoin, ExchangeConfig, SettlementMode};
use crate::engine::Exchange;
use crate::interfaces::{
    settlement_address, AddressDerivation, InMemoryTradeLog, Ledger, Sha256AddressDerivation,
    TradeStore,
};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an exchange from configuration
///
/// Uses SHA-256 address derivation and an in-memory trade log; use
/// [`ExchangeBuilder`] to supply either.
///
/// # Example
/// ```
/// use quote_dex::prelude::*;
/// use quote_dex::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let owner = AccountId::from_bytes([7; 20]);
/// let config = ExchangeConfig::single_owner(owner, "uatom");
/// let exchange = create_from_config(config, Arc::new(InMemoryLedger::new())).unwrap();
/// assert_eq!(exchange.base_denom(), "uatom");
/// ```
pub fn create_from_config(
    config: ExchangeConfig,
    ledger: Arc<dyn Ledger>,
) -> Result<Exchange, ConfigError> {
    assemble(
        config,
        ledger,
        &Sha256AddressDerivation,
        Arc::new(InMemoryTradeLog::new()),
    )
}

fn assemble(
    config: ExchangeConfig,
    ledger: Arc<dyn Ledger>,
    derivation: &dyn AddressDerivation,
    trade_log: Arc<dyn TradeStore>,
) -> Result<Exchange, ConfigError> {
    config.validate()?;

    let settlement = settlement_address(derivation, &config.owner, &config.address_salt);
    let exchange = Exchange::from_parts(
        config.owner,
        config.base_asset,
        settlement,
        config.settlement_mode,
        ledger,
        trade_log,
    );

    for (symbol, account) in config.tokens {
        exchange.register_token(symbol, account);
    }

    Ok(exchange)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating exchanges with fluent API
///
/// # Example
/// ```
/// use quote_dex::prelude::*;
/// use std::sync::Arc;
///
/// let owner = AccountId::from_bytes([7; 20]);
/// let exchange = ExchangeBuilder::new(owner, "uatom")
///     .sequential_settlement()
///     .with_token("Y", AccountId::from_bytes([2; 20]))
///     .build(Arc::new(InMemoryLedger::new()))
///     .unwrap();
///
/// assert_eq!(exchange.registered_tokens().len(), 1);
/// ```
pub struct ExchangeBuilder {
    config: ExchangeConfig,
    derivation: Option<Box<dyn AddressDerivation>>,
    trade_log: Option<Arc<dyn TradeStore>>,
}

impl ExchangeBuilder {
    /// Create a new builder for an exchange owned by `owner`
    pub fn new(owner: AccountId, base_denom: impl Into<String>) -> Self {
        Self::from_config(ExchangeConfig::single_owner(owner, base_denom))
    }

    pub fn from_config(config: ExchangeConfig) -> Self {
        Self {
            config,
            derivation: None,
            trade_log: None,
        }
    }

    // ========================================================================
    // Settlement Configuration
    // ========================================================================

    /// Submit both legs as one all-or-nothing ledger call (default)
    pub fn atomic_settlement(mut self) -> Self {
        self.config.settlement_mode = SettlementMode::Atomic;
        self
    }

    /// Submit the legs as two separate transfers
    pub fn sequential_settlement(mut self) -> Self {
        self.config.settlement_mode = SettlementMode::Sequential;
        self
    }

    // ========================================================================
    // Additional Configuration
    // ========================================================================

    pub fn with_base_asset(mut self, base_asset: DecCoin) -> Self {
        self.config.base_asset = base_asset;
        self
    }

    pub fn with_address_salt(mut self, salt: impl Into<String>) -> Self {
        self.config.address_salt = salt.into();
        self
    }

    pub fn with_token(mut self, symbol: impl Into<String>, account: AccountId) -> Self {
        self.config.tokens.push((symbol.into(), account));
        self
    }

    /// Replace SHA-256 settlement address derivation
    pub fn with_address_derivation(mut self, derivation: Box<dyn AddressDerivation>) -> Self {
        self.derivation = Some(derivation);
        self
    }

    /// Replace the in-memory trade log
    pub fn with_trade_store(mut self, trade_log: Arc<dyn TradeStore>) -> Self {
        self.trade_log = Some(trade_log);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the exchange
    pub fn build(self, ledger: Arc<dyn Ledger>) -> Result<Exchange, ConfigError> {
        let trade_log = self
            .trade_log
            .unwrap_or_else(|| Arc::new(InMemoryTradeLog::new()));

        match self.derivation {
            Some(derivation) => assemble(self.config, ledger, derivation.as_ref(), trade_log),
            None => assemble(self.config, ledger, &Sha256AddressDerivation, trade_log),
        }
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &ExchangeConfig {
        &self.config
    }
}
