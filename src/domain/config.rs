// ============================================================================
// Exchange Configuration
// Owner identity, base asset, settlement behaviour and initial token registry
// ============================================================================

use super::{AccountId, DecCoin};
use rust_decimal::Decimal;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Salt appended to the owner identity when deriving the settlement address
pub const DEFAULT_ADDRESS_SALT: &str = crate::MODULE_NAME;

// ============================================================================
// Settlement Mode
// ============================================================================

/// How the two transfers of a trade are submitted to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SettlementMode {
    /// Both legs in one multi-entry ledger call; all or nothing
    #[default]
    Atomic,

    /// Two independent transfer calls, taker leg first.
    ///
    /// A maker-leg failure leaves the taker's funds at the settlement
    /// address and must be reconciled outside the exchange.
    Sequential,
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base asset denomination cannot be empty")]
    EmptyBaseDenom,

    #[error("base asset amount cannot be negative: {0}")]
    NegativeBaseAmount(Decimal),

    #[error("address salt cannot be empty")]
    EmptySalt,

    #[error("token symbol cannot be empty")]
    EmptyTokenSymbol,
}

// ============================================================================
// Exchange Configuration
// ============================================================================

/// Everything needed to construct an [`Exchange`](crate::engine::Exchange)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExchangeConfig {
    /// Owner the settlement address is derived from
    pub owner: AccountId,

    /// Reference currency of the exchange
    pub base_asset: DecCoin,

    /// Salt mixed into settlement address derivation
    pub address_salt: String,

    pub settlement_mode: SettlementMode,

    /// Tokens registered at construction, applied in order
    pub tokens: Vec<(String, AccountId)>,
}

impl ExchangeConfig {
    pub fn new(owner: AccountId, base_asset: DecCoin) -> Self {
        Self {
            owner,
            base_asset,
            address_salt: DEFAULT_ADDRESS_SALT.to_string(),
            settlement_mode: SettlementMode::default(),
            tokens: Vec::new(),
        }
    }

    /// Builder method: Override the address derivation salt
    pub fn with_address_salt(mut self, salt: impl Into<String>) -> Self {
        self.address_salt = salt.into();
        self
    }

    /// Builder method: Choose how trade legs reach the ledger
    pub fn with_settlement_mode(mut self, mode: SettlementMode) -> Self {
        self.settlement_mode = mode;
        self
    }

    /// Builder method: Register a token at construction
    pub fn with_token(mut self, symbol: impl Into<String>, account: AccountId) -> Self {
        self.tokens.push((symbol.into(), account));
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_asset.denom.is_empty() {
            return Err(ConfigError::EmptyBaseDenom);
        }

        if self.base_asset.is_negative() {
            return Err(ConfigError::NegativeBaseAmount(self.base_asset.amount));
        }

        if self.address_salt.is_empty() {
            return Err(ConfigError::EmptySalt);
        }

        // Runtime registration accepts any symbol; configured ones must at least be named
        if self.tokens.iter().any(|(symbol, _)| symbol.is_empty()) {
            return Err(ConfigError::EmptyTokenSymbol);
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl ExchangeConfig {
    /// Single-owner exchange with atomic settlement and the default salt
    pub fn single_owner(owner: AccountId, base_denom: impl Into<String>) -> Self {
        Self::new(owner, DecCoin::zero(base_denom))
    }

    /// Two-call settlement, matching hosts without a multi-entry transfer
    pub fn legacy_two_phase(owner: AccountId, base_denom: impl Into<String>) -> Self {
        Self::single_owner(owner, base_denom).with_settlement_mode(SettlementMode::Sequential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ACCOUNT_ID_LEN;
    use rust_decimal_macros::dec;

    fn owner() -> AccountId {
        AccountId::from_bytes([9; ACCOUNT_ID_LEN])
    }

    #[test]
    fn test_config_defaults() {
        let config = ExchangeConfig::single_owner(owner(), "uatom");

        assert_eq!(config.address_salt, DEFAULT_ADDRESS_SALT);
        assert_eq!(config.settlement_mode, SettlementMode::Atomic);
        assert!(config.tokens.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let maker = AccountId::from_bytes([1; ACCOUNT_ID_LEN]);
        let config = ExchangeConfig::new(owner(), DecCoin::new("uatom", dec!(1000)))
            .with_address_salt("dex-v2")
            .with_settlement_mode(SettlementMode::Sequential)
            .with_token("Y", maker);

        assert_eq!(config.address_salt, "dex-v2");
        assert_eq!(config.settlement_mode, SettlementMode::Sequential);
        assert_eq!(config.tokens, vec![("Y".to_string(), maker)]);
    }

    #[test]
    fn test_validation() {
        let empty_denom = ExchangeConfig::single_owner(owner(), "");
        assert_eq!(empty_denom.validate(), Err(ConfigError::EmptyBaseDenom));

        let negative = ExchangeConfig::new(owner(), DecCoin::new("uatom", dec!(-1)));
        assert_eq!(
            negative.validate(),
            Err(ConfigError::NegativeBaseAmount(dec!(-1)))
        );

        let no_salt = ExchangeConfig::single_owner(owner(), "uatom").with_address_salt("");
        assert_eq!(no_salt.validate(), Err(ConfigError::EmptySalt));

        let unnamed = ExchangeConfig::single_owner(owner(), "uatom").with_token("", owner());
        assert_eq!(unnamed.validate(), Err(ConfigError::EmptyTokenSymbol));
    }

    #[test]
    fn test_preset_configs() {
        let legacy = ExchangeConfig::legacy_two_phase(owner(), "uatom");
        assert_eq!(legacy.settlement_mode, SettlementMode::Sequential);
    }
}
