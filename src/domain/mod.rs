// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod account;
pub mod coin;
pub mod config;
pub mod trade;

pub use account::{AccountId, AccountIdError, ACCOUNT_ID_LEN};
pub use coin::{CoinParseError, DecCoin};
pub use config::{ConfigError, ExchangeConfig, SettlementMode, DEFAULT_ADDRESS_SALT};
pub use trade::{PendingTrade, Trade, TradeLeg};
