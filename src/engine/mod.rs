// ============================================================================
// Engine Module
// Contains the trade execution business logic
// ============================================================================

mod errors;
mod exchange;

pub mod factory;

pub use errors::{ExecutionError, ExecutionResult};
pub use exchange::Exchange;
pub use factory::{create_from_config, ExchangeBuilder};
