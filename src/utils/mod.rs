// ============================================================================
// Utilities Module
// Host-side helpers that sit outside the trade execution path
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::init_logging;
