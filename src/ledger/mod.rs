// ============================================================================
// Ledger Module
// Reference implementations of the ledger collaborator
// ============================================================================

mod in_memory;

pub use in_memory::InMemoryLedger;
