//! Adapters for the Privileged Governance ports

pub mod memory_ledger;
pub mod oracles;

pub use memory_ledger::InMemoryLedger;
pub use oracles::{InMemoryResourceUsage, ManualIrreversibilityOracle};
