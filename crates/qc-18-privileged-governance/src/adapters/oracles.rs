//! Reference implementations of the finality and resource-usage ports.

use crate::ports::{IrreversibilityOracle, ResourceUsageOracle};
use parking_lot::RwLock;
use shared_types::{AccountName, BlockNum};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Finality tracker driven by hand (tests, single-node devnets).
#[derive(Debug, Default)]
pub struct ManualIrreversibilityOracle {
    lib: AtomicU32,
}

impl ManualIrreversibilityOracle {
    pub fn new(lib: BlockNum) -> Self {
        Self {
            lib: AtomicU32::new(lib),
        }
    }

    /// Advance the last irreversible block. Never moves backwards.
    pub fn set_last_irreversible(&self, lib: BlockNum) {
        self.lib.fetch_max(lib, Ordering::SeqCst);
    }
}

impl IrreversibilityOracle for ManualIrreversibilityOracle {
    fn last_irreversible_block(&self) -> BlockNum {
        self.lib.load(Ordering::SeqCst)
    }
}

/// RAM usage table fed by the resource accounting layer.
#[derive(Debug, Default)]
pub struct InMemoryResourceUsage {
    ram: RwLock<BTreeMap<AccountName, i64>>,
}

impl InMemoryResourceUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ram_usage(&self, account: AccountName, bytes: i64) {
        self.ram.write().insert(account, bytes);
    }
}

impl ResourceUsageOracle for InMemoryResourceUsage {
    fn ram_usage(&self, account: AccountName) -> i64 {
        self.ram.read().get(&account).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lib_is_monotonic() {
        let oracle = ManualIrreversibilityOracle::new(5);
        oracle.set_last_irreversible(3);
        assert_eq!(oracle.last_irreversible_block(), 5);
        oracle.set_last_irreversible(9);
        assert_eq!(oracle.last_irreversible_block(), 9);
    }

    #[test]
    fn test_unknown_account_uses_nothing() {
        let usage = InMemoryResourceUsage::new();
        let alice = "alice".parse().unwrap();
        assert_eq!(usage.ram_usage(alice), 0);
        usage.set_ram_usage(alice, 4096);
        assert_eq!(usage.ram_usage(alice), 4096);
    }
}
