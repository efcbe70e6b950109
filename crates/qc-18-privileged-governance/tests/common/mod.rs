//! Shared harness for the integration tests: a single chain driven block by
//! block through the public API.

#![allow(dead_code)]

use qc_18_privileged_governance::prelude::*;
use qc_18_privileged_governance::ScheduleTransition;
use shared_types::BlockNum;
use std::sync::Arc;

pub type Service = PrivilegedGovernanceService<ManualIrreversibilityOracle, InMemoryResourceUsage>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn name(s: &str) -> AccountName {
    s.parse().unwrap()
}

pub fn eosio() -> AccountName {
    name("eosio")
}

pub fn producers(names: &[&str]) -> Vec<ProducerAuthority> {
    names
        .iter()
        .map(|n| {
            let account = name(n);
            let mut key = [0u8; 32];
            key[..8].copy_from_slice(&account.as_u64().to_le_bytes());
            ProducerAuthority::new(account, PublicKey(key))
        })
        .collect()
}

pub fn schedule_payload(names: &[&str]) -> Vec<u8> {
    producers(names).pack().unwrap()
}

pub struct Chain {
    pub service: Service,
    pub finality: Arc<ManualIrreversibilityOracle>,
    pub usage: Arc<InMemoryResourceUsage>,
    pub ledger: InMemoryLedger,
}

impl Chain {
    pub fn new() -> Self {
        Self::with_config(GovernanceConfig::default())
    }

    pub fn with_config(config: GovernanceConfig) -> Self {
        init_tracing();
        let genesis = GenesisGovernance::single_producer(producers(&["eosio"]).remove(0));
        let state = genesis.build_state(config.max_producers).unwrap();

        let finality = Arc::new(ManualIrreversibilityOracle::default());
        let usage = Arc::new(InMemoryResourceUsage::new());
        let service =
            PrivilegedGovernanceService::new(config, Arc::clone(&finality), Arc::clone(&usage));
        Self {
            service,
            finality,
            usage,
            ledger: InMemoryLedger::new(state),
        }
    }

    pub fn head(&self) -> BlockNum {
        self.ledger.head_revision()
    }

    /// Open the next block.
    pub fn begin(&mut self) -> BlockNum {
        let next = self.head() + 1;
        self.service.begin_block(&mut self.ledger, next).unwrap();
        next
    }

    /// Finalize the head block with the given LIB.
    pub fn finalize_with_lib(&mut self, lib: BlockNum) -> ScheduleTransition {
        self.finality.set_last_irreversible(lib);
        self.service.finalize_block(&mut self.ledger).unwrap()
    }

    /// An empty block, finalized with the given LIB.
    pub fn empty_block(&mut self, lib: BlockNum) -> ScheduleTransition {
        self.begin();
        self.finalize_with_lib(lib)
    }

    pub fn propose(&mut self, names: &[&str]) -> u32 {
        self.service
            .set_proposed_producers(&mut self.ledger, eosio(), &schedule_payload(names))
            .unwrap()
    }

    pub fn active_version(&self) -> u32 {
        self.service.active_schedule(&self.ledger).version
    }
}
