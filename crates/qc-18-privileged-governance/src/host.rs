//! # Host Function Shim
//!
//! The raw call surface the VM exposes to privileged contracts. Each call is
//! bound to the executing contract (the caller) and the ledger of the block
//! being applied.
//!
//! Return conventions follow the contract ABI: `set_proposed_producers`
//! yields the assigned version or `-1`, the packed getters yield a byte
//! count, and every other mutating call returns a `GovernanceResult` whose
//! error the VM turns into a trap via [`status_code`].

use crate::domain::{PackedRead, ResourceLimits};
use crate::error::GovernanceResult;
use crate::ports::{PrivilegedGovernanceApi, StateLedger};
use shared_types::AccountName;

/// `0` on success, otherwise the error's stable code.
pub fn status_code<T>(result: &GovernanceResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

fn size_of_read(read: GovernanceResult<PackedRead>) -> u32 {
    read.map(|r| u32::try_from(r.required_size()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

pub struct HostFunctions<'a, A: PrivilegedGovernanceApi + ?Sized> {
    api: &'a A,
    ledger: &'a mut dyn StateLedger,
    receiver: AccountName,
}

impl<'a, A: PrivilegedGovernanceApi + ?Sized> HostFunctions<'a, A> {
    /// Bind the host calls of one action executed by `receiver`.
    pub fn new(api: &'a A, ledger: &'a mut dyn StateLedger, receiver: AccountName) -> Self {
        Self {
            api,
            ledger,
            receiver,
        }
    }

    pub fn get_resource_limits(&self, account: AccountName) -> (i64, i64, i64) {
        self.api
            .get_resource_limits(&*self.ledger, account)
            .as_tuple()
    }

    pub fn set_resource_limits(
        &mut self,
        account: AccountName,
        ram_bytes: i64,
        net_weight: i64,
        cpu_weight: i64,
    ) -> GovernanceResult<()> {
        self.api
            .set_resource_limits(
                &mut *self.ledger,
                self.receiver,
                account,
                ResourceLimits::new(ram_bytes, net_weight, cpu_weight),
            )
            .map(|_| ())
    }

    /// Assigned version, or `-1` when the proposal was not accepted.
    pub fn set_proposed_producers(&mut self, data: &[u8]) -> i64 {
        self.api
            .set_proposed_producers(&mut *self.ledger, self.receiver, data)
            .map_or(-1, i64::from)
    }

    pub fn set_active_producers(&mut self, data: &[u8]) -> GovernanceResult<()> {
        self.api
            .set_active_producers(&mut *self.ledger, self.receiver, data)
            .map(|_| ())
    }

    pub fn is_privileged(&self, account: AccountName) -> bool {
        self.api.is_privileged(&*self.ledger, account)
    }

    pub fn set_privileged(&mut self, account: AccountName, is_priv: bool) -> GovernanceResult<()> {
        self.api
            .set_privileged(&mut *self.ledger, self.receiver, account, is_priv)
    }

    pub fn set_blockchain_parameters_packed(&mut self, data: &[u8]) -> GovernanceResult<()> {
        self.api
            .set_blockchain_parameters_packed(&mut *self.ledger, self.receiver, data)
    }

    /// Size of the packed parameters. Writes only when `buffer` is large
    /// enough; an empty buffer is a size probe.
    pub fn get_blockchain_parameters_packed(&self, buffer: &mut [u8]) -> u32 {
        size_of_read(self.api.get_blockchain_parameters_packed(&*self.ledger, buffer))
    }

    pub fn set_upgrade_parameters_packed(&mut self, data: &[u8]) -> GovernanceResult<()> {
        self.api
            .set_upgrade_parameters_packed(&mut *self.ledger, self.receiver, data)
    }

    pub fn get_upgrade_parameters_packed(&self, buffer: &mut [u8]) -> u32 {
        size_of_read(self.api.get_upgrade_parameters_packed(&*self.ledger, buffer))
    }

    pub fn set_name_list_packed(
        &mut self,
        list: i64,
        action: i64,
        data: &[u8],
    ) -> GovernanceResult<()> {
        self.api
            .set_name_list_packed(&mut *self.ledger, self.receiver, list, action, data)
            .map(|_| ())
    }

    pub fn set_guaranteed_minimum_resources(
        &mut self,
        ram: i64,
        cpu: i64,
        net: i64,
    ) -> GovernanceResult<()> {
        self.api
            .set_guaranteed_minimum_resources(&mut *self.ledger, self.receiver, ram, cpu, net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, InMemoryResourceUsage, ManualIrreversibilityOracle};
    use crate::config::GovernanceConfig;
    use crate::domain::{BlockchainParameters, GovernanceState, ProducerAuthority};
    use crate::service::PrivilegedGovernanceService;
    use shared_types::{PackedCodec, PublicKey};
    use std::sync::Arc;

    fn name(s: &str) -> AccountName {
        s.parse().unwrap()
    }

    fn service() -> PrivilegedGovernanceService<ManualIrreversibilityOracle, InMemoryResourceUsage>
    {
        PrivilegedGovernanceService::new(
            GovernanceConfig::default(),
            Arc::new(ManualIrreversibilityOracle::default()),
            Arc::new(InMemoryResourceUsage::new()),
        )
    }

    fn ledger() -> InMemoryLedger {
        let mut genesis = GovernanceState::default();
        genesis.privileges.set_privileged(name("eosio"), true);
        let mut ledger = InMemoryLedger::new(genesis);
        ledger.start_session(1).unwrap();
        ledger
    }

    #[test]
    fn test_proposal_returns_version_or_minus_one() {
        let service = service();
        let mut ledger = ledger();
        let mut host = HostFunctions::new(&service, &mut ledger, name("eosio"));

        let payload = vec![ProducerAuthority::new(name("alice"), PublicKey([1; 32]))]
            .pack()
            .unwrap();
        assert_eq!(host.set_proposed_producers(&payload), 1);
        assert_eq!(host.set_proposed_producers(&[0xFF]), -1);
        // Same list again is a no-op proposal.
        assert_eq!(host.set_proposed_producers(&payload), -1);
    }

    #[test]
    fn test_parameters_probe_then_fill() {
        let service = service();
        let mut ledger = ledger();
        let mut host = HostFunctions::new(&service, &mut ledger, name("eosio"));

        let mut params = BlockchainParameters::default();
        params.max_inline_action_depth = 8;
        let packed = params.pack().unwrap();
        host.set_blockchain_parameters_packed(&packed).unwrap();

        let size = host.get_blockchain_parameters_packed(&mut []) as usize;
        assert_eq!(size, packed.len());

        let mut short = vec![0u8; size - 1];
        assert_eq!(host.get_blockchain_parameters_packed(&mut short) as usize, size);
        assert!(short.iter().all(|b| *b == 0));

        let mut buffer = vec![0u8; size];
        assert_eq!(host.get_blockchain_parameters_packed(&mut buffer) as usize, size);
        assert_eq!(buffer, packed);
    }

    #[test]
    fn test_status_codes() {
        let service = service();
        let mut ledger = ledger();
        let mut host = HostFunctions::new(&service, &mut ledger, name("mallory"));

        let result = host.set_privileged(name("mallory"), true);
        assert_eq!(status_code(&result), 3);
        assert!(!host.is_privileged(name("mallory")));
        assert_eq!(host.get_resource_limits(name("mallory")), (-1, -1, -1));
    }
}
