//! Privileged Governance Service - Core business logic
//!
//! Wires the domain components to the ledger and the finality tracker.
//! The service holds no governance state of its own: every call reads and
//! writes through the [`StateLedger`] handle it is given.

use crate::config::GovernanceConfig;
use crate::domain::{
    check_batch_size, fill_packed, validate_producers, BandwidthKind, BlockchainParameters,
    EffectiveResources, GuaranteedMinimumResources, NameListAction, NameListKind, PackedRead,
    PendingSchedule, ProducerAuthority, ProducerSchedule, ProposedSchedule, ResourceLimits,
    ScheduleState, ScheduleTransition, ShareRatio, UpgradeParameters,
};
use crate::error::{GovernanceError, GovernanceResult};
use crate::events::GovernanceEvent;
use crate::metrics;
use crate::ports::inbound::PrivilegedGovernanceApi;
use crate::ports::outbound::{IrreversibilityOracle, ResourceUsageOracle, StateLedger};
use parking_lot::Mutex;
use shared_types::{AccountName, BlockNum, PackedCodec};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Notifications awaiting the node, capped at `max_queued_events`.
#[derive(Default)]
struct EventQueue {
    events: VecDeque<GovernanceEvent>,
    /// Oldest events discarded since the last drain.
    dropped: u64,
}

/// Privileged Governance Service implementation
///
/// Events accumulate until [`take_events`](Self::take_events) drains them.
/// A node that never drains loses the oldest ones once the queue is full.
pub struct PrivilegedGovernanceService<F, U>
where
    F: IrreversibilityOracle,
    U: ResourceUsageOracle,
{
    config: GovernanceConfig,
    finality: Arc<F>,
    usage: Arc<U>,
    events: Mutex<EventQueue>,
}

impl<F, U> PrivilegedGovernanceService<F, U>
where
    F: IrreversibilityOracle,
    U: ResourceUsageOracle,
{
    /// Create new governance service
    pub fn new(config: GovernanceConfig, finality: Arc<F>, usage: Arc<U>) -> Self {
        Self {
            config,
            finality,
            usage,
            events: Mutex::new(EventQueue::default()),
        }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Drain queued notifications, oldest first.
    pub fn take_events(&self) -> Vec<GovernanceEvent> {
        let mut queue = self.events.lock();
        if queue.dropped > 0 {
            warn!(
                "[qc-18] {} governance events were dropped before this drain",
                queue.dropped
            );
            queue.dropped = 0;
        }
        queue.events.drain(..).collect()
    }

    fn emit(&self, event: GovernanceEvent) {
        let mut queue = self.events.lock();
        if queue.events.len() >= self.config.max_queued_events {
            if queue.dropped == 0 {
                warn!(
                    "[qc-18] Event queue full ({} undrained), dropping oldest",
                    queue.events.len()
                );
            }
            queue.events.pop_front();
            queue.dropped += 1;
        }
        queue.events.push_back(event);
    }

    /// Log and count a rejected call, then hand the error back.
    fn rejected(&self, operation: &'static str, err: GovernanceError) -> GovernanceError {
        warn!("[qc-18] {} rejected: {}", operation, err);
        metrics::record_rejection(operation, err.kind().as_str());
        err
    }

    fn authorize(
        &self,
        ledger: &dyn StateLedger,
        caller: AccountName,
        operation: &'static str,
    ) -> GovernanceResult<()> {
        if self.config.enforce_caller_privilege && !ledger.state().privileges.is_privileged(caller)
        {
            return Err(GovernanceError::NotAuthorized { caller, operation });
        }
        Ok(())
    }

    fn decode<T: PackedCodec>(&self, payload: &'static str, data: &[u8]) -> GovernanceResult<T> {
        T::unpack_with_limit(data, self.config.max_payload_bytes)
            .map_err(GovernanceError::malformed(payload))
    }

    fn read_packed<T: PackedCodec>(
        payload: &'static str,
        value: &T,
        buffer: &mut [u8],
    ) -> GovernanceResult<PackedRead> {
        let packed = value.pack().map_err(GovernanceError::malformed(payload))?;
        Ok(fill_packed(&packed, buffer))
    }

    fn decode_producers(&self, data: &[u8]) -> GovernanceResult<Vec<ProducerAuthority>> {
        let producers: Vec<ProducerAuthority> = self.decode("producer schedule", data)?;
        validate_producers(&producers, self.config.max_producers)?;
        Ok(producers)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    fn apply_resource_limits(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        limits: ResourceLimits,
    ) -> GovernanceResult<bool> {
        self.authorize(&*ledger, caller, "set_resource_limits")?;
        let ram_usage = self.usage.ram_usage(account);
        let decreased = ledger
            .state_mut()?
            .resources
            .set(account, limits, ram_usage)?;

        debug!(
            "[qc-18] Resource limits for {} set to {:?} (decreased: {})",
            account,
            limits.as_tuple(),
            decreased
        );
        self.emit(GovernanceEvent::ResourceLimitsChanged {
            account,
            limits,
            decreased,
        });
        Ok(decreased)
    }

    fn propose_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32> {
        self.authorize(&*ledger, caller, "set_proposed_producers")?;
        let producers = self.decode_producers(data)?;
        let head = ledger.head_revision();
        let outcome = ledger.state_mut()?.schedules.propose(producers, head)?;

        match outcome.replaced {
            Some(replaced) => info!(
                "[qc-18] Schedule v{} proposed in block {}, replacing unpromoted v{}",
                outcome.version, head, replaced
            ),
            None => info!(
                "[qc-18] Schedule v{} proposed in block {}",
                outcome.version, head
            ),
        }
        metrics::record_schedule_proposed();
        self.emit(GovernanceEvent::ScheduleProposed {
            version: outcome.version,
            block_num: head,
            replaced: outcome.replaced,
        });
        Ok(outcome.version)
    }

    fn override_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32> {
        const OPERATION: &str = "set_active_producers";
        self.authorize(&*ledger, caller, OPERATION)?;
        let head = ledger.head_revision();
        if !self.config.active_override.allows(head) {
            return Err(GovernanceError::NotAuthorized {
                caller,
                operation: OPERATION,
            });
        }
        let producers = self.decode_producers(data)?;
        let outcome = ledger
            .state_mut()?
            .schedules
            .install_pending(producers, head)?;

        warn!(
            "[qc-18] Schedule v{} installed directly as pending in block {} by {}",
            outcome.version, head, caller
        );
        if let Some(renumbered) = outcome.renumbered_proposal {
            warn!(
                "[qc-18] Outstanding proposal renumbered to v{} behind override",
                renumbered
            );
        }
        self.emit(GovernanceEvent::ScheduleOverridden {
            version: outcome.version,
            block_num: head,
        });
        Ok(outcome.version)
    }

    fn apply_privilege(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        is_priv: bool,
    ) -> GovernanceResult<()> {
        self.authorize(&*ledger, caller, "set_privileged")?;
        if ledger
            .state_mut()?
            .privileges
            .set_privileged(account, is_priv)
        {
            info!("[qc-18] Privilege of {} set to {}", account, is_priv);
            self.emit(GovernanceEvent::PrivilegeChanged {
                account,
                is_privileged: is_priv,
            });
        }
        Ok(())
    }

    fn apply_blockchain_parameters(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()> {
        self.authorize(&*ledger, caller, "set_blockchain_parameters_packed")?;
        let params: BlockchainParameters = self.decode("blockchain parameters", data)?;
        params.validate()?;
        let head = ledger.head_revision();
        ledger.state_mut()?.parameters = params;

        info!("[qc-18] Blockchain parameters replaced in block {}", head);
        self.emit(GovernanceEvent::BlockchainParametersChanged { block_num: head });
        Ok(())
    }

    fn apply_upgrade_parameters(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()> {
        self.authorize(&*ledger, caller, "set_upgrade_parameters_packed")?;
        let params: UpgradeParameters = self.decode("upgrade parameters", data)?;
        params.validate(ledger.head_revision(), self.config.min_upgrade_lead_blocks)?;
        ledger.state_mut()?.upgrade = params;

        info!(
            "[qc-18] Protocol upgrade scheduled at block {}",
            params.target_block_num
        );
        self.emit(GovernanceEvent::UpgradeScheduled {
            target_block_num: params.target_block_num,
        });
        Ok(())
    }

    fn apply_name_list(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        list: i64,
        action: i64,
        data: &[u8],
    ) -> GovernanceResult<usize> {
        self.authorize(&*ledger, caller, "set_name_list_packed")?;
        let list = NameListKind::try_from(list)?;
        let action = NameListAction::try_from(action)?;
        let members: Vec<AccountName> = self.decode("name list", data)?;
        check_batch_size(&members, self.config.max_name_list_batch)?;
        let changed = ledger.state_mut()?.name_lists.apply(list, action, &members);

        debug!(
            "[qc-18] {:?} on {}: {} of {} members changed",
            action,
            list,
            changed,
            members.len()
        );
        self.emit(GovernanceEvent::NameListChanged {
            list,
            action,
            changed,
        });
        Ok(changed)
    }

    fn apply_guaranteed_minimum(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        minimum: GuaranteedMinimumResources,
    ) -> GovernanceResult<()> {
        self.authorize(&*ledger, caller, "set_guaranteed_minimum_resources")?;
        ledger
            .state_mut()?
            .resources
            .set_guaranteed_minimum(minimum)?;

        info!(
            "[qc-18] Guaranteed minimum set to ram={} cpu={} net={}",
            minimum.ram, minimum.cpu, minimum.net
        );
        self.emit(GovernanceEvent::GuaranteedMinimumChanged { minimum });
        Ok(())
    }

    // =========================================================================
    // BLOCK LIFECYCLE
    // =========================================================================

    fn finalize(&self, ledger: &mut dyn StateLedger) -> GovernanceResult<ScheduleTransition> {
        let head = ledger.head_revision();
        let lib = self.finality.last_irreversible_block().min(head);

        // Transitions write into the head session, so they run before the
        // commit that may close it.
        let transition = if ledger.state().finalized_through < head {
            let state = ledger.state_mut()?;
            let transition = state.schedules.on_block_finalized(head, lib);
            state.finalized_through = head;
            transition
        } else {
            debug!("[qc-18] Block {} already finalized", head);
            ScheduleTransition::default()
        };
        ledger.commit(lib)?;

        if let Some(version) = transition.activated {
            info!(
                "[qc-18] Schedule v{} is now active (block {}, lib {})",
                version, head, lib
            );
            metrics::record_schedule_activated(version);
            self.emit(GovernanceEvent::ScheduleActivated {
                version,
                block_num: head,
            });
        }
        if let Some(version) = transition.promoted {
            info!(
                "[qc-18] Schedule v{} promoted to pending (block {}, lib {})",
                version, head, lib
            );
            self.emit(GovernanceEvent::SchedulePromoted {
                version,
                block_num: head,
            });
        }
        Ok(transition)
    }

    fn revert(&self, ledger: &mut dyn StateLedger, block_num: BlockNum) -> GovernanceResult<u32> {
        let head = ledger.head_revision();
        let undone = ledger.undo_to(block_num)?;
        if undone > 0 {
            warn!(
                "[qc-18] Reorg: undid {} blocks ({} -> {})",
                undone, head, block_num
            );
            metrics::record_blocks_reverted(undone);
            self.emit(GovernanceEvent::BlocksReverted {
                from: head,
                to: block_num,
            });
        }
        Ok(undone)
    }
}

impl<F, U> PrivilegedGovernanceApi for PrivilegedGovernanceService<F, U>
where
    F: IrreversibilityOracle,
    U: ResourceUsageOracle,
{
    fn get_resource_limits(
        &self,
        ledger: &dyn StateLedger,
        account: AccountName,
    ) -> ResourceLimits {
        ledger.state().resources.get(account)
    }

    fn set_resource_limits(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        limits: ResourceLimits,
    ) -> GovernanceResult<bool> {
        self.apply_resource_limits(ledger, caller, account, limits)
            .map_err(|e| self.rejected("set_resource_limits", e))
    }

    fn effective_resources(
        &self,
        ledger: &dyn StateLedger,
        account: AccountName,
    ) -> EffectiveResources {
        ledger.state().resources.effective(account)
    }

    fn bandwidth_share(
        &self,
        ledger: &dyn StateLedger,
        account: AccountName,
        kind: BandwidthKind,
    ) -> Option<ShareRatio> {
        ledger.state().resources.bandwidth_share(account, kind)
    }

    fn set_proposed_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32> {
        self.propose_producers(ledger, caller, data)
            .map_err(|e| self.rejected("set_proposed_producers", e))
    }

    fn set_active_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32> {
        self.override_producers(ledger, caller, data)
            .map_err(|e| self.rejected("set_active_producers", e))
    }

    fn schedule_state(&self, ledger: &dyn StateLedger) -> ScheduleState {
        ledger.state().schedules.state()
    }

    fn active_schedule(&self, ledger: &dyn StateLedger) -> ProducerSchedule {
        ledger.state().schedules.active().clone()
    }

    fn pending_schedule(&self, ledger: &dyn StateLedger) -> Option<PendingSchedule> {
        ledger.state().schedules.pending().cloned()
    }

    fn proposed_schedule(&self, ledger: &dyn StateLedger) -> Option<ProposedSchedule> {
        ledger.state().schedules.proposed().cloned()
    }

    fn is_privileged(&self, ledger: &dyn StateLedger, account: AccountName) -> bool {
        ledger.state().privileges.is_privileged(account)
    }

    fn set_privileged(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        is_priv: bool,
    ) -> GovernanceResult<()> {
        self.apply_privilege(ledger, caller, account, is_priv)
            .map_err(|e| self.rejected("set_privileged", e))
    }

    fn privileged_accounts(&self, ledger: &dyn StateLedger) -> Vec<AccountName> {
        ledger.state().privileges.accounts().copied().collect()
    }

    fn set_blockchain_parameters_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()> {
        self.apply_blockchain_parameters(ledger, caller, data)
            .map_err(|e| self.rejected("set_blockchain_parameters_packed", e))
    }

    fn get_blockchain_parameters_packed(
        &self,
        ledger: &dyn StateLedger,
        buffer: &mut [u8],
    ) -> GovernanceResult<PackedRead> {
        Self::read_packed("blockchain parameters", &ledger.state().parameters, buffer)
    }

    fn set_upgrade_parameters_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()> {
        self.apply_upgrade_parameters(ledger, caller, data)
            .map_err(|e| self.rejected("set_upgrade_parameters_packed", e))
    }

    fn get_upgrade_parameters_packed(
        &self,
        ledger: &dyn StateLedger,
        buffer: &mut [u8],
    ) -> GovernanceResult<PackedRead> {
        Self::read_packed("upgrade parameters", &ledger.state().upgrade, buffer)
    }

    fn set_name_list_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        list: i64,
        action: i64,
        data: &[u8],
    ) -> GovernanceResult<usize> {
        self.apply_name_list(ledger, caller, list, action, data)
            .map_err(|e| self.rejected("set_name_list_packed", e))
    }

    fn is_listed(
        &self,
        ledger: &dyn StateLedger,
        list: NameListKind,
        account: AccountName,
    ) -> bool {
        ledger.state().name_lists.contains(list, account)
    }

    fn name_list(&self, ledger: &dyn StateLedger, list: NameListKind) -> Vec<AccountName> {
        ledger.state().name_lists.list(list).iter().copied().collect()
    }

    fn set_guaranteed_minimum_resources(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        ram: i64,
        cpu: i64,
        net: i64,
    ) -> GovernanceResult<()> {
        let minimum = GuaranteedMinimumResources::new(ram, cpu, net);
        self.apply_guaranteed_minimum(ledger, caller, minimum)
            .map_err(|e| self.rejected("set_guaranteed_minimum_resources", e))
    }

    fn guaranteed_minimum_resources(&self, ledger: &dyn StateLedger) -> GuaranteedMinimumResources {
        ledger.state().resources.guaranteed_minimum()
    }

    fn begin_block(
        &self,
        ledger: &mut dyn StateLedger,
        block_num: BlockNum,
    ) -> GovernanceResult<()> {
        ledger
            .start_session(block_num)
            .map_err(|e| self.rejected("begin_block", e.into()))?;
        debug!("[qc-18] Session opened for block {}", block_num);
        Ok(())
    }

    fn finalize_block(&self, ledger: &mut dyn StateLedger) -> GovernanceResult<ScheduleTransition> {
        self.finalize(ledger)
            .map_err(|e| self.rejected("finalize_block", e))
    }

    fn pop_blocks_to(
        &self,
        ledger: &mut dyn StateLedger,
        block_num: BlockNum,
    ) -> GovernanceResult<u32> {
        self.revert(ledger, block_num)
            .map_err(|e| self.rejected("pop_blocks_to", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, InMemoryResourceUsage, ManualIrreversibilityOracle};
    use crate::config::ActiveOverridePolicy;
    use crate::domain::GovernanceState;
    use crate::error::ErrorKind;
    use shared_types::PublicKey;

    type TestService =
        PrivilegedGovernanceService<ManualIrreversibilityOracle, InMemoryResourceUsage>;

    fn name(s: &str) -> AccountName {
        s.parse().unwrap()
    }

    fn producers(names: &[&str]) -> Vec<ProducerAuthority> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ProducerAuthority::new(name(n), PublicKey([i as u8 + 1; 32])))
            .collect()
    }

    fn setup(
        config: GovernanceConfig,
    ) -> (TestService, Arc<ManualIrreversibilityOracle>, InMemoryLedger) {
        let oracle = Arc::new(ManualIrreversibilityOracle::default());
        let usage = Arc::new(InMemoryResourceUsage::new());
        let service = PrivilegedGovernanceService::new(config, Arc::clone(&oracle), usage);

        let mut genesis = GovernanceState::with_genesis_schedule(ProducerSchedule {
            version: 0,
            producers: producers(&["eosio"]),
        });
        genesis.privileges.set_privileged(name("eosio"), true);
        (service, oracle, InMemoryLedger::new(genesis))
    }

    #[test]
    fn test_unprivileged_caller_rejected_before_state() {
        let (service, _, mut ledger) = setup(GovernanceConfig::default());
        service.begin_block(&mut ledger, 1).unwrap();
        let before = ledger.state().clone();

        let err = service
            .set_privileged(&mut ledger, name("mallory"), name("mallory"), true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn test_malformed_proposal_leaves_state() {
        let (service, _, mut ledger) = setup(GovernanceConfig::default());
        service.begin_block(&mut ledger, 1).unwrap();

        let mut payload = producers(&["alice"]).pack().unwrap();
        payload.pop();
        let err = service
            .set_proposed_producers(&mut ledger, name("eosio"), &payload)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(service.schedule_state(&ledger), ScheduleState::None);
    }

    #[test]
    fn test_active_override_gate() {
        let (service, _, mut ledger) = setup(
            GovernanceConfig::default()
                .with_active_override(ActiveOverridePolicy::Bootstrap { until_block: 1 }),
        );
        let payload = producers(&["alice"]).pack().unwrap();

        service.begin_block(&mut ledger, 1).unwrap();
        assert_eq!(
            service
                .set_active_producers(&mut ledger, name("eosio"), &payload)
                .unwrap(),
            1
        );
        service.finalize_block(&mut ledger).unwrap();

        service.begin_block(&mut ledger, 2).unwrap();
        let other = producers(&["bob"]).pack().unwrap();
        let err = service
            .set_active_producers(&mut ledger, name("eosio"), &other)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    }

    #[test]
    fn test_finalize_twice_is_noop() {
        let (service, oracle, mut ledger) = setup(GovernanceConfig::default());
        let payload = producers(&["alice"]).pack().unwrap();

        service.begin_block(&mut ledger, 1).unwrap();
        service
            .set_proposed_producers(&mut ledger, name("eosio"), &payload)
            .unwrap();
        oracle.set_last_irreversible(1);

        let first = service.finalize_block(&mut ledger).unwrap();
        assert_eq!(first.promoted, Some(1));
        let second = service.finalize_block(&mut ledger).unwrap();
        assert!(second.is_empty());
        assert_eq!(service.pending_schedule(&ledger).unwrap().promoted_in_block, 1);
    }

    #[test]
    fn test_events_queued_in_order() {
        let (service, _, mut ledger) = setup(GovernanceConfig::default());
        service.begin_block(&mut ledger, 1).unwrap();
        service
            .set_privileged(&mut ledger, name("eosio"), name("alice"), true)
            .unwrap();
        // Redundant set emits nothing.
        service
            .set_privileged(&mut ledger, name("eosio"), name("alice"), true)
            .unwrap();
        service
            .set_guaranteed_minimum_resources(&mut ledger, name("eosio"), 1, 2, 3)
            .unwrap();

        let events = service.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GovernanceEvent::PrivilegeChanged { .. }));
        assert!(service.take_events().is_empty());
    }

    #[test]
    fn test_undrained_events_keep_newest() {
        let (service, _, mut ledger) = setup(GovernanceConfig::default().with_max_queued_events(2));
        service.begin_block(&mut ledger, 1).unwrap();
        for ram in 1..=5 {
            service
                .set_guaranteed_minimum_resources(&mut ledger, name("eosio"), ram, 0, 0)
                .unwrap();
        }

        let rams: Vec<i64> = service
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                GovernanceEvent::GuaranteedMinimumChanged { minimum } => Some(minimum.ram),
                _ => None,
            })
            .collect();
        assert_eq!(rams, vec![4, 5]);

        // Draining resets the queue to its full capacity.
        service
            .set_privileged(&mut ledger, name("eosio"), name("alice"), true)
            .unwrap();
        assert_eq!(service.take_events().len(), 1);
    }

    #[test]
    fn test_writes_outside_block_fail() {
        let (service, _, mut ledger) = setup(GovernanceConfig::default());
        let err = service
            .set_guaranteed_minimum_resources(&mut ledger, name("eosio"), 1, 1, 1)
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Ledger(_)));
    }

    #[test]
    fn test_ram_limit_checked_against_usage() {
        let oracle = Arc::new(ManualIrreversibilityOracle::default());
        let usage = Arc::new(InMemoryResourceUsage::new());
        usage.set_ram_usage(name("alice"), 8192);
        let service = PrivilegedGovernanceService::new(
            GovernanceConfig::default().with_caller_privilege_check(false),
            oracle,
            Arc::clone(&usage),
        );
        let mut ledger = InMemoryLedger::default();
        service.begin_block(&mut ledger, 1).unwrap();

        let err = service
            .set_resource_limits(
                &mut ledger,
                name("eosio"),
                name("alice"),
                ResourceLimits::new(4096, 1, 1),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(service
            .set_resource_limits(
                &mut ledger,
                name("eosio"),
                name("alice"),
                ResourceLimits::new(8192, 1, 1),
            )
            .is_ok());
    }
}
