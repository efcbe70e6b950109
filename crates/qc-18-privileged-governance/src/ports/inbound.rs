//! Driving Ports (API - Inbound)

use crate::domain::{
    BandwidthKind, EffectiveResources, GuaranteedMinimumResources, NameListKind, PackedRead,
    PendingSchedule, ProducerSchedule, ProposedSchedule, ResourceLimits, ScheduleState,
    ScheduleTransition, ShareRatio,
};
use crate::error::GovernanceResult;
use crate::ports::outbound::StateLedger;
use shared_types::{AccountName, BlockNum};

/// Primary Privileged Governance API
///
/// Every operation runs against the ledger handle it is given. Mutating
/// operations take the calling account and are all-or-nothing.
pub trait PrivilegedGovernanceApi: Send + Sync {
    // ---------------------------------------------------------------------
    // Resource limits
    // ---------------------------------------------------------------------

    /// Stored limits, `(-1, -1, -1)` when never set.
    fn get_resource_limits(&self, ledger: &dyn StateLedger, account: AccountName)
        -> ResourceLimits;

    /// Returns whether any limit decreased.
    fn set_resource_limits(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        limits: ResourceLimits,
    ) -> GovernanceResult<bool>;

    /// Stored limits with the guaranteed floor applied.
    fn effective_resources(
        &self,
        ledger: &dyn StateLedger,
        account: AccountName,
    ) -> EffectiveResources;

    fn bandwidth_share(
        &self,
        ledger: &dyn StateLedger,
        account: AccountName,
        kind: BandwidthKind,
    ) -> Option<ShareRatio>;

    // ---------------------------------------------------------------------
    // Producer schedule
    // ---------------------------------------------------------------------

    /// Decode `data` as a producer list and store it as the outstanding
    /// proposal. Returns the assigned version.
    fn set_proposed_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32>;

    /// Install a producer list directly at PENDING. Gated by the configured
    /// override policy.
    fn set_active_producers(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<u32>;

    fn schedule_state(&self, ledger: &dyn StateLedger) -> ScheduleState;

    fn active_schedule(&self, ledger: &dyn StateLedger) -> ProducerSchedule;

    fn pending_schedule(&self, ledger: &dyn StateLedger) -> Option<PendingSchedule>;

    fn proposed_schedule(&self, ledger: &dyn StateLedger) -> Option<ProposedSchedule>;

    // ---------------------------------------------------------------------
    // Privileges
    // ---------------------------------------------------------------------

    fn is_privileged(&self, ledger: &dyn StateLedger, account: AccountName) -> bool;

    fn set_privileged(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        account: AccountName,
        is_priv: bool,
    ) -> GovernanceResult<()>;

    /// Privileged accounts in name order.
    fn privileged_accounts(&self, ledger: &dyn StateLedger) -> Vec<AccountName>;

    // ---------------------------------------------------------------------
    // Parameters
    // ---------------------------------------------------------------------

    fn set_blockchain_parameters_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()>;

    /// Probe/fill read of the packed chain parameters.
    fn get_blockchain_parameters_packed(
        &self,
        ledger: &dyn StateLedger,
        buffer: &mut [u8],
    ) -> GovernanceResult<PackedRead>;

    fn set_upgrade_parameters_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        data: &[u8],
    ) -> GovernanceResult<()>;

    fn get_upgrade_parameters_packed(
        &self,
        ledger: &dyn StateLedger,
        buffer: &mut [u8],
    ) -> GovernanceResult<PackedRead>;

    // ---------------------------------------------------------------------
    // Name lists and guaranteed minimum
    // ---------------------------------------------------------------------

    /// Returns how many memberships changed.
    fn set_name_list_packed(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        list: i64,
        action: i64,
        data: &[u8],
    ) -> GovernanceResult<usize>;

    fn is_listed(&self, ledger: &dyn StateLedger, list: NameListKind, account: AccountName)
        -> bool;

    /// Members of `list` in name order.
    fn name_list(&self, ledger: &dyn StateLedger, list: NameListKind) -> Vec<AccountName>;

    fn set_guaranteed_minimum_resources(
        &self,
        ledger: &mut dyn StateLedger,
        caller: AccountName,
        ram: i64,
        cpu: i64,
        net: i64,
    ) -> GovernanceResult<()>;

    fn guaranteed_minimum_resources(&self, ledger: &dyn StateLedger)
        -> GuaranteedMinimumResources;

    // ---------------------------------------------------------------------
    // Block lifecycle
    // ---------------------------------------------------------------------

    /// Open the undo session for `block_num` (must be head + 1).
    fn begin_block(&self, ledger: &mut dyn StateLedger, block_num: BlockNum)
        -> GovernanceResult<()>;

    /// Run the finality-driven schedule transitions for the head block and
    /// commit the ledger through the last irreversible block.
    fn finalize_block(&self, ledger: &mut dyn StateLedger) -> GovernanceResult<ScheduleTransition>;

    /// Chain reorganization: undo every block above `block_num`.
    /// Returns the number of blocks undone.
    fn pop_blocks_to(&self, ledger: &mut dyn StateLedger, block_num: BlockNum)
        -> GovernanceResult<u32>;
}
