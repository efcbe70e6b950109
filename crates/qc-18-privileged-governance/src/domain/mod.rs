//! Domain module for the Privileged Governance subsystem
//!
//! ## Core Modules
//! - resource_limits: Per-account quotas, totals and the guaranteed floor
//! - schedule: Producer schedule state machine
//! - parameters: Chain configuration and upgrade namespace
//! - privilege: Privileged account registry
//! - name_list: Actor/contract blacklists and resource greylist
//! - state: Aggregate persisted by the ledger

pub mod name_list;
pub mod parameters;
pub mod privilege;
pub mod resource_limits;
pub mod schedule;
pub mod state;

pub use name_list::{check_batch_size, NameListAction, NameListKind, NameLists};
pub use parameters::{fill_packed, BlockchainParameters, PackedRead, UpgradeParameters};
pub use privilege::PrivilegeRegistry;
pub use resource_limits::{
    BandwidthKind, Capacity, EffectiveResources, GuaranteedMinimumResources,
    ResourceLimitManager, ResourceLimits, ResourceTotals, ShareRatio, UNLIMITED,
};
pub use schedule::{
    validate_producers, BlockSigningAuthority, KeyWeight, OverrideOutcome, PendingSchedule,
    ProducerAuthority, ProducerSchedule, ProposalOutcome, ProposedSchedule, ScheduleSlots,
    ScheduleState, ScheduleTransition, VersionStatus,
};
pub use state::GovernanceState;
