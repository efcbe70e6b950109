//! Outgoing notifications of the Privileged Governance subsystem
//!
//! Events are queued by the service as operations succeed and drained by
//! the node with [`take_events`](crate::PrivilegedGovernanceService::take_events).
//! They are notifications only: a reorg does not retract them, it emits
//! [`GovernanceEvent::BlocksReverted`] instead.

use crate::domain::{GuaranteedMinimumResources, NameListAction, NameListKind, ResourceLimits};
use serde::{Deserialize, Serialize};
use shared_types::{AccountName, BlockNum};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    ResourceLimitsChanged {
        account: AccountName,
        limits: ResourceLimits,
        decreased: bool,
    },
    PrivilegeChanged {
        account: AccountName,
        is_privileged: bool,
    },
    ScheduleProposed {
        version: u32,
        block_num: BlockNum,
        /// Version of the proposal this one replaced.
        replaced: Option<u32>,
    },
    /// Override installed directly at PENDING.
    ScheduleOverridden {
        version: u32,
        block_num: BlockNum,
    },
    SchedulePromoted {
        version: u32,
        block_num: BlockNum,
    },
    ScheduleActivated {
        version: u32,
        block_num: BlockNum,
    },
    BlockchainParametersChanged {
        block_num: BlockNum,
    },
    UpgradeScheduled {
        target_block_num: BlockNum,
    },
    NameListChanged {
        list: NameListKind,
        action: NameListAction,
        changed: usize,
    },
    GuaranteedMinimumChanged {
        minimum: GuaranteedMinimumResources,
    },
    /// Blocks above `to` were undone by a reorganization.
    BlocksReverted {
        from: BlockNum,
        to: BlockNum,
    },
}
