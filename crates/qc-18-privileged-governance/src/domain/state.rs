//! Aggregate governance state held by the ledger layer.

use super::name_list::NameLists;
use super::parameters::{BlockchainParameters, UpgradeParameters};
use super::privilege::PrivilegeRegistry;
use super::resource_limits::ResourceLimitManager;
use super::schedule::{ProducerSchedule, ScheduleSlots};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, BlockNum, CodecError, Hash, PackedCodec};

/// Everything this subsystem persists.
///
/// One value of this type lives in the [`StateLedger`](crate::ports::StateLedger);
/// the service never keeps its own copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceState {
    pub resources: ResourceLimitManager,
    pub privileges: PrivilegeRegistry,
    pub parameters: BlockchainParameters,
    pub upgrade: UpgradeParameters,
    pub name_lists: NameLists,
    pub schedules: ScheduleSlots,
    /// Last block whose finalization step has run.
    pub finalized_through: BlockNum,
}

impl GovernanceState {
    pub fn with_genesis_schedule(schedule: ProducerSchedule) -> Self {
        Self {
            schedules: ScheduleSlots::with_genesis(schedule),
            ..Default::default()
        }
    }

    /// Keccak-256 over the canonical encoding.
    ///
    /// Nodes that applied the same block stream produce the same digest.
    /// Encoding failures are returned, never hashed.
    pub fn state_digest(&self) -> Result<Hash, CodecError> {
        Ok(keccak256(&self.pack()?))
    }
}
