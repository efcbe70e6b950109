//! # Producer Schedule State Machine
//!
//! Three slots exist at the same time:
//!
//! ```text
//!   set_proposed_producers          proposing block irreversible
//! ─────────────────────────→ [PROPOSED] ───────────────────────────→ [PENDING]
//!   (replaces PROPOSED only)                (and no PENDING yet)        │
//!                                                                       │ promoting block
//!   set_active_producers (gated override) ──────────────────────────→   │ irreversible
//!                                                                       ↓
//!                                                                   [ACTIVE]
//! ```
//!
//! ## Invariants
//!
//! - Active versions strictly increase.
//! - At most one proposal is outstanding; it is replaced only while still
//!   PROPOSED. A PENDING schedule is never replaced and never goes back.
//! - Every slot holds a schedule that passed [`validate_producers`].
//! - Transitions happen only in [`ScheduleSlots::on_block_finalized`], which
//!   the block driver calls once per block after all contract calls.

use crate::error::{GovernanceError, GovernanceResult};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, AccountName, BlockNum, CodecError, Hash, PackedCodec, PublicKey};
use std::collections::BTreeSet;

/// A weighted signing key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub key: PublicKey,
    pub weight: u16,
}

/// Threshold authority a producer signs blocks with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSigningAuthority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
}

impl BlockSigningAuthority {
    /// Single key, threshold 1.
    pub fn single(key: PublicKey) -> Self {
        Self {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
        }
    }

    /// Satisfiable, no duplicate or zero-weight keys.
    pub fn validate(&self) -> Result<(), String> {
        if self.threshold == 0 {
            return Err("threshold must be positive".into());
        }
        if self.keys.is_empty() {
            return Err("authority has no keys".into());
        }
        let mut seen = BTreeSet::new();
        let mut total_weight = 0u64;
        for kw in &self.keys {
            if kw.weight == 0 {
                return Err(format!("key {} has zero weight", kw.key));
            }
            if !seen.insert(kw.key) {
                return Err(format!("duplicate key {}", kw.key));
            }
            total_weight += u64::from(kw.weight);
        }
        if total_weight < u64::from(self.threshold) {
            return Err(format!(
                "total weight {total_weight} cannot reach threshold {}",
                self.threshold
            ));
        }
        Ok(())
    }
}

/// One entry of a schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerAuthority {
    pub producer_name: AccountName,
    pub authority: BlockSigningAuthority,
}

impl ProducerAuthority {
    pub fn new(producer_name: AccountName, key: PublicKey) -> Self {
        Self {
            producer_name,
            authority: BlockSigningAuthority::single(key),
        }
    }
}

/// Ordered producer set with its version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerSchedule {
    pub version: u32,
    pub producers: Vec<ProducerAuthority>,
}

impl ProducerSchedule {
    /// Keccak-256 over the packed schedule.
    pub fn digest(&self) -> Result<Hash, CodecError> {
        Ok(keccak256(&self.pack()?))
    }

    pub fn producer_names(&self) -> impl Iterator<Item = AccountName> + '_ {
        self.producers.iter().map(|p| p.producer_name)
    }
}

/// Check an ordered producer list before it may enter any slot.
pub fn validate_producers(
    producers: &[ProducerAuthority],
    max_producers: usize,
) -> GovernanceResult<()> {
    if producers.is_empty() {
        return Err(GovernanceError::invalid(
            "producers",
            "schedule must contain at least one producer",
        ));
    }
    if producers.len() > max_producers {
        return Err(GovernanceError::invalid(
            "producers",
            format!(
                "{} producers exceeds the maximum of {max_producers}",
                producers.len()
            ),
        ));
    }
    let mut seen = BTreeSet::new();
    for producer in producers {
        if !seen.insert(producer.producer_name) {
            return Err(GovernanceError::invalid(
                "producers",
                format!("duplicate producer {}", producer.producer_name),
            ));
        }
        producer.authority.validate().map_err(|reason| {
            GovernanceError::invalid(
                "producers",
                format!("producer {}: {reason}", producer.producer_name),
            )
        })?;
    }
    Ok(())
}

/// A proposal and the block that carried it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedSchedule {
    pub schedule: ProducerSchedule,
    pub proposed_in_block: BlockNum,
}

/// A promoted schedule and the block that promoted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSchedule {
    pub schedule: ProducerSchedule,
    pub promoted_in_block: BlockNum,
}

/// Summary state of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleState {
    /// Nothing was ever proposed; only the genesis schedule exists.
    None,
    /// A proposal is outstanding.
    Proposed,
    /// A schedule is pending and nothing is proposed.
    Pending,
    /// Only the active schedule exists.
    Active,
}

/// Where a given version currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionStatus {
    Proposed,
    Pending,
    Active,
    /// Older than the active schedule, or never seen.
    NotPresent,
}

/// Result of a successful proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposalOutcome {
    pub version: u32,
    /// Version of the proposal this one replaced, if any.
    pub replaced: Option<u32>,
}

/// Result of installing an override.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideOutcome {
    pub version: u32,
    /// New version given to a queued proposal, if there was one.
    pub renumbered_proposal: Option<u32>,
}

/// Transitions performed by one finalization step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleTransition {
    /// Version that moved PROPOSED → PENDING.
    pub promoted: Option<u32>,
    /// Version that moved PENDING → ACTIVE.
    pub activated: Option<u32>,
}

impl ScheduleTransition {
    pub fn is_empty(&self) -> bool {
        self.promoted.is_none() && self.activated.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlots {
    active: ProducerSchedule,
    pending: Option<PendingSchedule>,
    proposed: Option<ProposedSchedule>,
    ever_proposed: bool,
}

impl ScheduleSlots {
    /// Start from a genesis schedule (directly active).
    pub fn with_genesis(active: ProducerSchedule) -> Self {
        Self {
            active,
            ..Default::default()
        }
    }

    pub fn active(&self) -> &ProducerSchedule {
        &self.active
    }

    pub fn pending(&self) -> Option<&PendingSchedule> {
        self.pending.as_ref()
    }

    pub fn proposed(&self) -> Option<&ProposedSchedule> {
        self.proposed.as_ref()
    }

    pub fn state(&self) -> ScheduleState {
        if self.proposed.is_some() {
            ScheduleState::Proposed
        } else if self.pending.is_some() {
            ScheduleState::Pending
        } else if self.ever_proposed || self.active.version > 0 {
            ScheduleState::Active
        } else {
            ScheduleState::None
        }
    }

    pub fn status_of(&self, version: u32) -> VersionStatus {
        if self.proposed.as_ref().map(|p| p.schedule.version) == Some(version) {
            VersionStatus::Proposed
        } else if self.pending.as_ref().map(|p| p.schedule.version) == Some(version) {
            VersionStatus::Pending
        } else if self.active.version == version {
            VersionStatus::Active
        } else {
            VersionStatus::NotPresent
        }
    }

    /// The schedule that will be enforced once everything in flight lands.
    fn newest_committed(&self) -> &ProducerSchedule {
        self.pending
            .as_ref()
            .map(|p| &p.schedule)
            .unwrap_or(&self.active)
    }

    /// One above every version handed out so far, so a replaced proposal's
    /// number is never reused.
    fn next_version(&self) -> GovernanceResult<u32> {
        let newest = [
            Some(self.active.version),
            self.pending.as_ref().map(|p| p.schedule.version),
            self.proposed.as_ref().map(|p| p.schedule.version),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(self.active.version);
        newest
            .checked_add(1)
            .ok_or_else(|| GovernanceError::conflict("producer schedule version space exhausted"))
    }

    /// Store a validated producer list as the outstanding proposal.
    ///
    /// Replaces any earlier proposal that is still PROPOSED. Rejects a list
    /// identical to the newest pending-or-active schedule, or to the proposal
    /// already outstanding.
    pub fn propose(
        &mut self,
        producers: Vec<ProducerAuthority>,
        block_num: BlockNum,
    ) -> GovernanceResult<ProposalOutcome> {
        if self.newest_committed().producers == producers {
            return Err(GovernanceError::conflict(
                "proposed producers match the current schedule",
            ));
        }
        if let Some(outstanding) = &self.proposed {
            if outstanding.schedule.producers == producers {
                return Err(GovernanceError::conflict(
                    "identical proposal is already outstanding",
                ));
            }
        }

        let version = self.next_version()?;
        let replaced = self
            .proposed
            .replace(ProposedSchedule {
                schedule: ProducerSchedule { version, producers },
                proposed_in_block: block_num,
            })
            .map(|old| old.schedule.version);
        self.ever_proposed = true;
        Ok(ProposalOutcome { version, replaced })
    }

    /// Install a producer list directly as PENDING, bypassing PROPOSED.
    ///
    /// A queued proposal stays PROPOSED and is renumbered above the override.
    pub fn install_pending(
        &mut self,
        producers: Vec<ProducerAuthority>,
        block_num: BlockNum,
    ) -> GovernanceResult<OverrideOutcome> {
        if let Some(pending) = &self.pending {
            return Err(GovernanceError::conflict(format!(
                "schedule v{} is already pending",
                pending.schedule.version
            )));
        }

        let version = self.next_version()?;
        let renumbered_proposal = match self.proposed.as_mut() {
            Some(queued) => {
                let bumped = version.checked_add(1).ok_or_else(|| {
                    GovernanceError::conflict("producer schedule version space exhausted")
                })?;
                queued.schedule.version = bumped;
                Some(bumped)
            }
            None => None,
        };

        self.pending = Some(PendingSchedule {
            schedule: ProducerSchedule { version, producers },
            promoted_in_block: block_num,
        });
        Ok(OverrideOutcome {
            version,
            renumbered_proposal,
        })
    }

    /// The finality-driven step. `head` is the block being finalized, `lib`
    /// the last irreversible block.
    ///
    /// PENDING → ACTIVE is evaluated before PROPOSED → PENDING, so a schedule
    /// promoted here is activated no earlier than the next call.
    pub fn on_block_finalized(&mut self, head: BlockNum, lib: BlockNum) -> ScheduleTransition {
        let mut transition = ScheduleTransition::default();

        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.promoted_in_block <= lib)
        {
            if let Some(pending) = self.pending.take() {
                debug_assert!(pending.schedule.version > self.active.version);
                transition.activated = Some(pending.schedule.version);
                self.active = pending.schedule;
            }
        }

        if self.pending.is_none()
            && self
                .proposed
                .as_ref()
                .is_some_and(|p| p.proposed_in_block <= lib)
        {
            if let Some(proposed) = self.proposed.take() {
                transition.promoted = Some(proposed.schedule.version);
                self.pending = Some(PendingSchedule {
                    schedule: proposed.schedule,
                    promoted_in_block: head,
                });
            }
        }

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producers(names: &[&str]) -> Vec<ProducerAuthority> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| ProducerAuthority::new(n.parse().unwrap(), PublicKey([i as u8 + 1; 32])))
            .collect()
    }

    fn genesis() -> ScheduleSlots {
        ScheduleSlots::with_genesis(ProducerSchedule {
            version: 0,
            producers: producers(&["genesis"]),
        })
    }

    #[test]
    fn test_initial_state_is_none() {
        let slots = genesis();
        assert_eq!(slots.state(), ScheduleState::None);
        assert_eq!(slots.status_of(0), VersionStatus::Active);
    }

    #[test]
    fn test_validate_producers() {
        assert!(validate_producers(&producers(&["a", "b"]), 21).is_ok());
        assert!(validate_producers(&[], 21).is_err());
        assert!(validate_producers(&producers(&["a", "b", "c"]), 2).is_err());

        let mut dup = producers(&["a", "b"]);
        dup[1].producer_name = dup[0].producer_name;
        assert!(validate_producers(&dup, 21).is_err());

        let mut bad = producers(&["a"]);
        bad[0].authority.threshold = 2;
        assert!(validate_producers(&bad, 21).is_err());

        let mut dup_key = producers(&["a"]);
        let first_key = dup_key[0].authority.keys[0].clone();
        dup_key[0].authority.keys.push(first_key);
        assert!(validate_producers(&dup_key, 21).is_err());

        let mut zero = producers(&["a"]);
        zero[0].authority.keys[0].weight = 0;
        assert!(validate_producers(&zero, 21).is_err());
    }

    #[test]
    fn test_proposal_replaced_while_proposed() {
        let mut slots = genesis();
        let first = slots.propose(producers(&["a"]), 10).unwrap();
        assert_eq!(first, ProposalOutcome { version: 1, replaced: None });

        let second = slots.propose(producers(&["b"]), 11).unwrap();
        assert_eq!(second, ProposalOutcome { version: 2, replaced: Some(1) });
        assert_eq!(slots.status_of(1), VersionStatus::NotPresent);
        assert_eq!(slots.proposed().unwrap().schedule.producers, producers(&["b"]));
        assert_eq!(slots.proposed().unwrap().proposed_in_block, 11);
    }

    #[test]
    fn test_noop_proposals_rejected() {
        let mut slots = genesis();
        assert!(slots.propose(producers(&["genesis"]), 5).is_err());

        slots.propose(producers(&["a"]), 5).unwrap();
        assert!(slots.propose(producers(&["a"]), 6).is_err());
        assert_eq!(slots.proposed().unwrap().proposed_in_block, 5);
    }

    #[test]
    fn test_no_transition_before_irreversible() {
        let mut slots = genesis();
        slots.propose(producers(&["a"]), 10).unwrap();

        assert!(slots.on_block_finalized(10, 9).is_empty());
        assert_eq!(slots.state(), ScheduleState::Proposed);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut slots = genesis();
        slots.propose(producers(&["a"]), 10).unwrap();

        // Proposing block becomes irreversible while finalizing block 12.
        let t = slots.on_block_finalized(12, 10);
        assert_eq!(t, ScheduleTransition { promoted: Some(1), activated: None });
        assert_eq!(slots.status_of(1), VersionStatus::Pending);
        assert_eq!(slots.pending().unwrap().promoted_in_block, 12);

        assert!(slots.on_block_finalized(13, 11).is_empty());

        let t = slots.on_block_finalized(14, 12);
        assert_eq!(t.activated, Some(1));
        assert_eq!(slots.active().version, 1);
        assert_eq!(slots.state(), ScheduleState::Active);
    }

    #[test]
    fn test_promoted_not_activated_in_same_step() {
        let mut slots = genesis();
        slots.propose(producers(&["a"]), 10).unwrap();
        // Instant finality: lib == head.
        let t = slots.on_block_finalized(10, 10);
        assert_eq!(t.promoted, Some(1));
        assert_eq!(t.activated, None);
        let t = slots.on_block_finalized(11, 11);
        assert_eq!(t.activated, Some(1));
    }

    #[test]
    fn test_proposal_queues_behind_pending() {
        let mut slots = genesis();
        slots.propose(producers(&["a"]), 10).unwrap();
        slots.on_block_finalized(11, 10);

        let queued = slots.propose(producers(&["b"]), 12).unwrap();
        assert_eq!(queued.version, 2);
        assert_eq!(queued.replaced, None);

        // Neither the promoting nor the proposing block is irreversible.
        assert!(slots.on_block_finalized(12, 10).is_empty());
        assert_eq!(slots.status_of(1), VersionStatus::Pending);
        assert_eq!(slots.status_of(2), VersionStatus::Proposed);

        // v1 leaves PENDING first, which frees the slot for v2.
        let t = slots.on_block_finalized(13, 12);
        assert_eq!(t, ScheduleTransition { promoted: Some(2), activated: Some(1) });
        assert_eq!(slots.pending().unwrap().promoted_in_block, 13);
        assert_eq!(slots.active().version, 1);
    }

    #[test]
    fn test_override_enters_pending() {
        let mut slots = genesis();
        let outcome = slots.install_pending(producers(&["a"]), 1).unwrap();
        assert_eq!(outcome.version, 1);
        assert_eq!(slots.state(), ScheduleState::Pending);

        assert!(slots.install_pending(producers(&["b"]), 2).is_err());

        let t = slots.on_block_finalized(2, 1);
        assert_eq!(t.activated, Some(1));
    }

    #[test]
    fn test_override_renumbers_queued_proposal() {
        let mut slots = genesis();
        slots.propose(producers(&["a"]), 1).unwrap();
        let outcome = slots.install_pending(producers(&["b"]), 1).unwrap();
        assert_eq!(outcome.version, 2);
        assert_eq!(outcome.renumbered_proposal, Some(3));
        assert_eq!(slots.status_of(3), VersionStatus::Proposed);

        // Override activates first, then the queued proposal follows it.
        let t = slots.on_block_finalized(2, 1);
        assert_eq!(t, ScheduleTransition { promoted: Some(3), activated: Some(2) });
    }

    #[test]
    fn test_active_versions_strictly_increase() {
        let mut slots = genesis();
        let mut last_active = slots.active().version;
        let sets = [["a"], ["b"], ["c"], ["d"]];
        let mut block = 1;
        for set in sets {
            slots.propose(producers(&set), block).unwrap();
            for _ in 0..3 {
                block += 1;
                slots.on_block_finalized(block, block);
                assert!(slots.active().version >= last_active);
                last_active = slots.active().version;
            }
        }
        assert_eq!(slots.active().version, 4);
    }

    #[test]
    fn test_digest_depends_on_content() {
        let a = ProducerSchedule {
            version: 1,
            producers: producers(&["a"]),
        };
        let b = ProducerSchedule {
            version: 1,
            producers: producers(&["b"]),
        };
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
        assert_eq!(a.digest().unwrap(), a.clone().digest().unwrap());
        assert_eq!(a.digest().unwrap(), keccak256(&a.pack().unwrap()));
    }
}
