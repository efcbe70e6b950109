//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::GovernanceState;
use crate::error::{LedgerError, LedgerResult};
use shared_types::{AccountName, BlockNum};

/// Transactional state-tree layer that owns all governance state.
///
/// Modelled on revisioned undo sessions: every block opens a session at
/// `head + 1`; undoing a session restores the state from before the block;
/// committing a revision discards the ability to undo it and everything
/// below it.
pub trait StateLedger: Send {
    /// Current state (including uncommitted sessions).
    fn state(&self) -> &GovernanceState;

    /// Mutable state. Fails when no session is open.
    fn state_mut(&mut self) -> LedgerResult<&mut GovernanceState>;

    /// Revision of the newest session (the head block).
    fn head_revision(&self) -> BlockNum;

    /// Highest revision that can no longer be undone.
    fn committed_revision(&self) -> BlockNum;

    /// Open a session for `revision`, which must be `head_revision() + 1`.
    fn start_session(&mut self, revision: BlockNum) -> LedgerResult<()>;

    /// Undo the newest session. Returns the new head revision.
    fn undo(&mut self) -> LedgerResult<BlockNum>;

    /// Make every revision up to `revision` permanent.
    fn commit(&mut self, revision: BlockNum) -> LedgerResult<()>;

    /// Undo sessions until the head is `revision`. Refuses without change if
    /// that would cross the committed revision. Returns the number undone.
    fn undo_to(&mut self, revision: BlockNum) -> LedgerResult<u32> {
        let committed = self.committed_revision();
        if revision < committed {
            return Err(LedgerError::IrreversibleRevision {
                requested: revision,
                committed,
            });
        }
        let mut undone = 0;
        while self.head_revision() > revision {
            self.undo()?;
            undone += 1;
        }
        Ok(undone)
    }
}

/// Finality tracker.
pub trait IrreversibilityOracle: Send + Sync {
    /// Last irreversible block number.
    fn last_irreversible_block(&self) -> BlockNum;
}

/// Resource accounting collaborator.
///
/// Supplies current RAM usage so that a RAM quota is never set below what
/// an account already holds.
pub trait ResourceUsageOracle: Send + Sync {
    fn ram_usage(&self, account: AccountName) -> i64;
}
