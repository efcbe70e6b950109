use crate::domain::GovernanceState;
use crate::error::{LedgerError, LedgerResult};
use crate::ports::StateLedger;
use shared_types::BlockNum;
use std::collections::VecDeque;

/// In-memory implementation of StateLedger.
///
/// Each open session keeps a snapshot of the state as it was before the
/// block. Undo restores the newest snapshot; commit drops snapshots.
pub struct InMemoryLedger {
    state: GovernanceState,
    /// `(revision, state before that revision)`, oldest first.
    undo_stack: VecDeque<(BlockNum, GovernanceState)>,
    head: BlockNum,
    committed: BlockNum,
}

impl InMemoryLedger {
    /// Ledger whose genesis state is committed at revision 0.
    pub fn new(genesis: GovernanceState) -> Self {
        Self::at_revision(genesis, 0)
    }

    /// Ledger resuming from a committed state at `revision`.
    pub fn at_revision(state: GovernanceState, revision: BlockNum) -> Self {
        Self {
            state,
            undo_stack: VecDeque::new(),
            head: revision,
            committed: revision,
        }
    }

    /// Number of revisions that can still be undone.
    pub fn undoable_sessions(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(GovernanceState::default())
    }
}

impl StateLedger for InMemoryLedger {
    fn state(&self) -> &GovernanceState {
        &self.state
    }

    fn state_mut(&mut self) -> LedgerResult<&mut GovernanceState> {
        match self.undo_stack.back() {
            Some((revision, _)) if *revision == self.head => Ok(&mut self.state),
            _ => Err(LedgerError::NoOpenSession),
        }
    }

    fn head_revision(&self) -> BlockNum {
        self.head
    }

    fn committed_revision(&self) -> BlockNum {
        self.committed
    }

    fn start_session(&mut self, revision: BlockNum) -> LedgerResult<()> {
        let expected = self.head.saturating_add(1);
        if revision != expected {
            return Err(LedgerError::RevisionOutOfOrder {
                expected,
                actual: revision,
            });
        }
        self.undo_stack.push_back((revision, self.state.clone()));
        self.head = revision;
        Ok(())
    }

    fn undo(&mut self) -> LedgerResult<BlockNum> {
        let (revision, previous) =
            self.undo_stack
                .pop_back()
                .ok_or(LedgerError::IrreversibleRevision {
                    requested: self.head.saturating_sub(1),
                    committed: self.committed,
                })?;
        self.state = previous;
        self.head = revision - 1;
        Ok(self.head)
    }

    fn commit(&mut self, revision: BlockNum) -> LedgerResult<()> {
        let target = revision.min(self.head);
        while self
            .undo_stack
            .front()
            .is_some_and(|(rev, _)| *rev <= target)
        {
            self.undo_stack.pop_front();
        }
        self.committed = self.committed.max(target);
        Ok(())
    }
}
