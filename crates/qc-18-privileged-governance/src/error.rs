//! Error types for the Privileged Governance subsystem
//!
//! Every operation is all-or-nothing: an `Err` always means the ledger state
//! is exactly what it was before the call.

use shared_types::{AccountName, BlockNum, CodecError};
use thiserror::Error;

/// Errors raised by the ledger (state-tree) layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A write was attempted outside of an open block session.
    #[error("No open undo session: writes require an active block")]
    NoOpenSession,

    /// Sessions must be opened for consecutive block numbers.
    #[error("Revision out of order: expected {expected}, got {actual}")]
    RevisionOutOfOrder { expected: BlockNum, actual: BlockNum },

    /// Attempt to undo state that is already irreversible.
    #[error("Cannot revert to block {requested}: block {committed} is irreversible")]
    IrreversibleRevision {
        requested: BlockNum,
        committed: BlockNum,
    },

    /// Backend failure.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error taxonomy exposed to the calling contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    InvalidValue,
    NotAuthorized,
    BufferTooSmall,
    StateConflict,
    LedgerFailure,
}

impl ErrorKind {
    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::NotAuthorized => "not_authorized",
            ErrorKind::BufferTooSmall => "buffer_too_small",
            ErrorKind::StateConflict => "state_conflict",
            ErrorKind::LedgerFailure => "ledger_failure",
        }
    }
}

/// Governance subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// Payload failed structural decode
    #[error("Malformed {payload} payload: {source}")]
    MalformedInput {
        payload: &'static str,
        #[source]
        source: CodecError,
    },

    /// Argument outside its allowed domain
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Caller is not a privileged account
    #[error("Account {caller} is not privileged to call {operation}")]
    NotAuthorized {
        caller: AccountName,
        operation: &'static str,
    },

    /// Output buffer cannot hold the packed value
    #[error("Buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Operation would disturb state it is not allowed to touch
    #[error("State conflict: {reason}")]
    StateConflict { reason: String },

    /// Ledger layer failure
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl GovernanceError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GovernanceError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn conflict(reason: impl Into<String>) -> Self {
        GovernanceError::StateConflict {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(payload: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| GovernanceError::MalformedInput { payload, source }
    }

    /// Taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GovernanceError::MalformedInput { .. } => ErrorKind::MalformedInput,
            GovernanceError::InvalidValue { .. } => ErrorKind::InvalidValue,
            GovernanceError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            GovernanceError::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            GovernanceError::StateConflict { .. } => ErrorKind::StateConflict,
            GovernanceError::Ledger(LedgerError::Unavailable(_)) => ErrorKind::LedgerFailure,
            GovernanceError::Ledger(_) => ErrorKind::StateConflict,
        }
    }

    /// Stable numeric code surfaced to the calling contract.
    pub fn code(&self) -> i32 {
        match self.kind() {
            ErrorKind::MalformedInput => 1,
            ErrorKind::InvalidValue => 2,
            ErrorKind::NotAuthorized => 3,
            ErrorKind::BufferTooSmall => 4,
            ErrorKind::StateConflict => 5,
            ErrorKind::LedgerFailure => 6,
        }
    }
}

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
