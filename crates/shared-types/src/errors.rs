//! # Error Types
//!
//! Errors shared by every user of the packed codec and the entity parsers.

use thiserror::Error;

/// Errors raised while packing or unpacking a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The payload is structurally invalid (truncated, trailing bytes,
    /// invalid discriminant, ...).
    #[error("Malformed packed payload: {0}")]
    Malformed(String),

    /// The payload exceeds the configured decode limit.
    #[error("Packed payload too large: {size} bytes exceeds limit of {limit}")]
    TooLarge { size: usize, limit: u64 },

    /// A value could not be encoded.
    #[error("Failed to encode value: {0}")]
    Encode(String),
}

/// Errors raised when parsing an account name from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// More than 13 characters.
    #[error("Name too long: {len} characters (max 13)")]
    TooLong { len: usize },

    /// Character outside `.12345abcdefghijklmnopqrstuvwxyz`.
    #[error("Invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// The 13th character may only be one of `.12345abcdefghij`.
    #[error("Invalid 13th character {ch:?}")]
    InvalidThirteenthCharacter { ch: char },
}
