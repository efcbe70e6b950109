//! # Packed Codec
//!
//! The chain's packed binary encoding: bincode with little-endian fixed-width
//! integers and `u64` length prefixes.
//!
//! The encoding is canonical. Trailing bytes are rejected, so a payload that
//! decodes successfully re-encodes to exactly the same bytes. Parameter
//! stores rely on this to return byte-identical blobs.

use crate::errors::CodecError;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode limit used when the caller does not supply one (1 MiB).
pub const DEFAULT_MAX_PACKED_SIZE: u64 = 1024 * 1024;

fn options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
        .with_limit(limit)
}

/// Packed encoding for any serde type.
///
/// `unpack` is a pure function of its input: it never consults chain state,
/// which keeps malformed-input handling testable on its own.
pub trait PackedCodec: Sized {
    /// Encode into the packed form.
    fn pack(&self) -> Result<Vec<u8>, CodecError>;

    /// Size in bytes of the packed form.
    fn packed_size(&self) -> Result<usize, CodecError>;

    /// Decode with an explicit size limit.
    fn unpack_with_limit(bytes: &[u8], limit: u64) -> Result<Self, CodecError>;

    /// Decode with [`DEFAULT_MAX_PACKED_SIZE`].
    fn unpack(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::unpack_with_limit(bytes, DEFAULT_MAX_PACKED_SIZE)
    }
}

impl<T> PackedCodec for T
where
    T: Serialize + DeserializeOwned,
{
    fn pack(&self) -> Result<Vec<u8>, CodecError> {
        options(u64::MAX)
            .serialize(self)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn packed_size(&self) -> Result<usize, CodecError> {
        let size = options(u64::MAX)
            .serialized_size(self)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        usize::try_from(size).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unpack_with_limit(bytes: &[u8], limit: u64) -> Result<Self, CodecError> {
        if bytes.len() as u64 > limit {
            return Err(CodecError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        options(limit)
            .deserialize(bytes)
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }
}
