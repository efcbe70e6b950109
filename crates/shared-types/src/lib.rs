//! # Shared Types Crate
//!
//! Entities and wire formats shared between the privileged governance
//! subsystem and the host runtime that drives it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account names, keys and block numbers are
//!   defined once here and reused by every subsystem.
//! - **One Packed Encoding**: every binary payload crossing the VM boundary is
//!   decoded through [`codec::PackedCodec`]. Decoding either succeeds as a
//!   whole or fails as a whole.

pub mod codec;
pub mod entities;
pub mod errors;

pub use codec::{PackedCodec, DEFAULT_MAX_PACKED_SIZE};
pub use entities::*;
pub use errors::*;
