//! # qc-18-privileged-governance
//!
//! Privileged governance for the host runtime: the calls a chain's system
//! accounts use to run the chain itself.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Resource Limits**: Per-account RAM quotas and NET/CPU weights with a
//!   chain-wide guaranteed floor
//! - **Producer Schedules**: Proposed → pending → active, each step gated on
//!   block irreversibility
//! - **Parameter Store**: Packed chain parameters and the upgrade namespace
//! - **Privilege Registry**: Which accounts may call any of this
//! - **Name Lists**: Actor/contract blacklists and the resource greylist
//!
//! ## Architecture
//!
//! ```text
//! VM (privileged contract) ──host call──→ HostFunctions ──→ PrivilegedGovernanceService
//!                                                               │
//!                                                               ├── StateLedger (undo sessions)
//!                                                               ├── IrreversibilityOracle (LIB)
//!                                                               └── ResourceUsageOracle (RAM usage)
//!
//! Block driver: begin_block → contract calls → finalize_block   (pop_blocks_to on reorg)
//! ```
//!
//! ## Schedule Lifecycle
//!
//! ```text
//! [NONE] ──propose──→ [PROPOSED] ──proposing block irreversible──→ [PENDING]
//!                         ↑  │                                        │
//!                         └──┘ re-propose                             │ promoting block
//!                                                                     ↓ irreversible
//!                                                                 [ACTIVE]
//! ```
//!
//! A schedule only becomes enforced after two irreversibility delays, so a
//! reorg can never un-enforce a producer set that nodes already switched to.
//!
//! ## Determinism
//!
//! All collections are ordered (`BTreeMap`/`BTreeSet`) and all state lives
//! in the ledger. Two nodes applying the same blocks reach the same
//! [`GovernanceState::state_digest`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_18_privileged_governance::prelude::*;
//!
//! let service = PrivilegedGovernanceService::new(config, finality, usage);
//! let mut ledger = InMemoryLedger::new(genesis.build_state(config.max_producers)?);
//!
//! service.begin_block(&mut ledger, 1)?;
//! let version = service.set_proposed_producers(&mut ledger, eosio, &payload)?;
//! service.finalize_block(&mut ledger)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod genesis;
pub mod host;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryLedger, InMemoryResourceUsage, ManualIrreversibilityOracle};
pub use config::{ActiveOverridePolicy, ConfigError, GovernanceConfig};
pub use domain::{
    BandwidthKind, BlockSigningAuthority, BlockchainParameters, Capacity, EffectiveResources,
    GovernanceState, GuaranteedMinimumResources, KeyWeight, NameListAction, NameListKind,
    PackedRead, ProducerAuthority, ProducerSchedule, ResourceLimits, ScheduleState,
    ScheduleTransition, ShareRatio, UpgradeParameters, UNLIMITED,
};
pub use error::{ErrorKind, GovernanceError, GovernanceResult, LedgerError, LedgerResult};
pub use events::GovernanceEvent;
pub use genesis::{GenesisError, GenesisGovernance};
pub use host::{status_code, HostFunctions};
pub use ports::{IrreversibilityOracle, PrivilegedGovernanceApi, ResourceUsageOracle, StateLedger};
pub use service::PrivilegedGovernanceService;

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 18;

/// Common imports for node wiring and tests.
pub mod prelude {
    pub use crate::{
        GenesisGovernance, GovernanceConfig, GovernanceError, GovernanceState, InMemoryLedger,
        InMemoryResourceUsage, ManualIrreversibilityOracle, PrivilegedGovernanceApi,
        PrivilegedGovernanceService, ProducerAuthority, StateLedger,
    };
    pub use shared_types::{AccountName, PackedCodec, PublicKey};
}
