//! Ports module for the Privileged Governance subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::PrivilegedGovernanceApi;
pub use outbound::{IrreversibilityOracle, ResourceUsageOracle, StateLedger};
