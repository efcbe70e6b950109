//! # Governance Metrics
//!
//! Prometheus metrics for privileged governance activity.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-privileged-governance = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `governance_schedules_proposed_total` - Counter of accepted proposals
//! - `governance_schedules_activated_total` - Counter of schedules made active
//! - `governance_active_schedule_version` - Gauge of the active schedule version
//! - `governance_operations_rejected_total` - Counter of rejected calls (by operation, kind)
//! - `governance_blocks_reverted_total` - Counter of blocks undone by reorgs

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, Gauge, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total accepted schedule proposals
    pub static ref SCHEDULES_PROPOSED: IntCounter = register_int_counter!(
        "governance_schedules_proposed_total",
        "Total number of producer schedule proposals accepted"
    )
    .expect("Failed to create SCHEDULES_PROPOSED metric");

    /// Total schedules activated
    pub static ref SCHEDULES_ACTIVATED: IntCounter = register_int_counter!(
        "governance_schedules_activated_total",
        "Total number of producer schedules that became active"
    )
    .expect("Failed to create SCHEDULES_ACTIVATED metric");

    /// Version of the active schedule
    pub static ref ACTIVE_SCHEDULE_VERSION: Gauge = register_gauge!(
        "governance_active_schedule_version",
        "Version of the currently active producer schedule"
    )
    .expect("Failed to create ACTIVE_SCHEDULE_VERSION metric");

    /// Rejected calls, labeled by operation and error kind
    pub static ref OPERATIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "governance_operations_rejected_total",
        "Total number of rejected governance calls",
        &["operation", "kind"]
    )
    .expect("Failed to create OPERATIONS_REJECTED metric");

    /// Blocks undone by reorganizations
    pub static ref BLOCKS_REVERTED: IntCounter = register_int_counter!(
        "governance_blocks_reverted_total",
        "Total number of blocks undone by chain reorganizations"
    )
    .expect("Failed to create BLOCKS_REVERTED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted proposal
#[cfg(feature = "metrics")]
pub fn record_schedule_proposed() {
    SCHEDULES_PROPOSED.inc();
}

/// Record a schedule activation
#[cfg(feature = "metrics")]
pub fn record_schedule_activated(version: u32) {
    SCHEDULES_ACTIVATED.inc();
    ACTIVE_SCHEDULE_VERSION.set(f64::from(version));
}

/// Record a rejected call
#[cfg(feature = "metrics")]
pub fn record_rejection(operation: &str, kind: &str) {
    OPERATIONS_REJECTED
        .with_label_values(&[operation, kind])
        .inc();
}

/// Record blocks undone by a reorg
#[cfg(feature = "metrics")]
pub fn record_blocks_reverted(count: u32) {
    BLOCKS_REVERTED.inc_by(u64::from(count));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_schedule_proposed() {}

#[cfg(not(feature = "metrics"))]
pub fn record_schedule_activated(_version: u32) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_operation: &str, _kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_blocks_reverted(_count: u32) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_callable_in_any_build() {
        record_schedule_proposed();
        record_schedule_activated(3);
        record_rejection("set_proposed_producers", "invalid_value");
        record_blocks_reverted(2);
    }
}
