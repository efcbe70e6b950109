//! # Parameter Store
//!
//! Chain-wide tunables (`BlockchainParameters`) and the separate upgrade
//! namespace (`UpgradeParameters`).
//!
//! Both are exchanged in the packed encoding. Reads follow a two-phase
//! probe/fill protocol: an empty buffer asks for the size, a large enough
//! buffer is filled, a short one is left untouched.

use crate::error::{GovernanceError, GovernanceResult};
use serde::{Deserialize, Serialize};
use shared_types::BlockNum;

/// 100% in basis points.
pub const PERCENT_100: u32 = 10_000;

/// Minimum room between the base per-transaction net usage and the
/// per-transaction maximum.
pub const MIN_NET_USAGE_DELTA_BETWEEN_BASE_AND_MAX_FOR_TRX: u32 = 10 * 1024;

/// Chain configuration.
///
/// Field order is the packed layout; do not reorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainParameters {
    pub max_block_net_usage: u64,
    pub target_block_net_usage_pct: u32,
    pub max_transaction_net_usage: u32,
    pub base_per_transaction_net_usage: u32,
    pub net_usage_leeway: u32,
    pub context_free_discount_net_usage_num: u32,
    pub context_free_discount_net_usage_den: u32,
    pub max_block_cpu_usage: u32,
    pub target_block_cpu_usage_pct: u32,
    pub max_transaction_cpu_usage: u32,
    pub min_transaction_cpu_usage: u32,
    pub max_transaction_lifetime: u32,
    pub deferred_trx_expiration_window: u32,
    pub max_transaction_delay: u32,
    pub max_inline_action_size: u32,
    pub max_inline_action_depth: u16,
    pub max_authority_depth: u16,
}

impl Default for BlockchainParameters {
    fn default() -> Self {
        let max_block_net_usage = 1024 * 1024;
        let max_block_cpu_usage = 200_000;
        Self {
            max_block_net_usage,
            target_block_net_usage_pct: 10 * 100, // 10%
            max_transaction_net_usage: (max_block_net_usage / 2) as u32,
            base_per_transaction_net_usage: 12,
            net_usage_leeway: 500,
            context_free_discount_net_usage_num: 20,
            context_free_discount_net_usage_den: 100,
            max_block_cpu_usage,
            target_block_cpu_usage_pct: 10 * 100, // 10%
            max_transaction_cpu_usage: 3 * max_block_cpu_usage / 4,
            min_transaction_cpu_usage: 100,
            max_transaction_lifetime: 60 * 60,
            deferred_trx_expiration_window: 10 * 60,
            max_transaction_delay: 45 * 24 * 3600,
            max_inline_action_size: 4 * 1024,
            max_inline_action_depth: 4,
            max_authority_depth: 6,
        }
    }
}

impl BlockchainParameters {
    /// Structural consistency checks. Either all pass or the set is rejected.
    pub fn validate(&self) -> GovernanceResult<()> {
        if self.max_authority_depth < 1 {
            return Err(GovernanceError::invalid(
                "max_authority_depth",
                "must be at least 1",
            ));
        }
        if self.target_block_net_usage_pct > PERCENT_100 {
            return Err(GovernanceError::invalid(
                "target_block_net_usage_pct",
                format!("{} exceeds 100%", self.target_block_net_usage_pct),
            ));
        }
        if self.target_block_cpu_usage_pct > PERCENT_100 {
            return Err(GovernanceError::invalid(
                "target_block_cpu_usage_pct",
                format!("{} exceeds 100%", self.target_block_cpu_usage_pct),
            ));
        }
        if u64::from(self.max_transaction_net_usage) >= self.max_block_net_usage {
            return Err(GovernanceError::invalid(
                "max_transaction_net_usage",
                "must be less than max_block_net_usage",
            ));
        }
        if self.base_per_transaction_net_usage >= self.max_transaction_net_usage
            || self.max_transaction_net_usage - self.base_per_transaction_net_usage
                < MIN_NET_USAGE_DELTA_BETWEEN_BASE_AND_MAX_FOR_TRX
        {
            return Err(GovernanceError::invalid(
                "base_per_transaction_net_usage",
                format!(
                    "must leave at least {MIN_NET_USAGE_DELTA_BETWEEN_BASE_AND_MAX_FOR_TRX} bytes below max_transaction_net_usage"
                ),
            ));
        }
        if self.context_free_discount_net_usage_den == 0 {
            return Err(GovernanceError::invalid(
                "context_free_discount_net_usage_den",
                "must be positive",
            ));
        }
        if self.context_free_discount_net_usage_num > self.context_free_discount_net_usage_den {
            return Err(GovernanceError::invalid(
                "context_free_discount_net_usage_num",
                "discount cannot exceed 100%",
            ));
        }
        if self.max_transaction_cpu_usage >= self.max_block_cpu_usage {
            return Err(GovernanceError::invalid(
                "max_transaction_cpu_usage",
                "must be less than max_block_cpu_usage",
            ));
        }
        if self.min_transaction_cpu_usage > self.max_transaction_cpu_usage {
            return Err(GovernanceError::invalid(
                "min_transaction_cpu_usage",
                "cannot exceed max_transaction_cpu_usage",
            ));
        }
        Ok(())
    }
}

/// Upgrade namespace. `target_block_num == 0` means no upgrade is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeParameters {
    pub target_block_num: BlockNum,
}

impl UpgradeParameters {
    /// The target must lie at least `min_lead_blocks` after `head`.
    pub fn validate(&self, head: BlockNum, min_lead_blocks: u32) -> GovernanceResult<()> {
        let earliest = head.saturating_add(min_lead_blocks);
        if self.target_block_num <= earliest {
            return Err(GovernanceError::invalid(
                "target_block_num",
                format!(
                    "{} must be after block {earliest} (head {head} + {min_lead_blocks})",
                    self.target_block_num
                ),
            ));
        }
        Ok(())
    }

    pub fn is_scheduled(&self) -> bool {
        self.target_block_num != 0
    }
}

/// Outcome of a probe/fill read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackedRead {
    /// Zero-length buffer: size reported, nothing written.
    Probed { required: usize },
    /// Buffer filled with `written` bytes.
    Filled { written: usize },
    /// Buffer non-empty but short: nothing written.
    BufferTooSmall { required: usize, provided: usize },
}

impl PackedRead {
    /// The size a caller needs, whatever happened.
    pub fn required_size(&self) -> usize {
        match *self {
            PackedRead::Probed { required } => required,
            PackedRead::Filled { written } => written,
            PackedRead::BufferTooSmall { required, .. } => required,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, PackedRead::Filled { .. })
    }

    /// Short buffer as an error value, for callers that want one.
    pub fn into_result(self) -> GovernanceResult<usize> {
        match self {
            PackedRead::BufferTooSmall { required, provided } => {
                Err(GovernanceError::BufferTooSmall { required, provided })
            }
            other => Ok(other.required_size()),
        }
    }
}

/// Copy `packed` into `buffer` following the probe/fill protocol.
pub fn fill_packed(packed: &[u8], buffer: &mut [u8]) -> PackedRead {
    let required = packed.len();
    if buffer.is_empty() {
        return PackedRead::Probed { required };
    }
    if buffer.len() < required {
        return PackedRead::BufferTooSmall {
            required,
            provided: buffer.len(),
        };
    }
    buffer[..required].copy_from_slice(packed);
    PackedRead::Filled { written: required }
}
