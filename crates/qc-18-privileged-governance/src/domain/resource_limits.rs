//! # Resource Limit Manager
//!
//! Per-account RAM quotas and NET/CPU weights, plus the chain-wide
//! guaranteed minimum that is added under every bounded limit.
//!
//! ## Reading vs. storing
//!
//! The guaranteed floor is applied at read time ([`ResourceLimitManager::effective`]),
//! never folded into stored records. Changing the floor therefore affects
//! every account immediately without rewriting any record.
//!
//! ## Totals
//!
//! `ResourceTotals` tracks the sum of all bounded weights so that an
//! account's share of the NET/CPU pool can be expressed as an exact ratio.

use crate::error::{GovernanceError, GovernanceResult};
use serde::{Deserialize, Serialize};
use shared_types::AccountName;
use std::collections::BTreeMap;

/// Sentinel for "no limit".
pub const UNLIMITED: i64 = -1;

/// Stored limits of one account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Absolute RAM quota in bytes.
    pub ram_bytes: i64,
    /// Proportional share of the NET pool.
    pub net_weight: i64,
    /// Proportional share of the CPU pool.
    pub cpu_weight: i64,
}

impl ResourceLimits {
    /// Value reported for accounts that never had limits set.
    pub const UNSET: Self = Self {
        ram_bytes: UNLIMITED,
        net_weight: UNLIMITED,
        cpu_weight: UNLIMITED,
    };

    pub fn new(ram_bytes: i64, net_weight: i64, cpu_weight: i64) -> Self {
        Self {
            ram_bytes,
            net_weight,
            cpu_weight,
        }
    }

    /// `(ram_bytes, net_weight, cpu_weight)`
    pub fn as_tuple(&self) -> (i64, i64, i64) {
        (self.ram_bytes, self.net_weight, self.cpu_weight)
    }

    /// Every field must be `-1` or non-negative.
    pub fn validate(&self) -> GovernanceResult<()> {
        check_limit("ram_bytes", self.ram_bytes)?;
        check_limit("net_weight", self.net_weight)?;
        check_limit("cpu_weight", self.cpu_weight)
    }

    /// True if any field of `new` is tighter than the same field of `self`.
    pub fn is_decreased_by(&self, new: &ResourceLimits) -> bool {
        decreased(self.ram_bytes, new.ram_bytes)
            || decreased(self.net_weight, new.net_weight)
            || decreased(self.cpu_weight, new.cpu_weight)
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::UNSET
    }
}

fn check_limit(field: &'static str, value: i64) -> GovernanceResult<()> {
    if value < UNLIMITED {
        return Err(GovernanceError::invalid(
            field,
            format!("{value} is negative and not the unlimited sentinel (-1)"),
        ));
    }
    Ok(())
}

fn decreased(old: i64, new: i64) -> bool {
    new != UNLIMITED && (old == UNLIMITED || new < old)
}

fn bounded(value: i64) -> u128 {
    u128::try_from(value).unwrap_or(0)
}

/// Chain-wide baseline added to every account's bounded limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaranteedMinimumResources {
    pub ram: i64,
    pub cpu: i64,
    pub net: i64,
}

impl GuaranteedMinimumResources {
    pub fn new(ram: i64, cpu: i64, net: i64) -> Self {
        Self { ram, cpu, net }
    }

    pub fn validate(&self) -> GovernanceResult<()> {
        for (field, value) in [("ram", self.ram), ("cpu", self.cpu), ("net", self.net)] {
            if value < 0 {
                return Err(GovernanceError::invalid(
                    field,
                    format!("guaranteed minimum must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Sum of bounded limits across all accounts. Unlimited entries contribute 0.
///
/// The per-pool account counts let the guaranteed floor be charged once per
/// bounded account when a share is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub total_ram_bytes: u128,
    pub total_net_weight: u128,
    pub total_cpu_weight: u128,
    pub bounded_net_accounts: u64,
    pub bounded_cpu_accounts: u64,
}

impl ResourceTotals {
    fn replace(&mut self, old: &ResourceLimits, new: &ResourceLimits) {
        self.total_ram_bytes =
            self.total_ram_bytes.saturating_sub(bounded(old.ram_bytes)) + bounded(new.ram_bytes);
        self.total_net_weight = self.total_net_weight.saturating_sub(bounded(old.net_weight))
            + bounded(new.net_weight);
        self.total_cpu_weight = self.total_cpu_weight.saturating_sub(bounded(old.cpu_weight))
            + bounded(new.cpu_weight);
        self.bounded_net_accounts =
            recount(self.bounded_net_accounts, old.net_weight, new.net_weight);
        self.bounded_cpu_accounts =
            recount(self.bounded_cpu_accounts, old.cpu_weight, new.cpu_weight);
    }

    /// Sum of every bounded account's effective weight in one pool.
    fn effective_pool(&self, kind: BandwidthKind, floor: i64) -> u128 {
        let (total, accounts) = match kind {
            BandwidthKind::Net => (self.total_net_weight, self.bounded_net_accounts),
            BandwidthKind::Cpu => (self.total_cpu_weight, self.bounded_cpu_accounts),
        };
        total + bounded(floor) * u128::from(accounts)
    }
}

fn recount(count: u64, old: i64, new: i64) -> u64 {
    let before = u64::from(old != UNLIMITED);
    let after = u64::from(new != UNLIMITED);
    count.saturating_sub(before) + after
}

/// A limit after the guaranteed floor has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    Unlimited,
    Bounded(i64),
}

impl Capacity {
    fn with_floor(stored: i64, floor: i64) -> Self {
        if stored == UNLIMITED {
            Capacity::Unlimited
        } else {
            Capacity::Bounded(stored.saturating_add(floor))
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Capacity::Unlimited)
    }
}

/// Capacity handed to resource-charging logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveResources {
    pub ram_bytes: Capacity,
    pub net_weight: Capacity,
    pub cpu_weight: Capacity,
}

/// Bandwidth pool selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandwidthKind {
    Net,
    Cpu,
}

/// Exact `numerator / denominator` share of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareRatio {
    pub numerator: u128,
    pub denominator: u128,
}

/// Limit table, totals and guaranteed floor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimitManager {
    limits: BTreeMap<AccountName, ResourceLimits>,
    totals: ResourceTotals,
    guaranteed: GuaranteedMinimumResources,
}

impl ResourceLimitManager {
    /// Stored limits, or [`ResourceLimits::UNSET`] when none were ever set.
    pub fn get(&self, account: AccountName) -> ResourceLimits {
        self.limits.get(&account).copied().unwrap_or_default()
    }

    /// Whether the account has an explicit record.
    pub fn has_record(&self, account: AccountName) -> bool {
        self.limits.contains_key(&account)
    }

    /// Validate and store `new` for `account`.
    ///
    /// `ram_usage` is the account's current RAM usage; a bounded RAM limit
    /// below it is rejected. Returns whether any limit decreased.
    pub fn set(
        &mut self,
        account: AccountName,
        new: ResourceLimits,
        ram_usage: i64,
    ) -> GovernanceResult<bool> {
        new.validate()?;
        if new.ram_bytes != UNLIMITED && new.ram_bytes < ram_usage {
            return Err(GovernanceError::invalid(
                "ram_bytes",
                format!(
                    "limit {} is below current usage {} of {}",
                    new.ram_bytes, ram_usage, account
                ),
            ));
        }

        let old = self.get(account);
        self.totals.replace(&old, &new);
        self.limits.insert(account, new);
        Ok(old.is_decreased_by(&new))
    }

    pub fn totals(&self) -> ResourceTotals {
        self.totals
    }

    pub fn guaranteed_minimum(&self) -> GuaranteedMinimumResources {
        self.guaranteed
    }

    pub fn set_guaranteed_minimum(
        &mut self,
        guaranteed: GuaranteedMinimumResources,
    ) -> GovernanceResult<()> {
        guaranteed.validate()?;
        self.guaranteed = guaranteed;
        Ok(())
    }

    /// Stored limits plus the guaranteed floor.
    pub fn effective(&self, account: AccountName) -> EffectiveResources {
        let stored = self.get(account);
        let floor = self.guaranteed;
        EffectiveResources {
            ram_bytes: Capacity::with_floor(stored.ram_bytes, floor.ram),
            net_weight: Capacity::with_floor(stored.net_weight, floor.net),
            cpu_weight: Capacity::with_floor(stored.cpu_weight, floor.cpu),
        }
    }

    /// Share of the NET or CPU pool: the account's weight plus the floor,
    /// over the sum of that quantity across every bounded account.
    ///
    /// Shares of all accounts add up to exactly one. `None` for unlimited
    /// accounts or an empty pool.
    pub fn bandwidth_share(&self, account: AccountName, kind: BandwidthKind) -> Option<ShareRatio> {
        let stored = self.get(account);
        let (weight, floor) = match kind {
            BandwidthKind::Net => (stored.net_weight, self.guaranteed.net),
            BandwidthKind::Cpu => (stored.cpu_weight, self.guaranteed.cpu),
        };
        if weight == UNLIMITED {
            return None;
        }
        let denominator = self.totals.effective_pool(kind, floor);
        if denominator == 0 {
            return None;
        }
        Some(ShareRatio {
            numerator: bounded(weight) + bounded(floor),
            denominator,
        })
    }

    /// Accounts with explicit records, in name order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountName, &ResourceLimits)> {
        self.limits.iter()
    }
}
