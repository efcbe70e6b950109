//! # Name List Governance
//!
//! Actor blacklist, contract blacklist and resource greylist.
//!
//! Lists are ordered sets: membership is all that matters and enumeration
//! order is the account-name order on every node.

use crate::error::{GovernanceError, GovernanceResult};
use serde::{Deserialize, Serialize};
use shared_types::AccountName;
use std::collections::BTreeSet;
use std::fmt;

/// Which list an update targets. Discriminants match the host call ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameListKind {
    ActorBlacklist = 1,
    ContractBlacklist = 2,
    ResourceGreylist = 3,
}

impl TryFrom<i64> for NameListKind {
    type Error = GovernanceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NameListKind::ActorBlacklist),
            2 => Ok(NameListKind::ContractBlacklist),
            3 => Ok(NameListKind::ResourceGreylist),
            other => Err(GovernanceError::invalid(
                "list",
                format!("unknown name list {other}"),
            )),
        }
    }
}

impl fmt::Display for NameListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameListKind::ActorBlacklist => "actor_blacklist",
            NameListKind::ContractBlacklist => "contract_blacklist",
            NameListKind::ResourceGreylist => "resource_greylist",
        })
    }
}

/// Update action. Discriminants match the host call ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameListAction {
    Insert = 1,
    Remove = 2,
}

impl TryFrom<i64> for NameListAction {
    type Error = GovernanceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NameListAction::Insert),
            2 => Ok(NameListAction::Remove),
            other => Err(GovernanceError::invalid(
                "action",
                format!("unknown name list action {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameLists {
    actor_blacklist: BTreeSet<AccountName>,
    contract_blacklist: BTreeSet<AccountName>,
    resource_greylist: BTreeSet<AccountName>,
}

impl NameLists {
    pub fn list(&self, kind: NameListKind) -> &BTreeSet<AccountName> {
        match kind {
            NameListKind::ActorBlacklist => &self.actor_blacklist,
            NameListKind::ContractBlacklist => &self.contract_blacklist,
            NameListKind::ResourceGreylist => &self.resource_greylist,
        }
    }

    fn list_mut(&mut self, kind: NameListKind) -> &mut BTreeSet<AccountName> {
        match kind {
            NameListKind::ActorBlacklist => &mut self.actor_blacklist,
            NameListKind::ContractBlacklist => &mut self.contract_blacklist,
            NameListKind::ResourceGreylist => &mut self.resource_greylist,
        }
    }

    pub fn contains(&self, kind: NameListKind, account: AccountName) -> bool {
        self.list(kind).contains(&account)
    }

    /// Apply `action` to every member. Returns how many memberships changed.
    pub fn apply(
        &mut self,
        kind: NameListKind,
        action: NameListAction,
        members: &[AccountName],
    ) -> usize {
        let list = self.list_mut(kind);
        members
            .iter()
            .filter(|member| match action {
                NameListAction::Insert => list.insert(**member),
                NameListAction::Remove => list.remove(*member),
            })
            .count()
    }
}

/// Reject a batch larger than `max_batch`.
pub fn check_batch_size(members: &[AccountName], max_batch: usize) -> GovernanceResult<()> {
    if members.len() > max_batch {
        return Err(GovernanceError::invalid(
            "data",
            format!(
                "{} members exceeds the per-call limit of {max_batch}",
                members.len()
            ),
        ));
    }
    Ok(())
}
