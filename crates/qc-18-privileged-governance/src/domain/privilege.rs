//! Privilege registry: the set of accounts allowed to call governance
//! operations. Unknown accounts are unprivileged.

use serde::{Deserialize, Serialize};
use shared_types::AccountName;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeRegistry {
    privileged: BTreeSet<AccountName>,
}

impl PrivilegeRegistry {
    pub fn is_privileged(&self, account: AccountName) -> bool {
        self.privileged.contains(&account)
    }

    /// Idempotent. Returns whether the flag changed.
    pub fn set_privileged(&mut self, account: AccountName, is_priv: bool) -> bool {
        if is_priv {
            self.privileged.insert(account)
        } else {
            self.privileged.remove(&account)
        }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountName> {
        self.privileged.iter()
    }

    pub fn len(&self) -> usize {
        self.privileged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.privileged.is_empty()
    }
}
