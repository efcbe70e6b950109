//! # Governance Genesis
//!
//! Seeds the governance state a chain starts from: privileged accounts, the
//! initial producer schedule (version 0, directly active), chain parameters,
//! the guaranteed floor and any preset resource limits.
//!
//! ```json
//! {
//!   "privileged_accounts": ["eosio"],
//!   "initial_schedule": [
//!     { "producer_name": "eosio",
//!       "authority": { "threshold": 1, "keys": [{ "key": "ab..ab", "weight": 1 }] } }
//!   ]
//! }
//! ```

use crate::domain::{
    validate_producers, BlockchainParameters, GovernanceState, GuaranteedMinimumResources,
    ProducerAuthority, ProducerSchedule, ResourceLimits,
};
use serde::{Deserialize, Serialize};
use shared_types::{AccountName, CodecError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Genesis loading errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("Failed to read genesis file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse genesis JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to encode genesis state: {0}")]
    Encode(#[from] CodecError),

    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisResourceLimits {
    pub account: AccountName,
    pub ram_bytes: i64,
    pub net_weight: i64,
    pub cpu_weight: i64,
}

/// Governance section of a genesis file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisGovernance {
    pub privileged_accounts: Vec<AccountName>,
    pub initial_schedule: Vec<ProducerAuthority>,
    #[serde(default)]
    pub parameters: BlockchainParameters,
    #[serde(default)]
    pub guaranteed_minimum: GuaranteedMinimumResources,
    #[serde(default)]
    pub resource_limits: Vec<GenesisResourceLimits>,
}

impl GenesisGovernance {
    /// Single producer that is also the only privileged account.
    pub fn single_producer(producer: ProducerAuthority) -> Self {
        Self {
            privileged_accounts: vec![producer.producer_name],
            initial_schedule: vec![producer],
            parameters: BlockchainParameters::default(),
            guaranteed_minimum: GuaranteedMinimumResources::default(),
            resource_limits: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate and produce the state at block 0.
    pub fn build_state(&self, max_producers: usize) -> Result<GovernanceState, GenesisError> {
        let invalid = |e: crate::error::GovernanceError| GenesisError::InvalidConfig(e.to_string());

        if self.privileged_accounts.is_empty() {
            return Err(GenesisError::InvalidConfig(
                "at least one privileged account is required".into(),
            ));
        }
        validate_producers(&self.initial_schedule, max_producers).map_err(invalid)?;
        self.parameters.validate().map_err(invalid)?;

        let mut state = GovernanceState::with_genesis_schedule(ProducerSchedule {
            version: 0,
            producers: self.initial_schedule.clone(),
        });
        state.parameters = self.parameters.clone();
        state
            .resources
            .set_guaranteed_minimum(self.guaranteed_minimum)
            .map_err(invalid)?;
        for account in &self.privileged_accounts {
            state.privileges.set_privileged(*account, true);
        }
        for entry in &self.resource_limits {
            let limits = ResourceLimits::new(entry.ram_bytes, entry.net_weight, entry.cpu_weight);
            state
                .resources
                .set(entry.account, limits, 0)
                .map_err(invalid)?;
        }

        let digest = state.state_digest()?;
        info!(
            "[qc-18] Genesis governance: {} privileged accounts, {} producers, digest {}",
            self.privileged_accounts.len(),
            self.initial_schedule.len(),
            hex::encode(digest)
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleState;
    use shared_types::PublicKey;

    const GENESIS: &str = r#"{
        "privileged_accounts": ["eosio", "eosio.msig"],
        "initial_schedule": [
            {
                "producer_name": "eosio",
                "authority": {
                    "threshold": 1,
                    "keys": [{
                        "key": "0101010101010101010101010101010101010101010101010101010101010101",
                        "weight": 1
                    }]
                }
            }
        ],
        "guaranteed_minimum": { "ram": 1024, "cpu": 10, "net": 10 },
        "resource_limits": [
            { "account": "alice", "ram_bytes": 4096, "net_weight": 1, "cpu_weight": 1 }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let genesis = GenesisGovernance::from_json_str(GENESIS).unwrap();
        let state = genesis.build_state(21).unwrap();

        assert!(state.privileges.is_privileged("eosio.msig".parse().unwrap()));
        assert_eq!(state.schedules.active().version, 0);
        assert_eq!(state.schedules.state(), ScheduleState::None);
        assert_eq!(state.parameters, BlockchainParameters::default());
        assert_eq!(
            state.resources.get("alice".parse().unwrap()).as_tuple(),
            (4096, 1, 1)
        );
        assert_eq!(state.resources.guaranteed_minimum().ram, 1024);
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let mut genesis = GenesisGovernance::single_producer(ProducerAuthority::new(
            "eosio".parse().unwrap(),
            PublicKey([1; 32]),
        ));
        genesis.initial_schedule.clear();
        assert!(matches!(
            genesis.build_state(21),
            Err(GenesisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GenesisGovernance::from_json_str("{"),
            Err(GenesisError::Parse(_))
        ));
    }
}
