//! # Governance Configuration
//!
//! Node-local limits and gates. None of these values are consensus state,
//! but every validating node must run with the same settings.
//!
//! ## Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `QC_GOV_MAX_PRODUCERS` | `max_producers` |
//! | `QC_GOV_MAX_PAYLOAD_BYTES` | `max_payload_bytes` |
//! | `QC_GOV_MAX_NAME_LIST_BATCH` | `max_name_list_batch` |
//! | `QC_GOV_MIN_UPGRADE_LEAD_BLOCKS` | `min_upgrade_lead_blocks` |
//! | `QC_GOV_ENFORCE_CALLER_PRIVILEGE` | `enforce_caller_privilege` |
//! | `QC_GOV_MAX_QUEUED_EVENTS` | `max_queued_events` |
//! | `QC_GOV_ACTIVE_OVERRIDE` | `active_override` (`disabled`, `enabled`, `bootstrap:<block>`) |

use shared_types::BlockNum;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnvValue { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Who may call `set_active_producers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveOverridePolicy {
    /// Never reachable.
    Disabled,
    /// Reachable only while the head block is `<= until_block`.
    Bootstrap { until_block: BlockNum },
    /// Always reachable by privileged callers (hard-fork recovery builds).
    Enabled,
}

impl ActiveOverridePolicy {
    pub fn allows(&self, head: BlockNum) -> bool {
        match *self {
            ActiveOverridePolicy::Disabled => false,
            ActiveOverridePolicy::Bootstrap { until_block } => head <= until_block,
            ActiveOverridePolicy::Enabled => true,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "disabled" => Some(Self::Disabled),
            "enabled" => Some(Self::Enabled),
            other => other
                .strip_prefix("bootstrap:")
                .and_then(|n| n.parse().ok())
                .map(|until_block| Self::Bootstrap { until_block }),
        }
    }
}

impl Default for ActiveOverridePolicy {
    fn default() -> Self {
        Self::Bootstrap { until_block: 1 }
    }
}

/// Privileged governance configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceConfig {
    /// Upper bound on producers in one schedule.
    pub max_producers: usize,
    /// Decode limit for any packed payload.
    pub max_payload_bytes: u64,
    /// Upper bound on members in one name-list update.
    pub max_name_list_batch: usize,
    /// Minimum distance between head and an upgrade target block.
    pub min_upgrade_lead_blocks: u32,
    /// Re-check `is_privileged(caller)` on every mutating call.
    pub enforce_caller_privilege: bool,
    pub active_override: ActiveOverridePolicy,
    /// Undrained notifications kept before the oldest are dropped.
    pub max_queued_events: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            max_producers: 125,
            max_payload_bytes: 64 * 1024,
            max_name_list_batch: 512,
            min_upgrade_lead_blocks: 100,
            enforce_caller_privilege: true,
            active_override: ActiveOverridePolicy::default(),
            max_queued_events: 4096,
        }
    }
}

impl GovernanceConfig {
    /// Configuration for tests and single-node devnets.
    pub fn devnet() -> Self {
        Self {
            min_upgrade_lead_blocks: 0,
            active_override: ActiveOverridePolicy::Enabled,
            ..Default::default()
        }
    }

    pub fn with_max_producers(mut self, max_producers: usize) -> Self {
        self.max_producers = max_producers;
        self
    }

    pub fn with_active_override(mut self, policy: ActiveOverridePolicy) -> Self {
        self.active_override = policy;
        self
    }

    pub fn with_caller_privilege_check(mut self, enforce: bool) -> Self {
        self.enforce_caller_privilege = enforce;
        self
    }

    pub fn with_min_upgrade_lead_blocks(mut self, blocks: u32) -> Self {
        self.min_upgrade_lead_blocks = blocks;
        self
    }

    pub fn with_max_queued_events(mut self, max: usize) -> Self {
        self.max_queued_events = max;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_producers == 0 {
            return Err(ConfigError::Invalid("max_producers must be positive".into()));
        }
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_payload_bytes must be positive".into(),
            ));
        }
        if self.max_name_list_batch == 0 {
            return Err(ConfigError::Invalid(
                "max_name_list_batch must be positive".into(),
            ));
        }
        if self.max_queued_events == 0 {
            return Err(ConfigError::Invalid(
                "max_queued_events must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("QC_GOV_MAX_PRODUCERS") {
            config.max_producers = parse_var("QC_GOV_MAX_PRODUCERS", &v)?;
        }
        if let Some(v) = lookup("QC_GOV_MAX_PAYLOAD_BYTES") {
            config.max_payload_bytes = parse_var("QC_GOV_MAX_PAYLOAD_BYTES", &v)?;
        }
        if let Some(v) = lookup("QC_GOV_MAX_NAME_LIST_BATCH") {
            config.max_name_list_batch = parse_var("QC_GOV_MAX_NAME_LIST_BATCH", &v)?;
        }
        if let Some(v) = lookup("QC_GOV_MIN_UPGRADE_LEAD_BLOCKS") {
            config.min_upgrade_lead_blocks = parse_var("QC_GOV_MIN_UPGRADE_LEAD_BLOCKS", &v)?;
        }
        if let Some(v) = lookup("QC_GOV_ENFORCE_CALLER_PRIVILEGE") {
            config.enforce_caller_privilege = v == "1" || v.to_lowercase() == "true";
        }
        if let Some(v) = lookup("QC_GOV_MAX_QUEUED_EVENTS") {
            config.max_queued_events = parse_var("QC_GOV_MAX_QUEUED_EVENTS", &v)?;
        }
        if let Some(v) = lookup("QC_GOV_ACTIVE_OVERRIDE") {
            config.active_override =
                ActiveOverridePolicy::parse(&v).ok_or(ConfigError::InvalidEnvValue {
                    var: "QC_GOV_ACTIVE_OVERRIDE",
                    value: v.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GovernanceConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enforce_caller_privilege);
        assert!(config.active_override.allows(1));
        assert!(!config.active_override.allows(2));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GovernanceConfig::from_lookup(lookup(&[
            ("QC_GOV_MAX_PRODUCERS", "21"),
            ("QC_GOV_ENFORCE_CALLER_PRIVILEGE", "false"),
            ("QC_GOV_ACTIVE_OVERRIDE", "bootstrap:10"),
            ("QC_GOV_MAX_QUEUED_EVENTS", "64"),
        ]))
        .unwrap();
        assert_eq!(config.max_producers, 21);
        assert_eq!(config.max_queued_events, 64);
        assert!(!config.enforce_caller_privilege);
        assert_eq!(
            config.active_override,
            ActiveOverridePolicy::Bootstrap { until_block: 10 }
        );
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(matches!(
            GovernanceConfig::from_lookup(lookup(&[("QC_GOV_MAX_PRODUCERS", "many")])),
            Err(ConfigError::InvalidEnvValue { .. })
        ));
        assert!(GovernanceConfig::from_lookup(lookup(&[("QC_GOV_ACTIVE_OVERRIDE", "sometimes")]))
            .is_err());
        assert!(matches!(
            GovernanceConfig::from_lookup(lookup(&[("QC_GOV_MAX_PRODUCERS", "0")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_override_policy() {
        assert!(!ActiveOverridePolicy::Disabled.allows(0));
        assert!(ActiveOverridePolicy::Enabled.allows(u32::MAX));
    }
}
