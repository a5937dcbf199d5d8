//! Feed tuner configuration
//!
//! Loaded from a JSON/serde source or built from CLI flags; every field has
//! a default.

use serde::{Deserialize, Serialize};

use crate::engine::BoostPolicy;
use crate::persistence::STORAGE_KEY;

/// Configuration for a `FeedTuner`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Key the distribution is stored under (scope per user/installation)
    pub storage_key: String,
    /// Boost step, ceiling and floor
    pub policy: BoostPolicy,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            policy: BoostPolicy::default(),
        }
    }
}

impl TunerConfig {
    /// Config with a custom storage key and default policy
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TunerConfig::default();
        assert_eq!(config.storage_key, "feed_weights");
        assert_eq!(config.policy.step, 10);
        assert_eq!(config.policy.ceiling, 70);
        assert_eq!(config.policy.floor, 5);
        assert!(config.policy.reclamp_ceiling);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = TunerConfig::from_json(r#"{"policy": {"step": 5}}"#).unwrap();
        assert_eq!(config.storage_key, "feed_weights");
        assert_eq!(config.policy.step, 5);
        assert_eq!(config.policy.ceiling, 70);

        let config = TunerConfig::from_json(r#"{"storage_key": "alice.feed"}"#).unwrap();
        assert_eq!(config, TunerConfig::with_storage_key("alice.feed"));
    }
}
