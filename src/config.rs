//! Layered configuration for the matching engine.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`PAIR_ROTATION_*`, e.g. `PAIR_ROTATION_SEED=7`)
//! 2. An explicit config file, or `pair-rotation.toml` in the working directory
//! 3. Built-in defaults

use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::{ExactLimits, MAX_EXHAUSTIVE_THRESHOLD};

/// Project-local config file picked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pair-rotation.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PAIR_ROTATION_";

const fn default_max_restarts() -> usize {
    20
}

const fn default_max_local_attempts() -> usize {
    10
}

const fn default_exhaustive_threshold() -> usize {
    10
}

const fn default_heuristic_attempts() -> usize {
    1_000
}

const fn default_exact_node_limit() -> usize {
    200_000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchConfig {
    /// Fresh shuffles the exact search may start from.
    #[serde(default = "default_max_restarts")]
    pub max_restarts: usize,

    /// Random pairs drawn at each level of the exact search.
    #[serde(default = "default_max_local_attempts")]
    pub max_local_attempts: usize,

    /// Rosters up to this size are enumerated exhaustively; larger ones are sampled.
    #[serde(default = "default_exhaustive_threshold")]
    pub exhaustive_threshold: usize,

    /// Shuffled plans drawn by the heuristic search.
    #[serde(default = "default_heuristic_attempts")]
    pub heuristic_attempts: usize,

    /// Recursion nodes the exact search may visit across all restarts.
    #[serde(default = "default_exact_node_limit")]
    pub exact_node_limit: usize,

    /// Wall-clock limit for the whole run.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_restarts: default_max_restarts(),
            max_local_attempts: default_max_local_attempts(),
            exhaustive_threshold: default_exhaustive_threshold(),
            heuristic_attempts: default_heuristic_attempts(),
            exact_node_limit: default_exact_node_limit(),
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Load and validate configuration from every source.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain. A missing file is skipped.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let nonzero = [
            ("max_restarts", self.max_restarts),
            ("max_local_attempts", self.max_local_attempts),
            ("heuristic_attempts", self.heuristic_attempts),
            ("exact_node_limit", self.exact_node_limit),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        if self.exhaustive_threshold > MAX_EXHAUSTIVE_THRESHOLD {
            return Err(ConfigError::InvalidValue {
                field: "exhaustive_threshold".to_string(),
                reason: format!(
                    "{} exceeds {MAX_EXHAUSTIVE_THRESHOLD}; enumeration cost grows factorially",
                    self.exhaustive_threshold
                ),
            });
        }

        Ok(())
    }

    pub fn exact_limits(&self) -> ExactLimits {
        ExactLimits {
            max_restarts: self.max_restarts,
            max_local_attempts: self.max_local_attempts,
            node_limit: self.exact_node_limit,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = MatchConfig::default();
        assert_eq!(config.max_restarts, 20);
        assert_eq!(config.max_local_attempts, 10);
        assert_eq!(config.exhaustive_threshold, 10);
        assert_eq!(config.heuristic_attempts, 1_000);
        assert_eq!(config.time_limit(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_and_env_layers_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r"
                    heuristic_attempts = 50
                    seed = 9
                ",
            )?;
            jail.set_env("PAIR_ROTATION_SEED", "11");
            jail.set_env("PAIR_ROTATION_TIME_LIMIT_MS", "250");

            let config = MatchConfig::load(None).expect("config");
            assert_eq!(config.heuristic_attempts, 50);
            assert_eq!(config.seed, Some(11));
            assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
            assert_eq!(config.max_restarts, 20);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_is_used() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "max_local_attempts = 3")?;
            let config = MatchConfig::load(Some(Path::new("custom.toml"))).expect("config");
            assert_eq!(config.max_local_attempts, 3);
            Ok(())
        });
    }

    #[test]
    fn rejects_oversized_threshold_and_zero_caps() {
        let config = MatchConfig {
            exhaustive_threshold: 20,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "exhaustive_threshold"
        ));

        let config = MatchConfig {
            heuristic_attempts: 0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "max_restarts = \"many\"")?;
            assert!(matches!(MatchConfig::load(None), Err(ConfigError::Figment(_))));
            Ok(())
        });
    }
}
