//! Configuration loading for the interactive match.
//!
//! Handles loading config from files and applying environment variable overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uct::UctConfig;

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Top-level configuration for the play binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub common: CommonConfig,
    pub search: SearchConfig,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            common: CommonConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
    /// Seed for the engine's random generator
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: 1,
        }
    }
}

/// Search budget and tuning knobs, mirrored onto `UctConfig`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// UCB1 exploration constant k
    pub exploration_constant: f32,
    /// Iteration budget, 0 = unlimited
    pub max_iterations: u32,
    /// Wall-clock budget in milliseconds, 0 = unlimited
    pub max_time_millis: u64,
    /// Maximum random-rollout depth per simulation
    pub rollout_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let defaults = UctConfig::default();
        Self {
            exploration_constant: defaults.exploration_constant,
            max_iterations: 1000,
            max_time_millis: defaults.max_time_millis,
            rollout_depth: defaults.rollout_depth,
        }
    }
}

impl SearchConfig {
    /// Convert to the engine's configuration type.
    pub fn to_uct_config(&self) -> UctConfig {
        UctConfig::default()
            .with_exploration(self.exploration_constant)
            .with_iterations(self.max_iterations)
            .with_time_millis(self.max_time_millis)
            .with_rollout_depth(self.rollout_depth)
    }
}

/// Load the configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by UCT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> PlayConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("UCT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from UCT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!("UCT_CONFIG={} not found, searching defaults", path.display());
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(PlayConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> PlayConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(PlayConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(PlayConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f32, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: UCT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: PlayConfig) -> PlayConfig {
    // Common
    env_override!(config, common.log_level, "UCT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "UCT_COMMON_SEED", parse);

    // Search
    env_override!(
        config,
        search.exploration_constant,
        "UCT_SEARCH_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        search.max_iterations,
        "UCT_SEARCH_MAX_ITERATIONS",
        parse
    );
    env_override!(
        config,
        search.max_time_millis,
        "UCT_SEARCH_MAX_TIME_MILLIS",
        parse
    );
    env_override!(
        config,
        search.rollout_depth,
        "UCT_SEARCH_ROLLOUT_DEPTH",
        parse
    );

    config
}
