//! Configuration loading for Cadence.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.cadence/config.toml`)
//! 3. User config (`~/.cadence/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional; the system runs with sensible defaults
//! when no config exists. Scheduling constants (ease floor, interval bounds,
//! box bounds) are invariants of the algorithm and are deliberately not
//! configurable.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CadenceError, Result};

/// Main configuration struct for Cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Review session configuration.
    pub review: ReviewConfig,
    /// Storage location configuration.
    pub storage: StorageConfig,
}

/// Review session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewConfig {
    /// Maximum items recommended per review session.
    pub max_recommendations: u32,
}

/// Minimum valid max_recommendations value.
pub const MIN_MAX_RECOMMENDATIONS: u32 = 1;

impl ReviewConfig {
    /// Check if a max_recommendations value is valid (must be >= 1).
    ///
    /// A session size of 0 would make every review session empty.
    pub fn is_valid_max_recommendations(value: u32) -> bool {
        value >= MIN_MAX_RECOMMENDATIONS
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 20,
        }
    }
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the item data directory.
    ///
    /// Defaults to `<cadence_home>/items` when unset.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.cadence/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = cadence_home()?;
        let config_path = home.join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load project config from `.cadence/config.toml` in the given
    /// directory or the nearest ancestor that has one.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let root = find_project_root(cwd);
        let config_path = root.join(".cadence").join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| CadenceError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| CadenceError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // CADENCE_MAX_RECOMMENDATIONS
        if let Ok(val) = env::var("CADENCE_MAX_RECOMMENDATIONS") {
            match val.parse::<u32>() {
                Ok(n) => {
                    if ReviewConfig::is_valid_max_recommendations(n) {
                        self.review.max_recommendations = n;
                    } else {
                        eprintln!(
                            "Warning: Invalid CADENCE_MAX_RECOMMENDATIONS value '{}'. \
                            Must be >= {}. Using default '{}'.",
                            n, MIN_MAX_RECOMMENDATIONS, self.review.max_recommendations
                        );
                    }
                }
                Err(_) => eprintln!(
                    "Warning: Invalid CADENCE_MAX_RECOMMENDATIONS value '{}'. \
                    Expected a positive integer. Using default '{}'.",
                    val, self.review.max_recommendations
                ),
            }
        }

        // CADENCE_DATA_DIR
        if let Ok(val) = env::var("CADENCE_DATA_DIR") {
            if val.is_empty() {
                eprintln!("Warning: CADENCE_DATA_DIR is empty, ignoring.");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence: its non-default fields are
    /// applied to `self`, enabling additive layering of the precedence
    /// chain. A config cannot explicitly set a value back to the default to
    /// override a lower layer (the usual trade-off for not wrapping every
    /// field in `Option`).
    fn merge(mut self, other: Config) -> Self {
        let default_review = ReviewConfig::default();
        if other.review.max_recommendations != default_review.max_recommendations {
            self.review.max_recommendations = other.review.max_recommendations;
        }

        if other.storage.data_dir.is_some() {
            self.storage.data_dir = other.storage.data_dir;
        }

        self
    }

    /// Resolve the item data directory from this config.
    ///
    /// The explicit override wins; otherwise `<cadence_home>/items`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Some(dir.clone()),
            None => items_dir(),
        }
    }
}

/// Get the Cadence home directory.
///
/// Checks `CADENCE_HOME` first, then falls back to `~/.cadence`, then to a
/// temp-dir location for minimal environments without a home directory.
pub fn cadence_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("CADENCE_HOME") {
        if home.is_empty() {
            tracing::warn!("CADENCE_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("CADENCE_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".cadence"));
    }

    let fallback = env::temp_dir().join("cadence");
    tracing::warn!("HOME not set, using fallback location: {}", fallback.display());
    Some(fallback)
}

/// Get the item data directory, `<cadence_home>/items/`.
pub fn items_dir() -> Option<PathBuf> {
    cadence_home().map(|h| h.join("items"))
}

/// Get the session stats snapshot path, `<cadence_home>/stats.json`.
pub fn stats_snapshot_path() -> Option<PathBuf> {
    cadence_home().map(|h| h.join("stats.json"))
}

/// Find the project root for a given working directory.
///
/// Walks up the directory tree looking for an existing `.cadence/`
/// directory; falls back to the original directory when none is found.
pub fn find_project_root(cwd: &Path) -> PathBuf {
    for ancestor in cwd.ancestors() {
        if ancestor.join(".cadence").is_dir() {
            return ancestor.to_path_buf();
        }
    }
    cwd.to_path_buf()
}
