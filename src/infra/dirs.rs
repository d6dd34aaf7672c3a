//! User configuration directory discovery
//!
//! Follows the XDG Base Directory Specification on Linux and standard
//! locations on macOS. `TREEBUILD_CONFIG_DIR` overrides the platform default.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "TREEBUILD_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "treebuild";

/// Platform-specific directory provider
#[derive(Debug, Clone)]
pub struct TreebuildDirs {
    config_dir: PathBuf,
}

impl TreebuildDirs {
    /// Resolve directories from the environment, then platform defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/treebuild` or `~/.config/treebuild`
    /// - macOS: `~/Library/Application Support/treebuild`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path to the user `config.toml`
    #[must_use]
    pub fn user_config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for TreebuildDirs {
    fn default() -> Self {
        Self::new()
    }
}
