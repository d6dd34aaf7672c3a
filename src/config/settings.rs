//! Layered runtime configuration
//!
//! Settings are read from up to two TOML files with the same schema:
//!
//! - the user config at `<config dir>/config.toml`
//! - the project config at `<recipe root>/treebuild.toml`
//!
//! Project values override user values; CLI flags override both, and the
//! compile-time [`defaults`](crate::config::defaults) fill whatever is left.
//! Missing files are treated as empty, malformed files are errors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::defaults;
use crate::error::ConfigError;
use crate::infra::dirs::TreebuildDirs;

/// Configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Build context settings
    #[serde(default)]
    pub context: ContextSettings,

    /// Execution backend settings
    #[serde(default)]
    pub backend: BackendSettings,

    /// Publish settings
    #[serde(default)]
    pub publish: PublishSettings,
}

/// Namespace, channel and profile applied to every component
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContextSettings {
    /// Namespace of in-tree components
    pub namespace: Option<String>,

    /// Channel of in-tree components
    pub channel: Option<String>,

    /// Backend build profile
    pub profile: Option<String>,
}

/// Execution backend settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackendSettings {
    /// Program invoked for build and publish steps
    pub program: Option<String>,
}

/// Publish settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublishSettings {
    /// Default destination when `--publish` is given without a value
    pub destination: Option<String>,
}

impl Settings {
    /// Load user settings followed by project settings for `root`
    pub fn load(dirs: &TreebuildDirs, root: &Path) -> Result<Self, ConfigError> {
        let user = Self::load_from_path(&dirs.user_config_path())?;
        let project = Self::load_from_path(&root.join(defaults::PROJECT_CONFIG_FILE))?;
        Ok(project.or(user))
    }

    /// Load settings from a specific path
    ///
    /// Returns the empty configuration if the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Combine two layers, values in `self` taking precedence
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            context: ContextSettings {
                namespace: self.context.namespace.or(lower.context.namespace),
                channel: self.context.channel.or(lower.context.channel),
                profile: self.context.profile.or(lower.context.profile),
            },
            backend: BackendSettings {
                program: self.backend.program.or(lower.backend.program),
            },
            publish: PublishSettings {
                destination: self.publish.destination.or(lower.publish.destination),
            },
        }
    }

    /// Effective namespace
    pub fn namespace(&self) -> &str {
        self.context
            .namespace
            .as_deref()
            .unwrap_or(defaults::DEFAULT_NAMESPACE)
    }

    /// Effective channel
    pub fn channel(&self) -> &str {
        self.context
            .channel
            .as_deref()
            .unwrap_or(defaults::DEFAULT_CHANNEL)
    }

    /// Effective profile
    pub fn profile(&self) -> &str {
        self.context
            .profile
            .as_deref()
            .unwrap_or(defaults::DEFAULT_PROFILE)
    }

    /// Effective backend program
    pub fn backend_program(&self) -> &str {
        self.backend
            .program
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BACKEND_PROGRAM)
    }
}
