//! Build context
//!
//! One [`BuildContext`] is created per invocation and threaded through every
//! stage. It never changes once the run has started.

use std::fmt;

use crate::config::settings::Settings;

/// Whether backend steps are performed or only reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Print the equivalent backend command, run nothing
    Dry,
    /// Invoke the backend
    #[default]
    Live,
}

impl ExecutionMode {
    /// Mode for a `--dry-run` flag
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::Dry
        } else {
            Self::Live
        }
    }

    /// Whether this is a dry run
    pub fn is_dry(self) -> bool {
        self == Self::Dry
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dry => write!(f, "dry-run"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Namespace, channel, profile and mode for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Namespace of in-tree components
    pub namespace: String,
    /// Channel of in-tree components
    pub channel: String,
    /// Backend build profile
    pub profile: String,
    /// Execution mode
    pub mode: ExecutionMode,
}

impl BuildContext {
    /// Create a live context
    pub fn new(
        namespace: impl Into<String>,
        channel: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            channel: channel.into(),
            profile: profile.into(),
            mode: ExecutionMode::Live,
        }
    }

    /// Context from effective settings
    pub fn from_settings(settings: &Settings, mode: ExecutionMode) -> Self {
        Self::new(settings.namespace(), settings.channel(), settings.profile()).with_mode(mode)
    }

    /// Set the execution mode
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// `namespace/channel`, as passed to the backend
    pub fn qualifier(&self) -> String {
        format!("{}/{}", self.namespace, self.channel)
    }
}
