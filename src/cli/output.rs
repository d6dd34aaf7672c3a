//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners,
//! status-prefixed messages, and errors to the user.

use indicatif::{ProgressBar, ProgressStyle};

/// Output preferences from the global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Only errors are printed
    pub quiet: bool,
    /// Machine-readable output on stdout
    pub json: bool,
    /// Verbosity level (0 = warn, 1 = info, 2+ = debug)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Whether human-oriented progress should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing level for this verbosity
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Create a spinner for operations with unknown duration
///
/// Returns a hidden spinner when progress output is disabled.
pub fn create_spinner(message: &str, output: &OutputConfig) -> ProgressBar {
    if !output.show_progress() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an error and its causes to stderr
///
/// Causes whose message is already part of the previous line are skipped.
pub fn display_error(error: &anyhow::Error) {
    let mut shown = error.to_string();
    eprintln!("{} error: {shown}", status::ERROR);
    for cause in error.chain().skip(1) {
        let message = cause.to_string();
        if !shown.contains(&message) {
            eprintln!("  caused by: {message}");
        }
        shown = message;
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
