//! Configuration and constants
//!
//! - [`defaults`] - Compile-time defaults
//! - [`settings`] - Layered runtime configuration (user and project files)

pub mod defaults;
pub mod settings;
