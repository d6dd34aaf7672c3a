//! Treebuild - dependency-ordered builds for a tree of component recipes
//!
//! Given a directory of recipes laid out as `<root>/<name>/<version>/recipe.toml`,
//! this library discovers the in-tree dependencies of the requested components,
//! computes a deterministic build order, and drives an external build backend
//! (live or dry-run) through that order, optionally publishing the results.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Recipe model, dependency graph, scheduling and execution
//! - [`infra`] - Infrastructure layer (processes, directories)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
