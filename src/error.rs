//! Error types for treebuild
//!
//! Domain-specific error types using thiserror. Every failure is fatal for the
//! run that raised it; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Recipe tree enumeration and lookup errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The recipe root directory does not exist
    #[error("Recipe root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// A component has no versioned recipes
    #[error("No available versions for component '{name}'")]
    NoVersionsAvailable { name: String },

    /// No descriptor exists for an exact identifier
    #[error("No recipe found for component '{identifier}'")]
    RecipeNotFound { identifier: String },

    /// IO error while scanning the tree
    #[error("IO error for '{}': {error}", path.display())]
    Io { path: PathBuf, error: String },
}

/// Recipe descriptor loading errors
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Descriptor could not be read
    #[error("Failed to read recipe '{}': {error}", path.display())]
    Read { path: PathBuf, error: String },

    /// Descriptor is not valid TOML or misses required fields
    #[error("Malformed recipe for '{identifier}': {error}")]
    Parse { identifier: String, error: String },

    /// A requirement does not follow `name/version[@namespace/channel]`
    #[error("Recipe '{identifier}' declares an invalid reference '{reference}'")]
    InvalidReference {
        identifier: String,
        reference: String,
    },

    /// `[recipe]` name/version disagree with the directory layout
    #[error("Recipe at '{identifier}' declares itself as '{declared}'")]
    Mismatch {
        identifier: String,
        declared: String,
    },

    /// The running treebuild does not satisfy the recipe's tool constraint
    #[error("Recipe '{identifier}' requires treebuild {constraint} (running {current})")]
    ToolVersion {
        identifier: String,
        constraint: String,
        current: String,
    },
}

/// Component request parsing errors
#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    /// No components were requested
    #[error("No components requested")]
    Empty,

    /// Request is neither `name` nor `name==version`
    #[error("Malformed component request '{request}': expected NAME or NAME==VERSION")]
    Malformed { request: String },
}

/// Build order scheduling errors
#[derive(Error, Debug, PartialEq)]
pub enum ResolverError {
    /// Circular dependency detected
    #[error("Circular dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

/// Backend execution errors
#[derive(Error, Debug, PartialEq)]
pub enum ExecutionError {
    /// The backend reported a failed build
    #[error("Build failed for component '{identifier}': {reason}")]
    BuildFailed { identifier: String, reason: String },

    /// The backend reported a failed publish
    #[error("Publish failed for component '{identifier}' to '{destination}': {reason}")]
    PublishFailed {
        identifier: String,
        destination: String,
        reason: String,
    },

    /// The backend program is not installed
    #[error("Backend program '{program}' not found in PATH")]
    BackendUnavailable { program: String },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: String, error: String },
}

/// Top-level treebuild error type
#[derive(Error, Debug)]
pub enum TreebuildError {
    /// Recipe store error
    #[error("Resolution error: {0}")]
    Store(#[from] StoreError),

    /// Request error
    #[error("Resolution error: {0}")]
    Request(#[from] RequestError),

    /// Recipe loading error
    #[error("Recipe load error: {0}")]
    Recipe(#[from] RecipeError),

    /// Resolver error
    #[error("Scheduling error: {0}")]
    Resolver(#[from] ResolverError),

    /// Execution error
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
