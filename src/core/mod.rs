//! Core business logic module
//!
//! Recipe discovery, introspection, graph construction and scheduling.
//! Process execution is delegated to [`crate::infra`] through
//! [`executor::ExecutionBackend`].
//!
//! # Submodules
//!
//! - [`identifier`] - Component identifiers, references and requests
//! - [`version`] - Natural version ordering and tool version checks
//! - [`context`] - Build context (namespace, channel, profile, mode)
//! - [`recipe`] - Recipe descriptors and the requirements hook
//! - [`store`] - Recipe tree enumeration and loading
//! - [`introspect`] - Dependency extraction from recipes
//! - [`graph`] - Dependency graph construction
//! - [`resolver`] - Build order scheduling and cycle detection
//! - [`executor`] - Build and publish drivers
//! - [`plan`] - Request-to-order planning

pub mod context;
pub mod executor;
pub mod graph;
pub mod identifier;
pub mod introspect;
pub mod plan;
pub mod recipe;
pub mod resolver;
pub mod store;
pub mod version;
