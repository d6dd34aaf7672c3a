//! Infrastructure layer
//!
//! Handles I/O with the outside world: the backend process and
//! per-user directories.

pub mod backend;
pub mod dirs;
