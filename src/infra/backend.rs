//! Process-backed execution backend
//!
//! Runs an external package tool (Conan-compatible command line by default)
//! once per component:
//!
//! - build: `<program> create <recipe-dir> <namespace>/<channel> --profile <profile>`
//! - publish: `<program> upload <name>/<version>@<namespace>/<channel> --all --confirm
//!   -r <destination>`

use std::path::PathBuf;

use tokio::process::Command;

use crate::core::context::BuildContext;
use crate::core::executor::{BackendFailure, ExecutionBackend};
use crate::core::identifier::ComponentId;
use crate::core::store::RecipeStore;
use crate::error::ExecutionError;

/// Quote one argument for a POSIX shell, leaving safe words untouched
pub fn shell_quote(arg: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c);
    if !arg.is_empty() && arg.chars().all(safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}

/// Backend invoking `program` as a child process
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    program: String,
    store: RecipeStore,
}

impl ProcessBackend {
    /// Create a backend running `program` against recipes in `store`
    pub fn new(program: impl Into<String>, store: RecipeStore) -> Self {
        Self {
            program: program.into(),
            store,
        }
    }

    /// Fail early if the program cannot be found
    pub fn ensure_available(&self) -> Result<PathBuf, ExecutionError> {
        which::which(&self.program).map_err(|_| ExecutionError::BackendUnavailable {
            program: self.program.clone(),
        })
    }

    fn recipe_dir(&self, id: &ComponentId) -> PathBuf {
        self.store
            .recipe_dir(id)
            .unwrap_or_else(|_| self.store.root().join(&id.name).join(&id.version))
    }

    /// Arguments of a build step
    pub fn build_args(&self, id: &ComponentId, ctx: &BuildContext) -> Vec<String> {
        vec![
            "create".to_string(),
            self.recipe_dir(id).display().to_string(),
            ctx.qualifier(),
            "--profile".to_string(),
            ctx.profile.clone(),
        ]
    }

    /// Arguments of a publish step
    pub fn publish_args(
        &self,
        id: &ComponentId,
        ctx: &BuildContext,
        destination: &str,
    ) -> Vec<String> {
        vec![
            "upload".to_string(),
            id.qualified(&ctx.namespace, &ctx.channel),
            "--all".to_string(),
            "--confirm".to_string(),
            "-r".to_string(),
            destination.to_string(),
        ]
    }

    fn render(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the program to completion
    ///
    /// The child's stdout is redirected to stderr; stdout carries only
    /// treebuild's own output.
    async fn run(&self, args: Vec<String>) -> Result<(), BackendFailure> {
        tracing::debug!("Running {}", self.render(&args));
        let status = Command::new(&self.program)
            .args(&args)
            .stdout(std::io::stderr())
            .status()
            .await
            .map_err(|e| BackendFailure(format!("failed to run '{}': {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(BackendFailure(format!("'{}' exited with {status}", self.program)))
        }
    }
}

impl ExecutionBackend for ProcessBackend {
    fn describe_build(&self, id: &ComponentId, ctx: &BuildContext) -> String {
        self.render(&self.build_args(id, ctx))
    }

    fn describe_publish(&self, id: &ComponentId, ctx: &BuildContext, destination: &str) -> String {
        self.render(&self.publish_args(id, ctx, destination))
    }

    async fn build(&self, id: &ComponentId, ctx: &BuildContext) -> Result<(), BackendFailure> {
        self.store
            .recipe_dir(id)
            .map_err(|e| BackendFailure(e.to_string()))?;
        self.run(self.build_args(id, ctx)).await
    }

    async fn publish(
        &self,
        id: &ComponentId,
        ctx: &BuildContext,
        destination: &str,
    ) -> Result<(), BackendFailure> {
        self.run(self.publish_args(id, ctx, destination)).await
    }
}
