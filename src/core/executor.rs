//! Build and publish execution
//!
//! Walks a computed build order one component at a time, handing each step
//! to an [`ExecutionBackend`]. Steps never overlap: the backend's local
//! cache is shared and not safe for concurrent use. The first failure stops
//! the walk; components already built or published stay that way.

use thiserror::Error;

use crate::core::context::BuildContext;
use crate::core::identifier::ComponentId;
use crate::error::ExecutionError;

/// Failure reported by a backend step
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct BackendFailure(pub String);

/// Performs the real work for a single component
///
/// `describe_*` render the equivalent command for dry runs and must not have
/// side effects.
#[allow(async_fn_in_trait)]
pub trait ExecutionBackend {
    /// Command line a build of `id` would run
    fn describe_build(&self, id: &ComponentId, ctx: &BuildContext) -> String;

    /// Command line a publish of `id` would run
    fn describe_publish(&self, id: &ComponentId, ctx: &BuildContext, destination: &str) -> String;

    /// Build and install `id` into the local cache
    async fn build(&self, id: &ComponentId, ctx: &BuildContext) -> Result<(), BackendFailure>;

    /// Upload `id` to `destination`
    async fn publish(
        &self,
        id: &ComponentId,
        ctx: &BuildContext,
        destination: &str,
    ) -> Result<(), BackendFailure>;
}

/// Drives a backend over a build order
pub struct Executor<'a, B: ExecutionBackend> {
    backend: &'a B,
    ctx: &'a BuildContext,
    quiet: bool,
}

impl<'a, B: ExecutionBackend> Executor<'a, B> {
    /// Create an executor for one run
    pub fn new(backend: &'a B, ctx: &'a BuildContext) -> Self {
        Self {
            backend,
            ctx,
            quiet: false,
        }
    }

    /// Suppress per-component progress lines
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn announce(&self, action: &str, id: &ComponentId, step: usize, total: usize) {
        if !self.quiet {
            println!("\n{action} component \"{id}\" ({step}/{total})...");
        }
    }

    /// Build every component in order
    pub async fn build_all(&self, order: &[ComponentId]) -> Result<usize, ExecutionError> {
        tracing::info!("Building {} components ({})", order.len(), self.ctx.mode);

        for (i, id) in order.iter().enumerate() {
            self.announce("Building", id, i + 1, order.len());

            if self.ctx.mode.is_dry() {
                eprintln!("{}", self.backend.describe_build(id, self.ctx));
                continue;
            }

            self.backend
                .build(id, self.ctx)
                .await
                .map_err(|e| ExecutionError::BuildFailed {
                    identifier: id.to_string(),
                    reason: e.0,
                })?;
            tracing::info!("Built component {id}");
        }

        Ok(order.len())
    }

    /// Publish every component in order
    pub async fn publish_all(
        &self,
        order: &[ComponentId],
        destination: &str,
    ) -> Result<usize, ExecutionError> {
        tracing::info!(
            "Publishing {} components to {destination} ({})",
            order.len(),
            self.ctx.mode
        );

        for (i, id) in order.iter().enumerate() {
            self.announce("Publishing", id, i + 1, order.len());

            if self.ctx.mode.is_dry() {
                eprintln!("{}", self.backend.describe_publish(id, self.ctx, destination));
                continue;
            }

            self.backend
                .publish(id, self.ctx, destination)
                .await
                .map_err(|e| ExecutionError::PublishFailed {
                    identifier: id.to_string(),
                    destination: destination.to_string(),
                    reason: e.0,
                })?;
            tracing::info!("Published component {id} to {destination}");
        }

        Ok(order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ExecutionMode;
    use std::cell::RefCell;

    /// Records calls and fails on a chosen component
    #[derive(Default)]
    struct RecordingBackend {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingBackend {
        fn failing_on(name: &'static str) -> Self {
            Self {
                fail_on: Some(name),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn step(&self, label: String, id: &ComponentId) -> Result<(), BackendFailure> {
            self.calls.borrow_mut().push(label);
            if self.fail_on == Some(id.name.as_str()) {
                return Err(BackendFailure("exit status: 1".into()));
            }
            Ok(())
        }
    }

    impl ExecutionBackend for RecordingBackend {
        fn describe_build(&self, id: &ComponentId, ctx: &BuildContext) -> String {
            format!("build {id}@{}", ctx.qualifier())
        }

        fn describe_publish(
            &self,
            id: &ComponentId,
            ctx: &BuildContext,
            destination: &str,
        ) -> String {
            format!("publish {id}@{} {destination}", ctx.qualifier())
        }

        async fn build(&self, id: &ComponentId, _ctx: &BuildContext) -> Result<(), BackendFailure> {
            self.step(format!("build {id}"), id)
        }

        async fn publish(
            &self,
            id: &ComponentId,
            _ctx: &BuildContext,
            destination: &str,
        ) -> Result<(), BackendFailure> {
            self.step(format!("publish {id} {destination}"), id)
        }
    }

    fn order() -> Vec<ComponentId> {
        vec![
            ComponentId::new("c", "1.0"),
            ComponentId::new("b", "1.0"),
            ComponentId::new("a", "1.0"),
        ]
    }

    fn ctx(mode: ExecutionMode) -> BuildContext {
        BuildContext::new("me", "stable", "default").with_mode(mode)
    }

    #[tokio::test]
    async fn test_live_builds_in_order() {
        let backend = RecordingBackend::default();
        let ctx = ctx(ExecutionMode::Live);
        let built = Executor::new(&backend, &ctx)
            .quiet(true)
            .build_all(&order())
            .await
            .unwrap();

        assert_eq!(built, 3);
        assert_eq!(backend.calls(), vec!["build c/1.0", "build b/1.0", "build a/1.0"]);
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_backend_calls() {
        let backend = RecordingBackend::default();
        let ctx = ctx(ExecutionMode::Dry);
        let executor = Executor::new(&backend, &ctx).quiet(true);

        assert_eq!(executor.build_all(&order()).await.unwrap(), 3);
        assert_eq!(executor.publish_all(&order(), "remote").await.unwrap(), 3);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_build_failure_stops_remaining() {
        let backend = RecordingBackend::failing_on("b");
        let ctx = ctx(ExecutionMode::Live);
        let err = Executor::new(&backend, &ctx)
            .quiet(true)
            .build_all(&order())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ExecutionError::BuildFailed {
                identifier: "b/1.0".into(),
                reason: "exit status: 1".into(),
            }
        );
        assert_eq!(backend.calls(), vec!["build c/1.0", "build b/1.0"]);
    }

    #[tokio::test]
    async fn test_publish_failure_stops_remaining() {
        let backend = RecordingBackend::failing_on("b");
        let ctx = ctx(ExecutionMode::Live);
        let err = Executor::new(&backend, &ctx)
            .quiet(true)
            .publish_all(&order(), "remote")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExecutionError::PublishFailed { ref identifier, .. } if identifier == "b/1.0"
        ));
        assert_eq!(
            backend.calls(),
            vec!["publish c/1.0 remote", "publish b/1.0 remote"]
        );
    }
}
