//! Build command implementation
//!
//! Implements `treebuild build` to resolve, order, build and optionally
//! publish components.

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::json;

use crate::cli::commands::ContextArgs;
use crate::cli::output::{create_spinner, status, OutputConfig};
use crate::core::context::{BuildContext, ExecutionMode};
use crate::core::executor::Executor;
use crate::core::identifier::ComponentRequest;
use crate::core::plan;
use crate::core::store::RecipeStore;
use crate::infra::backend::ProcessBackend;

/// Build options
pub struct BuildOptions {
    /// Requested components
    pub requests: Vec<ComponentRequest>,
    /// Print backend commands instead of running them
    pub dry_run: bool,
    /// `--publish` flag: absent, bare, or with a destination
    pub publish: Option<Option<String>>,
    /// Context overrides
    pub context: ContextArgs,
}

/// Execute the build command
pub async fn execute(root: &Path, options: BuildOptions, output: &OutputConfig) -> Result<()> {
    let settings = options.context.settings(root)?;
    let mode = ExecutionMode::from_dry_run(options.dry_run);
    let ctx = BuildContext::from_settings(&settings, mode);

    let destination = match options.publish {
        None => None,
        Some(Some(dest)) => Some(dest),
        Some(None) => match settings.publish.destination.clone() {
            Some(dest) => Some(dest),
            None => bail!("--publish was given without a destination and none is configured"),
        },
    };

    let store = RecipeStore::new(root);
    let spinner = create_spinner("Resolving dependencies...", output);
    let planned = plan::plan(&store, &ctx, &options.requests);
    spinner.finish_and_clear();
    let plan = planned?;

    if output.json {
        let order: Vec<String> = plan.order.iter().map(ToString::to_string).collect();
        println!(
            "{}",
            json!({
                "mode": mode.to_string(),
                "namespace": ctx.namespace,
                "channel": ctx.channel,
                "order": order,
                "publish": destination,
            })
        );
    } else if !output.quiet {
        let suffix = destination
            .as_ref()
            .map(|d| format!(" and published to \"{d}\""))
            .unwrap_or_default();
        println!("The following components will be built{suffix}:");
        for id in &plan.order {
            println!("\t{id}");
        }
    }

    let backend = ProcessBackend::new(settings.backend_program(), store);
    if !mode.is_dry() {
        let program = backend.ensure_available()?;
        tracing::info!("Using backend {}", program.display());
    }

    let executor = Executor::new(&backend, &ctx).quiet(!output.show_progress());
    let built = executor.build_all(&plan.order).await?;

    let published = match &destination {
        Some(dest) => executor.publish_all(&plan.order, dest).await?,
        None => 0,
    };

    if output.show_progress() {
        let verb = if mode.is_dry() { "Planned" } else { "Built" };
        println!("\n{} {verb} {built} components", status::SUCCESS);
        if let Some(dest) = &destination {
            println!("{} Published {published} components to \"{dest}\"", status::SUCCESS);
        }
    }

    Ok(())
}
