//! Order command implementation
//!
//! Implements `treebuild order` to print the build order of the requested
//! components without invoking the backend.

use std::path::Path;

use anyhow::Result;

use crate::cli::commands::ContextArgs;
use crate::cli::output::OutputConfig;
use crate::core::context::{BuildContext, ExecutionMode};
use crate::core::identifier::ComponentRequest;
use crate::core::plan;
use crate::core::store::RecipeStore;

/// Execute the order command
pub fn execute(
    root: &Path,
    requests: &[ComponentRequest],
    dot: bool,
    context: &ContextArgs,
    output: &OutputConfig,
) -> Result<()> {
    let settings = context.settings(root)?;
    let ctx = BuildContext::from_settings(&settings, ExecutionMode::Dry);
    let store = RecipeStore::new(root);

    let plan = plan::plan(&store, &ctx, requests)?;
    tracing::info!(
        "Planned {} components ({} implied)",
        plan.order.len(),
        plan.implied().len()
    );

    if dot {
        print!("{}", plan.graph.to_dot());
    } else if output.json {
        let order: Vec<String> = plan.order.iter().map(ToString::to_string).collect();
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        for id in &plan.order {
            println!("{id}");
        }
    }

    Ok(())
}
