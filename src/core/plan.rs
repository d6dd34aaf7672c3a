//! Build planning
//!
//! Turns command-line requests into a build order: resolve versions, expand
//! the dependency graph, schedule it. Nothing here touches the backend, so a
//! plan is identical for dry and live runs.

use crate::core::context::BuildContext;
use crate::core::graph::{self, DependencyGraph};
use crate::core::identifier::{ComponentId, ComponentRequest};
use crate::core::introspect::RecipeIntrospector;
use crate::core::resolver::{self, BuildOrder};
use crate::core::store::{RecipeSource, RecipeStore};
use crate::error::{RequestError, TreebuildError};

/// Result of planning one run
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Identifiers resolved from the requests, in request order
    pub requested: Vec<ComponentId>,
    /// Full transitive dependency graph
    pub graph: DependencyGraph,
    /// Scheduled build order
    pub order: BuildOrder,
}

impl BuildPlan {
    /// Components pulled in only as dependencies
    pub fn implied(&self) -> Vec<&ComponentId> {
        self.order
            .iter()
            .filter(|id| !self.requested.contains(id))
            .collect()
    }
}

/// Plan a run over resolved identifiers using any recipe source
pub fn plan_identifiers(
    source: &dyn RecipeSource,
    ctx: &BuildContext,
    requested: Vec<ComponentId>,
) -> Result<BuildPlan, TreebuildError> {
    if requested.is_empty() {
        return Err(RequestError::Empty.into());
    }

    let mut introspector = RecipeIntrospector::new(source, ctx);
    let graph = graph::build_graph(&mut introspector, &requested)?;
    let order = resolver::compute_order(&graph)?;

    Ok(BuildPlan {
        requested,
        graph,
        order,
    })
}

/// Plan a run for command-line requests against a recipe tree
pub fn plan(
    store: &RecipeStore,
    ctx: &BuildContext,
    requests: &[ComponentRequest],
) -> Result<BuildPlan, TreebuildError> {
    if requests.is_empty() {
        return Err(RequestError::Empty.into());
    }

    let requested = store.resolve_requests(requests)?;
    tracing::info!(
        "Resolved {} requested components under {}",
        requested.len(),
        ctx.qualifier()
    );
    plan_identifiers(store, ctx, requested)
}
