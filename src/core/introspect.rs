//! Recipe introspection
//!
//! Extracts the in-tree dependencies of one recipe: its static requirements
//! followed by whatever its requirements hook appends, restricted to
//! references qualified with the active namespace/channel. Everything else is
//! left to the execution backend.

use std::collections::HashMap;

use crate::core::context::BuildContext;
use crate::core::identifier::{ComponentId, QualifiedReference};
use crate::core::recipe::{RecipeContext, RequirementCollector};
use crate::core::store::RecipeSource;
use crate::error::{RecipeError, TreebuildError};

/// Every reference a recipe declares, static ones first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    /// Declared references in declaration order
    pub references: Vec<QualifiedReference>,
}

impl DependencyManifest {
    /// Identifiers of references qualified with `namespace/channel`
    ///
    /// The qualifier is stripped and duplicates are dropped, keeping the
    /// first occurrence.
    pub fn in_tree(&self, namespace: &str, channel: &str) -> Vec<ComponentId> {
        let mut deps: Vec<ComponentId> = Vec::new();
        for reference in &self.references {
            if !reference.is_in(namespace, channel) {
                tracing::debug!("Ignoring out-of-tree reference {reference}");
                continue;
            }
            if !deps.contains(&reference.component) {
                deps.push(reference.component.clone());
            }
        }
        deps
    }
}

/// Loads recipes and reports their in-tree dependencies
///
/// Results are cached per identifier for the lifetime of the introspector,
/// which is one orchestration run.
pub struct RecipeIntrospector<'a> {
    source: &'a dyn RecipeSource,
    namespace: String,
    channel: String,
    cache: HashMap<ComponentId, Vec<ComponentId>>,
}

impl<'a> RecipeIntrospector<'a> {
    /// Create an introspector filtering on the context's namespace/channel
    pub fn new(source: &'a dyn RecipeSource, ctx: &BuildContext) -> Self {
        Self {
            source,
            namespace: ctx.namespace.clone(),
            channel: ctx.channel.clone(),
            cache: HashMap::new(),
        }
    }

    /// Full, unfiltered manifest of a recipe
    pub fn manifest(&self, id: &ComponentId) -> Result<DependencyManifest, TreebuildError> {
        let recipe = self.source.load(id)?;

        let mut declared = recipe.static_requires();
        let ctx = RecipeContext::new(id, &self.namespace, &self.channel);
        let mut collector = RequirementCollector::new();
        recipe.requirements(&ctx, &mut collector);
        declared.extend(collector.into_references());

        let references = declared
            .into_iter()
            .map(|raw| {
                QualifiedReference::parse(&raw).ok_or_else(|| RecipeError::InvalidReference {
                    identifier: id.to_string(),
                    reference: raw,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DependencyManifest { references })
    }

    /// In-tree dependencies of `id`, qualifiers stripped
    pub fn get_dependencies(
        &mut self,
        id: &ComponentId,
    ) -> Result<Vec<ComponentId>, TreebuildError> {
        if let Some(deps) = self.cache.get(id) {
            return Ok(deps.clone());
        }

        let deps = self.manifest(id)?.in_tree(&self.namespace, &self.channel);
        tracing::debug!(
            "{id} depends on [{}]",
            deps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        self.cache.insert(id.clone(), deps.clone());
        Ok(deps)
    }
}
