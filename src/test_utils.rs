//! Test utilities
//!
//! An in-memory recipe source and proptest generators.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::identifier::ComponentId;
use crate::core::recipe::{Recipe, RecipeContext, RequirementCollector};
use crate::core::store::RecipeSource;
use crate::error::{StoreError, TreebuildError};

/// Recipe built from string slices
#[derive(Debug, Clone)]
struct MemoryRecipe {
    requires: Vec<String>,
    hook: Vec<String>,
}

impl Recipe for MemoryRecipe {
    fn static_requires(&self) -> Vec<String> {
        self.requires.clone()
    }

    fn requirements(&self, ctx: &RecipeContext, collector: &mut RequirementCollector) {
        for reference in &self.hook {
            collector.requires(ctx.expand(reference));
        }
    }
}

/// Recipe source backed by a map, counting loads per identifier
#[derive(Debug, Default)]
pub struct MemorySource {
    recipes: HashMap<ComponentId, MemoryRecipe>,
    loads: RefCell<HashMap<ComponentId, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe with static requirements and hook templates
    #[must_use]
    pub fn recipe(mut self, name: &str, version: &str, requires: &[&str], hook: &[&str]) -> Self {
        self.recipes.insert(
            ComponentId::new(name, version),
            MemoryRecipe {
                requires: requires.iter().map(ToString::to_string).collect(),
                hook: hook.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    /// How often `id` was loaded
    pub fn loads(&self, id: &ComponentId) -> usize {
        self.loads.borrow().get(id).copied().unwrap_or(0)
    }
}

impl RecipeSource for MemorySource {
    fn load(&self, id: &ComponentId) -> Result<Box<dyn Recipe>, TreebuildError> {
        *self.loads.borrow_mut().entry(id.clone()).or_default() += 1;
        let recipe = self
            .recipes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::RecipeNotFound {
                identifier: id.to_string(),
            })?;
        Ok(Box::new(recipe))
    }
}

pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid component name
    pub fn component_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,20}"
    }

    /// Generate a dotted numeric version
    pub fn dotted_version() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..100, 0u32..1000)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::identifier::{ComponentRequest, QualifiedReference};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_generated_references_parse(
            name in component_name(),
            version in dotted_version(),
            namespace in component_name(),
            channel in component_name(),
        ) {
            let raw = format!("{name}/{version}@{namespace}/{channel}");
            let reference = QualifiedReference::parse(&raw).unwrap();
            prop_assert!(reference.is_in(&namespace, &channel));
            prop_assert_eq!(reference.to_string(), raw);
        }

        #[test]
        fn prop_exact_requests_parse(name in component_name(), version in dotted_version()) {
            let request: ComponentRequest = format!("{name}=={version}").parse().unwrap();
            prop_assert!(matches!(
                request,
                ComponentRequest::Exact(id) if id.name == name && id.version == version
            ));
        }
    }
}
