//! Recipe descriptors
//!
//! A recipe is pure data: a `recipe.toml` next to the sources it describes,
//! at `<root>/<name>/<version>/recipe.toml`:
//!
//! ```toml
//! [recipe]
//! name = "grpc"
//! version = "1.42.0"
//! requires = ["libcxx/ue4@adamrehn/profile"]
//!
//! [[requirements]]
//! reference = "protobuf/3.19.1@{namespace}/{channel}"
//! ```
//!
//! `requires` is taken literally. Each `[[requirements]]` entry is produced by
//! the recipe's requirements hook, which expands `{name}`, `{version}`,
//! `{namespace}` and `{channel}` from a [`RecipeContext`] and hands the result
//! to a [`RequirementCollector`].

use serde::{Deserialize, Serialize};

use crate::core::identifier::ComponentId;
use crate::core::version::{self, VersionError};
use crate::error::RecipeError;

/// Values a requirements hook may depend on
///
/// Carries no build session, so a hook can only describe dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeContext {
    /// Component name
    pub name: String,
    /// Component version
    pub version: String,
    /// Active namespace
    pub namespace: String,
    /// Active channel
    pub channel: String,
}

impl RecipeContext {
    /// Context for one identifier under `namespace/channel`
    pub fn new(id: &ComponentId, namespace: &str, channel: &str) -> Self {
        Self {
            name: id.name.clone(),
            version: id.version.clone(),
            namespace: namespace.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Expand `{name}`, `{version}`, `{namespace}` and `{channel}`
    pub fn expand(&self, template: &str) -> String {
        template
            .replace("{name}", &self.name)
            .replace("{version}", &self.version)
            .replace("{namespace}", &self.namespace)
            .replace("{channel}", &self.channel)
    }
}

/// In-memory accumulator for references appended by a requirements hook
#[derive(Debug, Default)]
pub struct RequirementCollector {
    references: Vec<String>,
}

impl RequirementCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one requirement
    pub fn requires(&mut self, reference: impl Into<String>) {
        self.references.push(reference.into());
    }

    /// Recorded references, in the order they were appended
    pub fn into_references(self) -> Vec<String> {
        self.references
    }
}

/// Dependency-declaring side of a recipe
pub trait Recipe {
    /// Statically declared references
    fn static_requires(&self) -> Vec<String>;

    /// Requirements hook
    ///
    /// The default declares nothing.
    fn requirements(&self, _ctx: &RecipeContext, _collector: &mut RequirementCollector) {}
}

/// Parsed `recipe.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDescriptor {
    /// Recipe metadata and static requirements
    pub recipe: RecipeMetadata,

    /// Hook-produced requirements
    #[serde(default)]
    pub requirements: Vec<DynamicRequirement>,
}

/// `[recipe]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeMetadata {
    /// Component name, must match the directory name
    pub name: String,

    /// Component version, must match the directory name
    pub version: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Semver constraint on the running treebuild
    #[serde(default)]
    pub tool_version: Option<String>,

    /// Static requirements
    #[serde(default)]
    pub requires: Vec<String>,
}

/// One `[[requirements]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DynamicRequirement {
    /// Reference template
    pub reference: String,
}

impl RecipeDescriptor {
    /// Parse a descriptor and check it against the identifier it was loaded for
    pub fn from_toml(content: &str, id: &ComponentId) -> Result<Self, RecipeError> {
        let descriptor: Self = toml::from_str(content).map_err(|e| RecipeError::Parse {
            identifier: id.to_string(),
            error: e.to_string(),
        })?;
        descriptor.validate(id)?;
        Ok(descriptor)
    }

    fn validate(&self, id: &ComponentId) -> Result<(), RecipeError> {
        if self.recipe.name != id.name || self.recipe.version != id.version {
            return Err(RecipeError::Mismatch {
                identifier: id.to_string(),
                declared: self.id().to_string(),
            });
        }

        if let Some(constraint) = &self.recipe.tool_version {
            let origin = format!("recipe '{id}'");
            version::check_tool_version(constraint, &origin).map_err(|e| {
                let constraint = match e {
                    VersionError::VersionMismatch { .. } => constraint.clone(),
                    other => format!("{constraint} ({other})"),
                };
                RecipeError::ToolVersion {
                    identifier: id.to_string(),
                    constraint,
                    current: version::CURRENT_VERSION.to_string(),
                }
            })?;
        }

        Ok(())
    }

    /// Identifier the descriptor declares
    pub fn id(&self) -> ComponentId {
        ComponentId::new(&self.recipe.name, &self.recipe.version)
    }
}

impl Recipe for RecipeDescriptor {
    fn static_requires(&self) -> Vec<String> {
        self.recipe.requires.clone()
    }

    fn requirements(&self, ctx: &RecipeContext, collector: &mut RequirementCollector) {
        for requirement in &self.requirements {
            collector.requires(ctx.expand(&requirement.reference));
        }
    }
}
