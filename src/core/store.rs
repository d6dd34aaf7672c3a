//! Recipe store
//!
//! Enumerates the `<root>/<name>/<version>/recipe.toml` layout, resolves
//! version queries, and loads descriptors for the introspector.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::RECIPE_FILE;
use crate::core::identifier::{ComponentId, ComponentRequest};
use crate::core::recipe::{Recipe, RecipeDescriptor};
use crate::core::version;
use crate::error::{RecipeError, StoreError, TreebuildError};

/// Anything that can hand out a recipe for an identifier
pub trait RecipeSource {
    /// Load the recipe for `id`
    fn load(&self, id: &ComponentId) -> Result<Box<dyn Recipe>, TreebuildError>;
}

/// Recipe tree on disk
#[derive(Debug, Clone)]
pub struct RecipeStore {
    root: PathBuf,
}

impl RecipeStore {
    /// Open a recipe tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(StoreError::RootNotFound {
                path: self.root.clone(),
            })
        }
    }

    /// `(name, version)` of every descriptor exactly `depth` levels below `dir`
    ///
    /// Symlinked component and version directories count as their link name.
    fn scan(dir: &Path, depth: usize) -> Result<Vec<(String, String)>, StoreError> {
        let mut found = Vec::new();
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(depth)
            .max_depth(depth);
        for entry in walker {
            let entry = entry.map_err(|e| StoreError::Io {
                path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
                error: e.to_string(),
            })?;
            if !entry.file_type().is_file() || entry.file_name() != RECIPE_FILE {
                continue;
            }

            let version_dir = entry.path().parent();
            let name_dir = version_dir.and_then(Path::parent);
            let name = name_dir.and_then(|p| p.file_name()).and_then(|n| n.to_str());
            let version = version_dir.and_then(|p| p.file_name()).and_then(|n| n.to_str());
            match (name, version) {
                (Some(name), Some(version)) => {
                    found.push((name.to_string(), version.to_string()));
                }
                _ => tracing::warn!("Skipping non UTF-8 recipe path {}", entry.path().display()),
            }
        }
        Ok(found)
    }

    /// Names of every component with at least one recipe
    pub fn list_available(&self) -> Result<BTreeSet<String>, StoreError> {
        self.ensure_root()?;
        let names = Self::scan(&self.root, 3)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        Ok(names)
    }

    /// Every available version of `name`, in natural order
    pub fn versions(&self, name: &str) -> Result<Vec<String>, StoreError> {
        self.ensure_root()?;
        let component_dir = self.root.join(name);
        if !component_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions: Vec<String> = Self::scan(&component_dir, 2)?
            .into_iter()
            .map(|(_, version)| version)
            .collect();
        versions.sort_by(|a, b| version::natural_cmp(a, b));
        Ok(versions)
    }

    /// Identifier of the naturally-highest version of `name`
    pub fn resolve_newest(&self, name: &str) -> Result<ComponentId, StoreError> {
        let versions = self.versions(name)?;
        let newest = version::newest(versions.iter().map(String::as_str)).ok_or_else(|| {
            StoreError::NoVersionsAvailable {
                name: name.to_string(),
            }
        })?;
        tracing::debug!("Resolved newest version of {name}: {newest}");
        Ok(ComponentId::new(name, newest))
    }

    /// Location of the descriptor for `id`
    pub fn recipe_path(&self, id: &ComponentId) -> Result<PathBuf, StoreError> {
        let path = self.root.join(&id.name).join(&id.version).join(RECIPE_FILE);
        if path.is_file() {
            Ok(path)
        } else {
            Err(StoreError::RecipeNotFound {
                identifier: id.to_string(),
            })
        }
    }

    /// Directory holding the recipe for `id`
    pub fn recipe_dir(&self, id: &ComponentId) -> Result<PathBuf, StoreError> {
        let path = self.recipe_path(id)?;
        Ok(path.parent().map_or_else(|| self.root.clone(), Path::to_path_buf))
    }

    /// Turn requests into identifiers, deduplicated in first-seen order
    pub fn resolve_requests(
        &self,
        requests: &[ComponentRequest],
    ) -> Result<Vec<ComponentId>, StoreError> {
        let mut resolved: Vec<ComponentId> = Vec::new();
        let mut push = |id: ComponentId| {
            if !resolved.contains(&id) {
                resolved.push(id);
            }
        };

        for request in requests {
            match request {
                ComponentRequest::All => {
                    for name in self.list_available()? {
                        push(self.resolve_newest(&name)?);
                    }
                }
                ComponentRequest::Newest(name) => push(self.resolve_newest(name)?),
                ComponentRequest::Exact(id) => {
                    self.recipe_path(id)?;
                    push(id.clone());
                }
            }
        }

        Ok(resolved)
    }

    /// Read and parse the descriptor for `id`
    pub fn load_descriptor(&self, id: &ComponentId) -> Result<RecipeDescriptor, TreebuildError> {
        let path = self.recipe_path(id)?;
        let content = fs::read_to_string(&path).map_err(|e| RecipeError::Read {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Ok(RecipeDescriptor::from_toml(&content, id)?)
    }
}

impl RecipeSource for RecipeStore {
    fn load(&self, id: &ComponentId) -> Result<Box<dyn Recipe>, TreebuildError> {
        Ok(Box::new(self.load_descriptor(id)?))
    }
}
