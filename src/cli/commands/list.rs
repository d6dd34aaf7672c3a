//! List command implementation
//!
//! Implements `treebuild list` to show every component in the recipe tree.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{status, OutputConfig};
use crate::core::store::RecipeStore;

#[derive(Debug, Serialize)]
struct ComponentEntry {
    name: String,
    newest: String,
    versions: Vec<String>,
}

/// Execute the list command
pub fn execute(root: &Path, output: &OutputConfig) -> Result<()> {
    let store = RecipeStore::new(root);

    let mut entries = Vec::new();
    for name in store.list_available()? {
        let newest = store.resolve_newest(&name)?;
        let versions = store.versions(&name)?;
        entries.push(ComponentEntry {
            name,
            newest: newest.version,
            versions,
        });
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !output.quiet {
            println!("{} No recipes found under {}", status::INFO, root.display());
        }
        return Ok(());
    }

    for entry in &entries {
        if output.verbose > 0 {
            println!("{} {} ({})", entry.name, entry.newest, entry.versions.join(", "));
        } else {
            println!("{} {}", entry.name, entry.newest);
        }
    }

    Ok(())
}
