//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Recipe tree in a temporary directory
///
/// Carries its own empty user config directory so the developer's
/// settings never leak into a test run.
pub struct TestTree {
    /// Root of the recipe tree
    pub dir: TempDir,
    /// User config directory
    pub config: TempDir,
}

impl TestTree {
    /// Create an empty recipe tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            config: TempDir::new().expect("Failed to create config directory"),
        }
    }

    /// Get the path to the tree root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file relative to the tree root
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Write `<name>/<version>/recipe.toml` with static and hook requirements
    pub fn write_recipe(&self, name: &str, version: &str, requires: &[&str], hook: &[&str]) {
        self.create_file(
            &format!("{name}/{version}/recipe.toml"),
            &recipe_toml(name, version, requires, hook),
        );
    }

    /// Write the project-level `treebuild.toml`
    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        self.create_file("treebuild.toml", content);
    }

    /// Write the user-level `config.toml`
    #[allow(dead_code)]
    pub fn write_user_config(&self, content: &str) {
        std::fs::write(self.config.path().join("config.toml"), content)
            .expect("Failed to write user config");
    }

    /// Command for the treebuild binary rooted at this tree
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_treebuild"));
        cmd.current_dir(self.dir.path())
            .env("TREEBUILD_CONFIG_DIR", self.config.path())
            .env_remove("TREEBUILD_ROOT")
            .env_remove("TREEBUILD_NAMESPACE")
            .env_remove("TREEBUILD_CHANNEL")
            .env_remove("TREEBUILD_PROFILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run treebuild with `args`
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute treebuild")
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a recipe descriptor
pub fn recipe_toml(name: &str, version: &str, requires: &[&str], hook: &[&str]) -> String {
    let requires = requires
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let mut content = format!(
        "[recipe]\nname = \"{name}\"\nversion = \"{version}\"\nrequires = [{requires}]\n"
    );
    for reference in hook {
        content.push_str(&format!("\n[[requirements]]\nreference = \"{reference}\"\n"));
    }
    content
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Chain `a/1.0 -> b/1.0 -> c/1.0` using the default context
#[allow(dead_code)]
pub fn chain_tree() -> TestTree {
    let tree = TestTree::new();
    tree.write_recipe("a", "1.0", &["b/1.0@local/stable"], &[]);
    tree.write_recipe("b", "1.0", &[], &["c/1.0@{namespace}/{channel}"]);
    tree.write_recipe("c", "1.0", &[], &[]);
    tree
}

