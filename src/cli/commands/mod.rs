//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod list;
pub mod order;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::OutputConfig;
use crate::config::settings::{ContextSettings, Settings};
use crate::core::identifier::ComponentRequest;
use crate::infra::dirs::TreebuildDirs;

/// Namespace/channel/profile overrides shared by planning commands
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Namespace of in-tree components
    #[arg(long, env = "TREEBUILD_NAMESPACE")]
    pub namespace: Option<String>,

    /// Channel of in-tree components
    #[arg(long, env = "TREEBUILD_CHANNEL")]
    pub channel: Option<String>,

    /// Backend build profile
    #[arg(long, env = "TREEBUILD_PROFILE")]
    pub profile: Option<String>,
}

impl ContextArgs {
    /// Effective settings: these flags over project config over user config
    pub fn settings(&self, root: &Path) -> Result<Settings> {
        let files = Settings::load(&TreebuildDirs::new(), root)
            .with_context(|| "Failed to load configuration")?;
        let flags = Settings {
            context: ContextSettings {
                namespace: self.namespace.clone(),
                channel: self.channel.clone(),
                profile: self.profile.clone(),
            },
            ..Default::default()
        };
        Ok(flags.or(files))
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build components and their in-tree dependencies in dependency order
    Build {
        /// Components as NAME or NAME==VERSION ("all" selects every component)
        #[arg(required = true, num_args = 1..)]
        requests: Vec<ComponentRequest>,

        /// Print backend commands instead of running them
        #[arg(long)]
        dry_run: bool,

        /// Publish built components to DEST (default: [publish] destination)
        #[arg(long, value_name = "DEST", num_args = 0..=1)]
        publish: Option<Option<String>>,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Show the computed build order without building
    Order {
        /// Components as NAME or NAME==VERSION ("all" selects every component)
        #[arg(required = true, num_args = 1..)]
        requests: Vec<ComponentRequest>,

        /// Output the dependency graph in DOT format
        #[arg(long)]
        dot: bool,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// List available components and their newest versions
    List,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, root: &Path, output: &OutputConfig) -> Result<()> {
        match self {
            Self::Build {
                requests,
                dry_run,
                publish,
                context,
            } => {
                let options = build::BuildOptions {
                    requests,
                    dry_run,
                    publish,
                    context,
                };
                build::execute(root, options, output).await
            }
            Self::Order {
                requests,
                dot,
                context,
            } => order::execute(root, &requests, dot, &context, output),
            Self::List => list::execute(root, output),
        }
    }
}
