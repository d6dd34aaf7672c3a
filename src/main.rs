//! Treebuild CLI - dependency-ordered builds for a tree of component recipes
//!
//! Entry point for the treebuild command-line application.

use anyhow::Result;
use clap::Parser;

use treebuild::cli::output::display_error;
use treebuild::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.output_config();

    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output.log_level().into()),
        )
        .init();

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
