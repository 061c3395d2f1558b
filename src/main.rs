// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            target,
            store,
            json,
        } => commands::cmd_resolve(target.as_deref(), &store, json),
        Commands::Classify { kind, module, json } => {
            commands::cmd_classify(&kind, module.as_deref(), json)
        }
        Commands::Assemble {
            inputs,
            output,
            relocate,
            exclude,
            overlay,
            zip64,
        } => commands::cmd_assemble(
            &inputs,
            output.as_deref(),
            &relocate,
            &exclude,
            overlay.as_deref(),
            zip64,
        ),
        Commands::Publish {
            module,
            target,
            store,
            skip_merged,
            publish_repo,
            json,
        } => commands::cmd_publish(
            &module,
            target.as_deref(),
            &store,
            skip_merged,
            publish_repo.as_deref(),
            json,
        ),
    }
}
