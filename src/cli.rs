// src/cli.rs
//! CLI definitions for the bindery build-orchestration tool
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bindery")]
#[command(author = "Bindery Project")]
#[command(version)]
#[command(about = "Target resolution, dependency classification, and artifact assembly", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a target profile from the property store
    Resolve {
        /// Target name (with or without the 'mc' prefix); defaults to the
        /// store's stored default
        #[arg(short, long)]
        target: Option<String>,

        /// Path to the target property store
        #[arg(short, long, default_value = "targets.properties")]
        store: PathBuf,

        /// Emit the resolved profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a module's collaborators into dependency edges
    Classify {
        /// Assembly kind: bundle or module
        #[arg(short, long, default_value = "bundle")]
        kind: String,

        /// Module id to classify (defaults to the aggregation bundle)
        #[arg(short, long)]
        module: Option<String>,

        /// Emit the classified edges as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble input trees into one merged artifact
    Assemble {
        /// Input directories, in assembly order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the merged artifact to this archive instead of listing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Relocation rules as from=to namespace pairs
        #[arg(short, long)]
        relocate: Vec<String>,

        /// Additional excluded paths
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Overlay directory applied after merging, with absolute precedence
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Use the extended-size archive container format
        #[arg(long)]
        zip64: bool,
    },

    /// Emit publication records for a module
    Publish {
        /// Module id to publish
        module: String,

        /// Target name (with or without the 'mc' prefix)
        #[arg(short, long)]
        target: Option<String>,

        /// Path to the target property store
        #[arg(short, long, default_value = "targets.properties")]
        store: PathBuf,

        /// Skip the merged variant for ordinary modules
        #[arg(long)]
        skip_merged: bool,

        /// Named remote repository URL; absent means local-only
        #[arg(long)]
        publish_repo: Option<String>,

        /// Emit the records as JSON
        #[arg(long)]
        json: bool,
    },
}
