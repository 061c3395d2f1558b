// src/error.rs

//! Error types for the bindery core
//!
//! Every variant here is a configuration-time failure: it aborts the build
//! before any assembly executes and requires a human to fix the declared
//! inputs. Assembly-time I/O failures surface as `Io` at the CLI boundary.

use thiserror::Error;

/// Errors produced by target resolution, classification, and assembly
#[derive(Debug, Error)]
pub enum Error {
    /// A required profile field or publish parameter was absent when first read
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A declared bucket references a module id not present in the graph
    #[error("unknown module reference: {0}")]
    UnknownModuleReference(String),

    /// Bundling edges form a cycle
    #[error("cyclic dependency: {0}")]
    CyclicDependency(String),

    /// Two inputs collide on a path no policy can resolve
    #[error("merge conflict: {0}")]
    MergeConflict(String),

    /// A profile field is present but malformed (e.g. non-numeric runtime version)
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// I/O failure reading a store or input tree
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
