// src/lib.rs

//! Bindery build-orchestration core
//!
//! Resolves a named deployment target profile into concrete platform and
//! library versions, classifies inter-module dependencies by how they must
//! be embedded into distributable artifacts, and assembles artifact
//! variants (plain, merged, platform-remapped) from the classified inputs.
//!
//! # Architecture
//!
//! - Profile store: flat key/value properties, projected into typed,
//!   immutable target profiles with lazy field validation
//! - Classification: a closed set of bundling modes over hand-declared
//!   bucket lists; deterministic, cycle-checked at configuration time
//! - Assembly: an explicit ordered merge pipeline (exclude, additive
//!   union, last-writer, relocate, overlay) over in-memory entries
//! - Publication: bounded per-module variant records handed to an
//!   external executor; no I/O or network happens in the core

pub mod assemble;
pub mod classify;
mod error;
pub mod profile;
pub mod publish;
pub mod registry;

pub use assemble::{
    assemble, ArtifactEntry, ArtifactInput, AssembledArtifact, AssemblyOptions, MergePolicy,
    PathPolicy, RelocationRule,
};
pub use classify::{
    classify, classify_into, AssemblyBuckets, AssemblyKind, BundlingMode, DependencyEdge,
    ModuleDescriptor, ModuleGraph,
};
pub use error::{Error, Result};
pub use profile::{resolve, ProfileStore, TargetProfile};
pub use publish::{
    main_variant, publish, ArtifactVariant, PublicationRecord, PublishDestination,
    PublishOptions, VariantKind,
};
pub use registry::ModuleRegistry;
