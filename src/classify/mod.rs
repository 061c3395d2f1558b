// src/classify/mod.rs

//! Dependency classification into bundling modes
//!
//! For a given assembly, partitions its declared collaborator modules into
//! a closed set of bundling modes. Classification is driven by static,
//! hand-declared bucket lists per assembly kind; the output edge sequence
//! follows declaration order so results are reproducible byte for byte.
//!
//! Classification is not transitive: a module embedded as `embed-shaded`
//! by its producer must be re-declared by every consumer that wants to
//! re-embed it. Auto-inference would risk double-shading and version skew
//! when relocation rules differ between layers.

mod catalog;
mod graph;

pub use catalog::{
    bundle_buckets, is_remapped_module, module_buckets, standard_graph, standard_registry,
    AGGREGATION_MODULE, PROCESSOR_MODULE,
};
pub use graph::{ModuleDescriptor, ModuleGraph};

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// How one module's output is incorporated into another's artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundlingMode {
    /// Copy contents as-is into the consuming artifact
    EmbedDirect,
    /// Copy contents, apply relocation, and expose the result as a shaded
    /// unit consumable itself
    EmbedShaded,
    /// Copy contents after the external platform remap step
    EmbedRemapped,
    /// Visible at compile time only, never packaged
    CompileOnly,
    /// Present on the runtime classpath, never packaged
    RuntimeOnly,
}

impl BundlingMode {
    /// String form used in plans and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmbedDirect => "embed-direct",
            Self::EmbedShaded => "embed-shaded",
            Self::EmbedRemapped => "embed-remapped",
            Self::CompileOnly => "compile-only",
            Self::RuntimeOnly => "runtime-only",
        }
    }

    /// Parse a bundling mode from its string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "embed-direct" => Some(Self::EmbedDirect),
            "embed-shaded" => Some(Self::EmbedShaded),
            "embed-remapped" => Some(Self::EmbedRemapped),
            "compile-only" => Some(Self::CompileOnly),
            "runtime-only" => Some(Self::RuntimeOnly),
            _ => None,
        }
    }

    /// Does this mode copy content into the consuming artifact?
    ///
    /// Only embedded edges constrain assembly ordering and cycle checks.
    pub fn is_embedded(&self) -> bool {
        matches!(
            self,
            Self::EmbedDirect | Self::EmbedShaded | Self::EmbedRemapped
        )
    }

    /// All modes in declaration order
    pub fn all() -> &'static [BundlingMode] {
        &[
            Self::EmbedDirect,
            Self::EmbedShaded,
            Self::EmbedRemapped,
            Self::CompileOnly,
            Self::RuntimeOnly,
        ]
    }
}

impl fmt::Display for BundlingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two assembly flavors, each with its own bucket declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyKind {
    /// Fat aggregation artifact embedding the whole module family
    Bundle,
    /// Single platform module
    Module,
}

impl AssemblyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Module => "module",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bundle" => Some(Self::Bundle),
            "module" => Some(Self::Module),
            _ => None,
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One classified dependency: source module, target module, bundling mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub mode: BundlingMode,
}

/// Hand-declared collaborator grouping for one assembly
///
/// Mirrors the declaration surface of the original build: an ordered list
/// per mode, consumed in a fixed bucket order. A module may appear in more
/// than one bucket (e.g. remapped for the packaged form and runtime-only
/// for the merged form); each resulting edge carries exactly one mode.
#[derive(Debug, Clone, Default)]
pub struct AssemblyBuckets {
    pub direct: Vec<String>,
    pub shaded: Vec<String>,
    pub remapped: Vec<String>,
    pub runtime: Vec<String>,
    pub compile_only: Vec<String>,
}

impl AssemblyBuckets {
    /// Total number of declared collaborator references
    pub fn len(&self) -> usize {
        self.direct.len()
            + self.shaded.len()
            + self.remapped.len()
            + self.runtime.len()
            + self.compile_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify one assembly's collaborators into dependency edges
///
/// Buckets are consumed in fixed order (direct, shaded, remapped, runtime,
/// compile-only), declaration order within each bucket. Referencing a
/// module id absent from the graph fails here with
/// [`Error::UnknownModuleReference`], not at assembly time.
pub fn classify(
    kind: AssemblyKind,
    module_id: &str,
    buckets: &AssemblyBuckets,
    graph: &ModuleGraph,
) -> Result<Vec<DependencyEdge>> {
    if !graph.contains(module_id) {
        return Err(Error::UnknownModuleReference(module_id.to_string()));
    }

    let groups: [(&[String], BundlingMode); 5] = [
        (&buckets.direct, BundlingMode::EmbedDirect),
        (&buckets.shaded, BundlingMode::EmbedShaded),
        (&buckets.remapped, BundlingMode::EmbedRemapped),
        (&buckets.runtime, BundlingMode::RuntimeOnly),
        (&buckets.compile_only, BundlingMode::CompileOnly),
    ];

    let mut edges = Vec::with_capacity(buckets.len());
    for (ids, mode) in groups {
        for id in ids {
            if !graph.contains(id) {
                return Err(Error::UnknownModuleReference(id.clone()));
            }
            edges.push(DependencyEdge {
                from: module_id.to_string(),
                to: id.clone(),
                mode,
            });
        }
    }

    debug!(
        "Classified {} edges for {} assembly '{}'",
        edges.len(),
        kind,
        module_id
    );
    Ok(edges)
}

/// Classify an assembly and record its edges into the graph
///
/// On top of [`classify`], feeds the new edges into the graph and rejects
/// any resulting cycle among bundling edges immediately, so a broken
/// declaration fails at configuration time rather than when the executor
/// tries to order assemblies.
pub fn classify_into(
    kind: AssemblyKind,
    module_id: &str,
    buckets: &AssemblyBuckets,
    graph: &mut ModuleGraph,
) -> Result<Vec<DependencyEdge>> {
    let edges = classify(kind, module_id, buckets, graph)?;
    for edge in &edges {
        graph.add_edge(edge.clone())?;
    }
    if let Some(cycle) = graph.detect_cycle() {
        return Err(Error::CyclicDependency(cycle.join(" -> ")));
    }
    Ok(edges)
}
