// src/classify/catalog.rs

//! Built-in catalog for the shipped distribution
//!
//! The module universe, its published names, and the per-assembly bucket
//! declarations are static data: a declarative composition step rather
//! than configuration mutated at build time. Downstream users can supply
//! their own graph/registry/buckets; these are the defaults the CLI runs
//! with.

use super::{AssemblyBuckets, ModuleDescriptor, ModuleGraph};
use crate::registry::ModuleRegistry;

/// The pass-through aggregation module: its merged form is its only
/// externally consumable artifact, so the merged-variant skip flag never
/// applies to it.
pub const AGGREGATION_MODULE: &str = "fabric-bundle";

/// The annotation-processor module: consumed at compile time by the other
/// modules' builds, so it publishes a single unclassified plain artifact
/// with no merged shadow form.
pub const PROCESSOR_MODULE: &str = "processor";

/// (module id, published artifact name) for the whole distribution
const MODULE_NAMES: &[(&str, &str)] = &[
    ("platform-api", "mclib-api"),
    ("platform-neoforge", "mclib-neoforge"),
    ("platform-bukkit", "mclib-bukkit"),
    ("platform-velocity", "mclib-velocity"),
    ("platform-fabric", "mclib-fabric"),
    ("core", "mclib-core"),
    ("config", "mclib-config"),
    ("config-yaml", "mclib-config-yaml"),
    ("config-toml", "mclib-config-toml"),
    ("lang", "mclib-lang"),
    ("logger", "mclib-logger"),
    ("commands", "mclib-commands"),
    ("placeholders", "mclib-placeholders"),
    ("http-client", "mclib-http-client"),
    ("commands-fabric", "mclib-commands-fabric"),
    ("logger-fabric", "mclib-logger-fabric"),
    ("placeholders-fabric", "mclib-placeholders-fabric"),
    ("fabric-bundle", "mclib-fabric-bundle"),
    ("processor", "mclib-processor"),
];

/// Registry over the built-in module name map
pub fn standard_registry() -> ModuleRegistry {
    ModuleRegistry::from_pairs(MODULE_NAMES.iter().copied())
}

/// Graph containing every module of the built-in distribution
pub fn standard_graph() -> ModuleGraph {
    let registry = standard_registry();
    let mut graph = ModuleGraph::new();
    for (id, _) in MODULE_NAMES {
        graph.add_module(ModuleDescriptor::new(*id, registry.display_name(id)));
    }
    graph
}

/// Bucket declarations for the aggregation bundle assembly
///
/// Platform modules appear twice on purpose: once as remap inputs for the
/// packaged form and once as runtime elements consumed by the merged form.
pub fn bundle_buckets() -> AssemblyBuckets {
    AssemblyBuckets {
        direct: vec![
            "platform-api".into(),
            "logger".into(),
            "commands".into(),
            "placeholders".into(),
            "core".into(),
        ],
        shaded: vec![
            "config".into(),
            "config-yaml".into(),
            "config-toml".into(),
            "lang".into(),
        ],
        remapped: vec![
            "platform-fabric".into(),
            "logger-fabric".into(),
            "commands-fabric".into(),
            "placeholders-fabric".into(),
        ],
        runtime: vec![
            "platform-fabric".into(),
            "logger-fabric".into(),
            "commands-fabric".into(),
            "placeholders-fabric".into(),
        ],
        compile_only: vec![],
    }
}

/// Bucket declarations for a single platform-module assembly, if the
/// module has one
pub fn module_buckets(module_id: &str) -> Option<AssemblyBuckets> {
    let compile_only = match module_id {
        "platform-fabric" => vec!["platform-api".into(), "core".into()],
        "logger-fabric" => vec!["platform-api".into(), "logger".into()],
        "commands-fabric" => vec!["platform-api".into(), "commands".into()],
        "placeholders-fabric" => vec!["platform-api".into(), "placeholders".into()],
        _ => return None,
    };
    Some(AssemblyBuckets {
        compile_only,
        ..AssemblyBuckets::default()
    })
}

/// Module ids whose artifacts undergo the external platform remap step
pub fn is_remapped_module(module_id: &str) -> bool {
    matches!(
        module_id,
        "platform-fabric"
            | "logger-fabric"
            | "commands-fabric"
            | "placeholders-fabric"
            | "fabric-bundle"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, AssemblyKind};

    #[test]
    fn test_standard_graph_covers_name_map() {
        let graph = standard_graph();
        assert_eq!(graph.len(), MODULE_NAMES.len());
        assert!(graph.contains("core"));
        assert!(graph.contains(AGGREGATION_MODULE));
    }

    #[test]
    fn test_standard_registry_names() {
        let registry = standard_registry();
        assert_eq!(registry.display_name("platform-api"), "mclib-api");
        assert_eq!(registry.display_name("fabric-bundle"), "mclib-fabric-bundle");
    }

    #[test]
    fn test_bundle_buckets_classify_cleanly() {
        let graph = standard_graph();
        let edges = classify(
            AssemblyKind::Bundle,
            AGGREGATION_MODULE,
            &bundle_buckets(),
            &graph,
        )
        .unwrap();
        // 5 direct + 4 shaded + 4 remapped + 4 runtime
        assert_eq!(edges.len(), 17);
    }

    #[test]
    fn test_module_buckets_only_for_platform_modules() {
        assert!(module_buckets("logger-fabric").is_some());
        assert!(module_buckets("core").is_none());
    }

    #[test]
    fn test_remapped_modules() {
        assert!(is_remapped_module("platform-fabric"));
        assert!(is_remapped_module(AGGREGATION_MODULE));
        assert!(!is_remapped_module("config"));
    }
}
