// src/registry.rs

//! Module-id to published-artifact-name mapping
//!
//! A `ModuleRegistry` is an explicitly constructed, immutable lookup table
//! threaded into every component that needs it - there is no implicit
//! global name map. Lookup is total: unknown ids fall back to the id
//! itself, so a new module works before the registry is updated.

use std::collections::BTreeMap;

/// Immutable lookup table from internal module ids to published names
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    names: BTreeMap<String, String>,
}

impl ModuleRegistry {
    /// Create an empty registry (every lookup falls back to the id)
    pub fn new() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Build a registry from (module id, published name) pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Resolve the published name for a module id
    ///
    /// Permissive identity fallback: unknown ids return the input unchanged.
    /// This is deliberately not a configuration failure.
    pub fn display_name<'a>(&'a self, module_id: &'a str) -> &'a str {
        self.names
            .get(module_id)
            .map(String::as_str)
            .unwrap_or(module_id)
    }

    /// True when the registry has an explicit entry for the id
    pub fn contains(&self, module_id: &str) -> bool {
        self.names.contains_key(module_id)
    }

    /// Number of explicit entries
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether the registry has no explicit entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
