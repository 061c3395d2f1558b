// src/assemble/policy.rs

//! Merge-conflict policy: static path classification
//!
//! Every entry path falls into exactly one of three classes. Service
//! registration files merge additively, a small declared set is excluded
//! outright (a downstream overlay supplies those instead), and everything
//! else follows last-writer-overrides. Dispatch is a static table, not
//! scattered per-input configuration.

/// How same-path entries from multiple inputs are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPolicy {
    /// Union of logical entries across all inputs, de-duplicated
    Additive,
    /// The last input in assembly order wins outright
    Overridable,
    /// The path never appears in output regardless of source
    Excluded,
}

/// Path-classification table for one assembly
#[derive(Debug, Clone)]
pub struct MergePolicy {
    additive_prefixes: Vec<String>,
    excluded_paths: Vec<String>,
    excluded_prefixes: Vec<String>,
}

impl MergePolicy {
    /// Policy with no additive or excluded paths (everything overridable)
    pub fn empty() -> Self {
        Self {
            additive_prefixes: Vec::new(),
            excluded_paths: Vec::new(),
            excluded_prefixes: Vec::new(),
        }
    }

    /// Standard policy for bundle assemblies
    ///
    /// Service-registration files under `META-INF/services/` merge
    /// additively; the platform descriptor is excluded from embedded
    /// inputs because the resource-processing overlay supplies it.
    pub fn standard() -> Self {
        Self::empty()
            .with_additive_prefix("META-INF/services/")
            .with_excluded_path("fabric.mod.json")
    }

    /// Add an additively merged path prefix
    pub fn with_additive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.additive_prefixes.push(prefix.into());
        self
    }

    /// Exclude an exact path
    pub fn with_excluded_path(mut self, path: impl Into<String>) -> Self {
        self.excluded_paths.push(path.into());
        self
    }

    /// Exclude everything under a path prefix
    pub fn with_excluded_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_prefixes.push(prefix.into());
        self
    }

    /// Classify a path; exclusion wins over additivity
    pub fn classify_path(&self, path: &str) -> PathPolicy {
        if self.excluded_paths.iter().any(|p| p == path)
            || self.excluded_prefixes.iter().any(|p| path.starts_with(p.as_str()))
        {
            return PathPolicy::Excluded;
        }
        if self
            .additive_prefixes
            .iter()
            .any(|p| path.starts_with(p.as_str()))
        {
            return PathPolicy::Additive;
        }
        PathPolicy::Overridable
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
