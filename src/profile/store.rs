// src/profile/store.rs

//! Flat key/value property store
//!
//! Backing format is line-oriented `key=value` text with `#`/`!` comments,
//! keys namespaced as `<targetName>.<field>`. The store is loaded once per
//! build invocation and consumed read-only; profiles are cheap to recompute
//! so nothing is cached across invocations.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read-only property set backing target profiles
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    values: BTreeMap<String, String>,
}

impl ProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Parse a store from properties-format text
    ///
    /// Blank lines and lines starting with `#` or `!` are ignored. A line
    /// without `=` is ignored rather than rejected - the store is permissive,
    /// missing values fail later at field access.
    pub fn parse(text: &str) -> Self {
        let mut values = BTreeMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { values }
    }

    /// Load a store from a properties file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let store = Self::parse(&text);
        debug!(
            "Loaded {} properties from {}",
            store.values.len(),
            path.display()
        );
        Ok(store)
    }

    /// Look up a raw value by full key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate all entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries in the store
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
