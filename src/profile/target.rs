// src/profile/target.rs

//! Typed target profile with lazy field validation
//!
//! A `TargetProfile` is projected from the store once per build and is
//! immutable afterwards. Required fields are validated on access, not at
//! load time: a profile for an unknown target resolves fine but fails with
//! `MissingConfiguration` the first time a required field is read, and a
//! profile that never touches an optional field never errors on it.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Fully resolved version set for one named deployment target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
    name: String,
    values: BTreeMap<String, String>,
}

impl TargetProfile {
    /// Create a profile from a target name and its projected field values
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// The resolved target name (e.g. `mc12110`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw access to a field without required-field semantics
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Look up a required field, failing with the composed key on absence
    fn required(&self, field: &str) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| Error::MissingConfiguration(format!("{}.{}", self.name, field)))
    }

    /// Platform version (e.g. `1.21.1`)
    pub fn minecraft(&self) -> Result<&str> {
        self.required("minecraft")
    }

    /// Numeric runtime major version (e.g. `21`)
    pub fn java(&self) -> Result<u32> {
        let raw = self.required("java")?;
        raw.parse().map_err(|_| Error::InvalidValue {
            key: format!("{}.java", self.name),
            value: raw.to_string(),
        })
    }

    /// Mapping/namespace version (e.g. `1.21.1+build.3`)
    pub fn yarn(&self) -> Result<&str> {
        self.required("yarn")
    }

    /// Loader version (e.g. `0.16.9`)
    pub fn loader(&self) -> Result<&str> {
        self.required("loader")
    }

    /// Optional third-party API versions; absent values are not an error
    pub fn paper(&self) -> Option<&str> {
        self.get("paper")
    }

    pub fn neoforge(&self) -> Option<&str> {
        self.get("neoforge")
    }

    pub fn pb4_placeholder_api(&self) -> Option<&str> {
        self.get("pb4_placeholder_api")
    }

    pub fn miniplaceholders_api(&self) -> Option<&str> {
        self.get("miniplaceholders_api")
    }

    /// Platform version with its final component stripped (`1.21.1` -> `1.21`)
    ///
    /// Used for classifier naming so artifacts from concurrently maintained
    /// targets stay distinguishable.
    pub fn minecraft_major(&self) -> Result<&str> {
        let full = self.minecraft()?;
        Ok(match full.rfind('.') {
            Some(pos) => &full[..pos],
            None => full,
        })
    }

    /// Iterate all projected fields in key order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of projected fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the target had no entries in the store
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
