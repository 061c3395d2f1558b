// src/profile/mod.rs

//! Target profile resolution
//!
//! Picks the active target name (explicit override or the stored default
//! under the `target` key), normalizes it with the canonical `mc` prefix,
//! and projects the profile store's `<targetName>.<field>` entries into a
//! typed, immutable [`TargetProfile`].

mod store;
mod target;

pub use store::ProfileStore;
pub use target::TargetProfile;

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Canonical prefix applied to bare target names (`12110` -> `mc12110`)
pub const TARGET_PREFIX: &str = "mc";

/// Store key holding the default target name
pub const DEFAULT_TARGET_KEY: &str = "target";

/// Normalize a requested target name by applying the canonical prefix
pub fn normalize_target_name(raw: &str) -> String {
    if raw.starts_with(TARGET_PREFIX) {
        raw.to_string()
    } else {
        format!("{}{}", TARGET_PREFIX, raw)
    }
}

/// Resolve a target profile from the store
///
/// An explicit `requested` name wins over the stored default. Resolution
/// itself only fails when no override is given and the store carries no
/// default key; a target name with no entries still resolves, and every
/// required-field read on the result fails lazily instead.
pub fn resolve(requested: Option<&str>, store: &ProfileStore) -> Result<TargetProfile> {
    let raw = match requested {
        Some(name) => name.to_string(),
        None => store
            .get(DEFAULT_TARGET_KEY)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingConfiguration(DEFAULT_TARGET_KEY.to_string()))?,
    };
    let name = normalize_target_name(&raw);

    let prefix = format!("{}.", name);
    let mut values = BTreeMap::new();
    for (key, value) in store.entries() {
        if let Some(field) = key.strip_prefix(&prefix) {
            values.insert(field.to_string(), value.to_string());
        }
    }

    if values.is_empty() {
        debug!("Target '{}' has no entries in the store", name);
    }
    info!("Resolved target '{}' ({} fields)", name, values.len());

    Ok(TargetProfile::new(name, values))
}
