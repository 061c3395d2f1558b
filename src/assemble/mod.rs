// src/assemble/mod.rs

//! Artifact assembly pipeline
//!
//! Merges ordered inputs into a single combined artifact over an in-memory
//! path->entry mapping: exclusion first, additive union for service
//! registration paths, last-writer-overrides for the rest, then namespace
//! relocation and the late-stage resource overlay. Assembly is
//! order-sensitive but deterministic - identical ordered inputs and rules
//! always produce byte-identical output.
//!
//! Merge state is local to each `assemble` call; concurrent assemblies of
//! independent modules share nothing.

mod policy;
mod relocate;

pub use policy::{MergePolicy, PathPolicy};
pub use relocate::RelocationRule;

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{debug, trace};

/// One entry (path plus content) of an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub path: String,
    pub data: Vec<u8>,
}

impl ArtifactEntry {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }
}

/// One ordered input to an assembly
#[derive(Debug, Clone, Default)]
pub struct ArtifactInput {
    /// Diagnostic label (module id or file name)
    pub label: String,
    pub entries: Vec<ArtifactEntry>,
}

impl ArtifactInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style entry addition
    pub fn with_entry(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.entries.push(ArtifactEntry::new(path, data));
        self
    }

    pub fn push(&mut self, entry: ArtifactEntry) {
        self.entries.push(entry);
    }
}

/// Options controlling the output container
///
/// Extended-size support changes the container format, so it is an
/// explicit flag here and never inferred from content size.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyOptions {
    pub zip64: bool,
}

/// Result of an assembly: retained entries in first-seen path order
#[derive(Debug, Clone)]
pub struct AssembledArtifact {
    entries: Vec<ArtifactEntry>,
    zip64: bool,
}

impl AssembledArtifact {
    /// Entries in output order
    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    /// Look up an entry's content by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.data.as_slice())
    }

    /// True when the output must use the extended-size container format
    pub fn zip64(&self) -> bool {
        self.zip64
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over paths and contents in output order
    ///
    /// Two assemblies from identical ordered inputs and rules produce the
    /// same digest; any reordering or content change produces a different one.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.path.as_bytes());
            hasher.update([0u8]);
            hasher.update((entry.data.len() as u64).to_le_bytes());
            hasher.update(&entry.data);
        }
        hex::encode(hasher.finalize())
    }
}

/// Merge ordered inputs into one artifact
///
/// Pipeline per the declared policy: exclusion, additive union
/// (first-seen order, de-duplicated), last-writer-overrides, relocation
/// over paths and content, then overlay replacement with absolute
/// precedence. Relocation collisions fail with [`Error::MergeConflict`]
/// rather than resolving silently.
pub fn assemble(
    inputs: &[ArtifactInput],
    rules: &[RelocationRule],
    policy: &MergePolicy,
    overlay: Option<&[ArtifactEntry]>,
    options: &AssemblyOptions,
) -> Result<AssembledArtifact> {
    // Phase 1: enumerate entries in declared order, applying exclusion and
    // the per-path merge policy.
    let mut order: Vec<String> = Vec::new();
    let mut contents: HashMap<String, Vec<u8>> = HashMap::new();
    let mut additive: HashMap<String, Vec<String>> = HashMap::new();

    for input in inputs {
        for entry in &input.entries {
            match policy.classify_path(&entry.path) {
                PathPolicy::Excluded => {
                    trace!("Excluding {} from input '{}'", entry.path, input.label);
                }
                PathPolicy::Additive => {
                    let lines = additive.entry(entry.path.clone()).or_insert_with(|| {
                        order.push(entry.path.clone());
                        Vec::new()
                    });
                    for line in String::from_utf8_lossy(&entry.data).lines() {
                        let line = line.trim();
                        if !line.is_empty() && !lines.iter().any(|l| l == line) {
                            lines.push(line.to_string());
                        }
                    }
                }
                PathPolicy::Overridable => {
                    if contents
                        .insert(entry.path.clone(), entry.data.clone())
                        .is_none()
                    {
                        order.push(entry.path.clone());
                    }
                }
            }
        }
    }

    // Phase 2: materialize additive unions as newline-joined entries
    for (path, lines) in additive {
        let mut data = lines.join("\n").into_bytes();
        data.push(b'\n');
        contents.insert(path, data);
    }

    // Phase 3: relocation. A destination prefix that already contains
    // untouched entries is ambiguous and rejected outright.
    for rule in rules {
        let to_path = rule.to_path();
        if let Some(hit) = order.iter().find(|p| {
            !rule.applies_to_path(p)
                && p.strip_prefix(to_path.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        }) {
            return Err(Error::MergeConflict(format!(
                "relocation destination '{}' collides with existing entry '{}'",
                rule.to(),
                hit
            )));
        }
    }

    let mut final_entries: Vec<ArtifactEntry> = Vec::with_capacity(order.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    for path in &order {
        let mut data = contents
            .remove(path)
            .unwrap_or_default();
        let mut new_path = path.clone();
        for rule in rules {
            if let Some(relocated) = rule.relocate_path(&new_path) {
                new_path = relocated;
            } else if policy.classify_path(&new_path) == PathPolicy::Additive {
                // Service-registration files are named after the interface
                // FQN in dot form; the name must follow the relocation or
                // the relocated interface never finds its providers.
                if let Some((dir, name)) = new_path.rsplit_once('/') {
                    if let Some(renamed) = rule.relocate_name(name) {
                        new_path = format!("{}/{}", dir, renamed);
                    }
                }
            }
            data = rule.relocate_content(&data);
        }

        if seen.contains_key(&new_path) {
            return Err(Error::MergeConflict(format!(
                "relocated path '{}' collides with an existing entry",
                new_path
            )));
        }
        seen.insert(new_path.clone(), final_entries.len());
        final_entries.push(ArtifactEntry::new(new_path, data));
    }

    // Phase 4: overlay takes absolute precedence, including over exclusion -
    // the processed platform descriptor re-enters here.
    if let Some(overlay_entries) = overlay {
        for entry in overlay_entries {
            match seen.get(&entry.path) {
                Some(&idx) => final_entries[idx].data = entry.data.clone(),
                None => {
                    seen.insert(entry.path.clone(), final_entries.len());
                    final_entries.push(entry.clone());
                }
            }
        }
    }

    debug!(
        "Assembled {} entries from {} inputs",
        final_entries.len(),
        inputs.len()
    );

    Ok(AssembledArtifact {
        entries: final_entries,
        zip64: options.zip64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "META-INF/services/dev.mclib.config.Loader";

    fn assemble_simple(inputs: &[ArtifactInput]) -> AssembledArtifact {
        assemble(
            inputs,
            &[],
            &MergePolicy::standard(),
            None,
            &AssemblyOptions::default(),
        )
        .unwrap()
    }

    // ===================
    // Merge policies
    // ===================

    #[test]
    fn test_additive_merge_unions_entries() {
        let inputs = vec![
            ArtifactInput::new("config-yaml").with_entry(SERVICE, "A\n"),
            ArtifactInput::new("config-toml").with_entry(SERVICE, "B\n"),
        ];
        let artifact = assemble_simple(&inputs);
        assert_eq!(artifact.get(SERVICE).unwrap(), b"A\nB\n");
    }

    #[test]
    fn test_additive_merge_dedups() {
        let inputs = vec![
            ArtifactInput::new("x").with_entry(SERVICE, "A\nB\n"),
            ArtifactInput::new("y").with_entry(SERVICE, "B\nA\nC\n"),
        ];
        let artifact = assemble_simple(&inputs);
        // Union in first-seen order, duplicates removed
        assert_eq!(artifact.get(SERVICE).unwrap(), b"A\nB\nC\n");
    }

    #[test]
    fn test_additive_single_input_unchanged() {
        let inputs = vec![ArtifactInput::new("only").with_entry(SERVICE, "A\n")];
        let artifact = assemble_simple(&inputs);
        assert_eq!(artifact.get(SERVICE).unwrap(), b"A\n");
    }

    #[test]
    fn test_last_writer_overrides() {
        let inputs = vec![
            ArtifactInput::new("first").with_entry("assets/icon.png", b"old".to_vec()),
            ArtifactInput::new("second").with_entry("assets/icon.png", b"new".to_vec()),
        ];
        let artifact = assemble_simple(&inputs);
        assert_eq!(artifact.get("assets/icon.png").unwrap(), b"new");
        assert_eq!(artifact.len(), 1);
    }

    #[test]
    fn test_excluded_paths_never_appear() {
        let inputs = vec![
            ArtifactInput::new("a").with_entry("fabric.mod.json", "{}"),
            ArtifactInput::new("b").with_entry("fabric.mod.json", "{}"),
        ];
        let artifact = assemble_simple(&inputs);
        assert!(artifact.is_empty());
    }

    // ===================
    // Relocation
    // ===================

    #[test]
    fn test_relocation_rewrites_path_and_references() {
        let inputs = vec![ArtifactInput::new("config")
            .with_entry("com/fasterxml/jackson/Mapper.class", b"com/fasterxml/jackson/Mapper".to_vec())
            .with_entry(SERVICE, "com.fasterxml.jackson.Mapper\n")];
        let rules = vec![RelocationRule::new(
            "com.fasterxml.jackson",
            "dev.mclib.libs.jackson",
        )];
        let artifact = assemble(
            &inputs,
            &rules,
            &MergePolicy::standard(),
            None,
            &AssemblyOptions::default(),
        )
        .unwrap();

        assert_eq!(
            artifact.get("dev/mclib/libs/jackson/Mapper.class").unwrap(),
            b"dev/mclib/libs/jackson/Mapper"
        );
        // Cross-reference inside the service file is rewritten too
        assert_eq!(
            artifact.get(SERVICE).unwrap(),
            b"dev.mclib.libs.jackson.Mapper\n"
        );
    }

    #[test]
    fn test_relocation_renames_service_registration_files() {
        // A service file named after a relocated interface moves with it
        let service = "META-INF/services/com.fasterxml.jackson.core.ObjectCodec";
        let inputs = vec![ArtifactInput::new("config")
            .with_entry(service, "com.fasterxml.jackson.impl.Codec\n")];
        let rules = vec![RelocationRule::new(
            "com.fasterxml.jackson",
            "dev.mclib.libs.jackson",
        )];
        let artifact = assemble(
            &inputs,
            &rules,
            &MergePolicy::standard(),
            None,
            &AssemblyOptions::default(),
        )
        .unwrap();

        assert!(artifact.get(service).is_none());
        assert_eq!(
            artifact
                .get("META-INF/services/dev.mclib.libs.jackson.core.ObjectCodec")
                .unwrap(),
            b"dev.mclib.libs.jackson.impl.Codec\n"
        );
    }

    #[test]
    fn test_service_file_for_foreign_interface_keeps_its_name() {
        // Only the provider lines change when the interface itself is not
        // under the relocated namespace
        let inputs = vec![ArtifactInput::new("config")
            .with_entry(SERVICE, "com.fasterxml.jackson.impl.Loader\n")];
        let rules = vec![RelocationRule::new(
            "com.fasterxml.jackson",
            "dev.mclib.libs.jackson",
        )];
        let artifact = assemble(
            &inputs,
            &rules,
            &MergePolicy::standard(),
            None,
            &AssemblyOptions::default(),
        )
        .unwrap();

        assert_eq!(
            artifact.get(SERVICE).unwrap(),
            b"dev.mclib.libs.jackson.impl.Loader\n"
        );
    }

    #[test]
    fn test_relocation_destination_collision_is_rejected() {
        let inputs = vec![ArtifactInput::new("x")
            .with_entry("dev/mclib/libs/jackson/Existing.class", b"".to_vec())
            .with_entry("com/fasterxml/jackson/Mapper.class", b"".to_vec())];
        let rules = vec![RelocationRule::new(
            "com.fasterxml.jackson",
            "dev.mclib.libs.jackson",
        )];
        let result = assemble(
            &inputs,
            &rules,
            &MergePolicy::standard(),
            None,
            &AssemblyOptions::default(),
        );
        assert!(matches!(result, Err(Error::MergeConflict(_))));
    }

    // ===================
    // Overlay
    // ===================

    #[test]
    fn test_overlay_overrides_merge_results() {
        let inputs = vec![
            ArtifactInput::new("a").with_entry("assets/icon.png", b"from-input".to_vec()),
        ];
        let overlay = vec![ArtifactEntry::new("assets/icon.png", b"from-overlay".to_vec())];
        let artifact = assemble(
            &inputs,
            &[],
            &MergePolicy::standard(),
            Some(&overlay),
            &AssemblyOptions::default(),
        )
        .unwrap();
        assert_eq!(artifact.get("assets/icon.png").unwrap(), b"from-overlay");
    }

    #[test]
    fn test_overlay_reintroduces_excluded_descriptor() {
        let inputs = vec![
            ArtifactInput::new("module").with_entry("fabric.mod.json", b"embedded".to_vec()),
        ];
        let overlay = vec![ArtifactEntry::new("fabric.mod.json", b"processed".to_vec())];
        let artifact = assemble(
            &inputs,
            &[],
            &MergePolicy::standard(),
            Some(&overlay),
            &AssemblyOptions::default(),
        )
        .unwrap();
        assert_eq!(artifact.get("fabric.mod.json").unwrap(), b"processed");
    }

    // ===================
    // Determinism
    // ===================

    #[test]
    fn test_assembly_is_deterministic() {
        let inputs = vec![
            ArtifactInput::new("a")
                .with_entry(SERVICE, "A\n")
                .with_entry("x/One.class", b"1".to_vec()),
            ArtifactInput::new("b")
                .with_entry(SERVICE, "B\n")
                .with_entry("y/Two.class", b"2".to_vec()),
        ];
        let first = assemble_simple(&inputs);
        let second = assemble_simple(&inputs);
        assert_eq!(first.entries(), second.entries());
        assert_eq!(first.digest(), second.digest());
    }

    #[test]
    fn test_input_order_changes_output() {
        let a = ArtifactInput::new("a").with_entry("path", b"a".to_vec());
        let b = ArtifactInput::new("b").with_entry("path", b"b".to_vec());
        let forward = assemble_simple(&[a.clone(), b.clone()]);
        let backward = assemble_simple(&[b, a]);
        assert_ne!(forward.digest(), backward.digest());
    }

    #[test]
    fn test_output_preserves_first_seen_order() {
        let inputs = vec![
            ArtifactInput::new("a")
                .with_entry("z/Last.class", b"".to_vec())
                .with_entry("a/First.class", b"".to_vec()),
        ];
        let artifact = assemble_simple(&inputs);
        let paths: Vec<&str> = artifact.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["z/Last.class", "a/First.class"]);
    }

    #[test]
    fn test_zip64_flag_is_explicit() {
        let artifact = assemble(
            &[],
            &[],
            &MergePolicy::standard(),
            None,
            &AssemblyOptions { zip64: true },
        )
        .unwrap();
        assert!(artifact.zip64());

        let plain = assemble_simple(&[]);
        assert!(!plain.zip64());
    }
}
