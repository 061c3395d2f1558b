// src/commands.rs
//! Command handlers for the bindery CLI
//!
//! The handlers are the I/O boundary the core defers to: they load
//! property stores and input trees from disk, run the in-memory core, and
//! print plans or write archives.

use anyhow::{bail, Context, Result};
use bindery::classify::{
    self, bundle_buckets, module_buckets, standard_graph, standard_registry, AssemblyKind,
    AGGREGATION_MODULE,
};
use bindery::{
    assemble, ArtifactEntry, ArtifactInput, AssembledArtifact, AssemblyOptions, MergePolicy,
    ProfileStore, PublishDestination, PublishOptions, RelocationRule,
};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Resolve and print a target profile
pub fn cmd_resolve(target: Option<&str>, store_path: &Path, json: bool) -> Result<()> {
    let store = ProfileStore::load(store_path)
        .with_context(|| format!("failed to load store {}", store_path.display()))?;
    let profile = bindery::resolve(target, &store)?;

    // Required fields fail lazily; surface them all here so a broken
    // target is reported before anything downstream consumes it.
    profile.minecraft()?;
    profile.java()?;
    profile.yarn()?;
    profile.loader()?;

    if json {
        let fields: BTreeMap<&str, &str> = profile.fields().collect();
        let doc = serde_json::json!({
            "target": profile.name(),
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("target: {}", profile.name());
        for (field, value) in profile.fields() {
            println!("  {} = {}", field, value);
        }
    }
    Ok(())
}

/// Classify a module's collaborators and verify the bundling DAG
pub fn cmd_classify(kind: &str, module: Option<&str>, json: bool) -> Result<()> {
    let kind = AssemblyKind::parse(kind)
        .with_context(|| format!("unknown assembly kind '{}' (bundle|module)", kind))?;
    let mut graph = standard_graph();

    let (module_id, buckets) = match kind {
        AssemblyKind::Bundle => {
            let id = module.unwrap_or(AGGREGATION_MODULE);
            (id.to_string(), bundle_buckets())
        }
        AssemblyKind::Module => {
            let id = module.context("module assemblies need an explicit --module")?;
            let buckets = module_buckets(id)
                .with_context(|| format!("module '{}' has no module-assembly declaration", id))?;
            (id.to_string(), buckets)
        }
    };

    // Cycles among bundling edges are rejected here, before any assembly
    // could be scheduled from the resulting plan.
    let edges = classify::classify_into(kind, &module_id, &buckets, &mut graph)?;
    let order = graph.assembly_order()?;
    info!("Assembly order verified over {} modules", order.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&edges)?);
    } else {
        for edge in &edges {
            println!("{} -> {} [{}]", edge.from, edge.to, edge.mode);
        }
    }
    Ok(())
}

/// Assemble input trees into one merged artifact
pub fn cmd_assemble(
    input_dirs: &[PathBuf],
    output: Option<&Path>,
    relocations: &[String],
    excludes: &[String],
    overlay_dir: Option<&Path>,
    zip64: bool,
) -> Result<()> {
    let mut inputs = Vec::with_capacity(input_dirs.len());
    for dir in input_dirs {
        inputs.push(load_input_tree(dir)?);
    }

    let rules = relocations
        .iter()
        .map(|raw| {
            RelocationRule::parse(raw)
                .with_context(|| format!("malformed relocation '{}' (expected from=to)", raw))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut policy = MergePolicy::standard();
    for path in excludes {
        policy = policy.with_excluded_path(path.clone());
    }

    let overlay = match overlay_dir {
        Some(dir) => Some(load_input_tree(dir)?.entries),
        None => None,
    };

    let artifact = assemble(
        &inputs,
        &rules,
        &policy,
        overlay.as_deref(),
        &AssemblyOptions { zip64 },
    )?;

    match output {
        Some(path) => {
            write_archive(&artifact, path)?;
            println!(
                "wrote {} ({} entries, sha256 {})",
                path.display(),
                artifact.len(),
                artifact.digest()
            );
        }
        None => {
            for entry in artifact.entries() {
                println!("{:>8}  {}", entry.data.len(), entry.path);
            }
            println!("{} entries, sha256 {}", artifact.len(), artifact.digest());
        }
    }
    Ok(())
}

/// Emit publication records for a module
pub fn cmd_publish(
    module: &str,
    target: Option<&str>,
    store_path: &Path,
    skip_merged: bool,
    publish_repo: Option<&str>,
    json: bool,
) -> Result<()> {
    let store = ProfileStore::load(store_path)
        .with_context(|| format!("failed to load store {}", store_path.display()))?;
    let profile = bindery::resolve(target, &store)?;

    let options = PublishOptions {
        skip_merged,
        destination: PublishDestination::from_params(publish_repo),
    };
    let records = bindery::publish(module, &standard_registry(), &profile, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for rec in &records {
            let classifier = rec
                .classifier
                .as_deref()
                .map(|c| format!(":{}", c))
                .unwrap_or_default();
            println!("{}{} [{}]", rec.artifact_id, classifier, rec.variant.kind);
        }
    }
    Ok(())
}

/// Read a directory tree into an ordered artifact input
///
/// Entries are sorted by relative path so the same tree always yields the
/// same input ordering regardless of filesystem iteration order.
fn load_input_tree(dir: &Path) -> Result<ArtifactInput> {
    if !dir.is_dir() {
        bail!("input '{}' is not a directory", dir.display());
    }

    let label = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let mut input = ArtifactInput::new(label);

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("path {} outside {}", entry.path().display(), dir.display()))?;
        let path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let data = fs::read(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        input.push(ArtifactEntry::new(path, data));
    }

    Ok(input)
}

/// Write an assembled artifact to a zip archive
///
/// The extended-size container format is only used when the assembly
/// explicitly asked for it.
fn write_archive(artifact: &AssembledArtifact, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().large_file(artifact.zip64());

    for entry in artifact.entries() {
        writer.start_file(entry.path.as_str(), options)?;
        writer.write_all(&entry.data)?;
    }
    writer.finish()?;
    Ok(())
}
