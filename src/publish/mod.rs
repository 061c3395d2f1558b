// src/publish/mod.rs

//! Variant publication records
//!
//! For each module, emits a bounded, ordered set of publication records -
//! one per applicable artifact variant. The records only declare what gets
//! published where; pushing bytes to a repository is the external
//! executor's job.

use crate::classify::is_remapped_module;
use crate::classify::{AGGREGATION_MODULE, PROCESSOR_MODULE};
use crate::error::Result;
use crate::profile::TargetProfile;
use crate::registry::ModuleRegistry;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// The distinct output forms a module can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    /// Plain compiled output
    Plain,
    /// Merged/shaded output
    Merged,
    /// Platform-remapped output
    Remapped,
    /// Remapped output assembled from merged inputs (aggregation modules)
    RemappedMerged,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Merged => "merged",
            Self::Remapped => "remapped",
            Self::RemappedMerged => "remapped-merged",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One concrete output form of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactVariant {
    /// Module id the variant belongs to
    pub module: String,
    pub kind: VariantKind,
    /// Classifier suffix on the variant's file name, if any
    pub classifier: Option<String>,
    /// Name of the assembly producing this variant's content
    pub content_source: String,
}

/// Where publication records are registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum PublishDestination {
    /// Local repository only
    LocalOnly,
    /// A named remote location
    Remote { name: String, url: String },
}

impl PublishDestination {
    /// Resolve the destination from the external publish parameters
    ///
    /// An absent remote URL means local-only publication; this core
    /// consumes the parameter, it never produces one.
    pub fn from_params(remote_url: Option<&str>) -> Self {
        match remote_url {
            Some(url) => Self::Remote {
                name: "ghPages".to_string(),
                url: url.to_string(),
            },
            None => Self::LocalOnly,
        }
    }
}

/// One publication: artifact id, optional classifier, backing variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub variant: ArtifactVariant,
    pub destination: PublishDestination,
}

/// External publish parameters consumed by [`publish`]
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Suppress the merged variant for ordinary modules
    pub skip_merged: bool,
    pub destination: PublishDestination,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            skip_merged: false,
            destination: PublishDestination::LocalOnly,
        }
    }
}

/// The variant kind backing a module's main artifact
///
/// Exactly one kind maps to the main artifact: the remapped form when the
/// platform remap step applies, the plain form otherwise.
pub fn main_variant(module_id: &str) -> VariantKind {
    if !is_remapped_module(module_id) {
        VariantKind::Plain
    } else if module_id == AGGREGATION_MODULE {
        VariantKind::RemappedMerged
    } else {
        VariantKind::Remapped
    }
}

/// Emit the ordered publication records for one module
///
/// Always emits the plain variant; emits the merged variant unless
/// `skip_merged` is set (aggregation modules ignore the skip flag, the
/// merged form being their only consumable artifact); emits the remapped
/// variant only for modules that underwent the remap step, with a
/// classifier embedding the platform major version so concurrently
/// maintained targets stay distinguishable. The processor module is the
/// one platform-independent output: its plain jar goes out bare and it
/// never gets a merged shadow form.
pub fn publish(
    module_id: &str,
    registry: &ModuleRegistry,
    profile: &TargetProfile,
    options: &PublishOptions,
) -> Result<Vec<PublicationRecord>> {
    let name = registry.display_name(module_id);
    let remapped = is_remapped_module(module_id);
    let aggregation = module_id == AGGREGATION_MODULE;
    let processor = module_id == PROCESSOR_MODULE;
    let target_classifier = format!("mc{}", profile.minecraft_major()?);

    let mut records = Vec::with_capacity(3);

    // Plain variant, always. Non-remapped modules carry the target
    // classifier on their plain jar; remapped modules reserve it for the
    // remapped form, and the processor jar is target-independent.
    let plain_classifier = (!remapped && !processor).then(|| target_classifier.clone());
    records.push(record(
        name.to_string(),
        plain_classifier.clone(),
        ArtifactVariant {
            module: module_id.to_string(),
            kind: VariantKind::Plain,
            classifier: plain_classifier,
            content_source: format!("{}:compile", module_id),
        },
        options,
    ));

    // Merged variant: `-all` artifact id for ordinary modules, the `dev`
    // classifier on the base id for the aggregation module.
    if !processor && (!options.skip_merged || aggregation) {
        let (artifact_id, classifier) = if aggregation {
            (name.to_string(), Some("dev".to_string()))
        } else {
            (format!("{}-all", name), None)
        };
        records.push(record(
            artifact_id,
            classifier.clone(),
            ArtifactVariant {
                module: module_id.to_string(),
                kind: VariantKind::Merged,
                classifier,
                content_source: format!("{}:merge", module_id),
            },
            options,
        ));
    }

    if remapped {
        let kind = if aggregation {
            VariantKind::RemappedMerged
        } else {
            VariantKind::Remapped
        };
        records.push(record(
            name.to_string(),
            Some(target_classifier.clone()),
            ArtifactVariant {
                module: module_id.to_string(),
                kind,
                classifier: Some(target_classifier),
                content_source: format!("{}:remap", module_id),
            },
            options,
        ));
    }

    for rec in &records {
        info!(
            "Publishing {}{} ({}) -> {:?}",
            rec.artifact_id,
            rec.classifier
                .as_deref()
                .map(|c| format!(":{}", c))
                .unwrap_or_default(),
            rec.variant.kind,
            rec.destination
        );
    }

    Ok(records)
}

fn record(
    artifact_id: String,
    classifier: Option<String>,
    variant: ArtifactVariant,
    options: &PublishOptions,
) -> PublicationRecord {
    PublicationRecord {
        artifact_id,
        classifier,
        variant,
        destination: options.destination.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::standard_registry;
    use crate::profile::{resolve, ProfileStore};

    fn profile() -> TargetProfile {
        let store = ProfileStore::parse(
            "mc12110.minecraft=1.21.1\n\
             mc12110.java=21\n\
             mc12110.yarn=1.21.1+build.3\n\
             mc12110.loader=0.16.9\n",
        );
        resolve(Some("mc12110"), &store).unwrap()
    }

    fn kinds(records: &[PublicationRecord]) -> Vec<VariantKind> {
        records.iter().map(|r| r.variant.kind).collect()
    }

    #[test]
    fn test_ordinary_module_publishes_plain_and_merged() {
        let records = publish(
            "config",
            &standard_registry(),
            &profile(),
            &PublishOptions::default(),
        )
        .unwrap();
        assert_eq!(kinds(&records), vec![VariantKind::Plain, VariantKind::Merged]);
        assert_eq!(records[0].artifact_id, "mclib-config");
        assert_eq!(records[0].classifier.as_deref(), Some("mc1.21"));
        assert_eq!(records[1].artifact_id, "mclib-config-all");
        assert_eq!(records[1].classifier, None);
    }

    #[test]
    fn test_skip_flag_suppresses_merged() {
        let options = PublishOptions {
            skip_merged: true,
            ..PublishOptions::default()
        };
        let records = publish("config", &standard_registry(), &profile(), &options).unwrap();
        assert_eq!(kinds(&records), vec![VariantKind::Plain]);
    }

    #[test]
    fn test_aggregation_module_ignores_skip_flag() {
        let options = PublishOptions {
            skip_merged: true,
            ..PublishOptions::default()
        };
        let records = publish(
            AGGREGATION_MODULE,
            &standard_registry(),
            &profile(),
            &options,
        )
        .unwrap();
        assert_eq!(
            kinds(&records),
            vec![
                VariantKind::Plain,
                VariantKind::Merged,
                VariantKind::RemappedMerged
            ]
        );
        // The merged form rides the base id with the dev classifier
        assert_eq!(records[1].artifact_id, "mclib-fabric-bundle");
        assert_eq!(records[1].classifier.as_deref(), Some("dev"));
    }

    #[test]
    fn test_processor_module_publishes_plain_only() {
        let records = publish(
            PROCESSOR_MODULE,
            &standard_registry(),
            &profile(),
            &PublishOptions::default(),
        )
        .unwrap();
        // No shadow form and no target classifier: the processor jar is
        // consumed at compile time, identically across targets.
        assert_eq!(kinds(&records), vec![VariantKind::Plain]);
        assert_eq!(records[0].artifact_id, "mclib-processor");
        assert_eq!(records[0].classifier, None);
    }

    #[test]
    fn test_remapped_module_classifier_embeds_platform_major() {
        let records = publish(
            "platform-fabric",
            &standard_registry(),
            &profile(),
            &PublishOptions::default(),
        )
        .unwrap();
        let remapped = records
            .iter()
            .find(|r| r.variant.kind == VariantKind::Remapped)
            .unwrap();
        assert_eq!(remapped.artifact_id, "mclib-fabric");
        assert_eq!(remapped.classifier.as_deref(), Some("mc1.21"));
        // The plain form of a remapped module carries no classifier
        assert_eq!(records[0].classifier, None);
    }

    #[test]
    fn test_non_remapped_module_has_no_remap_record() {
        let records = publish(
            "core",
            &standard_registry(),
            &profile(),
            &PublishOptions::default(),
        )
        .unwrap();
        assert!(records
            .iter()
            .all(|r| r.variant.kind != VariantKind::Remapped));
    }

    #[test]
    fn test_publish_requires_platform_version() {
        let store = ProfileStore::parse("mc12110.java=21\n");
        let empty_profile = resolve(Some("mc12110"), &store).unwrap();
        let result = publish(
            "core",
            &standard_registry(),
            &empty_profile,
            &PublishOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_destination_resolution() {
        assert_eq!(
            PublishDestination::from_params(None),
            PublishDestination::LocalOnly
        );
        match PublishDestination::from_params(Some("https://example.com/maven")) {
            PublishDestination::Remote { name, url } => {
                assert_eq!(name, "ghPages");
                assert_eq!(url, "https://example.com/maven");
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn test_main_variant_mapping() {
        assert_eq!(main_variant("core"), VariantKind::Plain);
        assert_eq!(main_variant("platform-fabric"), VariantKind::Remapped);
        assert_eq!(main_variant(AGGREGATION_MODULE), VariantKind::RemappedMerged);
    }

    #[test]
    fn test_records_carry_destination() {
        let options = PublishOptions {
            skip_merged: false,
            destination: PublishDestination::from_params(Some("https://example.com/maven")),
        };
        let records = publish("core", &standard_registry(), &profile(), &options).unwrap();
        assert!(records
            .iter()
            .all(|r| matches!(r.destination, PublishDestination::Remote { .. })));
    }
}
