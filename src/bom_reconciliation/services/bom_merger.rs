use super::validity_filter::dedup_by_identity;
use crate::bom_reconciliation::domain::{Bom, Composition, Dependency};
use crate::ports::outbound::{CycloneDxBomParser, ParseOutcome};
use crate::shared::error::MergeError;
use std::collections::HashSet;
use std::path::Path;

/// Result of reconciling a new BOM against a baseline file
#[derive(Debug, Clone)]
pub struct MergedBom {
    pub bom: Bom,
    /// Why the baseline could not be used, when it was unreadable or
    /// malformed. The merge then ran against an empty baseline.
    pub degraded: Option<String>,
}

/// Reconciles `new_bom` with the baseline BOM stored at `existing_path`.
///
/// # Errors
/// `MergeError::BaselineNotFound` when no file exists at `existing_path`.
/// An unreadable or malformed baseline is not an error: the result carries
/// the reason in `degraded`.
pub fn combine_components_from_existing_bom<P: CycloneDxBomParser>(
    parser: &P,
    new_bom: Bom,
    existing_path: &Path,
) -> Result<MergedBom, MergeError> {
    if !existing_path.exists() {
        tracing::error!(path = %existing_path.display(), "comparison BOM not found");
        return Err(MergeError::BaselineNotFound {
            path: existing_path.to_path_buf(),
        });
    }

    let (existing, degraded) = match parser.parse_cyclonedx_bom(existing_path) {
        ParseOutcome::Parsed(bom) => (bom, None),
        ParseOutcome::NotFound => {
            return Err(MergeError::BaselineNotFound {
                path: existing_path.to_path_buf(),
            })
        }
        ParseOutcome::Unreadable(reason) | ParseOutcome::Malformed(reason) => {
            tracing::error!(
                path = %existing_path.display(),
                reason = %reason,
                "comparison BOM could not be read, merging against an empty baseline"
            );
            (Bom::default(), Some(reason))
        }
    };

    Ok(MergedBom {
        bom: merge(existing, new_bom),
        degraded,
    })
}

/// Merges `new` into `existing`.
///
/// Entries of `existing` win every tie: components by `(name, version)`,
/// dependencies by ref. Metadata comes from `new`, or from `existing` when
/// `new` has none.
pub fn merge(existing: Bom, new: Bom) -> Bom {
    let Bom {
        components: existing_components,
        dependencies: existing_dependencies,
        compositions: mut compositions,
        metadata: existing_metadata,
        extra: mut extra,
        ..
    } = existing;

    let mut components = Vec::with_capacity(existing_components.len() + new.components.len());
    components.extend(existing_components);
    components.extend(new.components);
    let components = dedup_by_identity(components);

    let dependencies = merge_dependencies(existing_dependencies, new.dependencies);

    merge_compositions(&mut compositions, new.compositions);

    for (key, value) in new.extra {
        extra.entry(key).or_insert(value);
    }

    Bom {
        bom_format: new.bom_format,
        spec_version: new.spec_version,
        serial_number: new.serial_number,
        version: new.version,
        metadata: new.metadata.or(existing_metadata),
        components,
        dependencies,
        compositions,
        extra,
    }
}

fn merge_dependencies(existing: Vec<Dependency>, new: Vec<Dependency>) -> Vec<Dependency> {
    if existing.is_empty() {
        return new;
    }

    let mut merged = existing;
    merged.extend(new);
    dedup_dependencies_by_ref(merged)
}

/// Keeps the first dependency entry per ref, preserving order
pub fn dedup_dependencies_by_ref(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen = HashSet::with_capacity(dependencies.len());
    dependencies
        .into_iter()
        .filter(|d| seen.insert(d.bom_ref.clone()))
        .collect()
}

/// Merges `source` compositions into `target`.
///
/// A source composition whose assemblies equal (in order) those of a target
/// composition contributes only its missing dependency refs, appended after
/// the existing ones. Any other source composition is appended whole.
pub fn merge_compositions(target: &mut Vec<Composition>, source: Vec<Composition>) {
    if source.is_empty() {
        return;
    }
    if target.is_empty() {
        *target = source;
        return;
    }

    for incoming in source {
        match target.iter_mut().find(|c| c.same_assemblies(&incoming)) {
            Some(existing) => {
                for dependency in incoming.dependencies {
                    if !existing.dependencies.contains(&dependency) {
                        existing.dependencies.push(dependency);
                    }
                }
            }
            None => target.push(incoming),
        }
    }
}
