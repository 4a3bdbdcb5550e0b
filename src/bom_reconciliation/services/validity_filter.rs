use crate::bom_reconciliation::domain::Component;
use std::collections::HashSet;

/// Outcome of a validity pass.
///
/// `invalid` and `duplicates` are returned to the caller instead of being
/// collected in shared state, so each run reports only its own rejects.
#[derive(Debug, Default, Clone)]
pub struct ValidityReport {
    pub valid: Vec<Component>,
    pub invalid: Vec<Component>,
    pub duplicates: Vec<Component>,
}

/// Splits components into valid ones and rejects.
///
/// A component is invalid when its name, version or purl is empty. Among the
/// valid ones, later entries with an already-seen `(name, version)` are
/// reported as duplicates; the first occurrence is kept.
pub fn remove_invalid_components(components: Vec<Component>) -> ValidityReport {
    let mut report = ValidityReport::default();
    let mut seen = HashSet::with_capacity(components.len());

    for component in components {
        if !component.is_fully_specified() {
            tracing::debug!(
                name = %component.name,
                version = %component.version,
                "dropping component without name, version or purl"
            );
            report.invalid.push(component);
        } else if seen.insert(component.identity_key()) {
            report.valid.push(component);
        } else {
            report.duplicates.push(component);
        }
    }

    report
}

/// Keeps the first component per `(name, version)`, preserving order
pub fn dedup_by_identity(components: Vec<Component>) -> Vec<Component> {
    let mut seen = HashSet::with_capacity(components.len());
    components
        .into_iter()
        .filter(|c| seen.insert(c.identity_key()))
        .collect()
}
