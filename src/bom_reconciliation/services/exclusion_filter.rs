use super::property_annotator::PropertyAnnotator;
use crate::bom_reconciliation::domain::purl::purls_match;
use crate::bom_reconciliation::domain::Component;
use crate::shared::error::SbomError;
use crate::shared::Result;
use regex::{Regex, RegexBuilder};
use std::cell::Cell;

/// Maximum number of exclusion entries to prevent DoS attacks
const MAX_EXCLUDE_ENTRIES: usize = 256;

/// Maximum length of a single exclusion entry
const MAX_ENTRY_LENGTH: usize = 512;

/// ExclusionFilter - Marks components that the project has chosen to exclude
///
/// Entries starting with `pkg:` match a component purl exactly (case-insensitive,
/// after `%40` normalization). Any other entry is `name:version`, where `*` in
/// the name is a wildcard and the version is either `*` or a substring.
///
/// Matching components are not removed: they receive an
/// `exclude-component=true` property so downstream reports still list them.
#[derive(Debug)]
pub struct ExclusionFilter {
    entries: Vec<ExclusionEntry>,
}

impl ExclusionFilter {
    /// Creates a new ExclusionFilter from raw entry strings
    ///
    /// # Errors
    /// - Too many entries (> MAX_EXCLUDE_ENTRIES)
    /// - Empty or overlong entries
    pub fn new(entries: Vec<String>) -> Result<Self> {
        if entries.len() > MAX_EXCLUDE_ENTRIES {
            return Err(SbomError::Validation {
                message: format!(
                    "Too many exclusion entries: {} (maximum: {})",
                    entries.len(),
                    MAX_EXCLUDE_ENTRIES
                ),
            }
            .into());
        }

        let entries = entries
            .into_iter()
            .map(ExclusionEntry::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stamps `exclude-component=true` on every matching component
    ///
    /// A component matching several entries receives the property once per
    /// entry, and each match is counted. A component that already carries
    /// the mark (for example from a baseline BOM) is counted but not stamped
    /// again.
    ///
    /// # Returns
    /// Number of (component, entry) matches
    pub fn apply(&self, components: &mut [Component]) -> usize {
        let mut matches = 0;
        for component in components.iter_mut() {
            let already_marked = component.is_excluded();
            for entry in &self.entries {
                if entry.matches(component) {
                    if !already_marked {
                        PropertyAnnotator::mark_excluded(component);
                    }
                    matches += 1;
                    tracing::debug!(
                        entry = %entry.original,
                        component = %component.display_name(),
                        version = %component.version,
                        "component excluded"
                    );
                }
            }
        }
        matches
    }

    /// Entries that did not match any component during `apply`
    pub fn unmatched_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !e.matched.get())
            .map(|e| e.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExclusionEntry {
    original: String,
    matcher: EntryMatcher,
    matched: Cell<bool>,
}

#[derive(Debug)]
enum EntryMatcher {
    Purl(String),
    NameVersion { name: Regex, version: VersionMatcher },
}

#[derive(Debug)]
enum VersionMatcher {
    Any,
    /// Lowercased substring
    Contains(String),
}

impl ExclusionEntry {
    fn new(original: String) -> Result<Self> {
        validate_entry(&original)?;

        let trimmed = original.trim();
        let matcher = if trimmed.starts_with("pkg:") {
            EntryMatcher::Purl(trimmed.to_string())
        } else {
            let (name, version) = match trimmed.rsplit_once(':') {
                Some((name, version)) => (name, version),
                None => (trimmed, "*"),
            };
            EntryMatcher::NameVersion {
                name: compile_name_pattern(name)?,
                version: if version == "*" || version.is_empty() {
                    VersionMatcher::Any
                } else {
                    VersionMatcher::Contains(version.to_lowercase())
                },
            }
        };

        Ok(Self {
            original,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, component: &Component) -> bool {
        let is_match = match &self.matcher {
            EntryMatcher::Purl(purl) => {
                !component.purl_str().is_empty() && purls_match(component.purl_str(), purl)
            }
            EntryMatcher::NameVersion { name, version } => {
                name.is_match(&component.display_name())
                    && match version {
                        VersionMatcher::Any => true,
                        VersionMatcher::Contains(needle) => {
                            component.version.to_lowercase().contains(needle.as_str())
                        }
                    }
            }
        };
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

fn validate_entry(entry: &str) -> Result<()> {
    if entry.trim().is_empty() {
        return Err(SbomError::Validation {
            message: "Exclusion entry cannot be empty".to_string(),
        }
        .into());
    }

    if entry.len() > MAX_ENTRY_LENGTH {
        return Err(SbomError::Validation {
            message: format!(
                "Exclusion entry is too long ({} chars). Maximum: {} chars",
                entry.len(),
                MAX_ENTRY_LENGTH
            ),
        }
        .into());
    }

    Ok(())
}

/// Translates a name pattern into an anchored, case-insensitive regex where
/// `*` matches any run of characters and everything else is literal
fn compile_name_pattern(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&format!("^{}$", body))
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            SbomError::Validation {
                message: format!("Invalid exclusion pattern '{}': {}", pattern, e),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_reconciliation::domain::property::names;
    use crate::bom_reconciliation::domain::Property;

    fn filter(entries: &[&str]) -> ExclusionFilter {
        ExclusionFilter::new(entries.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn exclude_count(component: &Component) -> usize {
        component
            .properties
            .iter()
            .filter(|p| p.name == names::EXCLUDE_COMPONENT && p.value == "true")
            .count()
    }

    #[test]
    fn test_purl_entry_matches_encoded_purl() {
        let mut components = vec![Component::new(
            "left-pad",
            "1.3.0",
            "pkg:npm/left-pad%401.3.0",
        )];
        let count = filter(&["pkg:npm/left-pad@1.3.0"]).apply(&mut components);
        assert_eq!(count, 1);
        assert!(components[0].is_excluded());
    }

    #[test]
    fn test_purl_entry_is_case_insensitive() {
        let mut components = vec![Component::new(
            "Newtonsoft.Json",
            "13.0.1",
            "pkg:nuget/Newtonsoft.Json@13.0.1",
        )];
        let count = filter(&["PKG:NUGET/newtonsoft.json@13.0.1"]).apply(&mut components);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_purl_entry_does_not_match_other_version() {
        let mut components = vec![Component::new("left-pad", "1.3.1", "pkg:npm/left-pad@1.3.1")];
        let count = filter(&["pkg:npm/left-pad@1.3.0"]).apply(&mut components);
        assert_eq!(count, 0);
        assert!(components[0].properties.is_empty());
    }

    #[test]
    fn test_wildcard_name_and_version() {
        let mut components = vec![
            Component::new("left-pad", "1.3.0", "pkg:npm/left-pad@1.3.0"),
            Component::new("right-pad", "1.0.0", "pkg:npm/right-pad@1.0.0"),
        ];
        let count = filter(&["left-*:*"]).apply(&mut components);
        assert_eq!(count, 1);
        assert!(components[0].is_excluded());
        assert!(!components[1].is_excluded());
    }

    #[test]
    fn test_name_match_is_anchored() {
        let mut components = vec![Component::new("my-left-pad", "1.3.0", "pkg:npm/my-left-pad@1.3.0")];
        assert_eq!(filter(&["left-*:*"]).apply(&mut components), 0);
    }

    #[test]
    fn test_version_is_substring_match() {
        let mut components = vec![
            Component::new("lodash", "4.17.21", "pkg:npm/lodash@4.17.21"),
            Component::new("lodash", "3.10.1", "pkg:npm/lodash@3.10.1"),
        ];
        let count = filter(&["LODASH:4.17"]).apply(&mut components);
        assert_eq!(count, 1);
        assert!(components[0].is_excluded());
    }

    #[test]
    fn test_name_uses_group_qualified_display_name() {
        let mut components = vec![Component::new("core", "7.0.0", "pkg:npm/%40babel/core@7.0.0")
            .with_group("@babel")];
        assert_eq!(filter(&["core:*"]).apply(&mut components), 0);
        assert_eq!(filter(&["@babel/*:7.0.0"]).apply(&mut components), 1);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mut components = vec![
            Component::new("a.b", "1.0", "pkg:npm/a.b@1.0"),
            Component::new("axb", "1.0", "pkg:npm/axb@1.0"),
        ];
        assert_eq!(filter(&["a.b:1.0"]).apply(&mut components), 1);
        assert!(!components[1].is_excluded());
    }

    #[test]
    fn test_entry_without_version_matches_any_version() {
        let mut components = vec![Component::new("debug", "4.3.4", "pkg:npm/debug@4.3.4")];
        assert_eq!(filter(&["debug"]).apply(&mut components), 1);
    }

    #[test]
    fn test_multiple_matching_entries_append_property_each_time() {
        let mut components = vec![Component::new("left-pad", "1.3.0", "pkg:npm/left-pad@1.3.0")];
        let count = filter(&["pkg:npm/left-pad@1.3.0", "left-pad:*"]).apply(&mut components);
        assert_eq!(count, 2);
        assert_eq!(exclude_count(&components[0]), 2);
    }

    #[test]
    fn test_previously_marked_component_is_counted_but_not_restamped() {
        let mut components = vec![Component::new("left-pad", "1.3.0", "pkg:npm/left-pad@1.3.0")
            .with_property(Property::flag(names::EXCLUDE_COMPONENT, true))];
        let count = filter(&["pkg:npm/left-pad@1.3.0", "left-pad:*"]).apply(&mut components);
        assert_eq!(count, 2);
        assert_eq!(exclude_count(&components[0]), 1);
    }

    #[test]
    fn test_unmatched_entries() {
        let mut components = vec![Component::new("left-pad", "1.3.0", "pkg:npm/left-pad@1.3.0")];
        let filter = filter(&["left-pad:*", "nothing-*:*"]);
        filter.apply(&mut components);
        assert_eq!(filter.unmatched_entries(), vec!["nothing-*:*".to_string()]);
    }

    #[test]
    fn test_empty_entry_rejected() {
        let result = ExclusionFilter::new(vec!["  ".to_string()]);
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_too_many_entries_rejected() {
        let entries = (0..=MAX_EXCLUDE_ENTRIES).map(|i| format!("pkg-{}:*", i)).collect();
        let result = ExclusionFilter::new(entries);
        assert!(result.unwrap_err().to_string().contains("Too many exclusion entries"));
    }

    #[test]
    fn test_overlong_entry_rejected() {
        let result = ExclusionFilter::new(vec!["a".repeat(MAX_ENTRY_LENGTH + 1)]);
        assert!(result.unwrap_err().to_string().contains("too long"));
    }
}
