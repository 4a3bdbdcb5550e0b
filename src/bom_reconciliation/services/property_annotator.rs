use crate::bom_reconciliation::domain::property::{bool_value, names};
use crate::bom_reconciliation::domain::{Component, IdentifierType, ProjectType, Property};

/// PropertyAnnotator - Stamps provenance properties onto components
///
/// Every function here is a pure transformation of a single component; the
/// decision of *which* annotation applies is made by the caller that knows
/// where the component came from.
pub struct PropertyAnnotator;

impl PropertyAnnotator {
    /// Component listed by hand in configuration.
    ///
    /// Replaces any properties the component carried.
    pub fn mark_manually_added(component: &mut Component) {
        component.properties = vec![
            Property::flag(names::IS_DEVELOPMENT, false),
            Property::new(names::IDENTIFIER_TYPE, IdentifierType::ManuallyAdded.as_str()),
        ];
    }

    /// Component imported from an SPDX document
    ///
    /// # Arguments
    /// * `file_name` - File name (not path) of the SPDX document
    /// * `is_development` - Dev/prod classification, when the document provides one
    pub fn mark_spdx_import(component: &mut Component, file_name: &str, is_development: Option<bool>) {
        component.set_property(names::IDENTIFIER_TYPE, IdentifierType::SpdxImport.as_str());
        component.set_property(names::SPDX_FILE_NAME, file_name);
        if let Some(is_development) = is_development {
            component.set_property(names::IS_DEVELOPMENT, bool_value(is_development));
        }
    }

    /// Component found by scanning a CycloneDX input or manifest.
    ///
    /// Properties already present (for example `is-development` from the
    /// producing scanner) are overwritten only for the names stamped here.
    pub fn mark_discovered(
        component: &mut Component,
        project_type: ProjectType,
        source_file: &str,
        is_development: Option<bool>,
    ) {
        component.set_property(names::IDENTIFIER_TYPE, IdentifierType::Discovered.as_str());
        component.set_property(names::PROJECT_TYPE, project_type.as_str());
        component.set_property(names::FILENAME, source_file);
        let is_development = is_development.unwrap_or_else(|| component.is_development());
        component.set_property(names::IS_DEVELOPMENT, bool_value(is_development));
    }

    /// Appends `exclude-component=true`
    pub fn mark_excluded(component: &mut Component) {
        component.push_property(Property::flag(names::EXCLUDE_COMPONENT, true));
    }

    /// Records where the artifact was found in the artifact repository.
    ///
    /// `is-internal` is true when `repo_name` is one of `internal_repos`
    /// (case-insensitive).
    pub fn mark_artifact_location(
        component: &mut Component,
        repo_name: &str,
        repo_path: &str,
        internal_repos: &[String],
    ) {
        let is_internal = internal_repos
            .iter()
            .any(|r| r.eq_ignore_ascii_case(repo_name));
        component.set_property(names::ARTIFACTORY_REPO_NAME, repo_name);
        component.set_property(names::JFROG_REPO_PATH, repo_path);
        component.set_property(names::IS_INTERNAL, bool_value(is_internal));
    }
}
