use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the provenance properties this tool reads and writes.
pub mod names {
    pub const IS_DEVELOPMENT: &str = "is-development";
    pub const IS_INTERNAL: &str = "is-internal";
    pub const IDENTIFIER_TYPE: &str = "identifier-type";
    pub const EXCLUDE_COMPONENT: &str = "exclude-component";
    pub const ARTIFACTORY_REPO_NAME: &str = "artifactory-repo-name";
    pub const PROJECT_TYPE: &str = "project-type";
    pub const FILENAME: &str = "filename";
    pub const JFROG_REPO_PATH: &str = "jfrog-repo-path";
    pub const SPDX_FILE_NAME: &str = "spdx-file-name";
}

/// Display value for a string property that is not present
pub const NOT_AVAILABLE: &str = "N/A";

/// A CycloneDX name/value property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn flag(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, bool_value(value))
    }
}

/// How a component entered the BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierType {
    /// Found by scanning a manifest or CycloneDX input
    Discovered,
    /// Listed explicitly in configuration
    ManuallyAdded,
    /// Imported from an SPDX document
    SpdxImport,
}

impl IdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Discovered => "Discovered",
            IdentifierType::ManuallyAdded => "ManuallyAdded",
            IdentifierType::SpdxImport => "SpdxImport",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase boolean form used in property values
pub fn bool_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Parses a property value as a boolean, tolerating `True`/`FALSE` spellings
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
