use super::component::Component;
use super::property::{names, IdentifierType, NOT_AVAILABLE};
use std::fmt;

/// Release data as held by the component-tracking system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseRecord {
    pub release_id: String,
    pub component_id: Option<String>,
    pub name: String,
    pub version: String,
    pub clearing_state: Option<String>,
    pub source_download_url: Option<String>,
    pub binary_download_url: Option<String>,
    pub fossology_upload_id: Option<String>,
    pub link: Option<String>,
}

impl ReleaseRecord {
    /// Release clearing is finished and approved
    pub fn is_approved(&self) -> bool {
        matches!(
            self.clearing_state.as_deref(),
            Some("APPROVED") | Some("REPORT_AVAILABLE")
        )
    }
}

/// Result of looking a purl up in the tracking system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackerLookup {
    pub component_exists: bool,
    pub release: Option<ReleaseRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerStatus {
    Available,
    NotAvailable,
    /// Lookup failed; the row carries the error text
    Error,
}

impl TrackerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerStatus::Available => "Available",
            TrackerStatus::NotAvailable => "Not Available",
            TrackerStatus::Error => "Error",
        }
    }
}

impl fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fossology upload state of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Uploaded,
    NotUploaded,
    /// No source to upload
    NoSource,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploaded => "Uploaded",
            UploadStatus::NotUploaded => "Not Uploaded",
            UploadStatus::NoSource => "No Source",
        }
    }
}

/// Flattened view of one BOM component joined with its tracker release.
///
/// Built per reconciliation run for the status report and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBomData {
    pub name: String,
    pub version: String,
    pub component_external_id: String,
    pub component_status: TrackerStatus,
    pub release_status: TrackerStatus,
    pub release_id: Option<String>,
    pub release_link: Option<String>,
    pub clearing_state: String,
    pub source_url: Option<String>,
    pub binary_url: Option<String>,
    pub upload_status: UploadStatus,
    pub approved: bool,
    pub identifier_type: String,
    pub is_development: bool,
    pub error: Option<String>,
}

impl ComparisonBomData {
    /// Joins a component with the tracker's answer for its purl
    pub fn from_lookup(component: &Component, lookup: &TrackerLookup) -> Self {
        let mut row = Self::base(component);
        row.component_status = status_of(lookup.component_exists);
        row.release_status = status_of(lookup.release.is_some());

        if let Some(release) = &lookup.release {
            row.release_id = Some(release.release_id.clone());
            row.release_link = release.link.clone();
            row.clearing_state = release
                .clearing_state
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            row.source_url = release.source_download_url.clone();
            row.binary_url = release.binary_download_url.clone();
            row.upload_status = match (&release.fossology_upload_id, &release.source_download_url) {
                (Some(_), _) => UploadStatus::Uploaded,
                (None, Some(_)) => UploadStatus::NotUploaded,
                (None, None) => UploadStatus::NoSource,
            };
            row.approved = release.is_approved();
        }
        row
    }

    /// Row for a component whose lookup failed
    pub fn from_error(component: &Component, error: impl Into<String>) -> Self {
        let mut row = Self::base(component);
        row.component_status = TrackerStatus::Error;
        row.release_status = TrackerStatus::Error;
        row.error = Some(error.into());
        row
    }

    fn base(component: &Component) -> Self {
        Self {
            name: component.display_name(),
            version: component.version.clone(),
            component_external_id: component.normalized_purl(),
            component_status: TrackerStatus::NotAvailable,
            release_status: TrackerStatus::NotAvailable,
            release_id: None,
            release_link: None,
            clearing_state: NOT_AVAILABLE.to_string(),
            source_url: None,
            binary_url: None,
            upload_status: UploadStatus::NoSource,
            approved: false,
            identifier_type: component
                .property_or(names::IDENTIFIER_TYPE, IdentifierType::Discovered.as_str())
                .to_string(),
            is_development: component.is_development(),
            error: None,
        }
    }
}

fn status_of(found: bool) -> TrackerStatus {
    if found {
        TrackerStatus::Available
    } else {
        TrackerStatus::NotAvailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_reconciliation::domain::property::Property;

    fn component() -> Component {
        Component::new("core", "7.0.0", "pkg:npm/%40babel/core@7.0.0")
            .with_group("@babel")
            .with_property(Property::flag(names::IS_DEVELOPMENT, true))
    }

    #[test]
    fn test_from_lookup_with_release() {
        let lookup = TrackerLookup {
            component_exists: true,
            release: Some(ReleaseRecord {
                release_id: "r1".to_string(),
                clearing_state: Some("APPROVED".to_string()),
                source_download_url: Some("https://example.org/src.tgz".to_string()),
                fossology_upload_id: Some("42".to_string()),
                ..ReleaseRecord::default()
            }),
        };

        let row = ComparisonBomData::from_lookup(&component(), &lookup);
        assert_eq!(row.name, "@babel/core");
        assert_eq!(row.component_external_id, "pkg:npm/@babel/core@7.0.0");
        assert_eq!(row.component_status, TrackerStatus::Available);
        assert_eq!(row.release_status, TrackerStatus::Available);
        assert_eq!(row.upload_status, UploadStatus::Uploaded);
        assert!(row.approved);
        assert!(row.is_development);
        assert_eq!(row.identifier_type, "Discovered");
    }

    #[test]
    fn test_from_lookup_component_without_release() {
        let lookup = TrackerLookup {
            component_exists: true,
            release: None,
        };
        let row = ComparisonBomData::from_lookup(&component(), &lookup);
        assert_eq!(row.component_status, TrackerStatus::Available);
        assert_eq!(row.release_status, TrackerStatus::NotAvailable);
        assert_eq!(row.clearing_state, "N/A");
        assert_eq!(row.upload_status, UploadStatus::NoSource);
    }

    #[test]
    fn test_upload_status_without_fossology_upload() {
        let lookup = TrackerLookup {
            component_exists: true,
            release: Some(ReleaseRecord {
                release_id: "r1".to_string(),
                source_download_url: Some("https://example.org/src.tgz".to_string()),
                ..ReleaseRecord::default()
            }),
        };
        let row = ComparisonBomData::from_lookup(&component(), &lookup);
        assert_eq!(row.upload_status, UploadStatus::NotUploaded);
        assert!(!row.approved);
    }

    #[test]
    fn test_from_error() {
        let row = ComparisonBomData::from_error(&component(), "timeout");
        assert_eq!(row.component_status, TrackerStatus::Error);
        assert_eq!(row.error.as_deref(), Some("timeout"));
    }
}
