use crate::bom_reconciliation::domain::{ComparisonBomData, TrackerStatus};

/// Tracker comparison of one reconciled BOM, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub project_name: String,
    /// Sorted by name, then version
    pub rows: Vec<ComparisonBomData>,
}

impl StatusReport {
    pub fn new(project_name: impl Into<String>, mut rows: Vec<ComparisonBomData>) -> Self {
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));
        Self {
            project_name: project_name.into(),
            rows,
        }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn count_components(&self, status: TrackerStatus) -> usize {
        self.rows.iter().filter(|r| r.component_status == status).count()
    }

    pub fn count_releases(&self, status: TrackerStatus) -> usize {
        self.rows.iter().filter(|r| r.release_status == status).count()
    }

    pub fn approved(&self) -> usize {
        self.rows.iter().filter(|r| r.approved).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ComparisonBomData> {
        self.rows.iter().filter(|r| r.error.is_some())
    }
}
