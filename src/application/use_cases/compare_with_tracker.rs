use crate::application::read_models::StatusReport;
use crate::bom_reconciliation::domain::{Bom, Component, ComparisonBomData};
use crate::ports::outbound::{ProgressReporter, ReleaseRepository};
use futures::stream::{self, StreamExt};

/// Maximum number of tracker lookups in flight
const MAX_CONCURRENT_LOOKUPS: usize = 8;

/// CompareWithTrackerUseCase - Joins BOM components with tracker releases
///
/// Looks up every non-excluded component that has a purl and builds a
/// `StatusReport` with one row per component. Lookup failures become rows
/// with status `Error`; they never abort the comparison.
///
/// # Type Parameters
/// * `R` - ReleaseRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct CompareWithTrackerUseCase<R, PR> {
    release_repository: R,
    progress_reporter: PR,
}

impl<R, PR> CompareWithTrackerUseCase<R, PR>
where
    R: ReleaseRepository,
    PR: ProgressReporter,
{
    pub fn new(release_repository: R, progress_reporter: PR) -> Self {
        Self {
            release_repository,
            progress_reporter,
        }
    }

    /// Compares the components of `bom` against the tracker
    pub async fn execute(&self, project_name: &str, bom: &Bom) -> StatusReport {
        let components = Self::components_to_compare(bom);
        let total = components.len();

        self.progress_reporter.report(&format!(
            "🔍 Comparing {} component(s) with the component tracker...",
            total
        ));

        let mut lookups = stream::iter(components)
            .map(|component| async move {
                let purl = component.normalized_purl();
                match self.release_repository.lookup_release(&purl).await {
                    Ok(lookup) => ComparisonBomData::from_lookup(component, &lookup),
                    Err(e) => {
                        tracing::warn!(purl = %purl, error = %e, "tracker lookup failed");
                        ComparisonBomData::from_error(component, e.to_string())
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_LOOKUPS);

        let mut rows = Vec::with_capacity(total);
        while let Some(row) = lookups.next().await {
            rows.push(row);
            self.progress_reporter
                .report_progress(rows.len(), total, Some(&rows[rows.len() - 1].name));
        }

        let report = StatusReport::new(project_name, rows);
        let failed = report.errors().count();
        if failed > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} tracker lookup(s) failed",
                failed
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Compared {} component(s); {} release(s) approved",
            report.total(),
            report.approved()
        ));

        report
    }

    fn components_to_compare(bom: &Bom) -> Vec<&Component> {
        bom.components
            .iter()
            .filter(|c| !c.is_excluded() && !c.purl_str().is_empty())
            .collect()
    }
}
