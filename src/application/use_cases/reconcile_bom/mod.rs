use crate::application::dto::{BomInputKind, ManualComponent, ReconcileRequest, ReconcileResponse, RunStatus};
use crate::bom_reconciliation::domain::property::{names, NOT_AVAILABLE};
use crate::bom_reconciliation::domain::{Bom, Component};
use crate::bom_reconciliation::services::{
    combine_components_from_existing_bom, dedup_dependencies_by_ref, merge_compositions, remove_invalid_components,
    remove_invalid_dependencies_and_references, retain_supported_components, split_spdx_bom,
    BomGenerator, ExclusionFilter, PropertyAnnotator,
};
use crate::ports::outbound::{
    BomFormatter, BomWriter, CycloneDxBomParser, ParseOutcome, ProgressReporter, SpdxBomParser,
};
use crate::shared::Result;
use std::path::{Path, PathBuf};


/// Components read from all inputs, before validation
#[derive(Debug, Default)]
struct CollectedInputs {
    bom: Bom,
    unsupported: Bom,
}

/// ReconcileBomUseCase - Core use case for BOM reconciliation
///
/// Reads every input, filters and annotates the components, reconciles the
/// result against the comparison BOM and writes it with a backup of the
/// previous output.
///
/// # Type Parameters
/// * `CP` - CycloneDxBomParser implementation
/// * `SP` - SpdxBomParser implementation
/// * `W` - BomWriter implementation
/// * `F` - BomFormatter implementation
/// * `PR` - ProgressReporter implementation
pub struct ReconcileBomUseCase<CP, SP, W, F, PR> {
    cyclonedx_parser: CP,
    spdx_parser: SP,
    writer: W,
    formatter: F,
    progress_reporter: PR,
}

impl<CP, SP, W, F, PR> ReconcileBomUseCase<CP, SP, W, F, PR>
where
    CP: CycloneDxBomParser,
    SP: SpdxBomParser,
    W: BomWriter,
    F: BomFormatter,
    PR: ProgressReporter,
{
    /// Creates a new ReconcileBomUseCase with injected dependencies
    pub fn new(cyclonedx_parser: CP, spdx_parser: SP, writer: W, formatter: F, progress_reporter: PR) -> Self {
        Self {
            cyclonedx_parser,
            spdx_parser,
            writer,
            formatter,
            progress_reporter,
        }
    }

    /// Executes one reconciliation run
    ///
    /// # Errors
    /// Returns an error if:
    /// - The exclusion list is invalid
    /// - The comparison BOM does not exist
    /// - The output cannot be serialized or written
    ///
    /// Unreadable or malformed inputs are not errors; they are recorded in
    /// the response's `RunStatus`.
    pub fn execute(&self, request: ReconcileRequest) -> Result<ReconcileResponse> {
        let mut status = RunStatus::new();

        // Validate exclusions before reading anything
        let exclusion_filter = ExclusionFilter::new(request.exclude_components.clone())?;

        // Step 1: Read inputs
        let CollectedInputs { mut bom, unsupported } = self.collect_inputs(&request, &mut status);

        // Step 2: Manual additions
        bom.components
            .extend(request.include_components.iter().map(manual_component));

        // Step 3: Validity filter
        let report = remove_invalid_components(std::mem::take(&mut bom.components));
        bom.components = report.valid;
        if !report.invalid.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} component(s) without name, version or purl were dropped",
                report.invalid.len()
            ));
        }

        // Step 4: Reconcile with the comparison BOM
        let mut bom = self.reconcile(bom, &request, &mut status)?;

        // Step 5: Exclusions, for baseline components too
        let excluded_matches = exclusion_filter.apply(&mut bom.components);
        if excluded_matches > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Marked {} component match(es) as excluded",
                excluded_matches
            ));
        }
        for entry in exclusion_filter.unmatched_entries() {
            status.warn(format!("Exclusion entry '{}' did not match any component", entry));
        }

        // Step 6: Artifact locations
        annotate_artifact_locations(&mut bom.components, &request.internal_repos);

        // Step 7: Dependency cleanup and fresh metadata
        bom.dependencies =
            remove_invalid_dependencies_and_references(&bom.components, std::mem::take(&mut bom.dependencies));
        BomGenerator::stamp_default(&mut bom);

        // Step 8: Write outputs
        let output_path = request.output_path();
        let backup_path = self.write_bom(&bom, &output_path)?;
        self.progress_reporter.report(&format!(
            "✅ Wrote {} component(s) to {}",
            bom.component_count(),
            output_path.display()
        ));

        let unsupported_output_path = if unsupported.components.is_empty() {
            None
        } else {
            let path = request.unsupported_output_path();
            let mut unsupported_bom = unsupported.clone();
            BomGenerator::stamp_default(&mut unsupported_bom);
            self.write_bom(&unsupported_bom, &path)?;
            self.progress_reporter.report(&format!(
                "📄 {} unsupported component(s) written to {}",
                unsupported.component_count(),
                path.display()
            ));
            Some(path)
        };

        for warning in status.warnings() {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", warning));
        }

        Ok(ReconcileResponse {
            bom,
            output_path,
            backup_path,
            unsupported_output_path,
            unsupported: unsupported.components,
            invalid: report.invalid,
            duplicates: report.duplicates,
            excluded_matches,
            status,
        })
    }

    /// Reads every input and splits its components by project-type support
    fn collect_inputs(&self, request: &ReconcileRequest, status: &mut RunStatus) -> CollectedInputs {
        let mut collected = CollectedInputs::default();

        for path in &request.inputs {
            self.progress_reporter
                .report(&format!("📖 Reading {}", path.display()));

            let input = match BomInputKind::detect(path) {
                BomInputKind::CycloneDx => self.read_cyclonedx_input(path, request, status),
                BomInputKind::Spdx => self.read_spdx_input(path, request, status),
            };

            if collected.bom.metadata.is_none() {
                collected.bom.metadata = input.bom.metadata.clone();
            }
            collected.bom = merge_input(collected.bom, input.bom);
            collected.unsupported = merge_input(collected.unsupported, input.unsupported);
        }

        collected
    }

    fn read_cyclonedx_input(
        &self,
        path: &Path,
        request: &ReconcileRequest,
        status: &mut RunStatus,
    ) -> CollectedInputs {
        let outcome = self.cyclonedx_parser.parse_cyclonedx_bom(path);
        record_outcome(&outcome, path, status);
        let mut bom = outcome.into_bom_or_empty();

        let removed = retain_supported_components(&mut bom.components, request.project_type);
        let source_file = file_name(path);
        for component in &mut bom.components {
            PropertyAnnotator::mark_discovered(component, request.project_type, &source_file, None);
        }

        CollectedInputs {
            bom,
            unsupported: Bom::with_components(removed),
        }
    }

    fn read_spdx_input(
        &self,
        path: &Path,
        request: &ReconcileRequest,
        status: &mut RunStatus,
    ) -> CollectedInputs {
        let outcome = self.spdx_parser.parse_spdx_bom(path);
        record_outcome(&outcome, path, status);
        let import = outcome.into_bom_or_empty();

        if let Some(version) = &import.rejected_version {
            let shown = if version.is_empty() { NOT_AVAILABLE } else { version.as_str() };
            status.warn(format!(
                "{} was ignored: SPDX version {} is older than 3.0",
                path.display(),
                shown
            ));
        }

        let split = split_spdx_bom(import.bom, request.project_type, &file_name(path));
        CollectedInputs {
            bom: split.supported,
            unsupported: split.unsupported,
        }
    }

    fn reconcile(&self, bom: Bom, request: &ReconcileRequest, status: &mut RunStatus) -> Result<Bom> {
        let Some(comparison_path) = &request.comparison_bom else {
            return Ok(bom);
        };

        self.progress_reporter.report(&format!(
            "🔄 Reconciling with comparison BOM {}",
            comparison_path.display()
        ));

        let merged = combine_components_from_existing_bom(&self.cyclonedx_parser, bom, comparison_path)?;
        if let Some(reason) = merged.degraded {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: comparison BOM could not be read, merged against an empty baseline: {}",
                reason
            ));
            status.degrade(comparison_path, reason);
        }
        Ok(merged.bom)
    }

    fn write_bom(&self, bom: &Bom, path: &Path) -> Result<Option<PathBuf>> {
        let content = self.formatter.format_bom(bom)?;
        let backup = self.writer.write_with_backup(path, &content)?;
        if let Some(backup) = &backup {
            self.progress_reporter
                .report(&format!("💾 Previous output backed up to {}", backup.display()));
        }
        Ok(backup)
    }
}

/// Appends one input's components and dependencies. Dependencies are
/// deduplicated by ref here; duplicate components are resolved later by the
/// validity filter.
fn merge_input(mut target: Bom, source: Bom) -> Bom {
    target.components.extend(source.components);
    target.dependencies.extend(source.dependencies);
    target.dependencies = dedup_dependencies_by_ref(target.dependencies);
    merge_compositions(&mut target.compositions, source.compositions);
    target
}

fn record_outcome<T>(outcome: &ParseOutcome<T>, path: &Path, status: &mut RunStatus) {
    match outcome {
        ParseOutcome::Parsed(_) => {}
        ParseOutcome::NotFound => status.degrade(path, "input file not found"),
        ParseOutcome::Unreadable(reason) | ParseOutcome::Malformed(reason) => status.degrade(path, reason.clone()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn manual_component(manual: &ManualComponent) -> Component {
    let mut component = Component::new(&manual.name, &manual.version, &manual.purl);
    if let Some(group) = manual.group.as_deref().filter(|g| !g.is_empty()) {
        component = component.with_group(group);
    }
    PropertyAnnotator::mark_manually_added(&mut component);
    component
}

/// Recomputes `is-internal` for components that carry an artifact repository
fn annotate_artifact_locations(components: &mut [Component], internal_repos: &[String]) {
    for component in components.iter_mut() {
        let Some(repo_name) = component.property(names::ARTIFACTORY_REPO_NAME).map(str::to_string) else {
            continue;
        };
        let repo_path = component
            .property_or(names::JFROG_REPO_PATH, NOT_AVAILABLE)
            .to_string();
        PropertyAnnotator::mark_artifact_location(component, &repo_name, &repo_path, internal_repos);
    }
}
