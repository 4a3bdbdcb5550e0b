use crate::application::read_models::StatusReport;
use crate::bom_reconciliation::domain::{ComparisonBomData, TrackerStatus};
use crate::bom_reconciliation::domain::property::NOT_AVAILABLE;
use crate::ports::outbound::StatusReportFormatter;
use crate::shared::Result;

/// Markdown table header for the component status table
const TABLE_HEADER: &str =
    "| Component | Version | Component Status | Release Status | Clearing State | Upload | Development | Release |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str =
    "|-----------|---------|------------------|----------------|----------------|--------|-------------|---------|\n";

/// MarkdownFormatter adapter for the tracker comparison report
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn release_cell(row: &ComparisonBomData) -> String {
        match (&row.release_id, &row.release_link) {
            (Some(id), Some(link)) => format!(
                "[{}]({})",
                Self::escape_markdown_table_cell(id),
                link.replace(' ', "%20")
            ),
            (Some(id), None) => Self::escape_markdown_table_cell(id),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &StatusReport) {
        output.push_str(&format!(
            "# Component Status: {}\n\n",
            Self::escape_markdown_table_cell(&report.project_name)
        ));
    }

    fn render_summary(&self, output: &mut String, report: &StatusReport) {
        output.push_str("## Summary\n\n");
        output.push_str(&format!("- Components compared: {}\n", report.total()));
        output.push_str(&format!(
            "- Components in tracker: {}\n",
            report.count_components(TrackerStatus::Available)
        ));
        output.push_str(&format!(
            "- Releases in tracker: {}\n",
            report.count_releases(TrackerStatus::Available)
        ));
        output.push_str(&format!(
            "- Releases missing: {}\n",
            report.count_releases(TrackerStatus::NotAvailable)
        ));
        output.push_str(&format!("- Releases approved: {}\n", report.approved()));
        output.push_str(&format!(
            "- Lookup errors: {}\n\n",
            report.count_releases(TrackerStatus::Error)
        ));
    }

    fn render_rows(&self, output: &mut String, rows: &[ComparisonBomData]) {
        output.push_str("## Components\n\n");
        if rows.is_empty() {
            output.push_str("*No components to compare*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&row.name),
                Self::escape_markdown_table_cell(&row.version),
                row.component_status,
                row.release_status,
                Self::escape_markdown_table_cell(&row.clearing_state),
                row.upload_status.as_str(),
                if row.is_development { "yes" } else { "no" },
                Self::release_cell(row),
            ));
        }
        output.push('\n');
    }

    fn render_errors(&self, output: &mut String, report: &StatusReport) {
        let errors: Vec<_> = report.errors().collect();
        if errors.is_empty() {
            return;
        }

        output.push_str("## Lookup Errors\n\n");
        for row in errors {
            output.push_str(&format!(
                "- `{}`: {}\n",
                row.component_external_id,
                Self::escape_markdown_table_cell(row.error.as_deref().unwrap_or(NOT_AVAILABLE))
            ));
        }
        output.push('\n');
    }
}

impl StatusReportFormatter for MarkdownFormatter {
    fn format_report(&self, report: &StatusReport) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, report);
        self.render_summary(&mut output, report);
        self.render_rows(&mut output, &report.rows);
        self.render_errors(&mut output, report);
        Ok(output)
    }
}
