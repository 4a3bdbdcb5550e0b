use crate::application::read_models::StatusReport;
use crate::bom_reconciliation::domain::Bom;
use crate::shared::Result;

/// BomFormatter port for serializing the reconciled BOM
pub trait BomFormatter {
    /// # Errors
    /// Returns an error if serialization fails
    fn format_bom(&self, bom: &Bom) -> Result<String>;
}

/// StatusReportFormatter port for rendering the tracker comparison
pub trait StatusReportFormatter {
    fn format_report(&self, report: &StatusReport) -> Result<String>;
}
