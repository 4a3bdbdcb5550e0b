use super::run_status::RunStatus;
use crate::bom_reconciliation::domain::{Bom, Component};
use std::path::PathBuf;

/// ReconcileResponse - Outcome of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileResponse {
    /// The reconciled BOM as written
    pub bom: Bom,
    pub output_path: PathBuf,
    /// Previous output, renamed before the new one was written
    pub backup_path: Option<PathBuf>,
    /// Written only when some input components did not fit the project type
    pub unsupported_output_path: Option<PathBuf>,
    pub unsupported: Vec<Component>,
    pub invalid: Vec<Component>,
    pub duplicates: Vec<Component>,
    /// Number of (component, exclusion entry) matches
    pub excluded_matches: usize,
    pub status: RunStatus,
}
