use crate::bom_reconciliation::domain::ProjectType;
use std::path::{Path, PathBuf};

/// Default output file suffix: `<project>_Bom.cdx.json`
pub const DEFAULT_OUTPUT_SUFFIX: &str = "Bom.cdx.json";

/// Format of one input file, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomInputKind {
    CycloneDx,
    Spdx,
}

impl BomInputKind {
    /// `*.spdx.json`, `*.spdx` and `*.jsonld` are SPDX; everything else is
    /// read as CycloneDX JSON
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if name.ends_with(".spdx.json") || name.ends_with(".spdx") || name.ends_with(".jsonld") {
            BomInputKind::Spdx
        } else {
            BomInputKind::CycloneDx
        }
    }
}

/// A component listed by hand in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualComponent {
    pub name: String,
    pub version: String,
    pub purl: String,
    pub group: Option<String>,
}

/// ReconcileRequest - Input of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub project_name: String,
    pub project_type: ProjectType,
    /// CycloneDX and SPDX files to combine, in order
    pub inputs: Vec<PathBuf>,
    /// Baseline BOM to reconcile against
    pub comparison_bom: Option<PathBuf>,
    pub output_folder: PathBuf,
    pub output_suffix: String,
    pub exclude_components: Vec<String>,
    pub include_components: Vec<ManualComponent>,
    /// Artifact repositories whose packages are internal
    pub internal_repos: Vec<String>,
}

impl ReconcileRequest {
    pub fn new(project_name: impl Into<String>, project_type: ProjectType, output_folder: PathBuf) -> Self {
        Self {
            project_name: project_name.into(),
            project_type,
            inputs: Vec::new(),
            comparison_bom: None,
            output_folder,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            exclude_components: Vec::new(),
            include_components: Vec::new(),
            internal_repos: Vec::new(),
        }
    }

    /// `<output_folder>/<project>_<suffix>`
    pub fn output_path(&self) -> PathBuf {
        self.output_folder
            .join(format!("{}_{}", self.project_name, self.output_suffix))
    }

    /// `<output_folder>/<project>_Unsupported_<suffix>`
    pub fn unsupported_output_path(&self) -> PathBuf {
        self.output_folder
            .join(format!("{}_Unsupported_{}", self.project_name, self.output_suffix))
    }
}
