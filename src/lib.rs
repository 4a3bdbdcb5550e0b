//! bom-reconciler - SBOM reconciliation for software-composition analysis
//!
//! This library combines CycloneDX and SPDX 3 inputs into one deduplicated
//! CycloneDX 1.6 BOM with provenance properties, reconciles it against a
//! previously written baseline BOM, and optionally compares the result with
//! a component-tracking system.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_reconciliation`): Component model and reconciliation services
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bom_reconciler::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = ReconcileBomUseCase::new(
//!     CycloneDxFileParser::new(),
//!     SpdxFileParser::new(),
//!     FileSystemWriter::new(),
//!     CycloneDxFormatter::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let mut request = ReconcileRequest::new("shop", ProjectType::Npm, PathBuf::from("out"));
//! request.inputs = vec![PathBuf::from("bom.cdx.json")];
//! request.comparison_bom = Some(PathBuf::from("out/shop_Bom.cdx.json"));
//! let response = use_case.execute(request)?;
//!
//! println!("{} components", response.bom.component_count());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_reconciliation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FilePresenter, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{CycloneDxFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{CachingReleaseRepository, Sw360ReleaseRepository};
    pub use crate::adapters::outbound::parsers::{CycloneDxFileParser, SpdxFileParser};
    pub use crate::application::dto::{ManualComponent, ReconcileRequest, ReconcileResponse, RunStatus};
    pub use crate::application::read_models::StatusReport;
    pub use crate::application::use_cases::{CompareWithTrackerUseCase, ReconcileBomUseCase};
    pub use crate::bom_reconciliation::domain::{
        Bom, ComparisonBomData, Component, Composition, Dependency, ProjectType, Property,
    };
    pub use crate::bom_reconciliation::services::{
        combine_components_from_existing_bom, remove_invalid_dependencies_and_references,
        ExclusionFilter, PropertyAnnotator,
    };
    pub use crate::ports::outbound::{
        BomFormatter, BomWriter, CycloneDxBomParser, OutputPresenter, ParseOutcome,
        ProgressReporter, ReleaseRepository, SpdxBomParser, StatusReportFormatter,
    };
    pub use crate::shared::error::ExitCode;
    pub use crate::shared::Result;
}
