/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the reconciliation core uses
/// to interact with external systems (file system, tracker, console).
pub mod bom_parser;
pub mod bom_writer;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod release_repository;

pub use bom_parser::{CycloneDxBomParser, ParseOutcome, SpdxBomParser, SpdxImport};
pub use bom_writer::BomWriter;
pub use formatter::{BomFormatter, StatusReportFormatter};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use release_repository::ReleaseRepository;
