/// Mock implementations for testing
mod mock_bom_parser;
mod mock_bom_writer;
mod mock_progress_reporter;
mod mock_release_repository;

pub use mock_bom_parser::{MockCycloneDxParser, MockSpdxParser};
pub use mock_bom_writer::MockBomWriter;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_release_repository::MockReleaseRepository;
