pub mod progress_reporter;
pub mod run_summary;

pub use progress_reporter::StderrProgressReporter;
pub use run_summary::render_run_summary;
