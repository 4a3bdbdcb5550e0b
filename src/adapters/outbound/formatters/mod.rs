/// Formatter adapters for the reconciled BOM and the tracker status report
mod cyclonedx_formatter;
mod markdown_formatter;

pub use cyclonedx_formatter::CycloneDxFormatter;
pub use markdown_formatter::MarkdownFormatter;
