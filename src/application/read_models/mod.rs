//! Read models for report rendering
//!
//! View-optimized structs built from the reconciled BOM and tracker lookups.

mod status_report;

pub use status_report::StatusReport;
