use crate::bom_reconciliation::domain::Bom;
use std::path::Path;

/// Result of reading one BOM file.
///
/// Parsers never fail the run: each case is returned to the caller, which
/// decides whether to degrade to an empty BOM or abort.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// No file at the given path
    NotFound,
    /// File exists but could not be read (permissions, symlink, size, I/O)
    Unreadable(String),
    /// File was read but its content is not a usable BOM
    Malformed(String),
}

impl<T> ParseOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    /// Reason the file could not be used, for `Unreadable` and `Malformed`
    pub fn degradation(&self) -> Option<&str> {
        match self {
            ParseOutcome::Unreadable(reason) | ParseOutcome::Malformed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(f(value)),
            ParseOutcome::NotFound => ParseOutcome::NotFound,
            ParseOutcome::Unreadable(reason) => ParseOutcome::Unreadable(reason),
            ParseOutcome::Malformed(reason) => ParseOutcome::Malformed(reason),
        }
    }
}

impl<T: Default> ParseOutcome<T> {
    /// Parsed value, or the empty value for every other case
    pub fn into_bom_or_empty(self) -> T {
        match self {
            ParseOutcome::Parsed(value) => value,
            _ => T::default(),
        }
    }
}

/// Components and dependencies read from an SPDX 3 document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpdxImport {
    pub bom: Bom,
    /// `specVersion` of a document that was rejected by the version gate.
    /// `Some("")` when the version was missing.
    pub rejected_version: Option<String>,
    /// The document's relationships carry a lifecycle scope, so the
    /// `is-development` flags on its components are meaningful
    pub development_known: bool,
}

/// CycloneDxBomParser port for reading CycloneDX JSON BOMs
pub trait CycloneDxBomParser {
    /// Reads and decodes the CycloneDX BOM at `path`
    ///
    /// Strict decoding is tried first; on failure the parser falls back to a
    /// per-element lenient decoding before reporting `Malformed`.
    fn parse_cyclonedx_bom(&self, path: &Path) -> ParseOutcome<Bom>;
}

/// SpdxBomParser port for reading SPDX 3 JSON-LD documents
pub trait SpdxBomParser {
    /// Reads the `@graph` of the SPDX document at `path`
    ///
    /// Documents older than SPDX 3.0 yield `Parsed` with an empty BOM and
    /// `rejected_version` set.
    fn parse_spdx_bom(&self, path: &Path) -> ParseOutcome<SpdxImport>;
}
