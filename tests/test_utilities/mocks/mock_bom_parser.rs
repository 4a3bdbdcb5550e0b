use bom_reconciler::ports::outbound::SpdxImport;
use bom_reconciler::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock CycloneDxBomParser returning canned outcomes per path
///
/// Paths without an outcome parse as `NotFound`.
#[derive(Default)]
pub struct MockCycloneDxParser {
    outcomes: HashMap<PathBuf, ParseOutcome<Bom>>,
}

impl MockCycloneDxParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bom(mut self, path: impl Into<PathBuf>, bom: Bom) -> Self {
        self.outcomes.insert(path.into(), ParseOutcome::Parsed(bom));
        self
    }

    pub fn with_outcome(mut self, path: impl Into<PathBuf>, outcome: ParseOutcome<Bom>) -> Self {
        self.outcomes.insert(path.into(), outcome);
        self
    }
}

impl CycloneDxBomParser for MockCycloneDxParser {
    fn parse_cyclonedx_bom(&self, path: &Path) -> ParseOutcome<Bom> {
        self.outcomes
            .get(path)
            .cloned()
            .unwrap_or(ParseOutcome::NotFound)
    }
}

/// Mock SpdxBomParser returning canned imports per path
#[derive(Default)]
pub struct MockSpdxParser {
    outcomes: HashMap<PathBuf, ParseOutcome<SpdxImport>>,
}

impl MockSpdxParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_import(mut self, path: impl Into<PathBuf>, import: SpdxImport) -> Self {
        self.outcomes.insert(path.into(), ParseOutcome::Parsed(import));
        self
    }
}

impl SpdxBomParser for MockSpdxParser {
    fn parse_spdx_bom(&self, path: &Path) -> ParseOutcome<SpdxImport> {
        self.outcomes
            .get(path)
            .cloned()
            .unwrap_or(ParseOutcome::NotFound)
    }
}
