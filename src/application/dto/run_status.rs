use crate::shared::error::ExitCode;
use std::path::{Path, PathBuf};

/// An input that could not be used as intended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub source: PathBuf,
    pub reason: String,
}

/// Run-scoped record of warnings and degraded inputs.
///
/// Each stage reports into the accumulator of the run it belongs to; the
/// process exit code is derived from it once the run has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatus {
    warnings: Vec<String>,
    degradations: Vec<Degradation>,
}

impl RunStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records an input that was missing, unreadable or malformed
    pub fn degrade(&mut self, source: &Path, reason: impl Into<String>) {
        self.degradations.push(Degradation {
            source: source.to_path_buf(),
            reason: reason.into(),
        });
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_degraded() {
            ExitCode::Degraded
        } else {
            ExitCode::Success
        }
    }
}
