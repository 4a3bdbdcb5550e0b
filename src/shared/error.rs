use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI pipelines use these to tell a clean run from a run that produced a
/// BOM from partial inputs, and both from a run that produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum ExitCode {
    /// Every input was read and the BOM was written
    Success = 0,
    /// A BOM was written, but some inputs or the baseline could not be read
    Degraded = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Fatal error: missing baseline, bad configuration, write failure
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Degraded => write!(f, "Completed With Degraded Inputs (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for BOM reconciliation.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Failed to parse BOM file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is valid CycloneDX or SPDX JSON")]
    BomParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Unsupported project type: {value}\n\n💡 Hint: Use one of npm, nuget, maven, python, conan, debian, alpine, cargo, choco")]
    UnsupportedProjectType { value: String },

    /// Validation error for exclusion lists and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Errors raised by the merge engine when the baseline BOM cannot serve as a
/// reconciliation target at all.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Comparison BOM not found: {path}\n\n💡 Hint: Reconciliation needs an existing baseline BOM. Run once without --comparison-bom to create one")]
    BaselineNotFound { path: PathBuf },
}

impl MergeError {
    /// Exit code the process should end with when this error aborts a run
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::ApplicationError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Degraded.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::Degraded),
            "Completed With Degraded Inputs (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_exit_code_ordering_picks_most_severe() {
        let worst = [ExitCode::Success, ExitCode::Degraded, ExitCode::Success]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(worst, ExitCode::Degraded);
        assert!(ExitCode::ApplicationError > ExitCode::Degraded);
    }

    #[test]
    fn test_baseline_not_found_display() {
        let error = MergeError::BaselineNotFound {
            path: PathBuf::from("/out/app_Bom.cdx.json"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Comparison BOM not found"));
        assert!(display.contains("/out/app_Bom.cdx.json"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_bom_parse_error_display() {
        let error = SbomError::BomParseError {
            path: PathBuf::from("/in/bom.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse BOM file"));
        assert!(display.contains("expected value at line 1"));
    }

    #[test]
    fn test_unsupported_project_type_display() {
        let error = SbomError::UnsupportedProjectType {
            value: "gradle".to_string(),
        };
        assert!(format!("{}", error).contains("gradle"));
    }

    #[test]
    fn test_merge_error_is_fatal() {
        let error = MergeError::BaselineNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(error.exit_code(), ExitCode::ApplicationError);
        assert!(format!("{}", error).contains("missing.json"));
    }

    #[test]
    fn test_security_error_display() {
        let error = SbomError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Use a regular file instead"));
    }
}
