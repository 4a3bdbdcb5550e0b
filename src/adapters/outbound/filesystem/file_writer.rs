use crate::ports::outbound::{BomWriter, OutputPresenter};
use crate::shared::error::SbomError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Timestamp prefix of backup files: `MM-dd-yyyy_HHmm_ss`
const BACKUP_TIMESTAMP_FORMAT: &str = "%m-%d-%Y_%H%M_%S";

/// FileSystemWriter adapter for BOM output
///
/// Implements backup-then-write: an existing file is renamed to
/// `<folder>/<MM-dd-yyyy_HHmm_ss>_Backup_<filename>` before the new content
/// is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    fn backup_path(path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: "Output path has no file name".to_string(),
            })?;
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        Ok(Self::unused_backup_path(path, &stamp, file_name))
    }

    /// `<stamp>_Backup_<file_name>`, or `<stamp>-<n>_Backup_<file_name>` with
    /// the first free `n` when a backup from the same second already exists
    fn unused_backup_path(path: &Path, stamp: &str, file_name: &str) -> PathBuf {
        let candidate = path.with_file_name(format!("{}_Backup_{}", stamp, file_name));
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }

        let mut n = 2;
        loop {
            let candidate = path.with_file_name(format!("{}-{}_Backup_{}", stamp, n, file_name));
            if fs::symlink_metadata(&candidate).is_err() {
                return candidate;
            }
            n += 1;
        }
    }

    fn write(path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| {
            SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl BomWriter for FileSystemWriter {
    fn write_with_backup(&self, path: &Path, content: &str) -> Result<Option<PathBuf>> {
        Self::validate_parent_directory(path)?;

        let backup = if fs::symlink_metadata(path).is_ok() {
            validate_not_symlink(path, "write")?;
            let backup = Self::backup_path(path)?;
            fs::rename(path, &backup).map_err(|e| SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to back up to {}: {}", backup.display(), e),
            })?;
            tracing::debug!(backup = %backup.display(), "previous output backed up");
            Some(backup)
        } else {
            None
        };

        Self::write(path, content)?;
        Ok(backup)
    }
}

/// FilePresenter adapter for writing a rendered report to a file
pub struct FilePresenter {
    output_path: PathBuf,
}

impl FilePresenter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl OutputPresenter for FilePresenter {
    fn present(&self, content: &str) -> Result<()> {
        FileSystemWriter::validate_parent_directory(&self.output_path)?;
        if fs::symlink_metadata(&self.output_path).is_ok() {
            validate_not_symlink(&self.output_path, "write")?;
        }
        FileSystemWriter::write(&self.output_path, content)
    }
}

/// StdoutPresenter adapter for writing a rendered report to stdout
#[derive(Debug, Default)]
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
