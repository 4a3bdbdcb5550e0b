use crate::shared::Result;
use std::path::{Path, PathBuf};

/// BomWriter port for destructive output writes
///
/// An existing file at the target path is renamed to a timestamped backup
/// before the new content is written. The two steps are not atomic: a crash
/// between them leaves only the backup.
pub trait BomWriter {
    /// Writes `content` to `path`, backing up any previous file
    ///
    /// # Returns
    /// Path of the backup file, when one was made
    ///
    /// # Errors
    /// Returns an error if:
    /// - The parent directory does not exist
    /// - The target is a symbolic link
    /// - Renaming or writing fails
    fn write_with_backup(&self, path: &Path, content: &str) -> Result<Option<PathBuf>>;
}
