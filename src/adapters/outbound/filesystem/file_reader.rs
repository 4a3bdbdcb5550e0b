use crate::ports::outbound::ParseOutcome;
use crate::shared::security::validate_bom_file;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading BOM inputs
///
/// Every failure is mapped to a `ParseOutcome` case instead of an error so
/// the parsers can hand a degraded result to the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely reads a BOM file as UTF-8 text:
    /// - Missing path → `NotFound`
    /// - Symbolic link, non-regular file, oversize or I/O error → `Unreadable`
    pub fn read_text(&self, path: &Path) -> ParseOutcome<String> {
        if fs::symlink_metadata(path).is_err() {
            tracing::error!(path = %path.display(), "BOM file not found");
            return ParseOutcome::NotFound;
        }

        if let Err(e) = validate_bom_file(path) {
            tracing::error!(path = %path.display(), error = %e, "BOM file rejected");
            return ParseOutcome::Unreadable(e.to_string());
        }

        match fs::read_to_string(path) {
            Ok(content) => ParseOutcome::Parsed(content),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read BOM file");
                ParseOutcome::Unreadable(format!("Failed to read {}: {}", path.display(), e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.cdx.json");
        fs::write(&path, "{}").unwrap();

        let outcome = FileSystemReader::new().read_text(&path);
        assert_eq!(outcome, ParseOutcome::Parsed("{}".to_string()));
    }

    #[test]
    fn test_read_text_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = FileSystemReader::new().read_text(&temp_dir.path().join("missing.json"));
        assert_eq!(outcome, ParseOutcome::NotFound);
    }

    #[test]
    fn test_read_text_directory_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = FileSystemReader::new().read_text(temp_dir.path());
        assert!(matches!(outcome, ParseOutcome::Unreadable(reason) if reason.contains("not a regular file")));
    }

    #[test]
    fn test_read_text_invalid_utf8_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.cdx.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let outcome = FileSystemReader::new().read_text(&path);
        assert!(matches!(outcome, ParseOutcome::Unreadable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_text_symlink_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let outcome = FileSystemReader::new().read_text(&link);
        assert!(matches!(outcome, ParseOutcome::Unreadable(_)));
    }
}
