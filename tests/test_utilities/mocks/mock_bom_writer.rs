use bom_reconciler::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock BomWriter that records writes instead of touching the disk
#[derive(Default, Clone)]
pub struct MockBomWriter {
    pub writes: Arc<Mutex<Vec<(PathBuf, String)>>>,
    pub fail: bool,
}

impl MockBomWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Parsed JSON of the content written to `path`
    pub fn written_json(&self, path: &Path) -> Option<serde_json::Value> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .and_then(|(_, content)| serde_json::from_str(content).ok())
    }
}

impl BomWriter for MockBomWriter {
    fn write_with_backup(&self, path: &Path, content: &str) -> Result<Option<PathBuf>> {
        if self.fail {
            anyhow::bail!("Mock writer failure: {}", path.display());
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        Ok(None)
    }
}
