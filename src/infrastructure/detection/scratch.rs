//! Per-run scratch directory for detector artifacts

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::application::ports::DetectionError;

const SCRATCH_PREFIX: &str = "commflag-";

/// Uniquely named temp directory, removed when dropped
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp dir
    pub fn new() -> Result<Self, DetectionError> {
        Self::create(tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir())
    }

    /// Create a fresh directory under `parent`
    pub fn new_in(parent: &Path) -> Result<Self, DetectionError> {
        Self::create(tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir_in(parent))
    }

    fn create(dir: std::io::Result<TempDir>) -> Result<Self, DetectionError> {
        let dir = dir.map_err(|e| DetectionError::Scratch(e.to_string()))?;
        debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Remove the directory now, logging instead of failing
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
        }
    }
}
