//! Output files written through a `.partial` sibling

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ExportError;

/// A temporary sibling of the target file
///
/// Dropped without [`PartialFile::commit`], it removes itself, so a failed
/// export never leaves a half-written file behind.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn create(target: &Path, bytes: &[u8]) -> Result<Self, ExportError> {
        let mut name = target.as_os_str().to_owned();
        name.push(".partial");
        let partial = Self {
            path: PathBuf::from(name),
            committed: false,
        };
        fs::write(&partial.path, bytes).map_err(|e| ExportError::io(&partial.path, e))?;
        Ok(partial)
    }

    fn commit(mut self, target: &Path) -> Result<(), ExportError> {
        fs::rename(&self.path, target).map_err(|e| ExportError::io(target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            debug!(path = %self.path.display(), "removing partial export");
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write `bytes` to `target`, creating parent directories
///
/// The target only appears once all bytes are on disk.
pub(crate) fn write_output(target: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    PartialFile::create(target, bytes)?.commit(target)
}
