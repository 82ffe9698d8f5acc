//! Guard for a file being written.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Suffix of in-progress downloads.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Path of the in-progress file for `destination`.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Removes the file at `path` unless committed.
///
/// Dropping the guard without calling [`PartialFile::commit`] or
/// [`PartialFile::discard`] removes the file synchronously, which covers a
/// fetch future dropped mid-transfer.
#[derive(Debug)]
pub(crate) struct PartialFile {
    path: PathBuf,
    armed: bool,
}

impl PartialFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Move the completed file to `destination`.
    pub(crate) async fn commit(mut self, destination: &Path) -> io::Result<()> {
        fs::rename(&self.path, destination).await?;
        self.armed = false;
        Ok(())
    }

    /// Remove the file now.
    pub(crate) async fn discard(mut self) {
        self.armed = false;
        if let Err(e) = fs::remove_file(&self.path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "cannot remove partial file");
            }
        }
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
