//! Crash-safe file replacement

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` through a temporary sibling file and an atomic rename.
///
/// Readers see either the previous file or the complete new one. Missing
/// parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
