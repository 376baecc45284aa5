//! Per-tag "next version" overrides
//!
//! Each override lives in its own file under `.tagstamp/next/`, named after
//! the tag it applies to and containing the version string.

use crate::atomic::write_atomic;
use crate::domain::Version;
use crate::error::{Result, TagstampError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store of `tag -> next version` overrides
#[derive(Debug, Clone)]
pub struct OverrideStore {
    dir: PathBuf,
}

impl OverrideStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        OverrideStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, tag: &str) -> PathBuf {
        self.dir.join(encode_tag(tag))
    }

    /// Look up the override for `tag`
    pub fn get(&self, tag: &str) -> Result<Option<Version>> {
        let path = self.path_for(tag);
        match fs::read_to_string(&path) {
            Ok(contents) => Version::parse(contents.trim()).map(Some).map_err(|e| {
                TagstampError::version(format!(
                    "override file {} is corrupt: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `version` as the override for `tag`, replacing any previous one
    pub fn set(&self, tag: &str, version: &Version) -> Result<()> {
        write_atomic(&self.path_for(tag), format!("{}\n", version).as_bytes())?;
        tracing::info!(tag, %version, "override stored");
        Ok(())
    }

    /// Remove the override for `tag`; returns whether one existed
    pub fn remove(&self, tag: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(tag)) {
            Ok(()) => {
                tracing::info!(tag, "override removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every override; returns how many were removed
    pub fn remove_all(&self) -> Result<usize> {
        let mut removed = 0;
        for path in self.entries()? {
            fs::remove_file(&path)?;
            removed += 1;
        }
        tracing::info!(removed, "all overrides removed");
        Ok(removed)
    }

    /// All stored overrides, sorted by tag name
    pub fn list(&self) -> Result<Vec<(String, Version)>> {
        let mut overrides = Vec::new();
        for path in self.entries()? {
            let Some(tag) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(decode_tag)
            else {
                tracing::warn!(path = %path.display(), "skipping unrecognized override file");
                continue;
            };
            if let Some(version) = self.get(&tag)? {
                overrides.push((tag, version));
            }
        }
        overrides.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(overrides)
    }

    /// Regular files in the store, skipping in-flight temporary files
    fn entries(&self) -> Result<Vec<PathBuf>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let is_temp = entry.file_name().to_string_lossy().starts_with(".tmp");
            if entry.file_type()?.is_file() && !is_temp {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }
}

/// Encode a tag name into a single filename component (`/` -> `%2F`, ...)
///
/// A leading `.` is escaped too so tags never collide with hidden or temporary files.
pub fn encode_tag(tag: &str) -> String {
    let encoded = urlencoding::encode(tag);
    match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{}", rest),
        None => encoded.into_owned(),
    }
}

/// Inverse of [encode_tag]; `None` for names that are not valid encodings
pub fn decode_tag(name: &str) -> Option<String> {
    let decoded = urlencoding::decode(name).ok()?.into_owned();
    // reject names encode_tag would never produce (stray `%`, lowercase hex, ...)
    (encode_tag(&decoded) == name).then_some(decoded)
}
