use crate::domain::Describe;
use crate::error::{Result, TagstampError};
use crate::git::Repository;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    describe: Option<Describe>,
    ignored: HashSet<PathBuf>,
    unavailable: bool,
}

impl MockRepository {
    /// Create a new mock repository with no tags
    pub fn new() -> Self {
        MockRepository {
            describe: None,
            ignored: HashSet::new(),
            unavailable: false,
        }
    }

    /// Create a mock whose HEAD sits exactly on `tag`
    pub fn tagged(tag: impl Into<String>) -> Self {
        let mut repo = Self::new();
        repo.set_describe(Describe {
            tag: tag.into(),
            distance: 0,
            hash: "0000000".to_string(),
            dirty: false,
        });
        repo
    }

    /// Set the describe result
    pub fn set_describe(&mut self, describe: Describe) {
        self.describe = Some(describe);
    }

    /// Mark a path as covered by ignore rules
    pub fn add_ignored(&mut self, path: impl Into<PathBuf>) {
        self.ignored.insert(normalize(path.into()));
    }

    /// Make every query fail as if git could not be reached
    pub fn set_unavailable(&mut self) {
        self.unavailable = true;
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(TagstampError::git_unavailable("mock repository unavailable"));
        }
        Ok(())
    }
}

fn normalize(path: PathBuf) -> PathBuf {
    path.components().collect()
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn describe(&self) -> Result<Describe> {
        self.check_available()?;
        self.describe
            .clone()
            .ok_or_else(|| TagstampError::no_tags("mock repository has no tags"))
    }

    fn is_path_ignored(&self, path: &Path) -> Result<bool> {
        self.check_available()?;
        Ok(self.ignored.contains(&normalize(path.to_path_buf())))
    }
}
