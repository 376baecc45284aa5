use crate::domain::Describe;
use crate::error::{Result, TagstampError};
use git2::{
    DescribeFormatOptions, DescribeOptions, ErrorCode, Repository as Git2Repo, StatusOptions,
};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository whose work tree root is `path`
    ///
    /// Unlike discovery, this does not walk up parent directories: the
    /// project root must contain the repository itself.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| {
            TagstampError::git_unavailable(format!(
                "Cannot open repository at {}: {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Tracked files differ from HEAD (untracked and ignored files do not count)
    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options)).map_err(|e| {
            TagstampError::git_unavailable(format!("Cannot read status: {}", e.message()))
        })?;
        Ok(!statuses.is_empty())
    }
}

fn map_describe_error(e: git2::Error) -> TagstampError {
    match e.code() {
        ErrorCode::NotFound | ErrorCode::UnbornBranch => TagstampError::no_tags(format!(
            "no tag is reachable from HEAD ({})",
            e.message()
        )),
        _ => TagstampError::git_unavailable(format!("describe failed: {}", e.message())),
    }
}

impl super::Repository for Git2Repository {
    fn describe(&self) -> Result<Describe> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(map_describe_error)?;

        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = head
            .as_object()
            .describe(&options)
            .map_err(map_describe_error)?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);

        let raw = describe.format(Some(&format)).map_err(map_describe_error)?;
        tracing::debug!(raw = %raw, "git describe");

        let mut parsed = Describe::parse_long(&raw, "")?;
        parsed.dirty = self.is_dirty()?;
        Ok(parsed)
    }

    fn is_path_ignored(&self, path: &Path) -> Result<bool> {
        let ignored = self.repo.is_path_ignored(path).map_err(|e| {
            TagstampError::git_unavailable(format!(
                "Cannot evaluate ignore rules for {}: {}",
                path.display(),
                e.message()
            ))
        })?;
        tracing::debug!(path = %path.display(), ignored, "ignore rule check");

        Ok(ignored)
    }
}
