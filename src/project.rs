//! Project root and configuration directory layout
//!
//! ```text
//! <root>/
//!   .git/
//!   .tagstamp/
//!     config.toml
//!     templates/<name>
//!     next/<encoded-tag>
//! ```

use crate::atomic::write_atomic;
use crate::config::{Config, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{Result, TagstampError};
use crate::git::Repository;
use crate::overrides::OverrideStore;
use std::fs;
use std::path::{Path, PathBuf};

const TEMPLATES_DIR_NAME: &str = "templates";
const OVERRIDES_DIR_NAME: &str = "next";

/// A directory containing a git repository and (usually) a `.tagstamp/` directory
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Use `root` as the project root if it holds a git repository
    ///
    /// Only `root` itself is checked; parent directories are not searched.
    pub fn locate(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        // `.git` is a file for worktrees and submodules
        if !root.join(".git").exists() {
            return Err(TagstampError::NotProjectRoot(root));
        }
        Ok(Project { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.config_dir().join(TEMPLATES_DIR_NAME)
    }

    pub fn overrides(&self) -> OverrideStore {
        OverrideStore::new(self.config_dir().join(OVERRIDES_DIR_NAME))
    }

    pub fn is_initialized(&self) -> bool {
        self.config_dir().is_dir()
    }

    /// Fail with `ConfigMissing` unless `init` has been run
    pub fn require_config(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(TagstampError::ConfigMissing(self.config_dir()))
        }
    }

    /// Create the configuration directory layout
    ///
    /// Existing files are left alone. Returns `false` if the project was
    /// already initialized.
    pub fn init(&self) -> Result<bool> {
        let created = !self.is_initialized();

        fs::create_dir_all(self.templates_dir())?;
        fs::create_dir_all(self.overrides().dir())?;

        let config_file = self.config_file();
        if !config_file.exists() {
            write_atomic(&config_file, Config::default().to_toml()?.as_bytes())?;
        }

        tracing::info!(dir = %self.config_dir().display(), created, "project initialized");
        Ok(created)
    }

    /// Whether git ignore rules exclude the configuration directory
    ///
    /// Patterns such as `.tagstamp/*` match the contents but not the
    /// directory itself, so the settings file is checked as well.
    pub fn config_dir_ignored<R: Repository>(&self, repo: &R) -> Result<bool> {
        let dir = Path::new(CONFIG_DIR_NAME);
        if repo.is_path_ignored(Path::new(&format!("{}/", CONFIG_DIR_NAME)))? {
            return Ok(true);
        }
        repo.is_path_ignored(&dir.join(CONFIG_FILE_NAME))
    }
}
