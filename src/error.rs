use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for tagstamp operations
#[derive(Error, Debug)]
pub enum TagstampError {
    #[error("Git is unavailable: {0}")]
    GitUnavailable(String),

    #[error("No tags found: {0}")]
    NoTagsFound(String),

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Malformed template {}: {reason}", path.display())]
    TemplateMalformed { path: PathBuf, reason: String },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Unsafe operation blocked: {0}")]
    UnsafeOperationBlocked(String),

    #[error("Configuration directory missing: {} (run `tagstamp init`)", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Not a project root (no git repository in {})", .0.display())]
    NotProjectRoot(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tagstamp
pub type Result<T> = std::result::Result<T, TagstampError>;

impl TagstampError {
    /// Create a git-unavailable error with context
    pub fn git_unavailable(msg: impl Into<String>) -> Self {
        TagstampError::GitUnavailable(msg.into())
    }

    /// Create a no-tags error with context
    pub fn no_tags(msg: impl Into<String>) -> Self {
        TagstampError::NoTagsFound(msg.into())
    }

    /// Create a malformed version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TagstampError::MalformedVersion(msg.into())
    }

    /// Create a malformed template error for the given file
    pub fn template(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TagstampError::TemplateMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsafe-operation error with context
    pub fn unsafe_operation(msg: impl Into<String>) -> Self {
        TagstampError::UnsafeOperationBlocked(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagstampError::Config(msg.into())
    }
}
