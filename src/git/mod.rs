//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries
//! tagstamp needs, allowing for a real repository implementation and a
//! mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A canned implementation for testing
//!
//! # Usage
//!
//! Command code depends on the [Repository] trait rather than concrete
//! implementations, so every command can run against a mock.
//!
//! ```rust
//! # use tagstamp::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let describe = repo.describe()?;
//! println!("{} (+{} commits)", describe.tag, describe.distance);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Describe;
use crate::error::Result;
use std::path::Path;

/// Common git query trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures onto [crate::error::TagstampError::GitUnavailable]
/// or [crate::error::TagstampError::NoTagsFound].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with canned answers
pub trait Repository {
    /// Describe HEAD relative to the nearest reachable tag
    ///
    /// Lightweight and annotated tags are both considered, like
    /// `git describe --tags --long --dirty`.
    ///
    /// # Returns
    /// * `Ok(Describe)` - Tag name, distance, abbreviated hash and dirty flag
    /// * `Err(NoTagsFound)` - If no tag is reachable from HEAD
    /// * `Err(GitUnavailable)` - If the repository cannot be queried
    fn describe(&self) -> Result<Describe>;

    /// Check whether a project-relative path is excluded by ignore rules
    ///
    /// Honors `.gitignore` files, `.git/info/exclude` and the global
    /// excludes file.
    ///
    /// # Arguments
    /// * `path` - Path relative to the repository work tree (e.g., ".tagstamp/")
    fn is_path_ignored(&self, path: &Path) -> Result<bool>;
}
