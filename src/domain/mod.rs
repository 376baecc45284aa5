//! Domain logic - pure version and tag rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::{Describe, Tag};
pub use version::{Version, VersionBump};
