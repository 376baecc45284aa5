//! Version resolution - combines git describe output, tag parsing and overrides

pub mod version_resolver;

pub use version_resolver::{Resolution, VersionResolver};
