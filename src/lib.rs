pub mod analyzer;
pub mod atomic;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod overrides;
pub mod project;
pub mod template;
pub mod ui;

pub use error::{Result, TagstampError};
