use crate::error::{Result, TagstampError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory
pub const CONFIG_DIR_NAME: &str = ".tagstamp";

/// Name of the settings file inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User settings stored in `.tagstamp/config.toml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Emit ANSI colors when `--colors config` (the default) is in effect
    pub use_terminal_colors: bool,

    /// Refuse mutating commands unless the configuration directory is git-ignored
    pub safe_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_terminal_colors: true,
            safe_mode: true,
        }
    }
}

impl Config {
    /// Serialize to the on-disk TOML representation
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TagstampError::config(format!("cannot serialize settings: {}", e)))
    }
}

/// Location of the user-wide fallback settings file
/// (`~/.config/tagstamp/config.toml` on Linux).
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tagstamp").join(CONFIG_FILE_NAME))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. The project settings file
/// 2. The user-wide settings file (see [global_config_path])
/// 3. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(project_file: &Path) -> Result<Config> {
    load_config_from(project_file, global_config_path().as_deref())
}

/// Same as [load_config] with an explicit user-wide settings path.
pub fn load_config_from(project_file: &Path, global_file: Option<&Path>) -> Result<Config> {
    let source = if project_file.exists() {
        Some(project_file)
    } else {
        global_file.filter(|path| path.exists())
    };

    let Some(path) = source else {
        tracing::debug!("no settings file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading settings");
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str)
        .map_err(|e| TagstampError::config(format!("{}: {}", path.display(), e)))
}
