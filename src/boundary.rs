use std::fmt;

/// Non-fatal conditions worth reporting to the user.
/// The command still completes; these only surface as warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Override does not move the version forward from the tag
    OverrideNotNewer {
        tag: String,
        tag_version: String,
        override_version: String,
    },
    /// A mutating command ran without the ignore-rule check
    SafetyCheckBypassed { config_dir: String },
    /// Configuration directory is not excluded from version control
    ConfigDirNotIgnored { config_dir: String },
    /// Working tree has uncommitted changes on top of the described commit
    DirtyWorkingTree { tag: String },
    /// Nothing to render
    NoTemplates { templates_dir: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::OverrideNotNewer {
                tag,
                tag_version,
                override_version,
            } => write!(
                f,
                "Override {} is not newer than tag '{}' ({})",
                override_version, tag, tag_version
            ),
            BoundaryWarning::SafetyCheckBypassed { config_dir } => write!(
                f,
                "Skipping ignore check for '{}'; its contents may be committed",
                config_dir
            ),
            BoundaryWarning::ConfigDirNotIgnored { config_dir } => write!(
                f,
                "'{}' is not ignored by git; add it to .gitignore before using next/clean",
                config_dir
            ),
            BoundaryWarning::DirtyWorkingTree { tag } => write!(
                f,
                "Working tree has uncommitted changes since tag '{}'",
                tag
            ),
            BoundaryWarning::NoTemplates { templates_dir } => {
                write!(f, "No templates found in '{}'", templates_dir)
            }
        }
    }
}
