//! Command-line surface: argument definitions and command dispatch

pub mod orchestration;

use clap::{Parser, Subcommand};

use crate::ui::ColorChoice;

#[derive(Parser, Debug)]
#[command(
    name = "tagstamp",
    about = "Derive semantic versions from git tags and stamp them into templates"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(
        long,
        global = true,
        help = "Run next/clean/clean-all even if .tagstamp is not git-ignored"
    )]
    pub ignore_gitignore: bool,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ColorChoice::Config,
        help = "Terminal colors: follow the settings file, or force on/off"
    )]
    pub colors: ColorChoice,

    #[arg(short, long, global = true, help = "Suppress status and success messages")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Suppress error messages")]
    pub quiet_errors: bool,
}

impl Args {
    /// The command to run; `info` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Info)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the tagstamp version
    Version,
    /// Create the .tagstamp configuration directory
    Init,
    /// Verify ignore rules, templates and the current tag
    Check,
    /// Show tag, override and effective version (default)
    Info,
    /// Print the effective version
    Current,
    /// List templates and their output files
    ListTemplates,
    /// List stored next-version overrides
    ListNext,
    /// Render every template to its output file
    Update,
    /// Render templates to stdout without writing
    Preview {
        /// Only preview this template
        name: Option<String>,
    },
    /// Set the next version for the current tag
    Next {
        /// A version (e.g. 1.3.0) or a bump: major, minor, patch
        version: String,
    },
    /// Remove the override for the current tag
    Clean,
    /// Remove every stored override
    CleanAll,
}

impl Command {
    /// Commands that change stored overrides
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Next { .. } | Command::Clean | Command::CleanAll)
    }

    pub fn needs_project(&self) -> bool {
        !matches!(self, Command::Version)
    }

    pub fn needs_config(&self) -> bool {
        !matches!(self, Command::Version | Command::Init)
    }
}
