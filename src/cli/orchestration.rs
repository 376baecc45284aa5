//! Command dispatch
//!
//! Every command runs through [execute], a single exhaustive match. The
//! checks that gate commands (project root, configuration directory, ignore
//! rules) live here too so they apply uniformly.

use std::path::Path;

use crate::analyzer::{Resolution, VersionResolver};
use crate::boundary::BoundaryWarning;
use crate::cli::Command;
use crate::config::{Config, CONFIG_DIR_NAME};
use crate::domain::{Version, VersionBump};
use crate::error::{Result, TagstampError};
use crate::git::Repository;
use crate::project::Project;
use crate::template::{self, Template};
use crate::ui::{formatter, Output};

/// Flags that apply to every command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    /// Skip the ignore-rule check before mutating commands
    pub ignore_gitignore: bool,
}

/// Validate the working directory for `command`
///
/// # Returns
/// * `Ok(None)` - The command does not need a project (`version`)
/// * `Ok(Some(Project))` - `root` holds a git repository and, unless the
///   command is `init`, a configuration directory
/// * `Err(NotProjectRoot | ConfigMissing)` - Otherwise
pub fn preflight(command: &Command, root: &Path) -> Result<Option<Project>> {
    if !command.needs_project() {
        return Ok(None);
    }

    let project = Project::locate(root)?;
    if command.needs_config() {
        project.require_config()?;
    }
    Ok(Some(project))
}

/// Everything a command needs, borrowed for one invocation
pub struct Session<'a, R: Repository> {
    pub project: &'a Project,
    pub repo: &'a R,
    pub config: &'a Config,
    pub output: &'a Output,
    pub options: &'a GlobalOptions,
}

impl<'a, R: Repository> Session<'a, R> {
    fn resolve(&self) -> Result<Resolution> {
        let overrides = self.project.overrides();
        VersionResolver::new(self.repo, &overrides).resolve()
    }

    /// Refuse to touch the configuration directory unless git ignores it
    fn ensure_safe(&self) -> Result<()> {
        if !self.config.safe_mode {
            return Ok(());
        }

        if self.options.ignore_gitignore {
            self.output.warning(&BoundaryWarning::SafetyCheckBypassed {
                config_dir: CONFIG_DIR_NAME.to_string(),
            });
            return Ok(());
        }

        if self.project.config_dir_ignored(self.repo)? {
            Ok(())
        } else {
            Err(TagstampError::unsafe_operation(format!(
                "'{}' is not ignored by git; add it to .gitignore or pass --ignore-gitignore",
                CONFIG_DIR_NAME
            )))
        }
    }
}

/// Run `command`, printing through the session's output
pub fn execute<R: Repository>(command: &Command, session: &Session<R>) -> Result<()> {
    if command.is_mutating() {
        session.ensure_safe()?;
    }

    match command {
        Command::Version => {
            print_version(session.output);
            Ok(())
        }
        Command::Init => init(session),
        Command::Check => check(session),
        Command::Info => info(session),
        Command::Current => current(session),
        Command::ListTemplates => list_templates(session),
        Command::ListNext => list_next(session),
        Command::Update => update(session),
        Command::Preview { name } => preview(session, name.as_deref()),
        Command::Next { version } => next(session, version),
        Command::Clean => clean(session),
        Command::CleanAll => clean_all(session),
    }
}

pub fn print_version(output: &Output) {
    output.print(&format!("tagstamp {}", env!("CARGO_PKG_VERSION")));
}

fn init<R: Repository>(session: &Session<R>) -> Result<()> {
    let project = session.project;
    if project.init()? {
        session
            .output
            .success(&format!("Initialized {}", project.config_dir().display()));
    } else {
        session.output.status(&format!(
            "{} already exists; missing pieces were restored",
            project.config_dir().display()
        ));
    }

    if !project.config_dir_ignored(session.repo)? {
        session.output.warning(&BoundaryWarning::ConfigDirNotIgnored {
            config_dir: CONFIG_DIR_NAME.to_string(),
        });
    }
    Ok(())
}

fn check<R: Repository>(session: &Session<R>) -> Result<()> {
    let output = session.output;

    if !session.project.config_dir_ignored(session.repo)? {
        return Err(TagstampError::unsafe_operation(format!(
            "'{}' is not ignored by git",
            CONFIG_DIR_NAME
        )));
    }
    output.success(&format!("'{}' is ignored by git", CONFIG_DIR_NAME));

    let templates = template::load_all(&session.project.templates_dir())?;
    output.success(&format!("{} template(s) parsed", templates.len()));

    let resolution = session.resolve()?;
    output.success(&format!(
        "Tag '{}' resolves to {}",
        resolution.tag,
        resolution.effective()
    ));
    Ok(())
}

fn info<R: Repository>(session: &Session<R>) -> Result<()> {
    let resolution = session.resolve()?;
    let template_count = template::discover(&session.project.templates_dir())?.len();

    for line in formatter::info_lines(&resolution, template_count, session.output.colors()) {
        session.output.print(&line);
    }
    Ok(())
}

fn current<R: Repository>(session: &Session<R>) -> Result<()> {
    let resolution = session.resolve()?;
    session.output.print(&resolution.effective().to_string());
    Ok(())
}

fn load_templates<R: Repository>(session: &Session<R>) -> Result<Vec<Template>> {
    let templates_dir = session.project.templates_dir();
    let templates = template::load_all(&templates_dir)?;
    if templates.is_empty() {
        session.output.warning(&BoundaryWarning::NoTemplates {
            templates_dir: templates_dir.display().to_string(),
        });
    }
    Ok(templates)
}

fn list_templates<R: Repository>(session: &Session<R>) -> Result<()> {
    for template in load_templates(session)? {
        session.output.print(&formatter::template_line(&template));
    }
    Ok(())
}

fn list_next<R: Repository>(session: &Session<R>) -> Result<()> {
    let overrides = session.project.overrides().list()?;
    if overrides.is_empty() {
        session.output.status("No next-version overrides stored");
    }
    for (tag, version) in overrides {
        session.output.print(&formatter::override_line(&tag, &version));
    }
    Ok(())
}

fn update<R: Repository>(session: &Session<R>) -> Result<()> {
    let resolution = session.resolve()?;
    let context = resolution.context();
    let root = session.project.root();

    if resolution.describe.dirty {
        session.output.warning(&BoundaryWarning::DirtyWorkingTree {
            tag: resolution.tag.name.clone(),
        });
    }

    for template in load_templates(session)? {
        let written = template.write(root, &context)?;
        let shown = written.strip_prefix(root).unwrap_or(&written);
        session.output.success(&format!(
            "{} -> {} ({})",
            template.name,
            shown.display(),
            resolution.effective()
        ));
    }
    Ok(())
}

fn preview<R: Repository>(session: &Session<R>, name: Option<&str>) -> Result<()> {
    let context = session.resolve()?.context();
    let templates = match name {
        Some(name) => vec![template::find(&session.project.templates_dir(), name)?],
        None => load_templates(session)?,
    };

    for template in templates {
        session.output.status(&formatter::template_line(&template));
        let text = template.render(&context);
        session.output.print(text.strip_suffix('\n').unwrap_or(&text));
    }
    Ok(())
}

/// Interpret `request` as a bump keyword relative to `base`, or as a literal version
fn next_version(base: &Version, request: &str) -> Result<Version> {
    match request.parse::<VersionBump>() {
        Ok(bump) => base.bump(bump),
        Err(_) => Version::parse(request),
    }
}

fn next<R: Repository>(session: &Session<R>, request: &str) -> Result<()> {
    let resolution = session.resolve()?;
    let tag = &resolution.tag;
    let version = next_version(&tag.version, request)?;

    if version <= tag.version {
        session.output.warning(&BoundaryWarning::OverrideNotNewer {
            tag: tag.name.clone(),
            tag_version: tag.version.to_string(),
            override_version: version.to_string(),
        });
    }

    session.project.overrides().set(&tag.name, &version)?;
    session
        .output
        .success(&format!("Next version for '{}' set to {}", tag, version));
    Ok(())
}

fn clean<R: Repository>(session: &Session<R>) -> Result<()> {
    let tag = session.repo.describe()?.tag;
    if session.project.overrides().remove(&tag)? {
        session
            .output
            .success(&format!("Removed override for '{}'", tag));
    } else {
        session
            .output
            .status(&format!("No override stored for '{}'", tag));
    }
    Ok(())
}

fn clean_all<R: Repository>(session: &Session<R>) -> Result<()> {
    let removed = session.project.overrides().remove_all()?;
    session
        .output
        .success(&format!("Removed {} override(s)", removed));
    Ok(())
}
