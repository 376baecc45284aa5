use std::fs;
use std::path::Path;

use tagstamp::cli::orchestration::{execute, preflight, GlobalOptions, Session};
use tagstamp::cli::Command;
use tagstamp::config::Config;
use tagstamp::domain::{Describe, Version};
use tagstamp::git::MockRepository;
use tagstamp::project::Project;
use tagstamp::ui::Output;
use tagstamp::TagstampError;
use tempfile::TempDir;

/// A project directory with `.git` and an initialized `.tagstamp`
fn initialized_project() -> (TempDir, Project) {
    let dir = TempDir::new().expect("Could not create temp dir");
    fs::create_dir(dir.path().join(".git")).unwrap();
    let project = Project::locate(dir.path()).unwrap();
    project.init().unwrap();
    (dir, project)
}

/// Mock repository at `tag` whose ignore rules cover `.tagstamp`
fn safe_repo(tag: &str) -> MockRepository {
    let mut repo = MockRepository::tagged(tag);
    repo.add_ignored(".tagstamp");
    repo
}

fn run(
    command: Command,
    project: &Project,
    repo: &MockRepository,
    config: &Config,
    options: &GlobalOptions,
) -> (Result<(), TagstampError>, Output) {
    let output = Output::capture(false, false);
    let session = Session {
        project,
        repo,
        config,
        output: &output,
        options,
    };
    let result = execute(&command, &session);
    (result, output)
}

fn run_default(
    command: Command,
    project: &Project,
    repo: &MockRepository,
) -> (Result<(), TagstampError>, Output) {
    run(
        command,
        project,
        repo,
        &Config::default(),
        &GlobalOptions::default(),
    )
}

fn write_template(project: &Project, name: &str, contents: &str) {
    fs::write(project.templates_dir().join(name), contents).unwrap();
}

#[test]
fn test_current_without_override() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let (result, output) = run_default(Command::Current, &project, &repo);
    result.unwrap();
    assert_eq!(output.captured_stdout(), vec!["1.2.3"]);
}

#[test]
fn test_current_with_override() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    project
        .overrides()
        .set("v1.2.3", &Version::parse("v1.3.0").unwrap())
        .unwrap();

    let (result, output) = run_default(Command::Current, &project, &repo);
    result.unwrap();
    assert_eq!(output.captured_stdout(), vec!["1.3.0"]);
}

#[test]
fn test_next_then_current_then_clean() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let next = Command::Next {
        version: "minor".to_string(),
    };
    run_default(next, &project, &repo).0.unwrap();
    assert_eq!(
        project.overrides().get("v1.2.3").unwrap(),
        Some(Version::new(1, 3, 0))
    );

    let (_, output) = run_default(Command::Current, &project, &repo);
    assert_eq!(output.captured_stdout(), vec!["1.3.0"]);

    run_default(Command::Clean, &project, &repo).0.unwrap();
    assert_eq!(project.overrides().get("v1.2.3").unwrap(), None);
}

#[test]
fn test_mutating_commands_blocked_when_not_ignored() {
    let (_dir, project) = initialized_project();
    let repo = MockRepository::tagged("v1.2.3");
    project
        .overrides()
        .set("v1.2.3", &Version::new(1, 2, 4))
        .unwrap();

    for command in [
        Command::Next {
            version: "2.0.0".to_string(),
        },
        Command::Clean,
        Command::CleanAll,
    ] {
        let (result, _) = run_default(command.clone(), &project, &repo);
        assert!(
            matches!(result, Err(TagstampError::UnsafeOperationBlocked(_))),
            "{:?} should be blocked",
            command
        );
    }

    // no state change
    assert_eq!(
        project.overrides().list().unwrap(),
        vec![("v1.2.3".to_string(), Version::new(1, 2, 4))]
    );
}

#[test]
fn test_ignore_gitignore_flag_bypasses_check_with_warning() {
    let (_dir, project) = initialized_project();
    let repo = MockRepository::tagged("v1.2.3");
    let options = GlobalOptions {
        ignore_gitignore: true,
    };

    let (result, output) = run(
        Command::Next {
            version: "1.3.0".to_string(),
        },
        &project,
        &repo,
        &Config::default(),
        &options,
    );
    result.unwrap();
    assert!(output
        .captured_stderr()
        .iter()
        .any(|line| line.contains("Skipping ignore check")));
    assert_eq!(
        project.overrides().get("v1.2.3").unwrap(),
        Some(Version::new(1, 3, 0))
    );
}

#[test]
fn test_safe_mode_off_skips_check() {
    let (_dir, project) = initialized_project();
    let repo = MockRepository::tagged("v1.2.3");
    let config = Config {
        safe_mode: false,
        ..Config::default()
    };

    let (result, _) = run(
        Command::CleanAll,
        &project,
        &repo,
        &config,
        &GlobalOptions::default(),
    );
    result.unwrap();
}

#[test]
fn test_next_warns_when_not_newer() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let (result, output) = run_default(
        Command::Next {
            version: "1.0.0".to_string(),
        },
        &project,
        &repo,
    );
    result.unwrap();
    assert!(output
        .captured_stderr()
        .iter()
        .any(|line| line.contains("not newer")));
}

#[test]
fn test_next_rejects_malformed_version() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let (result, _) = run_default(
        Command::Next {
            version: "one.two".to_string(),
        },
        &project,
        &repo,
    );
    assert!(matches!(result, Err(TagstampError::MalformedVersion(_))));
    assert!(project.overrides().list().unwrap().is_empty());
}

#[test]
fn test_clean_all_and_list_next() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    let store = project.overrides();
    store.set("v1.0.0", &Version::new(1, 1, 0)).unwrap();
    store.set("v1.2.3", &Version::new(1, 3, 0)).unwrap();

    let (_, output) = run_default(Command::ListNext, &project, &repo);
    assert_eq!(
        output.captured_stdout(),
        vec!["v1.0.0 -> 1.1.0", "v1.2.3 -> 1.3.0"]
    );

    run_default(Command::CleanAll, &project, &repo).0.unwrap();
    assert!(store.list().unwrap().is_empty());

    // empty store is fine too
    run_default(Command::CleanAll, &project, &repo).0.unwrap();
}

#[test]
fn test_update_writes_template_output() {
    let (dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    write_template(&project, "version.tpl", "out.txt\nVersion: {{version}}");

    run_default(Command::Update, &project, &repo).0.unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "Version: 1.2.3"
    );
}

#[test]
fn test_update_uses_override_and_describe_tokens() {
    let (dir, project) = initialized_project();
    let mut repo = safe_repo("v1.2.3");
    repo.set_describe(Describe {
        tag: "v1.2.3".to_string(),
        distance: 3,
        hash: "cafe123".to_string(),
        dirty: false,
    });
    project
        .overrides()
        .set("v1.2.3", &Version::new(2, 0, 0))
        .unwrap();
    write_template(
        &project,
        "meta.tpl",
        "gen/meta.txt\n{{major}}|{{tag}}|{{commits}}|{{hash}}|{{unknown}}\n",
    );

    run_default(Command::Update, &project, &repo).0.unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("gen/meta.txt")).unwrap(),
        "2|v1.2.3|3|cafe123|{{unknown}}\n"
    );
}

#[test]
fn test_preview_does_not_write() {
    let (dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    write_template(&project, "a.tpl", "a.txt\nA {{version}}\n");
    write_template(&project, "b.tpl", "b.txt\nB {{version}}\n");

    let (result, output) = run_default(
        Command::Preview {
            name: Some("b.tpl".to_string()),
        },
        &project,
        &repo,
    );
    result.unwrap();
    assert!(output.captured_stdout().contains(&"B 1.2.3".to_string()));
    assert!(!output.captured_stdout().contains(&"A 1.2.3".to_string()));
    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_preview_unknown_template() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let (result, _) = run_default(
        Command::Preview {
            name: Some("missing.tpl".to_string()),
        },
        &project,
        &repo,
    );
    assert!(matches!(result, Err(TagstampError::TemplateNotFound(_))));
}

#[test]
fn test_malformed_template_fails_update() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    write_template(&project, "bad.tpl", "\nno output line");

    let (result, _) = run_default(Command::Update, &project, &repo);
    assert!(matches!(
        result,
        Err(TagstampError::TemplateMalformed { .. })
    ));
}

#[test]
fn test_list_templates() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    write_template(&project, "readme.tpl", "README.md\n# v{{version}}\n");

    let (_, output) = run_default(Command::ListTemplates, &project, &repo);
    assert_eq!(output.captured_stdout(), vec!["readme.tpl -> README.md"]);
}

#[test]
fn test_info_reports_versions() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");

    let (result, output) = run_default(Command::Info, &project, &repo);
    result.unwrap();
    let text = output.captured_stdout().join("\n");
    assert!(text.contains("v1.2.3"));
    assert!(text.contains("Override:    (none)"));
}

#[test]
fn test_check_requires_ignore_rules() {
    let (_dir, project) = initialized_project();

    let (result, _) = run_default(Command::Check, &project, &MockRepository::tagged("v1.2.3"));
    assert!(matches!(
        result,
        Err(TagstampError::UnsafeOperationBlocked(_))
    ));

    let (result, _) = run_default(Command::Check, &project, &safe_repo("v1.2.3"));
    result.unwrap();
}

#[test]
fn test_git_errors_propagate() {
    let (_dir, project) = initialized_project();

    let (result, _) = run_default(Command::Current, &project, &MockRepository::new());
    assert!(matches!(result, Err(TagstampError::NoTagsFound(_))));

    let mut repo = MockRepository::tagged("v1.2.3");
    repo.set_unavailable();
    let (result, _) = run_default(Command::Current, &project, &repo);
    assert!(matches!(result, Err(TagstampError::GitUnavailable(_))));
}

#[test]
fn test_preflight() {
    let dir = TempDir::new().unwrap();

    assert!(preflight(&Command::Version, dir.path()).unwrap().is_none());
    assert!(matches!(
        preflight(&Command::Init, dir.path()),
        Err(TagstampError::NotProjectRoot(_))
    ));

    fs::create_dir(dir.path().join(".git")).unwrap();
    assert!(preflight(&Command::Init, dir.path()).unwrap().is_some());
    assert!(matches!(
        preflight(&Command::Current, dir.path()),
        Err(TagstampError::ConfigMissing(_))
    ));

    Project::locate(dir.path()).unwrap().init().unwrap();
    let project = preflight(&Command::Current, dir.path()).unwrap().unwrap();
    assert_eq!(project.root(), Path::new(dir.path()));
}

#[test]
fn test_next_bump_overflow_leaves_store_untouched() {
    let (_dir, project) = initialized_project();
    let repo = safe_repo("v18446744073709551615.0.0");

    let (result, _) = run_default(
        Command::Next {
            version: "major".to_string(),
        },
        &project,
        &repo,
    );
    assert!(matches!(result, Err(TagstampError::MalformedVersion(_))));
    assert!(project.overrides().list().unwrap().is_empty());
}

#[test]
fn test_update_refuses_output_outside_project() {
    let (dir, project) = initialized_project();
    let repo = safe_repo("v1.2.3");
    write_template(&project, "escape.tpl", "../escaped.txt\nVersion: {{version}}\n");

    let (result, _) = run_default(Command::Update, &project, &repo);
    assert!(matches!(
        result,
        Err(TagstampError::TemplateMalformed { .. })
    ));
    assert!(!dir.path().join("../escaped.txt").exists());
}

#[test]
fn test_next_allowed_when_config_contents_ignored() {
    let (_dir, project) = initialized_project();
    let mut repo = MockRepository::tagged("v1.2.3");
    repo.add_ignored(".tagstamp/config.toml");

    let (result, _) = run_default(
        Command::Next {
            version: "1.3.0".to_string(),
        },
        &project,
        &repo,
    );
    result.unwrap();
    assert_eq!(
        project.overrides().get("v1.2.3").unwrap(),
        Some(Version::new(1, 3, 0))
    );
}
