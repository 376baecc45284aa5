use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagstamp::cli::orchestration::{self, GlobalOptions, Session};
use tagstamp::cli::Args;
use tagstamp::config::{self, Config};
use tagstamp::git::Git2Repository;
use tagstamp::ui::Output;

/// Diagnostics go to stderr so stdout stays clean for `current` and `preview`
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("TAGSTAMP_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // help output is not a failure; every usage error exits 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing();

    let mut output = Output::new(
        args.colors.resolve(&Config::default()),
        args.quiet,
        args.quiet_errors,
    );

    if let Err(e) = run(&args, &mut output) {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args, output: &mut Output) -> Result<()> {
    let command = args.command();
    let root = std::env::current_dir().context("Cannot determine current directory")?;

    let Some(project) = orchestration::preflight(&command, &root)? else {
        orchestration::print_version(output);
        return Ok(());
    };

    let config = config::load_config(&project.config_file())?;
    output.set_colors(args.colors.resolve(&config));

    let repo = Git2Repository::open(project.root())?;
    let options = GlobalOptions {
        ignore_gitignore: args.ignore_gitignore,
    };

    tracing::debug!(?command, root = %project.root().display(), "dispatching");

    let session = Session {
        project: &project,
        repo: &repo,
        config: &config,
        output: &*output,
        options: &options,
    };
    orchestration::execute(&command, &session)?;
    Ok(())
}
