//! User interface module - output sink and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - [Output], which owns the color/quiet settings and decides
//!   which stream a line goes to

use std::cell::RefCell;

use crate::boundary::BoundaryWarning;
use crate::config::Config;

pub mod formatter;

/// `--colors` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Follow `use_terminal_colors` from the settings file
    #[default]
    Config,
    /// Always emit colors
    Yes,
    /// Never emit colors
    No,
}

impl ColorChoice {
    /// Whether output should be colored.
    ///
    /// With `Config`, the settings file must allow colors and the terminal
    /// must support them (`NO_COLOR`, `CLICOLOR` and tty detection apply).
    pub fn resolve(self, config: &Config) -> bool {
        match self {
            ColorChoice::Yes => true,
            ColorChoice::No => false,
            ColorChoice::Config => config.use_terminal_colors && console::colors_enabled(),
        }
    }
}

enum Sink {
    Terminal,
    Capture {
        stdout: RefCell<Vec<String>>,
        stderr: RefCell<Vec<String>>,
    },
}

/// Where user-facing output goes, and how it looks.
///
/// Built once per invocation and passed by reference to everything that
/// prints.
pub struct Output {
    colors: bool,
    quiet: bool,
    quiet_errors: bool,
    sink: Sink,
}

impl Output {
    /// Output to the real stdout/stderr
    pub fn new(colors: bool, quiet: bool, quiet_errors: bool) -> Self {
        Output {
            colors,
            quiet,
            quiet_errors,
            sink: Sink::Terminal,
        }
    }

    /// Output collected in memory, without colors
    pub fn capture(quiet: bool, quiet_errors: bool) -> Self {
        Output {
            colors: false,
            quiet,
            quiet_errors,
            sink: Sink::Capture {
                stdout: RefCell::new(Vec::new()),
                stderr: RefCell::new(Vec::new()),
            },
        }
    }

    pub fn set_colors(&mut self, colors: bool) {
        self.colors = colors;
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    fn stdout(&self, line: String) {
        match &self.sink {
            Sink::Terminal => println!("{}", line),
            Sink::Capture { stdout, .. } => stdout.borrow_mut().push(line),
        }
    }

    fn stderr(&self, line: String) {
        match &self.sink {
            Sink::Terminal => eprintln!("{}", line),
            Sink::Capture { stderr, .. } => stderr.borrow_mut().push(line),
        }
    }

    /// Primary command output; never suppressed.
    pub fn print(&self, text: &str) {
        self.stdout(text.to_string());
    }

    /// Print an error message (suppressed by `--quiet-errors`).
    pub fn error(&self, message: &str) {
        if !self.quiet_errors {
            self.stderr(formatter::error_line(message, self.colors));
        }
    }

    /// Print a success message (suppressed by `--quiet`).
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.stdout(formatter::success_line(message, self.colors));
        }
    }

    /// Print a status message (suppressed by `--quiet`).
    pub fn status(&self, message: &str) {
        if !self.quiet {
            self.stdout(formatter::status_line(message, self.colors));
        }
    }

    /// Print a boundary warning to stderr (suppressed by `--quiet`).
    pub fn warning(&self, warning: &BoundaryWarning) {
        if !self.quiet {
            self.stderr(formatter::warning_line(warning, self.colors));
        }
    }

    /// Lines written to stdout so far (capture mode only)
    pub fn captured_stdout(&self) -> Vec<String> {
        match &self.sink {
            Sink::Terminal => Vec::new(),
            Sink::Capture { stdout, .. } => stdout.borrow().clone(),
        }
    }

    /// Lines written to stderr so far (capture mode only)
    pub fn captured_stderr(&self) -> Vec<String> {
        match &self.sink {
            Sink::Terminal => Vec::new(),
            Sink::Capture { stderr, .. } => stderr.borrow().clone(),
        }
    }
}
