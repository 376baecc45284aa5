//! Pure formatting functions for UI output.
//!
//! Every function returns the line(s) to print; the caller decides where they
//! go. Color is an explicit argument rather than process-wide state.

use console::style;

use crate::analyzer::Resolution;
use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::template::Template;

/// Error line with red `ERROR:` label.
pub fn error_line(message: &str, colors: bool) -> String {
    format!("{} {}", style("ERROR:").red().force_styling(colors), message)
}

/// Success line with green checkmark.
pub fn success_line(message: &str, colors: bool) -> String {
    format!("{} {}", style("✓").green().force_styling(colors), message)
}

/// Status line with yellow arrow.
pub fn status_line(message: &str, colors: bool) -> String {
    format!("{} {}", style("→").yellow().force_styling(colors), message)
}

/// Warning line with yellow warning sign.
pub fn warning_line(warning: &BoundaryWarning, colors: bool) -> String {
    format!(
        "{} {}",
        style("⚠ WARNING:").yellow().force_styling(colors),
        warning
    )
}

pub fn heading(text: &str, colors: bool) -> String {
    style(text).bold().force_styling(colors).to_string()
}

/// Summary shown by `info`.
///
/// # Arguments
/// * `resolution` - Resolved tag, describe data and override
/// * `template_count` - Number of templates in the configuration directory
pub fn info_lines(resolution: &Resolution, template_count: usize, colors: bool) -> Vec<String> {
    let describe = &resolution.describe;
    let mut lines = vec![heading("Version information", colors)];

    lines.push(format!("  Tag:         {}", resolution.tag));
    lines.push(if describe.is_exact() {
        format!("  Commit:      {} (at tag)", describe.hash)
    } else {
        format!(
            "  Commit:      {} ({} since tag{})",
            describe.hash,
            describe.distance,
            if describe.dirty { ", dirty" } else { "" }
        )
    });
    lines.push(format!("  Tag version: {}", resolution.tag.version));
    lines.push(match &resolution.override_version {
        Some(v) => format!("  Override:    {}", style(v).cyan().force_styling(colors)),
        None => "  Override:    (none)".to_string(),
    });
    lines.push(format!(
        "  Version:     {}",
        style(resolution.effective()).green().force_styling(colors)
    ));
    lines.push(format!("  Templates:   {}", template_count));

    lines
}

/// One `list-next` entry.
pub fn override_line(tag: &str, version: &Version) -> String {
    format!("{} -> {}", tag, version)
}

/// One `list-templates` entry.
pub fn template_line(template: &Template) -> String {
    format!("{} -> {}", template.name, template.output.display())
}
