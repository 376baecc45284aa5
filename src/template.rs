//! Template loading and token substitution
//!
//! A template is a text file whose first line names the output file and
//! whose remaining lines are copied through with `{{token}}` placeholders
//! replaced. There are no conditionals or loops; unknown tokens are left
//! untouched so they stay visible in the output.

use crate::atomic::write_atomic;
use crate::error::{Result, TagstampError};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("token pattern is valid")
    })
}

/// Token values available to templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a token value, replacing any previous one
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = TemplateContext::new();
        for (k, v) in iter {
            context.insert(k, v);
        }
        context
    }
}

/// A parsed template file
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// File name of the template (used by `preview NAME`)
    pub name: String,
    /// Where the template was read from
    pub source: PathBuf,
    /// Output path declared on the first line
    pub output: PathBuf,
    /// Everything after the first line
    pub body: String,
}

impl Template {
    /// Read and parse a template file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::InvalidData => "not valid UTF-8".to_string(),
                _ => format!("cannot read: {}", e),
            };
            TagstampError::template(path, reason)
        })?;
        Self::parse(path, &contents)
    }

    /// Parse template text; `source` is only used for naming and error messages
    pub fn parse(source: &Path, contents: &str) -> Result<Self> {
        if contents.is_empty() {
            return Err(TagstampError::template(source, "template is empty"));
        }

        let (first_line, body) = match contents.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (contents, ""),
        };
        let output = first_line.trim();
        if output.is_empty() {
            return Err(TagstampError::template(
                source,
                "first line must name the output file",
            ));
        }

        let output = PathBuf::from(output);
        let escapes_root = output
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(TagstampError::template(
                source,
                format!(
                    "output path '{}' must stay inside the project root",
                    output.display()
                ),
            ));
        }

        Ok(Template {
            name: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source: source.to_path_buf(),
            output,
            body: body.to_string(),
        })
    }

    /// Substitute every known `{{token}}` in the body
    pub fn render(&self, context: &TemplateContext) -> String {
        token_pattern()
            .replace_all(&self.body, |caps: &Captures| match context.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Output path resolved against the project root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }

    /// Render and write the output atomically; returns the written path
    pub fn write(&self, root: &Path, context: &TemplateContext) -> Result<PathBuf> {
        let path = self.output_path(root);
        write_atomic(&path, self.render(context).as_bytes())?;
        tracing::info!(template = %self.name, output = %path.display(), "template rendered");
        Ok(path)
    }
}

/// Render the template at `template_path` without writing anything
///
/// # Returns
/// * `Ok((output_path, rendered_text))` - Declared destination and rendered body
/// * `Err(TemplateMalformed)` - If the file is unreadable or has no output line
pub fn render(template_path: &Path, context: &TemplateContext) -> Result<(PathBuf, String)> {
    let template = Template::load(template_path)?;
    let text = template.render(context);
    Ok((template.output, text))
}

/// Template files in `dir`, sorted by name
///
/// Hidden files are skipped. A missing directory yields no templates.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every template in `dir`
pub fn load_all(dir: &Path) -> Result<Vec<Template>> {
    discover(dir)?.iter().map(|p| Template::load(p)).collect()
}

/// Load the template called `name` from `dir`
pub fn find(dir: &Path, name: &str) -> Result<Template> {
    discover(dir)?
        .into_iter()
        .find(|p| p.file_name().is_some_and(|n| n == name))
        .map(|p| Template::load(&p))
        .unwrap_or_else(|| Err(TagstampError::TemplateNotFound(name.to_string())))
}
