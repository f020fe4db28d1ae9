//! Literal placeholder substitution.
//!
//! Templates are plain text with `{NAME}`-style tokens. There is no parser and
//! no escaping: each substitution is a literal find-and-replace of `{name}`,
//! applied one at a time in the order the caller lists them. Tokens nobody
//! supplies a value for stay in the output verbatim.
//!
//! Because substitutions run in sequence, a value inserted by an earlier step
//! is visible to later ones. The page generator relies on this ordering:
//! `{NAME}` first, then `{BODY}`.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Page title token.
pub const NAME: &str = "NAME";
/// Rendered page content token.
pub const BODY: &str = "BODY";
/// Generated listing token, only expanded inside the index document.
pub const ENTRIES: &str = "ENTRIES";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A named template loaded once and rendered many times.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a template file; the file name becomes the template name.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Apply `(token, value)` substitutions in slice order.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        vars.iter()
            .fold(self.content.clone(), |acc, (name, value)| {
                substitute(&acc, name, value)
            })
    }
}

/// Replace every `{name}` in `source` with `value`.
pub fn substitute(source: &str, name: &str, value: &str) -> String {
    source.replace(&format!("{{{name}}}"), value)
}
