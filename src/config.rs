//! Site configuration module.
//!
//! Handles loading, validating, and merging the project's `config.toml`. Stock
//! defaults reproduce the classic layout, so a project without a config file
//! builds exactly as before.
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── config.toml          # Optional, overrides stock defaults
//! ├── pages/               # Source documents
//! │   ├── index.md         # Designated index document ({ENTRIES})
//! │   └── page-one.md
//! ├── templates/
//! │   ├── page.html        # Template for ordinary pages
//! │   └── index.html       # Template for the index document
//! ├── src/                 # Generated pages (output)
//! └── index.html           # Generated index (output)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, so override just the values you want:
//!
//! ```toml
//! [index]
//! order = "modified-desc"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::index::{IndexOptions, IndexOrder};
use crate::markup::{self, MarkupOptions};
use crate::naming;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// Directory paths are relative to the project root passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the source documents.
    pub source_dir: PathBuf,
    /// Directory receiving one generated page per document.
    pub output_dir: PathBuf,
    /// Directory receiving the generated index page.
    pub index_output_dir: PathBuf,
    /// Filename of the designated index document inside `source_dir`.
    pub index_document: String,
    /// Source document extension, without the dot.
    pub source_extension: String,
    /// Generated page extension, without the dot.
    pub output_extension: String,
    pub templates: TemplatesConfig,
    pub index: IndexConfig,
    pub markup: MarkupConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("src"),
            index_output_dir: PathBuf::from("."),
            index_document: "index.md".to_string(),
            source_extension: "md".to_string(),
            output_extension: "html".to_string(),
            templates: TemplatesConfig::default(),
            index: IndexConfig::default(),
            markup: MarkupConfig::default(),
        }
    }
}

/// Template file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory holding both templates.
    pub dir: PathBuf,
    /// Template used for every ordinary page.
    pub page: String,
    /// Template used for the designated index document.
    pub index: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            page: "page.html".to_string(),
            index: "index.html".to_string(),
        }
    }
}

/// Generated listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Prepended to each document filename to build its link.
    pub link_prefix: String,
    /// chrono `strftime` format for the modification date.
    pub date_format: String,
    /// Listing order.
    pub order: IndexOrder,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            link_prefix: "src/".to_string(),
            date_format: "%d.%m.%y".to_string(),
            order: IndexOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// Prefix for `{IMAGE <path>}` placeholders.
    pub asset_prefix: String,
    /// Syntax-highlight fenced code blocks.
    pub highlight: bool,
    /// One of syntect's bundled themes.
    pub theme: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            asset_prefix: "../.github/".to_string(),
            highlight: true,
            theme: markup::DEFAULT_THEME.to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, ext) in [
            ("source_extension", &self.source_extension),
            ("output_extension", &self.output_extension),
        ] {
            if ext.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "{key} must not start with a dot (got \"{ext}\")"
                )));
            }
        }
        if self.source_extension == self.output_extension {
            return Err(ConfigError::Validation(
                "source_extension and output_extension must differ".into(),
            ));
        }
        if !naming::has_extension(&self.index_document, &self.source_extension) {
            return Err(ConfigError::Validation(format!(
                "index_document \"{}\" must end with .{}",
                self.index_document, self.source_extension
            )));
        }
        if self.templates.page == self.templates.index {
            return Err(ConfigError::Validation(
                "templates.page and templates.index must be distinct files".into(),
            ));
        }
        if self.markup.highlight && !markup::has_theme(&self.markup.theme) {
            return Err(ConfigError::Validation(format!(
                "markup.theme \"{}\" is not a bundled highlighting theme",
                self.markup.theme
            )));
        }
        Ok(())
    }

    /// Resolve config-relative paths against the project root.
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(&self.source_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }

    pub fn index_output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index_output_dir)
    }

    pub fn page_template_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates.dir).join(&self.templates.page)
    }

    pub fn index_template_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates.dir).join(&self.templates.index)
    }

    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions {
            source_extension: self.source_extension.clone(),
            output_extension: self.output_extension.clone(),
            asset_prefix: self.markup.asset_prefix.clone(),
            highlight_theme: self
                .markup
                .highlight
                .then(|| self.markup.theme.clone()),
        }
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            source_extension: self.source_extension.clone(),
            link_prefix: self.index.link_prefix.clone(),
            date_format: self.index.date_format.clone(),
            order: self.index.order,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Defaults as a TOML table, the base layer under `config.toml`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Overlay user values onto the defaults.
///
/// A `[section]` in `config.toml` only replaces the keys it names, so
/// `[index] order = "modified"` keeps the default `link_prefix`.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse `<root>/config.toml` without applying defaults; `None` when absent.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Resolve the project's config: defaults, then `config.toml`, then `validate`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Pages Configuration
# ==========================
#
# Place this file at the project root. Every key is optional; values shown
# are the defaults. Paths are relative to the project root.

# Directory holding the markdown documents.
source_dir = "pages"

# Directory receiving one generated page per document.
output_dir = "src"

# Directory receiving the generated index page.
index_output_dir = "."

# The document that gets the generated listing through {ENTRIES}.
index_document = "index.md"

# Extensions, without the leading dot. Every ".md" in rendered output is
# rewritten to ".html", including inside prose.
source_extension = "md"
output_extension = "html"

[templates]
dir = "templates"
# Ordinary pages: {NAME} and {BODY} are substituted.
page = "page.html"
# The index document: same tokens, separate template.
index = "index.html"

[index]
# Each listing line is: - (<date>) [<Title>](<link_prefix><filename>)
link_prefix = "src/"
# chrono strftime syntax, local time.
date_format = "%d.%m.%y"
# name | modified | modified-desc
order = "name"

[markup]
# A paragraph containing only {IMAGE path} becomes <img src="<asset_prefix>path">.
asset_prefix = "../.github/"
# Syntax-highlight fenced code blocks with a known language (inline styles).
highlight = true
# Any syntect bundled theme, e.g. "InspiredGitHub", "Solarized (light)".
theme = "base16-ocean.dark"
"##
}
