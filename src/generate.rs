//! Page generation and the build driver.
//!
//! Each document goes through the same pipeline:
//!
//! ```text
//! read pages/<name>.md
//!   → {ENTRIES} ← index listing        (designated index document only)
//!   → markdown → HTML, .md → .html, {IMAGE ...} → <img>
//!   → template: {NAME} ← title, then {BODY} ← HTML
//!   → write <out>/<name>.html
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! project/
//! ├── index.html            # index document, rendered with the index template
//! └── src/
//!     ├── index.html        # index document again, with the page template
//!     ├── page-one.html
//!     └── page-two.html
//! ```
//!
//! The build is sequential and stops at the first error.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::index::{self, IndexEntry, IndexError};
use crate::markup;
use crate::naming;
use crate::template::{self, Template, TemplateError};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// A page written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub title: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Everything a build produced, in generation order.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    pub index: GeneratedPage,
    pub entries: Vec<IndexEntry>,
}

/// What a build would do, without writing anything.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// `(title, source filename, output filename)` per document.
    pub documents: Vec<(String, String, String)>,
    pub index_document: String,
    pub entries: Vec<IndexEntry>,
}

/// Render one document into a complete page.
///
/// `listing` is substituted into `{ENTRIES}` before markdown rendering; pass
/// `None` for ordinary documents so their `{ENTRIES}` text is left alone.
pub fn render_page(
    filename: &str,
    markdown: &str,
    listing: Option<&str>,
    page_template: &Template,
    config: &SiteConfig,
) -> String {
    let markdown = match listing {
        Some(entries) => template::substitute(markdown, template::ENTRIES, entries),
        None => markdown.to_string(),
    };
    let body = markup::to_html(&markdown, &config.markup_options());
    let title = naming::filename_to_title(filename, &config.source_extension);
    page_template.render(&[(template::NAME, title.as_str()), (template::BODY, body.as_str())])
}

/// Generate a single page from `source_dir/filename` into `output_dir`.
pub fn generate_page(
    filename: &str,
    source_dir: &Path,
    output_dir: &Path,
    page_template: &Template,
    config: &SiteConfig,
) -> Result<GeneratedPage, GenerateError> {
    let source = source_dir.join(filename);
    let markdown = fs::read_to_string(&source).map_err(|e| GenerateError::Read {
        path: source.clone(),
        source: e,
    })?;

    let listing = if filename == config.index_document {
        Some(index::build_listing(
            source_dir,
            &config.index_document,
            &config.index_options(),
        )?)
    } else {
        None
    };

    let html = render_page(filename, &markdown, listing.as_deref(), page_template, config);

    fs::create_dir_all(output_dir).map_err(|e| GenerateError::Write {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let output = output_dir.join(naming::output_filename(
        filename,
        &config.source_extension,
        &config.output_extension,
    ));
    fs::write(&output, html).map_err(|e| GenerateError::Write {
        path: output.clone(),
        source: e,
    })?;

    Ok(GeneratedPage {
        title: naming::filename_to_title(filename, &config.source_extension),
        source,
        output,
    })
}

/// Run the full build for the project at `root`.
///
/// Every document is generated with the page template, then the designated
/// index document is generated once more with the index template into the
/// index output directory.
pub fn build(root: &Path, config: &SiteConfig) -> Result<BuildReport, GenerateError> {
    let page_template = Template::load(&config.page_template_path(root))?;
    let index_template = Template::load(&config.index_template_path(root))?;

    let source_dir = config.source_path(root);
    let output_dir = config.output_path(root);

    let mut pages = Vec::new();
    for file in index::list_sources(&source_dir)? {
        pages.push(generate_page(
            &file.filename,
            &source_dir,
            &output_dir,
            &page_template,
            config,
        )?);
    }

    let index_page = generate_page(
        &config.index_document,
        &source_dir,
        &config.index_output_path(root),
        &index_template,
        config,
    )?;

    let entries = index::collect_entries(
        &source_dir,
        &config.index_document,
        &config.index_options(),
    )?;

    Ok(BuildReport {
        pages,
        index: index_page,
        entries,
    })
}

/// Inspect the project without writing: documents, outputs, and the listing.
pub fn check(root: &Path, config: &SiteConfig) -> Result<CheckReport, GenerateError> {
    Template::load(&config.page_template_path(root))?;
    Template::load(&config.index_template_path(root))?;

    let source_dir = config.source_path(root);
    let files = index::list_sources(&source_dir)?;

    if !files.iter().any(|f| f.filename == config.index_document) {
        return Err(GenerateError::Read {
            path: source_dir.join(&config.index_document),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "index document not found",
            ),
        });
    }

    let documents = files
        .iter()
        .map(|f| {
            (
                naming::filename_to_title(&f.filename, &config.source_extension),
                f.filename.clone(),
                naming::output_filename(
                    &f.filename,
                    &config.source_extension,
                    &config.output_extension,
                ),
            )
        })
        .collect();

    let entries = index::collect_entries(
        &source_dir,
        &config.index_document,
        &config.index_options(),
    )?;

    Ok(CheckReport {
        documents,
        index_document: config.index_document.clone(),
        entries,
    })
}

// ============================================================================
// Tests
// ============================================================================
