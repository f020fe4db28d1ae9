//! Index listing generation.
//!
//! Scans the source directory and produces one markdown list line per
//! document, skipping the designated index document itself:
//!
//! ```text
//! - (03.02.25) [Getting Started](src/getting-started.md)
//! - (11.02.25) [Page One](src/page-one.md)
//! ```
//!
//! The listing is substituted into the index document *before* markdown
//! rendering, so the `.md` links above are rewritten to `.html` by the
//! markup pass like any other link.
//!
//! ## Ordering
//!
//! Directory enumeration order is platform-dependent, so entries are always
//! sorted by an explicit [`IndexOrder`]. Ties fall back to filename order.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::naming;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid date format: {0:?}")]
    DateFormat(String),
}

/// How the generated listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexOrder {
    /// Filename ascending.
    #[default]
    Name,
    /// Oldest modification first.
    Modified,
    /// Newest modification first.
    ModifiedDesc,
}

/// A file found in the source directory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub filename: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// One line of the generated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub title: String,
    pub link: String,
    pub modified: String,
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub source_extension: String,
    pub link_prefix: String,
    pub date_format: String,
    pub order: IndexOrder,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            source_extension: "md".to_string(),
            link_prefix: "src/".to_string(),
            date_format: "%d.%m.%y".to_string(),
            order: IndexOrder::Name,
        }
    }
}

/// List regular, non-hidden files in `dir`, sorted by filename.
///
/// Subdirectories are skipped: only files can become pages.
pub fn list_sources(dir: &Path) -> Result<Vec<SourceFile>, IndexError> {
    let io_err = |source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let filename = entry.file_name().to_string_lossy().to_string();
        if filename.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?;
        files.push(SourceFile {
            filename,
            path,
            modified,
        });
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(files)
}

/// Build the listing entries for every source file except `exclude`.
pub fn collect_entries(
    dir: &Path,
    exclude: &str,
    options: &IndexOptions,
) -> Result<Vec<IndexEntry>, IndexError> {
    let mut files: Vec<SourceFile> = list_sources(dir)?
        .into_iter()
        .filter(|f| f.filename != exclude)
        .collect();

    // list_sources is name-sorted and sort_by_key is stable, so ties stay by name
    match options.order {
        IndexOrder::Name => {}
        IndexOrder::Modified => files.sort_by_key(|f| f.modified),
        IndexOrder::ModifiedDesc => files.sort_by_key(|f| std::cmp::Reverse(f.modified)),
    }

    files
        .iter()
        .map(|f| -> Result<IndexEntry, IndexError> {
            Ok(IndexEntry {
                title: naming::filename_to_title(&f.filename, &options.source_extension),
                link: format!("{}{}", options.link_prefix, f.filename),
                modified: format_date(f.modified, &options.date_format)?,
            })
        })
        .collect()
}

/// Render entries as markdown list lines, each terminated by a newline.
pub fn render_entries(entries: &[IndexEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("- ({}) [{}]({})\n", e.modified, e.title, e.link))
        .collect()
}

/// Scan, filter, and render in one step.
pub fn build_listing(
    dir: &Path,
    exclude: &str,
    options: &IndexOptions,
) -> Result<String, IndexError> {
    Ok(render_entries(&collect_entries(dir, exclude, options)?))
}

/// Format a timestamp in local time with a chrono `strftime` pattern.
pub fn format_date(time: SystemTime, format: &str) -> Result<String, IndexError> {
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    write!(out, "{}", local.format(format))
        .map_err(|_| IndexError::DateFormat(format.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn set_modified(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    fn expected_date(path: &Path) -> String {
        let modified = fs::metadata(path).unwrap().modified().unwrap();
        DateTime::<Local>::from(modified).format("%d.%m.%y").to_string()
    }

    #[test]
    fn listing_excludes_index_document() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.md", "A");
        let b = write(tmp.path(), "b.md", "B");
        write(tmp.path(), "index.md", "{ENTRIES}");

        let listing = build_listing(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("- ({}) [A](src/a.md)", expected_date(&a)));
        assert_eq!(lines[1], format!("- ({}) [B](src/b.md)", expected_date(&b)));
        assert!(listing.ends_with('\n'));
    }

    #[test]
    fn entry_title_and_link_derive_from_filename() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "getting-started.md", "");

        let entries = collect_entries(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Getting Started");
        assert_eq!(entries[0].link, "src/getting-started.md");
    }

    #[test]
    fn date_has_two_digit_day_month_year() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "");

        let entries = collect_entries(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        let parts: Vec<&str> = entries[0].modified.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn name_order_is_alphabetical_regardless_of_creation_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "zeta.md", "");
        write(tmp.path(), "alpha.md", "");
        write(tmp.path(), "mid.md", "");

        let entries = collect_entries(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn modified_orders_oldest_first_and_desc_reverses() {
        let tmp = TempDir::new().unwrap();
        let now = SystemTime::now();
        let old = write(tmp.path(), "old.md", "");
        let new = write(tmp.path(), "new.md", "");
        set_modified(&old, now - Duration::from_secs(86_400 * 30));
        set_modified(&new, now - Duration::from_secs(60));

        let mut options = IndexOptions {
            order: IndexOrder::Modified,
            ..IndexOptions::default()
        };
        let entries = collect_entries(tmp.path(), "index.md", &options).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Old", "New"]);

        options.order = IndexOrder::ModifiedDesc;
        let entries = collect_entries(tmp.path(), "index.md", &options).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["New", "Old"]);
    }

    #[test]
    fn subdirectories_and_hidden_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "");
        write(tmp.path(), ".draft.md", "");
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let entries = collect_entries(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "A");
    }

    #[test]
    fn empty_directory_gives_empty_listing() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.md", "");

        let listing = build_listing(tmp.path(), "index.md", &IndexOptions::default()).unwrap();
        assert_eq!(listing, "");
    }

    #[test]
    fn missing_directory_is_io_error_with_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        let err = list_sources(&missing).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn custom_prefix_and_date_format() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "a.md", "");
        let options = IndexOptions {
            link_prefix: "/pages/".to_string(),
            date_format: "%Y".to_string(),
            ..IndexOptions::default()
        };

        let entries = collect_entries(tmp.path(), "index.md", &options).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        let year = DateTime::<Local>::from(modified).format("%Y").to_string();
        assert_eq!(entries[0].link, "/pages/a.md");
        assert_eq!(entries[0].modified, year);
    }

    #[test]
    fn invalid_date_format_is_error() {
        let err = format_date(SystemTime::now(), "%Q").unwrap_err();
        assert!(matches!(err, IndexError::DateFormat(_)));
    }

    #[test]
    fn render_entries_formats_lines() {
        let entries = vec![IndexEntry {
            title: "Page One".to_string(),
            link: "src/page-one.md".to_string(),
            modified: "01.02.25".to_string(),
        }];
        assert_eq!(render_entries(&entries), "- (01.02.25) [Page One](src/page-one.md)\n");
    }

    #[test]
    fn order_parses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrap {
            order: IndexOrder,
        }
        let w: Wrap = toml::from_str("order = \"modified-desc\"").unwrap();
        assert_eq!(w.order, IndexOrder::ModifiedDesc);
    }
}
