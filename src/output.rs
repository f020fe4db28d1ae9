//! CLI output formatting for `build` and `check`.
//!
//! Output is information-first: each page is shown by positional index and
//! title, with the source-to-output mapping as the detail.
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Index → src/index.html
//! 002 Page One → src/page-one.html
//!
//! Index
//!     Index → index.html
//!     (11.02.25) Page One
//!
//! Generated 2 pages, 1 index with 1 entry
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use std::path::Path;

use crate::generate::{BuildReport, CheckReport};
use crate::index::IndexEntry;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Show `path` relative to `root` when possible.
fn display_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    // `index_output_dir = "."` leaves a leading `./`
    let rel = rel.strip_prefix(".").unwrap_or(rel);
    rel.display().to_string()
}

fn entry_lines(entries: &[IndexEntry], depth: usize) -> Vec<String> {
    if entries.is_empty() {
        return vec![format!("{}(no entries)", indent(depth))];
    }
    entries
        .iter()
        .map(|e| format!("{}({}) {}", indent(depth), e.modified, e.title))
        .collect()
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

pub fn format_build_output(report: &BuildReport, root: &Path) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            display_path(&page.output, root)
        ));
    }

    lines.push(String::new());
    lines.push("Index".to_string());
    lines.push(format!(
        "{}{} → {}",
        indent(1),
        report.index.title,
        display_path(&report.index.output, root)
    ));
    lines.extend(entry_lines(&report.entries, 1));

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, 1 index with {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.entries.len(), "entry", "entries")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, root: &Path) {
    for line in format_build_output(report, root) {
        println!("{}", line);
    }
}

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    for (i, (title, source, output)) in report.documents.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), title));
        lines.push(format!("{}Source: {} → {}", indent(1), source, output));
    }

    lines.push(String::new());
    lines.push(format!("Index ({})", report.index_document));
    lines.extend(entry_lines(&report.entries, 1));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
