//! Filename conventions shared by pages and the index listing.
//!
//! A document's filename is its only metadata source: the display title and
//! the output filename are both derived from it.
//!
//! ## Display Titles
//!
//! The source extension is removed, the remaining name is split on dashes,
//! and every word gets an uppercase first letter:
//! - `some-page.md` → "Some Page"
//! - `about.md` → "About"
//! - `release-v2-notes.md` → "Release V2 Notes"
//!
//! Only the first letter changes; the rest of each word keeps its case, so
//! acronyms survive: `using-GPU-kernels.md` → "Using GPU Kernels", not
//! "Using gpu kernels".

/// Derive a display title from a document filename.
///
/// `extension` is given without the leading dot. A filename that does not end
/// in `.{extension}` is used as-is. Empty words produced by repeated or
/// trailing dashes are dropped.
pub fn filename_to_title(filename: &str, extension: &str) -> String {
    let stem = strip_extension(filename, extension).unwrap_or(filename);
    stem.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Swap a document's source extension for the output extension.
///
/// - `page-one.md` → `page-one.html`
/// - `notes` → `notes.html`  (no source extension, output extension appended)
pub fn output_filename(filename: &str, source_ext: &str, output_ext: &str) -> String {
    let stem = strip_extension(filename, source_ext).unwrap_or(filename);
    format!("{stem}.{output_ext}")
}

/// Whether `filename` carries the given extension (case-sensitive).
pub fn has_extension(filename: &str, extension: &str) -> bool {
    strip_extension(filename, extension).is_some()
}

fn strip_extension<'a>(filename: &'a str, extension: &str) -> Option<&'a str> {
    filename
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
