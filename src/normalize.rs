//! File name normalization.
//!
//! A normalized name is the transliterated stem of a file followed by its
//! original suffix. Hidden files (names starting with a dot) are never
//! touched.
//!
//! # Examples
//!
//! ```
//! use clean_folder::normalize::normalize;
//! use std::path::Path;
//!
//! assert_eq!(normalize(Path::new("отчёт.docx"), true), "otchet.docx");
//! assert_eq!(normalize(Path::new("отчёт.docx"), false), "otchet");
//! assert_eq!(normalize(Path::new(".gitignore"), true), ".gitignore");
//! ```

use crate::transliterate::{PLACEHOLDER, transliterate_into};
use std::borrow::Cow;
use std::path::Path;

/// Splits a file name into stem and suffix.
///
/// The suffix starts at the last dot, unless that dot is the first or the
/// last character of the name: `archive.tar.gz` is `("archive.tar", ".gz")`,
/// `.gitignore` and `file.` have no suffix.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => name.split_at(i),
        _ => (name, ""),
    }
}

/// Returns the final component of `path` as text.
pub fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or(Cow::Borrowed(""))
}

/// Returns true for names following the hidden-file convention.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Builds the normalized name of the file at `path`.
///
/// With `with_extension` the original suffix is appended verbatim,
/// otherwise only the transliterated stem is returned. Hidden files are
/// returned unchanged either way. A stem that transliterates to nothing
/// (`ь`, `ъ`) becomes a single placeholder.
pub fn normalize(path: &Path, with_extension: bool) -> String {
    normalize_name(&file_name(path), with_extension)
}

/// Same as [`normalize`], working on a bare file name.
pub fn normalize_name(name: &str, with_extension: bool) -> String {
    if is_hidden(name) {
        return name.to_string();
    }

    let (stem, suffix) = split_name(name);
    let mut normalized = String::with_capacity(name.len());
    transliterate_into(stem, &mut normalized);
    if normalized.is_empty() {
        normalized.push(PLACEHOLDER);
    }
    if with_extension {
        normalized.push_str(suffix);
    }
    normalized
}
