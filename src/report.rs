//! Per-run results of a sort.
//!
//! A [`SortReport`] is created by each call to
//! [`Sorter::sort`](crate::sorter::Sorter::sort) and handed back to the
//! caller. Nothing is shared between runs.

use crate::category::Category;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::PathBuf;

/// An archive that could not be unpacked. The archive itself is gone.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveFailure {
    /// Where the archive was before it was discarded.
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

/// What a sort run saw and did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SortReport {
    /// The directory that was sorted.
    pub target: PathBuf,
    /// Uppercase extensions that matched a category.
    pub known_extensions: BTreeSet<String>,
    /// Uppercase extensions that matched nothing. Never contains `""`.
    pub unknown_extensions: BTreeSet<String>,
    /// Normalized file names per category.
    pub files_by_type: BTreeMap<Category, BTreeSet<String>>,
    /// Archives that failed to unpack and were discarded.
    pub archive_failures: Vec<ArchiveFailure>,
}

impl SortReport {
    /// Creates an empty report for `target`.
    pub fn new(target: PathBuf) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn record_known(&mut self, extension: String) {
        self.known_extensions.insert(extension);
    }

    /// Records an unmatched extension; the empty extension is ignored.
    pub fn record_unknown(&mut self, extension: String) {
        if !extension.is_empty() {
            self.unknown_extensions.insert(extension);
        }
    }

    pub fn record_file(&mut self, category: Category, name: String) {
        self.files_by_type.entry(category).or_default().insert(name);
    }

    pub fn record_archive_failure(&mut self, failure: ArchiveFailure) {
        self.archive_failures.push(failure);
    }

    /// Names recorded under `category`, sorted.
    pub fn files(&self, category: Category) -> impl Iterator<Item = &str> {
        self.files_by_type
            .get(&category)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Total number of file names recorded.
    pub fn total_files(&self) -> usize {
        self.files_by_type.values().map(BTreeSet::len).sum()
    }

    /// Renders the plain-text report printed at the end of a run.
    ///
    /// ```
    /// use clean_folder::category::Category;
    /// use clean_folder::report::SortReport;
    /// use std::path::PathBuf;
    ///
    /// let mut report = SortReport::new(PathBuf::from("/tmp/in"));
    /// report.record_known("MP3".to_string());
    /// report.record_file(Category::Audio, "song.mp3".to_string());
    ///
    /// let text = report.render();
    /// assert!(text.contains("Known extensions: MP3"));
    /// assert!(text.contains("[audio]:\nsong.mp3"));
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Result of sort directory: {}", self.target.display());
        let _ = writeln!(out);
        let _ = writeln!(out, "Known extensions: {}", join(&self.known_extensions));
        let _ = writeln!(out);
        let _ = writeln!(out, "Unknown extensions: {}", join(&self.unknown_extensions));
        let _ = writeln!(out);
        let _ = writeln!(out, "Files by type in target directory:");
        for (category, names) in &self.files_by_type {
            let _ = writeln!(out, "[{}]:", category);
            let _ = writeln!(out, "{}", join(names));
            let _ = writeln!(out);
        }
        out
    }
}

fn join(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
