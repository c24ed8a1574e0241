//! Classification of a single file.
//!
//! Classification is also an observation step: every call records what it
//! saw into the run's [`SortReport`].

use crate::category::{Category, ExtensionTable};
use crate::normalize::{file_name, is_hidden, normalize_name, split_name};
use crate::report::SortReport;
use std::path::Path;

/// Returns the extension used for classification.
///
/// Hidden files are classified by their whole name, everything else by the
/// suffix without its dot.
///
/// ```
/// use clean_folder::classifier::classification_extension;
///
/// assert_eq!(classification_extension("photo.JPG"), "JPG");
/// assert_eq!(classification_extension(".gitignore"), ".gitignore");
/// assert_eq!(classification_extension("Makefile"), "");
/// ```
pub fn classification_extension(name: &str) -> &str {
    if is_hidden(name) {
        return name;
    }
    let (_, suffix) = split_name(name);
    suffix.strip_prefix('.').unwrap_or(suffix)
}

/// Maps files to categories using an [`ExtensionTable`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: ExtensionTable,
}

impl Classifier {
    pub fn new(table: ExtensionTable) -> Self {
        Self { table }
    }

    /// Classifies the file at `path` and records the observation.
    ///
    /// Always returns a category; unmatched files are [`Category::Others`].
    pub fn classify(&self, path: &Path, report: &mut SortReport) -> Category {
        let name = file_name(path);
        let extension = classification_extension(&name).to_uppercase();

        let category = match self.table.lookup(&extension) {
            Some(category) => {
                report.record_known(extension);
                category
            }
            None => {
                report.record_unknown(extension);
                Category::Others
            }
        };

        report.record_file(category, normalize_name(&name, true));
        category
    }
}
