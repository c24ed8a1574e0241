//! File categories and the extension table that defines them.
//!
//! Every file is sorted into exactly one [`Category`]. The mapping from
//! extension to category is fixed; it is resolved once into a reverse lookup
//! so classifying a file is a single hash lookup.
//!
//! # Examples
//!
//! ```
//! use clean_folder::category::{Category, ExtensionTable};
//!
//! let table = ExtensionTable::default();
//! assert_eq!(table.lookup("mp3"), Some(Category::Audio));
//! assert_eq!(table.lookup("JPG"), Some(Category::Images));
//! assert_eq!(table.lookup("xyz"), None);
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A sorting bucket. Declaration order is the order used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// MP3, OGG, WAV, AMR
    Audio,
    /// ZIP, GZ, TAR; unpacked rather than moved
    Archives,
    /// DOC, DOCX, TXT, PDF, XLSX, PPTX
    Documents,
    /// JPEG, PNG, JPG, SVG
    Images,
    /// AVI, MP4, MOV, MKV
    Video,
    /// Anything not listed above
    Others,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 6] = [
        Category::Audio,
        Category::Archives,
        Category::Documents,
        Category::Images,
        Category::Video,
        Category::Others,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Others.dir_name(), "others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Documents => "documents",
            Category::Images => "images",
            Category::Video => "video",
            Category::Others => "others",
        }
    }

    /// Returns the category owning a directory called `name`, if any.
    ///
    /// Only exact, case-sensitive matches count.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.dir_name() == name)
    }

    /// Built-in extensions of this category, uppercase.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Audio => &["MP3", "OGG", "WAV", "AMR"],
            Category::Archives => &["ZIP", "GZ", "TAR"],
            Category::Documents => &["DOC", "DOCX", "TXT", "PDF", "XLSX", "PPTX"],
            Category::Images => &["JPEG", "PNG", "JPG", "SVG"],
            Category::Video => &["AVI", "MP4", "MOV", "MKV"],
            Category::Others => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Errors raised while building an [`ExtensionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The same extension is listed under two categories.
    #[error("extension {extension} is listed under both {first} and {second}")]
    OverlappingExtension {
        extension: String,
        first: Category,
        second: Category,
    },
}

/// Reverse lookup from uppercase extension to category.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    by_extension: HashMap<String, Category>,
}

impl ExtensionTable {
    /// Builds a table from `(category, extensions)` groups.
    ///
    /// Extensions are compared case-insensitively. An extension that shows
    /// up under two different categories is rejected.
    pub fn from_groups<'a, I>(groups: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Category, &'a [&'a str])>,
    {
        let mut by_extension = HashMap::new();
        for (category, extensions) in groups {
            for ext in extensions {
                let ext = ext.to_uppercase();
                match by_extension.get(&ext) {
                    Some(&first) if first != category => {
                        return Err(TableError::OverlappingExtension {
                            extension: ext,
                            first,
                            second: category,
                        });
                    }
                    _ => {
                        by_extension.insert(ext, category);
                    }
                }
            }
        }
        Ok(Self { by_extension })
    }

    /// Returns the category for `ext`, ignoring case.
    pub fn lookup(&self, ext: &str) -> Option<Category> {
        self.by_extension.get(&ext.to_uppercase()).copied()
    }

    /// Number of known extensions.
    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

impl Default for ExtensionTable {
    /// The built-in table, built from [`Category::extensions`].
    fn default() -> Self {
        Self::from_groups(Category::ALL.into_iter().map(|c| (c, c.extensions())))
            .expect("Built-in extension groups overlap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_groups() -> Vec<(Category, &'static [&'static str])> {
        Category::ALL.into_iter().map(|c| (c, c.extensions())).collect()
    }

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Audio.dir_name(), "audio");
        assert_eq!(Category::Archives.dir_name(), "archives");
        assert_eq!(Category::Documents.dir_name(), "documents");
        assert_eq!(Category::Images.dir_name(), "images");
        assert_eq!(Category::Video.dir_name(), "video");
        assert_eq!(Category::Others.dir_name(), "others");
    }

    #[test]
    fn test_from_dir_name_is_exact() {
        assert_eq!(Category::from_dir_name("archives"), Some(Category::Archives));
        assert_eq!(Category::from_dir_name("Archives"), None);
        assert_eq!(Category::from_dir_name("archive"), None);
    }

    #[test]
    fn test_builtin_table_is_disjoint() {
        assert!(ExtensionTable::from_groups(builtin_groups()).is_ok());
        assert_eq!(ExtensionTable::default().len(), 21);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = ExtensionTable::default();
        assert_eq!(table.lookup("jpg"), Some(Category::Images));
        assert_eq!(table.lookup("JPG"), Some(Category::Images));
        assert_eq!(table.lookup("Docx"), Some(Category::Documents));
    }

    #[test]
    fn test_lookup_every_builtin_extension() {
        let table = ExtensionTable::default();
        for category in Category::ALL {
            for ext in category.extensions() {
                assert_eq!(table.lookup(ext), Some(category));
            }
        }
    }

    #[test]
    fn test_others_owns_no_extension() {
        assert!(Category::Others.extensions().is_empty());
        let table = ExtensionTable::default();
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("rs"), None);
    }

    #[test]
    fn test_overlapping_groups_are_rejected() {
        let documents: &[&str] = &["TXT", "PDF"];
        let others: &[&str] = &["log", "txt"];
        let groups = vec![(Category::Documents, documents), (Category::Others, others)];
        let err = ExtensionTable::from_groups(groups).unwrap_err();
        assert_eq!(
            err,
            TableError::OverlappingExtension {
                extension: "TXT".to_string(),
                first: Category::Documents,
                second: Category::Others,
            }
        );
    }

    #[test]
    fn test_repeated_extension_in_one_group_is_fine() {
        let audio: &[&str] = &["mp3", "MP3"];
        let table = ExtensionTable::from_groups([(Category::Audio, audio)]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_categories_order_for_reports() {
        let mut shuffled = vec![Category::Others, Category::Images, Category::Audio];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Category::Audio, Category::Images, Category::Others]
        );
    }
}
