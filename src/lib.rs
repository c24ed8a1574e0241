//! clean-folder - sort a messy folder by file type
//!
//! This library classifies files by extension, transliterates Cyrillic file
//! names into Latin, moves files into per-category folders, unpacks
//! archives and prunes the directories left empty behind them.

pub mod archive;
pub mod category;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod normalize;
pub mod output;
pub mod report;
pub mod sorter;
pub mod transliterate;
pub mod validator;

pub use archive::{ArchiveExtractor, ExtractError, HostExtractor};
pub use category::{Category, ExtensionTable};
pub use classifier::Classifier;
pub use config::{CollisionPolicy, Config, ConfigError};
pub use report::SortReport;
pub use sorter::{SortError, Sorter};
pub use validator::{PathError, check_directory};
