//! Archive unpacking.
//!
//! The sorter only talks to the [`ArchiveExtractor`] trait; [`HostExtractor`]
//! is the implementation used by the binary and handles zip, tar, tar.gz and
//! plain gzip files.

use crate::normalize::{file_name, split_name};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while unpacking an archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file name does not map to a supported format.
    #[error("unsupported archive format: {0}")]
    Unsupported(String),
    /// The zip central directory or an entry could not be read.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// Reading the archive or writing its contents failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Something that can unpack an archive into a directory.
pub trait ArchiveExtractor {
    /// Unpacks `archive` into `destination`, creating it if needed.
    ///
    /// The archive file itself is left in place.
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError>;
}

/// Archive formats understood by [`HostExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
    /// A single gzip-compressed file.
    Gzip,
}

impl ArchiveFormat {
    /// Picks the format from a file name, ignoring case.
    ///
    /// ```
    /// use clean_folder::archive::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::detect("a.ZIP"), Some(ArchiveFormat::Zip));
    /// assert_eq!(ArchiveFormat::detect("a.tar.gz"), Some(ArchiveFormat::TarGz));
    /// assert_eq!(ArchiveFormat::detect("a.txt.gz"), Some(ArchiveFormat::Gzip));
    /// assert_eq!(ArchiveFormat::detect("a.rar"), None);
    /// ```
    pub fn detect(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".gz") {
            Some(ArchiveFormat::Gzip)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }
}

/// Unpacks archives with the `zip`, `tar` and `flate2` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostExtractor;

impl ArchiveExtractor for HostExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        let name = file_name(archive);
        let format = ArchiveFormat::detect(&name)
            .ok_or_else(|| ExtractError::Unsupported(name.to_string()))?;

        let reader = BufReader::new(File::open(archive)?);
        fs::create_dir_all(destination)?;

        match format {
            ArchiveFormat::Zip => {
                let mut zip = zip::ZipArchive::new(reader)?;
                zip.extract(destination)?;
            }
            ArchiveFormat::Tar => {
                tar::Archive::new(reader).unpack(destination)?;
            }
            ArchiveFormat::TarGz => {
                tar::Archive::new(GzDecoder::new(reader)).unpack(destination)?;
            }
            ArchiveFormat::Gzip => {
                // notes.txt.gz unpacks to notes.txt
                let (inner_name, _) = split_name(&name);
                let mut decoder = GzDecoder::new(reader);
                let mut out = File::create(destination.join(inner_name))?;
                io::copy(&mut decoder, &mut out)?;
            }
        }

        Ok(())
    }
}
