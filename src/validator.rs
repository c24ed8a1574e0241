//! Checks that a directory can be sorted.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a path cannot be sorted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Directory \"{}\" does not exist!", .0.display())]
    NotFound(PathBuf),
    #[error("\"{}\" is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("No permission to read from directory: {}", .0.display())]
    NotReadable(PathBuf),
    #[error("No permission to write to directory: {}", .0.display())]
    NotWritable(PathBuf),
}

/// Checks, in order, that `path` exists, is a directory, is readable and is
/// writable. Returns the first failing check.
///
/// ```
/// use clean_folder::validator::{check_directory, PathError};
/// use std::path::Path;
///
/// let missing = Path::new("/definitely/not/here");
/// assert_eq!(
///     check_directory(missing),
///     Err(PathError::NotFound(missing.to_path_buf()))
/// );
/// ```
pub fn check_directory(path: &Path) -> Result<(), PathError> {
    let metadata = fs::metadata(path).map_err(|_| PathError::NotFound(path.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    if !can_read(path) {
        return Err(PathError::NotReadable(path.to_path_buf()));
    }
    if !can_write(path, &metadata) {
        return Err(PathError::NotWritable(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(path_cstr) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(path_cstr.as_ptr(), mode) == 0 }
}

#[cfg(unix)]
fn can_read(path: &Path) -> bool {
    access(path, libc::R_OK)
}

#[cfg(unix)]
fn can_write(path: &Path, _metadata: &fs::Metadata) -> bool {
    access(path, libc::W_OK)
}

#[cfg(not(unix))]
fn can_read(path: &Path) -> bool {
    fs::read_dir(path).is_ok()
}

#[cfg(not(unix))]
fn can_write(_path: &Path, metadata: &fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}
