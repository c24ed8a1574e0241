//! Recursive sorting of a directory tree into category folders.
//!
//! Files anywhere below the target are moved to `<target>/<category>/` under
//! their normalized name. Archives are unpacked into
//! `<target>/archives/<normalized stem>/` and then deleted, whether or not
//! unpacking worked. Directories named after a category are never entered,
//! and directories left empty by the sort are removed bottom-up.

use crate::archive::{ArchiveExtractor, HostExtractor};
use crate::category::Category;
use crate::classifier::Classifier;
use crate::config::CollisionPolicy;
use crate::normalize::{file_name, normalize, split_name};
use crate::report::{ArchiveFailure, SortReport};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a sort run.
#[derive(Debug, Error)]
pub enum SortError {
    /// A filesystem operation failed on `path`.
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// The destination already exists and the policy is [`CollisionPolicy::Fail`].
    #[error("Refusing to overwrite existing file {}", .0.display())]
    Collision(PathBuf),
}

/// Result type for sort operations.
pub type SortResult<T> = Result<T, SortError>;

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SortError + use<> {
    let path = path.to_path_buf();
    move |source| SortError::Io {
        action,
        path,
        source,
    }
}

/// Mutable state of one run.
struct Run {
    report: SortReport,
    /// Destinations written by this run, to tell own collisions from
    /// files that were already there.
    placed: HashSet<PathBuf>,
}

/// Called for each broken archive as soon as it has been discarded.
pub type FailureHook = Box<dyn Fn(&ArchiveFailure)>;

/// Sorts a directory tree in place.
///
/// # Examples
///
/// ```no_run
/// use clean_folder::sorter::Sorter;
/// use std::path::Path;
///
/// let report = Sorter::new().sort(Path::new("/home/user/Downloads"))?;
/// println!("{}", report.render());
/// # Ok::<(), clean_folder::sorter::SortError>(())
/// ```
pub struct Sorter {
    classifier: Classifier,
    extractor: Box<dyn ArchiveExtractor>,
    on_collision: CollisionPolicy,
    on_archive_failure: Option<FailureHook>,
}

impl Default for Sorter {
    fn default() -> Self {
        Self::new()
    }
}

impl Sorter {
    /// Creates a sorter with the built-in extension table, the host archive
    /// extractor and the overwrite policy.
    pub fn new() -> Self {
        Self {
            classifier: Classifier::default(),
            extractor: Box::new(HostExtractor),
            on_collision: CollisionPolicy::default(),
            on_archive_failure: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_extractor(mut self, extractor: impl ArchiveExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    /// Reports broken archives while the run is still going, so they are
    /// not lost if a later error aborts it.
    pub fn on_archive_failure(mut self, hook: impl Fn(&ArchiveFailure) + 'static) -> Self {
        self.on_archive_failure = Some(Box::new(hook));
        self
    }

    /// Sorts everything below `root` into category folders of `root`.
    ///
    /// Broken archives are recorded in the returned report and do not stop
    /// the run. Any other filesystem error aborts it.
    pub fn sort(&self, root: &Path) -> SortResult<SortReport> {
        let mut run = Run {
            report: SortReport::new(root.to_path_buf()),
            placed: HashSet::new(),
        };
        self.sort_dir(root, root, &mut run)?;

        log::info!(
            "sorted {} files in {} ({} broken archives)",
            run.report.total_files(),
            root.display(),
            run.report.archive_failures.len()
        );
        Ok(run.report)
    }

    fn sort_dir(&self, dir: &Path, target: &Path, run: &mut Run) -> SortResult<()> {
        // Snapshot first: sorting an entry renames or deletes it.
        for path in list_dir(dir)? {
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    log::debug!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if metadata.is_file() {
                self.sort_file(&path, target, run)?;
            } else if metadata.is_dir() {
                if Category::from_dir_name(&file_name(&path)).is_some() {
                    log::debug!("skipping category folder {}", path.display());
                    continue;
                }
                self.sort_dir(&path, target, run)?;
            } else {
                log::debug!("skipping special file {}", path.display());
            }
        }

        if dir != target && is_empty_dir(dir)? {
            log::debug!("removing empty directory {}", dir.display());
            fs::remove_dir(dir).map_err(io_error("remove directory", dir))?;
        }
        Ok(())
    }

    fn sort_file(&self, path: &Path, target: &Path, run: &mut Run) -> SortResult<()> {
        let category = self.classifier.classify(path, &mut run.report);
        let category_dir = target.join(category.dir_name());
        fs::create_dir_all(&category_dir).map_err(io_error("create directory", &category_dir))?;

        if category == Category::Archives {
            self.unpack_archive(path, &category_dir, run)
        } else {
            self.move_file(path, category, &category_dir, run)
        }
    }

    fn unpack_archive(&self, archive: &Path, archives_dir: &Path, run: &mut Run) -> SortResult<()> {
        let destination = archives_dir.join(normalize(archive, false));
        // Staged next to the destination, merged only on success.
        let staging = tempfile::Builder::new()
            .prefix(".unpacking-")
            .tempdir_in(archives_dir)
            .map_err(io_error("create staging directory in", archives_dir))?;

        log::debug!(
            "unpacking {} into {}",
            archive.display(),
            destination.display()
        );
        match self.extractor.extract(archive, staging.path()) {
            Ok(()) => merge_dir(staging.path(), &destination)?,
            Err(e) => {
                log::info!("archive {} is broken: {}", archive.display(), e);
                let failure = ArchiveFailure {
                    path: archive.to_path_buf(),
                    reason: e.to_string(),
                };
                if let Some(hook) = &self.on_archive_failure {
                    hook(&failure);
                }
                run.report.record_archive_failure(failure);
            }
        }

        let staging_path = staging.path().to_path_buf();
        staging
            .close()
            .map_err(io_error("remove staging directory", &staging_path))?;
        fs::remove_file(archive).map_err(io_error("remove archive", archive))
    }

    fn move_file(
        &self,
        path: &Path,
        category: Category,
        category_dir: &Path,
        run: &mut Run,
    ) -> SortResult<()> {
        let name = normalize(path, true);
        let mut destination = category_dir.join(&name);

        if destination.symlink_metadata().is_ok() {
            match self.on_collision {
                CollisionPolicy::Overwrite => {
                    log::debug!("overwriting {}", destination.display());
                }
                CollisionPolicy::Fail => return Err(SortError::Collision(destination)),
                CollisionPolicy::Rename => {
                    // The classifier listed `name`; it only belongs in the
                    // report if this run put it there.
                    if !run.placed.contains(&destination)
                        && let Some(names) = run.report.files_by_type.get_mut(&category)
                    {
                        names.remove(&name);
                    }
                    destination = free_name(category_dir, &name);
                    run.report
                        .record_file(category, file_name(&destination).into_owned());
                }
            }
        }

        log::debug!("moving {} to {}", path.display(), destination.display());
        move_path(path, &destination)?;
        run.placed.insert(destination);
        Ok(())
    }
}

/// Returns the entries of `dir`, sorted by path.
fn list_dir(dir: &Path) -> SortResult<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(io_error("read directory", dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_error("read directory", dir))?;
    paths.sort();
    Ok(paths)
}

/// Moves everything in `from` into `to`, merging directories and replacing
/// files that are already there.
fn merge_dir(from: &Path, to: &Path) -> SortResult<()> {
    fs::create_dir_all(to).map_err(io_error("create directory", to))?;
    for path in list_dir(from)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = to.join(name);
        let source_is_dir = fs::symlink_metadata(&path)
            .map_err(io_error("read", &path))?
            .is_dir();

        if let Ok(existing) = fs::symlink_metadata(&target) {
            if source_is_dir && existing.is_dir() {
                merge_dir(&path, &target)?;
                continue;
            }
            if existing.is_dir() {
                fs::remove_dir_all(&target).map_err(io_error("replace", &target))?;
            } else {
                fs::remove_file(&target).map_err(io_error("replace", &target))?;
            }
        }
        fs::rename(&path, &target).map_err(io_error("move", &path))?;
    }
    Ok(())
}

fn is_empty_dir(dir: &Path) -> SortResult<bool> {
    let mut entries = fs::read_dir(dir).map_err(io_error("read directory", dir))?;
    Ok(entries.next().is_none())
}

/// First `stem_N.ext` in `dir` that does not exist yet.
fn free_name(dir: &Path, name: &str) -> PathBuf {
    let (stem, suffix) = split_name(name);
    (1..)
        .map(|n| dir.join(format!("{stem}_{n}{suffix}")))
        .find(|candidate| candidate.symlink_metadata().is_err())
        .unwrap_or_else(|| dir.join(name))
}

/// Renames `from` to `to`, replacing `to`. Falls back to copy and delete
/// when the two are on different filesystems.
fn move_path(from: &Path, to: &Path) -> SortResult<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to).map_err(io_error("copy", from))?;
            fs::remove_file(from).map_err(io_error("remove", from))
        }
        Err(e) => Err(io_error("move", from)(e)),
    }
}
