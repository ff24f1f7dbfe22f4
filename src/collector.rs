//! Entry collection and filtering.
//!
//! This module walks the direct children of the target path (or treats a
//! non-directory target as a single entry), sizes each one through
//! [`compute_size`], applies the type and minimum-size filters, and
//! accumulates the survivors into a [`Report`].

use std::fs::{self, FileType};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ReportOptions;
use crate::report::Report;
use crate::utils::compute_size;

/// Classification of a filesystem entry by its own (non-dereferenced)
/// attributes.
///
/// A symlink is always classified as [`EntryKind::Symlink`], even when it
/// points at a directory; the link is never followed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A real directory (not a symlink to one).
    Directory,

    /// A symbolic link, regardless of what it points at.
    Symlink,

    /// Anything else (device, socket, FIFO); never reported.
    Other,
}

impl EntryKind {
    /// Classify a path via `lstat`. Returns `None` when the path cannot be
    /// statted at all.
    #[must_use]
    pub fn classify(path: &Path) -> Option<Self> {
        fs::symlink_metadata(path)
            .ok()
            .map(|metadata| Self::from_file_type(metadata.file_type()))
    }

    fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Collects the entries of a single reporting run.
///
/// The collector borrows the run options and produces a [`Report`] through
/// a single sequential pass over the target's direct children.
#[derive(Debug)]
pub struct Collector<'a> {
    options: &'a ReportOptions,
}

impl<'a> Collector<'a> {
    /// Create a collector for the given run options.
    #[must_use]
    pub const fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// Collect the report for the configured target.
    ///
    /// A directory target is enumerated one level deep; every direct child
    /// becomes at most one record (directory children are sized
    /// recursively). A file or symlink target is reported as the single
    /// entry itself. An empty directory, or a run where every entry is
    /// filtered out, yields an empty report — that is a success, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error when the target path cannot be statted at all, or
    /// when a directory target cannot be opened for enumeration. Failures
    /// below that granularity (unreadable children, vanished entries) are
    /// skipped silently.
    pub fn collect(&self) -> Result<Report> {
        let target = &self.options.target;
        let metadata = fs::symlink_metadata(target)
            .with_context(|| format!("'{}' does not exist", target.display()))?;

        let mut report = Report::new(self.options.units);
        let file_type = metadata.file_type();

        if file_type.is_dir() && !file_type.is_symlink() {
            let entries = fs::read_dir(target)
                .with_context(|| format!("cannot open directory '{}'", target.display()))?;

            // read_dir never yields `.` or `..`.
            for entry in entries.flatten() {
                self.push_entry(&mut report, &entry.path());
            }
        } else {
            self.push_entry(&mut report, target);
        }

        Ok(report)
    }

    /// Classify, size, label, and filter one entry, appending it to the
    /// report if it survives. Entries that fail to stat are skipped.
    fn push_entry(&self, report: &mut Report, path: &Path) {
        let Some(kind) = EntryKind::classify(path) else {
            return;
        };

        // Type filters come before the size filter.
        if kind == EntryKind::Other {
            return;
        }
        if self.options.files_only && kind == EntryKind::Directory {
            return;
        }
        if self.options.directories_only && kind != EntryKind::Directory {
            return;
        }

        let name = display_name(path);
        let (size, label) = match kind {
            EntryKind::Symlink => (own_size(path), symlink_label(path, &name)),
            EntryKind::Directory => (compute_size(path), format!("{name}/")),
            _ => (own_size(path), name),
        };

        if size < self.options.min_size {
            return;
        }

        report.push(size, label);
    }
}

/// The name an entry is listed under: its final path component, or the
/// whole path when there is none (e.g. a bare `/`).
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Size of the node itself via `lstat` (a symlink's own length, never its
/// target's). `0` if the entry vanished since classification.
fn own_size(path: &Path) -> u64 {
    fs::symlink_metadata(path).map_or(0, |metadata| metadata.len())
}

/// Label for a symlink: `name -> target`. The target text is empty when
/// the link cannot be read.
fn symlink_label(path: &Path, name: &str) -> String {
    let target = fs::read_link(path).map_or_else(|_| String::new(), |t| t.display().to_string());
    format!("{name} -> {target}")
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&vec![0u8; len]).unwrap();
        path
    }

    fn options_for(target: &Path) -> ReportOptions {
        ReportOptions {
            target: target.to_path_buf(),
            ..ReportOptions::default()
        }
    }

    fn sample_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a", 500);
        write_file(dir.path(), "b", 2048);
        std::fs::create_dir(dir.path().join("c")).unwrap();
        dir
    }

    #[test]
    fn test_classify_file_directory() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "f", 1);

        assert_eq!(EntryKind::classify(dir.path()), Some(EntryKind::Directory));
        assert_eq!(EntryKind::classify(&file), Some(EntryKind::File));
        assert_eq!(EntryKind::classify(Path::new("/no/such/duq/path")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_symlink_wins_over_directory() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(dir.path(), &link).unwrap();

        assert_eq!(EntryKind::classify(&link), Some(EntryKind::Symlink));
    }

    #[test]
    fn test_collect_directory_target() {
        let dir = sample_tree();
        let options = options_for(dir.path());

        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.total, 2548);

        let mut labels: Vec<&str> = report.records.iter().map(|r| r.label.as_str()).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["a", "b", "c/"]);
    }

    #[test]
    fn test_collect_missing_target_is_fatal() {
        let options = options_for(Path::new("/no/such/duq/path"));
        let err = Collector::new(&options).collect().unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_collect_empty_directory_is_empty_success() {
        let dir = TempDir::new().unwrap();
        let options = options_for(dir.path());

        let report = Collector::new(&options).collect().unwrap();

        assert!(report.is_empty());
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_collect_single_file_target() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "solo", 321);
        let options = options_for(&file);

        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].size, 321);
        assert_eq!(report.records[0].label, "solo");
        assert_eq!(report.total, 321);
    }

    #[test]
    fn test_files_only_drops_directories() {
        let dir = sample_tree();
        let options = ReportOptions {
            files_only: true,
            ..options_for(dir.path())
        };

        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.total, 2548);
        assert!(report.records.iter().all(|r| !r.label.ends_with('/')));
    }

    #[test]
    fn test_directories_only_drops_files() {
        let dir = sample_tree();
        let options = ReportOptions {
            directories_only: true,
            ..options_for(dir.path())
        };

        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].label, "c/");
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_min_size_excludes_from_listing_and_total() {
        let dir = sample_tree();
        let options = ReportOptions {
            min_size: 1000,
            ..options_for(dir.path())
        };

        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].label, "b");
        assert_eq!(report.total, 2048);
    }

    #[test]
    fn test_min_size_boundary_is_inclusive() {
        let dir = sample_tree();
        let options = ReportOptions {
            min_size: 2048,
            ..options_for(dir.path())
        };

        let report = Collector::new(&options).collect().unwrap();

        // Exactly 2048 survives a 2048 threshold.
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].label, "b");
    }

    #[test]
    fn test_filtered_single_target_yields_empty_report() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "tiny", 10);
        let options = ReportOptions {
            min_size: 1000,
            ..options_for(&file)
        };

        let report = Collector::new(&options).collect().unwrap();

        assert!(report.is_empty());
        assert_eq!(report.total, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_entry_sized_and_labeled() {
        let dir = TempDir::new().unwrap();
        let target = write_file(dir.path(), "target.bin", 4096);
        std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

        let options = options_for(dir.path());
        let report = Collector::new(&options).collect().unwrap();

        let link = report
            .records
            .iter()
            .find(|r| r.label.starts_with("link"))
            .unwrap();

        let link_len = fs::symlink_metadata(dir.path().join("link")).unwrap().len();
        assert_eq!(link.size, link_len);
        assert_eq!(link.label, format!("link -> {}", target.display()));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_child_sized_recursively() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        write_file(&sub, "inner", 1024);
        let nested = sub.join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_file(&nested, "deep", 512);

        let options = options_for(dir.path());
        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].label, "sub/");
        assert_eq!(report.records[0].size, 1536);
    }

    #[cfg(unix)]
    #[test]
    fn test_other_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "plain", 7);

        // A bound unix socket is a node that is neither file, directory,
        // nor symlink; keep the listener alive until collection is done.
        let _listener = std::os::unix::net::UnixListener::bind(dir.path().join("sock")).unwrap();

        let options = options_for(dir.path());
        let report = Collector::new(&options).collect().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].label, "plain");
        assert_eq!(report.total, 7);
    }
}
