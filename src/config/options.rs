//! Validated run configuration.
//!
//! This module defines the immutable per-run options handed to the
//! collector and renderer. The struct is assembled by the CLI layer from
//! command-line arguments layered over config-file values; by the time it
//! reaches the core, mutually exclusive flags have already been rejected.

use std::path::PathBuf;

/// Configuration for a single reporting run.
///
/// `files_only` and `directories_only` are mutually exclusive; the CLI
/// layer rejects the combination before this struct is constructed.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReportOptions {
    /// Display sizes with 1024-based unit suffixes instead of raw bytes.
    pub units: bool,

    /// Sort from largest to smallest instead of smallest to largest.
    pub reverse: bool,

    /// Discard directories; report only files and symlinks.
    pub files_only: bool,

    /// Discard files and symlinks; report only directories.
    pub directories_only: bool,

    /// Entries strictly smaller than this many bytes are excluded from
    /// both the listing and the grand total.
    pub min_size: u64,

    /// The path to analyze.
    pub target: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            units: false,
            reverse: false,
            files_only: false,
            directories_only: false,
            min_size: 0,
            target: PathBuf::from("."),
        }
    }
}
