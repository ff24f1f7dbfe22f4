//! Core library for the `duq` disk usage analyzer.
//!
//! Given a target path, `duq` lists its immediate children annotated with
//! their total on-disk size (recursive for directories), filtered and
//! sorted per the run options, followed by a grand total line.
//!
//! The pipeline has three stages, consumed in order:
//!
//! - [`utils::compute_size`] - recursive size aggregation for a single path
//! - [`collector::Collector`] - enumerates, classifies, filters, and
//!   accumulates entries into a [`report::Report`]
//! - [`report::render`] - sorts the records and produces aligned output lines

pub mod collector;
pub mod config;
pub mod report;
pub mod utils;

pub use collector::{Collector, EntryKind};
pub use config::{FileConfig, ReportOptions};
pub use report::{Record, Report, render};
