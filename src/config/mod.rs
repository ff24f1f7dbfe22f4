//! Run configuration.
//!
//! This module contains the validated per-run options consumed by the core
//! ([`ReportOptions`]) and the persistent TOML configuration file support
//! ([`FileConfig`]) whose values act as defaults underneath CLI arguments.

pub mod file;
pub mod options;

pub use file::FileConfig;
pub use options::ReportOptions;
