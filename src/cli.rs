//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their
//! validation using the [clap](https://docs.rs/clap/) library. It provides
//! structured access to user input and handles argument conflicts and
//! defaults.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that
//! config-file values act as defaults that CLI arguments can override
//! (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use duq::config::ReportOptions;
use duq::config::file::{FileConfig, expand_tilde};

/// Command-line arguments controlling how sizes are displayed and ordered.
#[derive(Parser)]
struct DisplayArgs {
    /// Display sizes with units (B, K, M, G, T, ...) with up to 3 decimal places
    ///
    /// Sizes are scaled by powers of 1024 and suffixed with the matching
    /// unit symbol, with no separating space (e.g. `1.5K`). Without this
    /// flag, sizes are printed as raw byte counts.
    #[arg(short = 'u', long)]
    units: bool,

    /// Reverse sorting order (display from largest to smallest)
    ///
    /// Entries are sorted by size, smallest first by default. With this
    /// flag the largest entries come first.
    #[arg(short = 'r', long)]
    reverse: bool,
}

/// Command-line arguments restricting which entry types are reported.
#[derive(Parser)]
struct FilterArgs {
    /// Discard directories; consider only files and symlinks
    #[arg(short = 'f', long, conflicts_with = "directories_only")]
    files_only: bool,

    /// Discard files and symlinks; consider only directories
    #[arg(short = 'd', long)]
    directories_only: bool,
}

/// Command-line arguments for the minimum-size threshold.
///
/// At most one of these may be given; entries strictly smaller than the
/// resulting byte count are excluded from both the listing and the total.
#[derive(Parser)]
struct ThresholdArgs {
    /// Filter out entries smaller than N Bytes
    #[arg(short = 'B', long, group = "threshold", value_name = "N")]
    bytes: Option<u64>,

    /// Filter out entries smaller than X Kilobytes
    #[arg(short = 'K', long, group = "threshold", value_name = "X", value_parser = parse_scale)]
    kilobytes: Option<f64>,

    /// Filter out entries smaller than X Megabytes
    #[arg(short = 'M', long, group = "threshold", value_name = "X", value_parser = parse_scale)]
    megabytes: Option<f64>,

    /// Filter out entries smaller than X Gigabytes
    #[arg(short = 'G', long, group = "threshold", value_name = "X", value_parser = parse_scale)]
    gigabytes: Option<f64>,

    /// Filter out entries smaller than X Terabytes
    #[arg(short = 'T', long, group = "threshold", value_name = "X", value_parser = parse_scale)]
    terabytes: Option<f64>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file
/// values act as defaults when the corresponding CLI argument is not
/// provided.
#[derive(Parser)]
#[command(name = "duq")]
#[command(about = "Disk usage analyzer with sorted file and directory sizes")]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory or file to list. Defaults to the current directory
    target: Option<PathBuf>,

    /// Display options
    #[command(flatten)]
    display: DisplayArgs,

    /// Type filter options
    #[command(flatten)]
    filter: FilterArgs,

    /// Minimum-size threshold options
    #[command(flatten)]
    threshold: ThresholdArgs,
}

/// Parse a threshold scale value, rejecting negatives and non-finite
/// values (`NaN`, `inf`) that would otherwise collapse to a 0-byte
/// threshold.
fn parse_scale(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a non-negative number"));
    }

    Ok(value)
}

/// Convert a threshold value in units of `1024^exponent` to bytes,
/// truncating any sub-byte remainder.
fn scale_to_bytes(value: f64, exponent: i32) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bytes = (value * 1024f64.powi(exponent)) as u64;
    bytes
}

impl Cli {
    /// The minimum-size threshold in bytes, if any threshold flag was given.
    #[must_use]
    pub fn min_size(&self) -> Option<u64> {
        let threshold = &self.threshold;

        if let Some(bytes) = threshold.bytes {
            return Some(bytes);
        }

        let (value, exponent) = if let Some(value) = threshold.kilobytes {
            (value, 1)
        } else if let Some(value) = threshold.megabytes {
            (value, 2)
        } else if let Some(value) = threshold.gigabytes {
            (value, 3)
        } else if let Some(value) = threshold.terabytes {
            (value, 4)
        } else {
            return None;
        };

        Some(scale_to_bytes(value, exponent))
    }

    /// Assemble the validated run options from CLI args and config file.
    ///
    /// For boolean flags, the CLI flag (if set) takes priority, then the
    /// config file value, then `false`. When either type-filter flag is
    /// given on the command line, the config file's type filters are
    /// ignored entirely so a config default cannot conflict with an
    /// explicit flag.
    #[must_use]
    pub fn report_options(&self, config: &FileConfig) -> ReportOptions {
        let (files_only, directories_only) =
            if self.filter.files_only || self.filter.directories_only {
                (self.filter.files_only, self.filter.directories_only)
            } else {
                (
                    config.report.files_only.unwrap_or(false),
                    config.report.directories_only.unwrap_or(false),
                )
            };

        let target = self.target.clone().unwrap_or_else(|| {
            config
                .target
                .as_ref()
                .map_or_else(|| PathBuf::from("."), |path| expand_tilde(path))
        });

        ReportOptions {
            units: self.display.units || config.report.units.unwrap_or(false),
            reverse: self.display.reverse || config.report.reverse.unwrap_or(false),
            files_only,
            directories_only,
            min_size: self
                .min_size()
                .or(config.report.min_size)
                .unwrap_or(0),
            target,
        }
    }
}
