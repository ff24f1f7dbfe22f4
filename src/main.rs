//! # duq
//!
//! A disk usage analyzer that lists the immediate children of a target
//! path annotated with their total size, sorted and filtered per user
//! options, followed by a grand total.
//!
//! ## Features
//!
//! - Recursive directory sizing with symlink-safe traversal
//! - Raw byte counts or human-scaled units (`-u`)
//! - Type filters (`-f` files only, `-d` directories only)
//! - Minimum-size thresholds in bytes through terabytes (`-B` .. `-T`)
//! - Ascending or descending size order (`-r`)
//! - Persistent defaults via `~/.config/duq/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # List the current directory, smallest first
//! duq
//!
//! # Largest first, human-readable, ignoring anything under 1 MB
//! duq -r -u -M 1 ~/Downloads
//! ```

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use duq::{Collector, FileConfig, render};
use std::process::exit;

/// Entry point for the duq application.
///
/// This function handles all errors gracefully by calling [`inner_main`]
/// and printing any errors to stderr before exiting with a non-zero status
/// code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Orchestrates the full pipeline: parse arguments, load the config file,
/// assemble the run options, collect sized entries, and render the sorted
/// listing.
///
/// # Errors
///
/// Returns errors when the target path does not exist, the target
/// directory cannot be opened, the config file combines mutually exclusive
/// type filters, or a `config` subcommand fails.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let options = args.report_options(&file_config);

    if options.files_only && options.directories_only {
        bail!("cannot combine files-only and directories-only (check the config file)");
    }

    let report = Collector::new(&options).collect()?;

    for line in render(report, &options) {
        println!("{line}");
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# duq configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default target when none is given on the command line
# target = "."

[report]
# Display sizes with units (B, K, M, G, T, ...)
# units = false

# Sort from largest to smallest
# reverse = false

# Report only files and symlinks
# files_only = false

# Report only directories
# directories_only = false

# Exclude entries smaller than this many bytes
# min_size = 0
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for
/// unset fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_u64(val: Option<u64>, default: u64) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let target = config.target.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );

    format!(
        "\
target = {target}

[report]
units            = {units}
reverse          = {reverse}
files_only       = {files_only}
directories_only = {directories_only}
min_size         = {min_size}",
        units = show_bool(config.report.units, false),
        reverse = show_bool(config.report.reverse, false),
        files_only = show_bool(config.report.files_only, false),
        directories_only = show_bool(config.report.directories_only, false),
        min_size = show_u64(config.report.min_size, 0),
    )
}

/// Write a default config template to the config file path if it does not
/// exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
