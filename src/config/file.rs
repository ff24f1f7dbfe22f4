//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/duq/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Default target when none is given on the command line:
//! # target = "~/Downloads"
//!
//! [report]
//! units = true
//! reverse = false
//! # files_only = false
//! # directories_only = false
//! # min_size = 4096      # bytes
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in
/// the config file and apply layered configuration (CLI > config file >
/// defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default target path to analyze when none is given on the command line
    pub target: Option<PathBuf>,

    /// Report display and filtering defaults
    #[serde(default)]
    pub report: FileReportConfig,
}

/// Report options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileReportConfig {
    /// Whether to display sizes with unit suffixes
    pub units: Option<bool>,

    /// Whether to sort from largest to smallest
    pub reverse: Option<bool>,

    /// Whether to report only files and symlinks
    pub files_only: Option<bool>,

    /// Whether to report only directories
    pub directories_only: Option<bool>,

    /// Minimum entry size in bytes
    pub min_size: Option<u64>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/duq/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux/macOS, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("duq").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty)
    /// configuration. If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.target.is_none());
        assert!(config.report.units.is_none());
        assert!(config.report.reverse.is_none());
        assert!(config.report.files_only.is_none());
        assert!(config.report.directories_only.is_none());
        assert!(config.report.min_size.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
target = "~/Downloads"

[report]
units = true
reverse = true
files_only = false
directories_only = false
min_size = 4096
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.target, Some(PathBuf::from("~/Downloads")));
        assert_eq!(config.report.units, Some(true));
        assert_eq!(config.report.reverse, Some(true));
        assert_eq!(config.report.files_only, Some(false));
        assert_eq!(config.report.directories_only, Some(false));
        assert_eq!(config.report.min_size, Some(4096));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r"
[report]
units = true
";

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.target.is_none());
        assert_eq!(config.report.units, Some(true));
        assert!(config.report.reverse.is_none());
        assert!(config.report.min_size.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.target.is_none());
        assert!(config.report.units.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[report]
min_size = "not_a_number"
"#;
        let result = toml::from_str::<FileConfig>(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(path) = FileConfig::config_path() {
            assert!(path.ends_with("duq/config.toml"));
        }
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/Downloads"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Downloads"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(expand_tilde(&path), path);
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let path = PathBuf::from("relative/path");
        assert_eq!(expand_tilde(&path), path);
    }

    #[test]
    fn test_expand_tilde_bare() {
        let expanded = expand_tilde(&PathBuf::from("~"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }
}
