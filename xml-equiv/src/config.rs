use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "xml-equiv.toml";

/// Output format for comparison and DOCTYPE reports.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from `xml-equiv.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Colorize terminal output.
    pub color: bool,
    /// Print outlines of both documents after a mismatch.
    pub show_trees: bool,
    /// Depth limit for those outlines.
    pub tree_depth: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: true,
            show_trees: true,
            tree_depth: 6,
        }
    }
}

/// Errors returned when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

/// Built-in settings.
pub fn default_config() -> Config {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/defaults.toml"));
    parse_config(embedded, "embedded defaults".to_string()).unwrap_or_default()
}

/// Pick the config to use.
///
/// An explicit path wins over `xml-equiv.toml` in the working directory. A
/// file that cannot be loaded is reported on stderr and replaced by the
/// built-in settings.
pub fn resolve_config(explicit: Option<&Path>) -> Config {
    let chosen: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if !local.is_file() {
                return default_config();
            }
            local
        }
    };

    match load_config(&chosen) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {err}; using embedded defaults");
            default_config()
        }
    }
}

fn parse_config(raw: &str, path: String) -> Result<Config, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{default_config, load_config, resolve_config, Config, ReportFormat};

    #[test]
    fn embedded_defaults_parse() {
        let config = default_config();
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(config.report.show_trees);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("xml-equiv.toml");
        fs::write(&path, "[report]\nformat = \"json\"\n").expect("write config");

        let config = load_config(&path).expect("load");
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.color);
        assert_eq!(config.report.tree_depth, 6);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[report]\ncolour = false\n").expect("write config");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unreadable_explicit_config_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.toml");
        assert_eq!(resolve_config(Some(&missing)), default_config());
    }
}
