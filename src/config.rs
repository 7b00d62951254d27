//! Configuration file support
//!
//! Loads settings from ~/.scopetint.toml (or %USERPROFILE%\.scopetint.toml on Windows)
//!
//! Example:
//! ```text
//! # scopetint configuration
//! theme = "/home/me/themes/dark-plus.json"
//! semantic = true
//! background = "#1e1e1e"
//!
//! [analyzer]
//! program = "semantic-token-provider"
//! flags = ["-log=verbose"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::semantic::{CommandAnalyzer, DEFAULT_ANALYZER_FLAGS};

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme file (JSON or TOML); the built-in theme when unset
    pub theme: Option<PathBuf>,
    /// Splice in semantic tokens from the analyzer
    pub semantic: bool,
    /// Attach scope explanations to tokens
    pub explain: bool,
    /// HTML background override
    pub background: Option<String>,
    pub analyzer: AnalyzerConfig,
}

/// External semantic analyzer settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Program to run; semantic mode is unavailable without one
    pub program: Option<String>,
    /// Arguments placed before the flags
    pub args: Vec<String>,
    /// Flags placed before the source path
    pub flags: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            flags: DEFAULT_ANALYZER_FLAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Build the configured analyzer, if a program is set
    pub fn command(&self) -> Option<CommandAnalyzer> {
        self.program
            .as_deref()
            .map(|program| CommandAnalyzer::new(program).with_args(self.args.clone()))
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".scopetint.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".scopetint.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file gives the defaults; a malformed one is reported and
    /// also gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Config::default();
        };
        match Self::parse(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Config::default()
            }
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
