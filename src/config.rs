//!
//! This module defines configuration structures and loading logic for snipfmt.
//! A single `.snipfmt.toml` is discovered upward from the working directory, or given
//! explicitly with `--config`.

use crate::beautify::BeautifyOptions;
use crate::document::Mode;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".snipfmt.toml";

/// Represents a rule-specific configuration
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Clone)]
pub struct RuleConfig {
    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Represents the complete configuration loaded from .snipfmt.toml
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Clone)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Pretty-printer options
    #[serde(default)]
    pub beautify: BeautifyOptions,

    /// Rule-specific configurations
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Global configuration options
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Which document transforms run
    pub mode: Mode,

    /// Upper bound on whole-document format passes
    pub max_iterations: usize,

    /// File extensions processed when walking directories
    pub extensions: Vec<String>,

    /// Files to exclude
    pub exclude: Vec<String>,

    /// Respect .gitignore files when scanning directories
    pub respect_gitignore: bool,

    /// Only format `<code>` elements carrying this class
    pub code_class: Option<String>,

    /// Diagnostic output format
    pub output_format: OutputFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            mode: Mode::CodeOnly,
            max_iterations: crate::convergence::DEFAULT_MAX_ITERATIONS,
            extensions: vec!["html".to_string(), "htm".to_string()],
            exclude: Vec::new(),
            respect_gitignore: true,
            code_class: None,
            output_format: OutputFormat::Text,
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load the explicit config file, or the first `.snipfmt.toml` found walking up
    /// from the current directory, or the defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => std::env::current_dir().ok().and_then(|cwd| Self::discover(&cwd)),
        };

        let Some(path) = path else {
            log::debug!("No {CONFIG_FILE_NAME} found, using defaults");
            return Ok(Self::default());
        };

        log::debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Find the nearest config file in `start` or one of its ancestors
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Rule sections that do not name a known rule
    pub fn unknown_rule_sections(&self, known: &[&str]) -> Vec<String> {
        self.rules
            .keys()
            .filter(|name| !known.contains(&name.as_str()))
            .cloned()
            .collect()
    }
}

const DEFAULT_CONFIG: &str = r#"# snipfmt configuration file

[global]
# "code-only" formats code fragments; "all" also runs the document transforms
mode = "code-only"

# Give up if a document has not stopped changing after this many passes
max-iterations = 10

# File extensions picked up when walking directories
extensions = ["html", "htm"]

# Files or directories to skip
exclude = [
    "node_modules",
    "dist",
]

# Respect .gitignore files when scanning directories (default: true)
respect-gitignore = true

# Only format <code> elements with this class (uncomment to enable)
# code-class = "javascript"

# Diagnostic output: "text" or "json"
output-format = "text"

[beautify]
indent-size = 4
wrap-line-length = 100
brace-style = "collapse"  # or "expand"
jslint-happy = true

# Rule-specific configurations (uncomment and modify as needed)

# [indent]
# width = 4
# switch-case = 1

# [no-multiple-empty-lines]
# max = 1

# [newline-per-chained-call]
# ignore-chain-with-depth = 1
"#;

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::IoError {
        source,
        path: path.to_string(),
    })
}
