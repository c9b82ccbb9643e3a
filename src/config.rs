//! Configuration types for the media organizer

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for in the working and user config directories
pub const CONFIG_FILE_STEM: &str = "media-organizer";

/// How to decide whether an occupied target is the same file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateDetection {
    /// An existing file at the target path is a duplicate
    #[default]
    #[serde(alias = "filename")]
    #[value(alias = "filename")]
    ByName,
    /// Compare MD5 digests of source and existing target
    #[serde(alias = "md5")]
    #[value(alias = "md5")]
    ByContentHash,
}

/// What to do with a file whose target is already a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    /// Leave the existing file alone and record the source as skipped
    #[default]
    Skip,
    /// Replace the existing file
    Overwrite,
    /// Copy next to it as `name(N).ext`
    Rename,
}

impl DuplicateStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateStrategy::Skip => "skip",
            DuplicateStrategy::Overwrite => "overwrite",
            DuplicateStrategy::Rename => "rename",
        }
    }
}

impl DuplicateDetection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateDetection::ByName => "by-name",
            DuplicateDetection::ByContentHash => "by-content-hash",
        }
    }
}

/// Diagnostic log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Configuration for one organizing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned recursively for media files
    pub source_dir: PathBuf,

    /// Root of the `YYYY/MM/MM-DD` layout
    pub target_dir: PathBuf,

    pub duplicate_detection: DuplicateDetection,

    pub duplicate_strategy: DuplicateStrategy,

    pub log_level: LogLevel,
}

impl Config {
    pub fn new<S: Into<PathBuf>, T: Into<PathBuf>>(source_dir: S, target_dir: T) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_detection(mut self, detection: DuplicateDetection) -> Self {
        self.duplicate_detection = detection;
        self
    }

    pub fn with_strategy(mut self, strategy: DuplicateStrategy) -> Self {
        self.duplicate_strategy = strategy;
        self
    }

    /// Check that both directories are set and the source exists
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("source directory must not be empty".into()));
        }
        if self.target_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("target directory must not be empty".into()));
        }
        if !self.source_dir.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "source directory does not exist: {}",
                self.source_dir.display()
            )));
        }
        if same_directory(&self.source_dir, &self.target_dir) {
            return Err(ConfigError::Invalid(format!(
                "target directory must differ from source directory: {}",
                self.target_dir.display()
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file, or JSON when the extension is `.json`
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Look for a config file in the working directory, then the user's
    /// config directory
    pub fn find_config_file() -> Option<PathBuf> {
        let mut candidates = vec![
            PathBuf::from(format!("{CONFIG_FILE_STEM}.toml")),
            PathBuf::from(format!("{CONFIG_FILE_STEM}.json")),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join(CONFIG_FILE_STEM);
            candidates.push(app_dir.join("config.toml"));
            candidates.push(app_dir.join("config.json"));
        }

        candidates.into_iter().find(|p| p.is_file())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Media Organizer Configuration File
# This file uses TOML format (https://toml.io)

# Directory scanned recursively for photos and videos
source_dir = "D:/Camera"

# Files are copied to target_dir/YYYY/MM/MM-DD/
target_dir = "D:/Sorted"

# How an existing file at the target path is recognized as a duplicate:
# - by-name: a file with the same name already exists
# - by-content-hash: the existing file has identical content (MD5)
duplicate_detection = "by-name"

# What to do with duplicates: "skip", "overwrite" or "rename"
# - rename copies next to the existing file as name(1).ext, name(2).ext, ...
duplicate_strategy = "skip"

# Diagnostic log level: "debug", "info", "warning" or "error"
log_level = "info"
"#
        .to_string()
    }
}

/// Both paths name the same directory; a target that does not exist yet
/// is compared as written
fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Errors that can occur when loading, saving or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError { path: PathBuf, message: String },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { message: String },
    /// Configuration values are unusable
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, message } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), message)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { message } => {
                write!(f, "Failed to serialize config: {}", message)
            }
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::ParseError { .. }
            | ConfigError::SerializeError { .. }
            | ConfigError::Invalid(_) => None,
        }
    }
}
