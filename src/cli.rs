//! CLI argument parsing with clap

use crate::config::{Config, DuplicateDetection, DuplicateStrategy, LogLevel};
use crate::i18n::Language;
use clap::Parser;
use std::path::PathBuf;

/// Media Organizer - sort photos and videos into YEAR/MONTH/MONTH-DAY folders
///
/// Capture dates come from EXIF metadata for photos when available and
/// from file modification time otherwise. Files are copied, never moved.
#[derive(Parser, Debug, Default)]
#[command(name = "media-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (TOML, or JSON with a .json extension)
    ///
    /// Without this flag, media-organizer.toml / media-organizer.json in the
    /// working directory and the user config directory are tried.
    /// CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Source directory to scan for media files
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Target directory for the organized layout
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Duplicate detection mode
    #[arg(short, long, value_enum)]
    pub detection: Option<DuplicateDetection>,

    /// What to do with duplicates
    #[arg(short = 'S', long, value_enum)]
    pub strategy: Option<DuplicateStrategy>,

    /// Diagnostic log level
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Output language (defaults to the system locale)
    #[arg(long, value_enum)]
    pub lang: Option<Language>,

    /// Write the diagnostic log as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Merge CLI arguments over a base config (file settings or defaults).
    /// CLI arguments take precedence.
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(ref target) = self.target {
            config.target_dir = target.clone();
        }
        if let Some(detection) = self.detection {
            config.duplicate_detection = detection;
        }
        if let Some(strategy) = self.strategy {
            config.duplicate_strategy = strategy;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_merge() {
        let cli = Cli::try_parse_from([
            "media-organizer",
            "--source",
            "/in",
            "-S",
            "rename",
            "--detection",
            "md5",
        ])
        .unwrap();

        let file_config = Config::new("/file-in", "/file-out")
            .with_strategy(DuplicateStrategy::Overwrite);
        let merged = cli.merge_with_config(file_config);

        assert_eq!(merged.source_dir, PathBuf::from("/in"));
        assert_eq!(merged.target_dir, PathBuf::from("/file-out"));
        assert_eq!(merged.duplicate_strategy, DuplicateStrategy::Rename);
        assert_eq!(merged.duplicate_detection, DuplicateDetection::ByContentHash);
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = Cli::try_parse_from(["media-organizer", "-s", "/a", "-t", "/b"]).unwrap();
        let config = cli.to_config();

        assert_eq!(config.duplicate_detection, DuplicateDetection::ByName);
        assert_eq!(config.duplicate_strategy, DuplicateStrategy::Skip);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_strategy_rejected() {
        assert!(Cli::try_parse_from(["media-organizer", "--strategy", "shred"]).is_err());
    }

    #[test]
    fn test_lang_flag() {
        let cli = Cli::try_parse_from(["media-organizer", "--lang", "zh"]).unwrap();
        assert_eq!(cli.lang, Some(Language::ChineseSimplified));
    }
}
