//! Localized user-facing strings
//!
//! A [`Messages`] value is created once per run and handed to everything
//! that produces user-visible text. Diagnostic `tracing` output stays in
//! English.

use crate::config::{DuplicateDetection, DuplicateStrategy};
use std::fmt::Display;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "zh")]
    ChineseSimplified,
}

impl Language {
    /// Pick a language from a locale tag such as `zh-CN` or `en_US.UTF-8`
    pub fn from_locale(locale: &str) -> Self {
        let locale = locale.to_lowercase();
        if locale.starts_with("zh") || locale.contains("hans") {
            Language::ChineseSimplified
        } else {
            Language::English
        }
    }

    /// Detect the language from the operating system locale
    pub fn detect() -> Self {
        sys_locale::get_locale()
            .map(|locale| Self::from_locale(&locale))
            .unwrap_or_default()
    }
}

/// Message catalog for one language
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    language: Language,
}

impl Messages {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn detect() -> Self {
        Self::new(Language::detect())
    }

    fn pick(&self, en: &'static str, zh: &'static str) -> &'static str {
        match self.language {
            Language::English => en,
            Language::ChineseSimplified => zh,
        }
    }

    // Record messages

    pub fn success(&self) -> &'static str {
        self.pick("Organized", "整理成功")
    }

    pub fn duplicate_skipped(&self) -> &'static str {
        self.pick("Duplicate, skipped", "重复文件，已跳过")
    }

    pub fn extract_date_failed(&self, err: impl Display) -> String {
        format!("{}: {}", self.pick("Failed to extract date", "提取日期失败"), err)
    }

    pub fn check_duplicate_failed(&self, err: impl Display) -> String {
        format!("{}: {}", self.pick("Duplicate check failed", "检查重复失败"), err)
    }

    pub fn copy_failed(&self, err: impl Display) -> String {
        format!("{}: {}", self.pick("Failed to copy file", "复制文件失败"), err)
    }

    // Outcome labels

    pub fn status_success(&self) -> &'static str {
        self.pick("✓ Success", "✓ 成功")
    }

    pub fn status_skipped(&self) -> &'static str {
        self.pick("⊘ Skipped", "⊘ 跳过")
    }

    pub fn status_failed(&self) -> &'static str {
        self.pick("✗ Failed", "✗ 失败")
    }

    // Runner output

    pub fn start(&self) -> &'static str {
        self.pick("Starting media organization", "开始整理照片和视频")
    }

    pub fn source_dir(&self) -> &'static str {
        self.pick("Source directory", "源目录")
    }

    pub fn target_dir(&self) -> &'static str {
        self.pick("Target directory", "目标目录")
    }

    pub fn detection_label(&self) -> &'static str {
        self.pick("Duplicate detection", "重复识别")
    }

    pub fn strategy_label(&self) -> &'static str {
        self.pick("Duplicate strategy", "重复处理")
    }

    pub fn detection_name(&self, detection: DuplicateDetection) -> &'static str {
        match detection {
            DuplicateDetection::ByName => self.pick("by name", "按文件名"),
            DuplicateDetection::ByContentHash => self.pick("by content hash (MD5)", "按内容哈希 (MD5)"),
        }
    }

    pub fn strategy_name(&self, strategy: DuplicateStrategy) -> &'static str {
        match strategy {
            DuplicateStrategy::Skip => self.pick("skip", "跳过"),
            DuplicateStrategy::Overwrite => self.pick("overwrite", "覆盖"),
            DuplicateStrategy::Rename => self.pick("rename", "重命名"),
        }
    }

    pub fn scanning(&self) -> &'static str {
        self.pick("Scanning source directory...", "正在扫描源目录...")
    }

    pub fn scan_failed(&self, err: impl Display) -> String {
        format!("{}: {}", self.pick("Scan failed", "扫描失败"), err)
    }

    pub fn no_media_files(&self) -> &'static str {
        self.pick("No photos or videos found.", "未找到照片或视频文件。")
    }

    pub fn files_found(&self, count: usize) -> String {
        match self.language {
            Language::English => format!("Found {} media files", count),
            Language::ChineseSimplified => format!("找到 {} 个媒体文件", count),
        }
    }

    pub fn progress(
        &self,
        processed: usize,
        total: usize,
        success: usize,
        failed: usize,
        skipped: usize,
    ) -> String {
        let percentage = if total == 0 {
            0.0
        } else {
            processed as f64 / total as f64 * 100.0
        };
        match self.language {
            Language::English => format!(
                "Progress: {}/{} ({:.1}%) | success {} | failed {} | skipped {}",
                processed, total, percentage, success, failed, skipped
            ),
            Language::ChineseSimplified => format!(
                "进度: {}/{} ({:.1}%) | 成功 {} | 失败 {} | 跳过 {}",
                processed, total, percentage, success, failed, skipped
            ),
        }
    }

    pub fn interrupted(&self) -> &'static str {
        self.pick(
            "Interrupt received, finishing the current file...",
            "收到中断信号，正在完成当前文件...",
        )
    }

    pub fn cancelled(&self) -> &'static str {
        self.pick("Run cancelled before all files were processed", "运行已取消，部分文件未处理")
    }

    pub fn summary_title(&self) -> &'static str {
        self.pick("Organization Summary", "整理完成汇总")
    }

    pub fn total_files(&self) -> &'static str {
        self.pick("Total files", "总文件数")
    }

    pub fn photos(&self) -> &'static str {
        self.pick("Photos", "照片")
    }

    pub fn videos(&self) -> &'static str {
        self.pick("Videos", "视频")
    }

    pub fn succeeded(&self) -> &'static str {
        self.pick("Organized", "成功整理")
    }

    pub fn skipped(&self) -> &'static str {
        self.pick("Skipped (duplicate)", "跳过(重复)")
    }

    pub fn failed(&self) -> &'static str {
        self.pick("Failed", "失败")
    }

    pub fn start_time(&self) -> &'static str {
        self.pick("Start time", "开始时间")
    }

    pub fn end_time(&self) -> &'static str {
        self.pick("End time", "结束时间")
    }

    pub fn duration(&self) -> &'static str {
        self.pick("Duration", "耗时")
    }

    pub fn speed(&self) -> &'static str {
        self.pick("Speed", "处理速度")
    }

    pub fn files_per_second(&self) -> &'static str {
        self.pick("files/s", "文件/秒")
    }

    pub fn failed_notice(&self) -> &'static str {
        self.pick(
            "Some files failed; see the run log for details.",
            "部分文件处理失败，详情请查看日志。",
        )
    }

    pub fn log_saved(&self) -> &'static str {
        self.pick("Run log", "日志文件")
    }

    pub fn log_title(&self) -> &'static str {
        self.pick("Media organization log", "照片视频整理日志")
    }
}
