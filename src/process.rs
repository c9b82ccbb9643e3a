//! Per-file processing pipeline
//!
//! Each file goes through:
//! - capture date extraction
//! - canonical target path derivation
//! - duplicate detection and strategy dispatch
//! - buffered copy into the target layout
//!
//! Files are processed one at a time in scan order. Cancellation is only
//! observed between files.

use crate::config::{Config, DuplicateStrategy};
use crate::copy::{DirectoryCache, copy_file};
use crate::duplicate::DuplicateDetector;
use crate::error::Result;
use crate::i18n::Messages;
use crate::media::MediaFile;
use crate::planner::PathPlanner;
use crate::scan::Scanner;
use crate::stats::RunStatistics;
use crate::time::DateExtractor;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, debug, error, info, span, warn};

/// Terminal outcome of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Skipped,
    Failed,
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRecord {
    pub file: MediaFile,
    pub outcome: Outcome,
    /// Localized, human-readable detail
    pub message: String,
}

impl ProcessRecord {
    fn new(file: &MediaFile, outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            file: file.clone(),
            outcome,
            message: message.into(),
        }
    }
}

/// Cooperative cancellation shared between a processor and whoever wants
/// to stop it (signal handler, UI)
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Orchestrates one organizing run.
///
/// Owns the scanned file set, the directory cache, the produced records
/// and the running statistics. A new processor starts with an empty cache.
pub struct Processor {
    config: Config,
    messages: Messages,
    extractor: DateExtractor,
    planner: PathPlanner,
    detector: DuplicateDetector,
    dirs: DirectoryCache,
    files: Vec<MediaFile>,
    done: Vec<bool>,
    records: Vec<ProcessRecord>,
    stats: RunStatistics,
    cancel: CancelFlag,
    scanned: bool,
}

impl Processor {
    pub fn new(config: Config, messages: Messages) -> Self {
        let planner = PathPlanner::new(&config.target_dir);
        let detector = DuplicateDetector::new(config.duplicate_detection);

        Self {
            config,
            messages,
            extractor: DateExtractor::new(),
            planner,
            detector,
            dirs: DirectoryCache::new(),
            files: Vec::new(),
            done: Vec::new(),
            records: Vec::new(),
            stats: RunStatistics::new(),
            cancel: CancelFlag::new(),
            scanned: false,
        }
    }

    /// Share an externally owned cancellation flag
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Scan the source directory and count the files by kind.
    ///
    /// A scan error is fatal and leaves the processor without files.
    pub fn scan(&mut self) -> Result<usize> {
        let files = Scanner::new(&self.config.source_dir).scan()?;
        self.load_files(files);
        Ok(self.files.len())
    }

    /// Replace the file set with an already scanned one
    pub fn load_files(&mut self, files: Vec<MediaFile>) {
        let mut stats = RunStatistics::new();
        for file in &files {
            stats.record_scanned(file.kind);
        }

        self.done = vec![false; files.len()];
        self.files = files;
        self.records.clear();
        self.stats = stats;
        self.scanned = true;
    }

    /// Create every distinct target day directory once, up front.
    ///
    /// Files whose date cannot be extracted are left out; they will fail
    /// (or create their directory lazily) when processed. Returns the
    /// number of directories created.
    pub fn pre_create_directories(&mut self) -> Result<usize> {
        let mut pending = BTreeSet::new();

        for file in &mut self.files {
            match self.extractor.extract_date(file) {
                Ok(date) => {
                    file.capture_date = Some(date);
                    pending.insert(self.planner.day_dir(&date));
                }
                Err(e) => {
                    debug!(path = ?file.path, error = %e, "Skipping file in directory pre-pass");
                }
            }
        }

        let count = pending.len();
        for dir in pending {
            self.dirs.ensure(&dir)?;
        }

        info!(directories = count, "Pre-created target directories");
        Ok(count)
    }

    /// Process the file at `index` of the scanned set.
    ///
    /// Returns `None` when the index is out of range or the file already
    /// has a record.
    pub fn process_next(&mut self, index: usize) -> Option<ProcessRecord> {
        if self.done.get(index).copied().unwrap_or(true) {
            return None;
        }

        let mut file = self.files[index].clone();
        let record = self.process_file(&mut file);

        self.files[index] = file;
        self.done[index] = true;
        self.stats.record(&record);
        self.records.push(record.clone());

        Some(record)
    }

    /// Run one file through the pipeline. Never fails: every error becomes
    /// a `Failed` record.
    pub fn process_file(&mut self, file: &mut MediaFile) -> ProcessRecord {
        let _file_span = span!(Level::DEBUG, "process_file", path = ?file.path).entered();

        let date = match self.extractor.extract(file) {
            Ok(extracted) => {
                debug!(source = ?extracted.source, timestamp = %extracted.timestamp, "Capture date");
                extracted.timestamp
            }
            Err(e) => {
                error!(path = ?file.path, error = %e, "Failed to extract date");
                return ProcessRecord::new(
                    file,
                    Outcome::Failed,
                    self.messages.extract_date_failed(&e),
                );
            }
        };
        file.capture_date = Some(date);

        let mut target = self.planner.canonical_target(&date, file.file_name());
        file.target_path = Some(target.clone());

        let duplicate = match self.detector.is_duplicate(file) {
            Ok(duplicate) => duplicate,
            Err(e) => {
                error!(path = ?file.path, error = %e, "Failed to check for duplicate");
                return ProcessRecord::new(
                    file,
                    Outcome::Failed,
                    self.messages.check_duplicate_failed(&e),
                );
            }
        };

        if duplicate {
            match self.config.duplicate_strategy {
                DuplicateStrategy::Skip => {
                    debug!(path = ?file.path, ?target, "Duplicate, skipping");
                    return ProcessRecord::new(
                        file,
                        Outcome::Skipped,
                        self.messages.duplicate_skipped(),
                    );
                }
                DuplicateStrategy::Overwrite => {
                    debug!(path = ?file.path, ?target, "Duplicate, overwriting");
                }
                DuplicateStrategy::Rename => {
                    target = self.planner.unique_target(&date, file.file_name());
                    debug!(path = ?file.path, ?target, "Duplicate, renaming");
                    file.target_path = Some(target.clone());
                }
            }
        }

        if let Err(e) = copy_file(&file.path, &target, &mut self.dirs) {
            error!(path = ?file.path, ?target, error = %e, "Failed to copy file");
            return ProcessRecord::new(file, Outcome::Failed, self.messages.copy_failed(&e));
        }

        info!(source = ?file.path, destination = ?target, "Processed file");
        ProcessRecord::new(file, Outcome::Success, self.messages.success())
    }

    /// Process every remaining file in scan order until done or cancelled.
    ///
    /// Scans first if no file set has been loaded yet. `on_record` is
    /// called after each file with the record and the updated statistics.
    pub fn run<F>(&mut self, mut on_record: F) -> Result<RunStatistics>
    where
        F: FnMut(&ProcessRecord, &RunStatistics),
    {
        let _span = span!(Level::INFO, "processor_run").entered();

        if !self.scanned {
            info!("Scanning source directory...");
            self.scan()?;
            if let Err(e) = self.pre_create_directories() {
                warn!(error = %e, "Directory pre-pass failed, creating directories lazily");
            }
        }

        for index in 0..self.files.len() {
            if self.is_cancelled() {
                warn!(
                    processed = self.stats.processed_files,
                    total = self.stats.total_files,
                    "Run cancelled"
                );
                break;
            }
            if let Some(record) = self.process_next(index) {
                on_record(&record, &self.stats);
            }
        }

        let stats = self.finish();
        info!("{}", stats.summary());
        Ok(stats)
    }

    /// Stamp end time and duration (once) and return a snapshot
    pub fn finish(&mut self) -> RunStatistics {
        if !self.stats.is_finished() {
            self.stats.finish();
        }
        self.stats.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.files
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    pub fn directory_cache(&self) -> &DirectoryCache {
        &self.dirs
    }
}
