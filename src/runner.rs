//! Line-mode runner: drives a [`Processor`] over the whole file set with
//! progress lines, a run log and a final summary.

use crate::config::Config;
use crate::error::Result;
use crate::i18n::Messages;
use crate::output::{self, CliTheme};
use crate::process::{CancelFlag, Outcome, Processor};
use crate::run_log::RunLog;
use crate::stats::RunStatistics;
use std::path::Path;
use tracing::{error, info, warn};

/// Print a progress line every this many files
const PROGRESS_INTERVAL: usize = 10;

pub struct LineRunner {
    config: Config,
    messages: Messages,
    log: RunLog,
    cancel: CancelFlag,
}

impl LineRunner {
    /// Create the runner and open its run log in `log_dir`
    pub fn new(config: Config, messages: Messages, log_dir: &Path) -> Result<Self> {
        let log = RunLog::create(log_dir, messages)?;
        Ok(Self {
            config,
            messages,
            log,
            cancel: CancelFlag::new(),
        })
    }

    /// Flag that stops the run after the in-flight file
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run to completion (or cancellation). Only a scan failure is returned
    /// as an error.
    pub fn run(mut self) -> Result<RunStatistics> {
        let m = self.messages;
        self.print_header();

        let mut processor =
            Processor::new(self.config.clone(), m).with_cancel_flag(self.cancel.clone());

        output::print_hint(m.scanning());
        let total = match processor.scan() {
            Ok(total) => total,
            Err(e) => {
                error!(error = %e, "Scan failed");
                output::print_error(&m.scan_failed(&e));
                if let Err(log_err) = self.log.log_error(&m.scan_failed(&e)) {
                    warn!(error = %log_err, "Failed to write run log");
                }
                if let Err(log_err) = self.log.close() {
                    warn!(error = %log_err, "Failed to close run log");
                }
                return Err(e);
            }
        };

        if total == 0 {
            output::print_warning(m.no_media_files());
            let stats = processor.finish();
            self.log.log_statistics(&stats)?;
            self.log.close()?;
            return Ok(stats);
        }
        output::print_hint(&m.files_found(total));

        if let Err(e) = processor.pre_create_directories() {
            warn!(error = %e, "Directory pre-pass failed, creating directories lazily");
        }

        let log = &mut self.log;
        let stats = processor.run(|record, stats| {
            if record.outcome == Outcome::Failed {
                let line = format!("{}: {}", record.file.path.display(), record.message);
                if let Err(e) = log.log_error(&line) {
                    warn!(error = %e, "Failed to write run log");
                }
            }
            if stats.processed_files % PROGRESS_INTERVAL == 0 || stats.processed_files == total {
                output::print_progress(&m.progress(
                    stats.processed_files,
                    stats.total_files,
                    stats.success_count(),
                    stats.failed_count,
                    stats.skipped_count,
                ));
            }
        })?;
        output::print_blank();

        if processor.is_cancelled() {
            output::print_warning(m.cancelled());
        }

        for record in processor.records() {
            self.log.log_record(record)?;
        }
        self.log.log_statistics(&stats)?;

        self.print_summary(&stats);
        output::print_key_value(m.log_saved(), &self.log.path().display().to_string(), None);
        info!(log_file = %self.log.path().display(), "Run log written");

        self.log.close()?;
        Ok(stats)
    }

    fn print_header(&self) {
        let m = self.messages;
        output::print_title(m.start());
        output::print_key_value(m.source_dir(), &self.config.source_dir.display().to_string(), None);
        output::print_key_value(m.target_dir(), &self.config.target_dir.display().to_string(), None);
        output::print_key_value(
            m.detection_label(),
            m.detection_name(self.config.duplicate_detection),
            None,
        );
        output::print_key_value(
            m.strategy_label(),
            m.strategy_name(self.config.duplicate_strategy),
            None,
        );
        output::print_blank();
    }

    fn print_summary(&self, stats: &RunStatistics) {
        let m = self.messages;
        output::print_separator();
        output::print_title(m.summary_title());
        output::print_separator();

        output::print_stat(m.total_files(), &stats.total_files.to_string(), CliTheme::ACCENT);
        output::print_stat(m.photos(), &stats.photo_count.to_string(), CliTheme::ACCENT);
        output::print_stat(m.videos(), &stats.video_count.to_string(), CliTheme::ACCENT);
        output::print_stat(m.succeeded(), &stats.success_count().to_string(), CliTheme::SUCCESS);
        output::print_stat(m.failed(), &stats.failed_count.to_string(), CliTheme::ERROR);
        output::print_stat(m.skipped(), &stats.skipped_count.to_string(), CliTheme::WARNING);
        output::print_stat(
            m.duration(),
            &format!("{:.1}s", stats.duration.as_secs_f64()),
            CliTheme::HINT,
        );
        output::print_stat(
            m.speed(),
            &format!("{:.2} {}", stats.speed(), m.files_per_second()),
            CliTheme::HINT,
        );

        if stats.failed_count > 0 {
            output::print_blank();
            output::print_error(m.failed_notice());
        }
        output::print_blank();
        output::print_key_value(
            m.strategy_label(),
            m.strategy_name(self.config.duplicate_strategy),
            None,
        );
    }
}
