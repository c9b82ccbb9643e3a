//! Run-level statistics

use crate::media::MediaKind;
use crate::process::{Outcome, ProcessRecord};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Counters and timing for one run.
///
/// The success count is always derived from the other counters and is
/// never stored.
#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub total_files: usize,
    pub processed_files: usize,
    pub photo_count: usize,
    pub video_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    pub duration: Duration,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatistics {
    /// Fresh statistics with the clock started now
    pub fn new() -> Self {
        Self {
            total_files: 0,
            processed_files: 0,
            photo_count: 0,
            video_count: 0,
            skipped_count: 0,
            failed_count: 0,
            start_time: Local::now(),
            end_time: None,
            duration: Duration::ZERO,
        }
    }

    /// Count a file at scan time, regardless of its eventual outcome
    pub fn record_scanned(&mut self, kind: MediaKind) {
        self.total_files += 1;
        match kind {
            MediaKind::Photo => self.photo_count += 1,
            MediaKind::Video => self.video_count += 1,
        }
    }

    pub fn record(&mut self, record: &ProcessRecord) {
        self.processed_files += 1;
        match record.outcome {
            Outcome::Success => {}
            Outcome::Skipped => self.skipped_count += 1,
            Outcome::Failed => self.failed_count += 1,
        }
    }

    /// Stamp the end time and duration
    pub fn finish(&mut self) {
        let end = Local::now();
        self.duration = (end - self.start_time).to_std().unwrap_or(Duration::ZERO);
        self.end_time = Some(end);
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn success_count(&self) -> usize {
        self.processed_files - self.skipped_count - self.failed_count
    }

    /// Files per second; zero when no time has elapsed
    pub fn speed(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            self.processed_files as f64 / seconds
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Processed: {}, Success: {}, Skipped: {}, Failed: {}",
            self.total_files,
            self.processed_files,
            self.success_count(),
            self.skipped_count,
            self.failed_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFile;
    use std::path::PathBuf;

    fn record(outcome: Outcome) -> ProcessRecord {
        ProcessRecord {
            file: MediaFile::new(PathBuf::from("/src/a.jpg"), MediaKind::Photo, 1),
            outcome,
            message: String::new(),
        }
    }

    #[test]
    fn test_speed() {
        let stats = RunStatistics {
            processed_files: 100,
            duration: Duration::from_secs(10),
            ..RunStatistics::new()
        };
        assert_eq!(stats.speed(), 10.0);
    }

    #[test]
    fn test_speed_zero_duration() {
        let stats = RunStatistics {
            processed_files: 100,
            duration: Duration::ZERO,
            ..RunStatistics::new()
        };
        assert_eq!(stats.speed(), 0.0);
    }

    #[test]
    fn test_success_count_matches_records() {
        let outcomes = [
            Outcome::Success,
            Outcome::Failed,
            Outcome::Skipped,
            Outcome::Success,
            Outcome::Skipped,
            Outcome::Success,
            Outcome::Failed,
        ];

        let mut stats = RunStatistics::new();
        for (i, outcome) in outcomes.iter().enumerate() {
            stats.record(&record(*outcome));
            let successes = outcomes[..=i]
                .iter()
                .filter(|o| **o == Outcome::Success)
                .count();
            assert_eq!(stats.success_count(), successes);
        }

        assert_eq!(stats.processed_files, 7);
        assert_eq!(stats.skipped_count, 2);
        assert_eq!(stats.failed_count, 2);
        assert!(stats.summary().contains("Success: 3"));
    }

    #[test]
    fn test_scan_counts() {
        let mut stats = RunStatistics::new();
        stats.record_scanned(MediaKind::Photo);
        stats.record_scanned(MediaKind::Photo);
        stats.record_scanned(MediaKind::Video);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.photo_count, 2);
        assert_eq!(stats.video_count, 1);
        assert_eq!(stats.processed_files, 0);
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut stats = RunStatistics::new();
        assert!(!stats.is_finished());
        stats.finish();
        assert!(stats.is_finished());
        assert!(stats.end_time.unwrap() >= stats.start_time);
    }
}
