//! Plain-text run log: a header, one line per processed file, error lines
//! and a trailing summary block.

use crate::error::Result;
use crate::i18n::Messages;
use crate::process::{Outcome, ProcessRecord};
use crate::stats::RunStatistics;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 60;

/// Writer for one run's log file. Create at run start, [`RunLog::close`]
/// at run end.
pub struct RunLog {
    writer: BufWriter<File>,
    path: PathBuf,
    messages: Messages,
}

impl RunLog {
    /// Create `organize_<timestamp>.txt` inside `dir` and write the header
    pub fn create(dir: &Path, messages: Messages) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        Self::create_at(dir.join(format!("organize_{}.txt", timestamp)), messages)
    }

    /// Create the log at an exact path
    pub fn create_at(path: PathBuf, messages: Messages) -> Result<Self> {
        let file = File::create(&path)?;
        let mut log = Self {
            writer: BufWriter::new(file),
            path,
            messages,
        };
        log.write_header()?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "{} - {}",
            self.messages.log_title(),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(self.writer, "{}\n", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    /// `[HH:MM:SS] <status> | <name> -> <target> | <message>`
    pub fn log_record(&mut self, record: &ProcessRecord) -> Result<()> {
        let status = match record.outcome {
            Outcome::Success => self.messages.status_success(),
            Outcome::Skipped => self.messages.status_skipped(),
            Outcome::Failed => self.messages.status_failed(),
        };
        let target = record
            .file
            .target_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        writeln!(
            self.writer,
            "[{}] {} | {} -> {} | {}",
            Local::now().format("%H:%M:%S"),
            status,
            record.file.name,
            target,
            record.message
        )?;
        Ok(())
    }

    pub fn log_error(&mut self, message: &str) -> Result<()> {
        writeln!(
            self.writer,
            "[{}] ERROR | {}",
            Local::now().format("%H:%M:%S"),
            message
        )?;
        Ok(())
    }

    pub fn log_statistics(&mut self, stats: &RunStatistics) -> Result<()> {
        let m = self.messages;
        let rule = "=".repeat(RULE_WIDTH);
        let w = &mut self.writer;

        writeln!(w, "\n{rule}\n{}\n{rule}\n", m.summary_title())?;

        writeln!(w, "  {:<16} {}", format!("{}:", m.total_files()), stats.total_files)?;
        writeln!(w, "  ├─ {:<13} {}", format!("{}:", m.photos()), stats.photo_count)?;
        writeln!(w, "  └─ {:<13} {}\n", format!("{}:", m.videos()), stats.video_count)?;

        writeln!(w, "  ✓ {:<14} {}", format!("{}:", m.succeeded()), stats.success_count())?;
        writeln!(w, "  ⊘ {:<14} {}", format!("{}:", m.skipped()), stats.skipped_count)?;
        writeln!(w, "  ✗ {:<14} {}\n", format!("{}:", m.failed()), stats.failed_count)?;

        writeln!(
            w,
            "  {:<16} {}",
            format!("{}:", m.start_time()),
            stats.start_time.format("%Y-%m-%d %H:%M:%S")
        )?;
        if let Some(end) = stats.end_time {
            writeln!(
                w,
                "  {:<16} {}",
                format!("{}:", m.end_time()),
                end.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        writeln!(
            w,
            "  {:<16} {}s",
            format!("{}:", m.duration()),
            stats.duration.as_secs()
        )?;
        writeln!(
            w,
            "  {:<16} {:.2} {}",
            format!("{}:", m.speed()),
            stats.speed(),
            m.files_per_second()
        )?;
        Ok(())
    }

    /// Flush and close the log
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::media::{MediaFile, MediaKind};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_log_contents() {
        let dir = TempDir::new().unwrap();
        let mut log = RunLog::create(dir.path(), Messages::new(Language::English)).unwrap();
        let path = log.path().to_path_buf();

        let mut file = MediaFile::new(PathBuf::from("/src/a.jpg"), MediaKind::Photo, 3);
        file.target_path = Some(PathBuf::from("/dst/2024/03/03-15/a.jpg"));
        let record = ProcessRecord {
            file,
            outcome: Outcome::Skipped,
            message: "Duplicate, skipped".into(),
        };
        log.log_record(&record).unwrap();
        log.log_error("something broke").unwrap();

        let mut stats = RunStatistics::new();
        stats.record_scanned(MediaKind::Photo);
        stats.record(&record);
        stats.duration = Duration::from_secs(2);
        log.log_statistics(&stats).unwrap();
        log.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("organize_"));
        assert!(contents.starts_with("Media organization log - "));
        assert!(contents.contains("⊘ Skipped | a.jpg -> /dst/2024/03/03-15/a.jpg | Duplicate, skipped"));
        assert!(contents.contains("ERROR | something broke"));
        assert!(contents.contains("Organization Summary"));
        assert!(contents.contains("0.50 files/s"));
    }
}
