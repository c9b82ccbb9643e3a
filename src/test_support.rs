//! Shared fixtures for unit tests

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Local noon on the given day
pub fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Write `contents` to `path` (creating parents) and pin its mtime to the
/// local wall-clock time `when`
pub fn write_with_mtime(path: &Path, contents: &[u8], when: NaiveDateTime) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
    let local = Local.from_local_datetime(&when).single().unwrap();
    let system: SystemTime = local.into();
    filetime::set_file_mtime(path, FileTime::from_system_time(system)).unwrap();
}
