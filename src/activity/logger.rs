//! Append-only activity log
//!
//! Each entry is written as a single JSON line and flushed immediately.
//! Handles are cheap to clone and may be shared with background tasks.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{UpscaleError, UpscaleResult};

use super::entry::{ActivityEntry, ActivityKind};

#[derive(Debug, Clone)]
pub struct ActivityLog {
    log_path: PathBuf,
    enabled: bool,
    write_lock: Arc<Mutex<()>>,
}

impl ActivityLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            enabled: true,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A handle that drops every entry
    pub fn disabled(log_path: PathBuf) -> Self {
        Self {
            enabled: false,
            ..Self::new(log_path)
        }
    }

    /// Append one entry
    pub fn log(&self, entry: &ActivityEntry) -> UpscaleResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let json = serde_json::to_string(entry)
            .map_err(|e| UpscaleError::Json(format!("Failed to serialize activity entry: {}", e)))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| UpscaleError::Io("Activity log lock poisoned".into()))?;

        // First write on a fresh install creates the data directory
        if let Some(parent) = self.log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                UpscaleError::Io(format!("Failed to create activity log directory: {}", e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| UpscaleError::Io(format!("Failed to open activity log: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| UpscaleError::Io(format!("Failed to write activity entry: {}", e)))?;

        file.flush()
            .map_err(|e| UpscaleError::Io(format!("Failed to flush activity log: {}", e)))?;

        Ok(())
    }

    /// Log without letting a logging failure interrupt the caller
    pub fn record(&self, kind: ActivityKind, subject: impl Into<String>, details: Option<String>) {
        let entry = ActivityEntry::new(kind, subject, details);
        let _ = self.log(&entry);
    }

    /// Log a failed operation with its error text
    pub fn record_failure(
        &self,
        kind: ActivityKind,
        subject: impl Into<String>,
        error: &UpscaleError,
    ) {
        self.record(kind, subject, Some(error.to_string()));
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> UpscaleResult<Vec<ActivityEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| UpscaleError::Io(format!("Failed to open activity log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                UpscaleError::Io(format!(
                    "Failed to read activity log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ActivityEntry = serde_json::from_str(&line).map_err(|e| {
                UpscaleError::Json(format!(
                    "Failed to parse activity entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> UpscaleResult<Vec<ActivityEntry>> {
        let mut all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_log() -> (ActivityLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = ActivityLog::new(temp_dir.path().join("activity.log"));
        (log, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (log, _temp) = create_test_log();
        log.record(ActivityKind::SessionStarted, "connect", None);

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ActivityKind::SessionStarted);
    }

    #[test]
    fn test_read_recent() {
        let (log, _temp) = create_test_log();
        for i in 0..10 {
            log.record(ActivityKind::LessonCompleted, format!("lesson-{}", i), None);
        }

        let recent = log.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].subject, "lesson-7");
        assert_eq!(recent[2].subject, "lesson-9");
        assert_eq!(log.read_all().unwrap().len(), 10);
    }

    #[test]
    fn test_empty_log() {
        let (log, _temp) = create_test_log();
        assert!(log.read_all().unwrap().is_empty());
        assert!(log.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("activity.log");
        let log = ActivityLog::disabled(path.clone());
        log.record(ActivityKind::SignedIn, "a@b.c", None);
        assert!(!path.exists());
    }

    #[test]
    fn test_first_write_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh").join("nested").join("activity.log");
        let log = ActivityLog::new(path.clone());

        log.record(ActivityKind::BudgetExported, "budget.csv", None);

        assert!(path.exists());
        assert_eq!(log.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_clones_share_the_file() {
        let (log, _temp) = create_test_log();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    log.record(ActivityKind::RequestFailed, format!("sym-{}", i), None)
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(log.read_all().unwrap().len(), 4);
    }

    #[test]
    fn test_record_failure_keeps_error_text() {
        let (log, _temp) = create_test_log();
        let err = UpscaleError::Network("connect: refused".into());
        log.record_failure(ActivityKind::SessionFailed, "connect", &err);
        assert_eq!(
            log.read_all().unwrap()[0].details.as_deref(),
            Some("Network error: connect: refused")
        );
    }
}
