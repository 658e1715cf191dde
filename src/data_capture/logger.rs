use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, error, info};

use crate::data_capture::types::CaptureRecord;
use crate::error_handling::types::CaptureError;

/// Append-only sink for capture records.
///
/// Opened once at startup and injected wherever submissions are handled;
/// the file handle closes when the last owner drops it at shutdown. The
/// sink is write-only from the service's perspective: nothing here ever
/// reads a record back.
///
/// Each [`record`](CaptureLog::record) call appends one complete line while
/// holding the writer lock, so concurrent submissions never produce torn or
/// merged lines, and flushes before returning so the write precedes the
/// HTTP acknowledgment.
pub struct CaptureLog {
    path: PathBuf,
    sink: Mutex<File>,
}

impl CaptureLog {
    /// Opens (or creates) the capture log in append mode, creating any
    /// missing parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create log dir {}: {}", parent.display(), e);
                CaptureError::SinkOpenFailed(e)
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                error!("Failed to open capture log {}: {}", path.display(), e);
                CaptureError::SinkOpenFailed(e)
            })?;
        info!("Capture log opened at {}", path.display());
        Ok(Self {
            path,
            sink: Mutex::new(file),
        })
    }

    /// Appends one record as a single line and flushes it to the OS before
    /// returning.
    pub fn record(&self, entry: &CaptureRecord) -> Result<(), CaptureError> {
        let mut line = entry.to_csv_line();
        line.push('\n');

        // Lock covers the whole write so lines from concurrent submissions
        // cannot interleave. Poisoning only happens if a writer panicked
        // mid-append; keep capturing with the inner handle anyway.
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sink.write_all(line.as_bytes()).map_err(|e| {
            error!("Failed to append to capture log {}: {}", self.path.display(), e);
            CaptureError::SinkWriteFailed(e)
        })?;
        sink.flush().map_err(|e| {
            error!("Failed to flush capture log {}: {}", self.path.display(), e);
            CaptureError::SinkWriteFailed(e)
        })?;
        debug!("Captured submission from {}", entry.source_address);
        Ok(())
    }

    /// Path of the underlying sink.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(user: &str, pass: &str) -> CaptureRecord {
        CaptureRecord::new(Utc::now(), "203.0.113.5".into(), user.into(), pass.into())
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/logs/honeyweb.log");
        let log = CaptureLog::open(&path).unwrap();
        assert_eq!(log.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_records_append_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("honeyweb.log");
        let log = CaptureLog::open(&path).unwrap();
        log.record(&entry("admin", "first")).unwrap();
        log.record(&entry("root", "second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(",admin,first"));
        assert!(lines[1].ends_with(",root,second"));

        // serial arrivals keep non-decreasing timestamps
        let stamps: Vec<_> = lines
            .iter()
            .map(|l| {
                chrono::DateTime::parse_from_rfc3339(l.split(',').next().unwrap()).unwrap()
            })
            .collect();
        assert!(stamps[0] <= stamps[1]);
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("honeyweb.log");
        {
            let log = CaptureLog::open(&path).unwrap();
            log.record(&entry("admin", "first")).unwrap();
        }
        let log = CaptureLog::open(&path).unwrap();
        log.record(&entry("root", "second")).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_concurrent_writers_produce_whole_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("honeyweb.log");
        let log = Arc::new(CaptureLog::open(&path).unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let log = Arc::clone(&log);
            handles.push(std::thread::spawn(move || {
                for j in 0..25 {
                    let user = format!("user-{}-{}", i, j);
                    log.record(&entry(&user, "hunter2")).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 16 * 25);
        for line in lines {
            assert_eq!(line.split(',').count(), 4, "torn line: {:?}", line);
            assert!(line.ends_with(",hunter2"));
        }
    }
}
