//! File-based logging collaborator for the hook runs.
//!
//! Each hook invocation is a separate short-lived process, so logs go
//! straight to append-only files under the configured directory:
//! `tag_debug.log`, `tag_history.log` and `tag_error.log`. The history and
//! error logs are rotated on startup by truncating them entirely once their
//! entry count exceeds the configured ceiling.

use crate::config::LogConfig;
use crate::error::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct LogManager {
    debug_log: PathBuf,
    history_log: PathBuf,
    error_log: PathBuf,
    max_entries: usize,
}

impl LogManager {
    /// Create the log directory and rotate existing logs.
    ///
    /// When `clear_debug_log` is set the debug log is truncated outright;
    /// the history and error logs are only truncated when they exceed
    /// `max_entries` lines.
    pub fn new(config: &LogConfig) -> Result<Self> {
        let dir = Path::new(&config.dir);
        fs::create_dir_all(dir)?;

        let manager = LogManager {
            debug_log: dir.join("tag_debug.log"),
            history_log: dir.join("tag_history.log"),
            error_log: dir.join("tag_error.log"),
            max_entries: config.max_entries,
        };

        if config.clear_debug_log {
            manager.rotate(&manager.debug_log, 0)?;
        }
        manager.rotate(&manager.history_log, manager.max_entries)?;
        manager.rotate(&manager.error_log, manager.max_entries)?;

        Ok(manager)
    }

    /// Truncate a log file once its non-empty line count exceeds the limit.
    ///
    /// Returns true when the file was cleared.
    fn rotate(&self, log_path: &Path, max_entries: usize) -> Result<bool> {
        if !log_path.exists() {
            return Ok(false);
        }

        let entries = fs::read_to_string(log_path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count();

        if entries > max_entries {
            fs::write(log_path, "")?;
            self.debug(&format!(
                "Cleared log {} ({} entries exceeded {} limit)",
                log_path.display(),
                entries,
                max_entries
            ));
            return Ok(true);
        }

        Ok(false)
    }

    /// Append a diagnostic entry. Best-effort: a failed write never aborts
    /// the hook run.
    pub fn debug(&self, message: &str) {
        append_line(
            &self.debug_log,
            &format!("[DEBUG {}] {}", timestamp(), message),
        );
    }

    /// Append an operator-facing history entry (bumps, tags pushed).
    pub fn history(&self, message: &str) {
        append_line(&self.history_log, &format!("{} - {}", timestamp(), message));
    }

    /// Append an error entry.
    pub fn error(&self, message: &str) {
        append_line(
            &self.error_log,
            &format!("[ERROR {}] {}", timestamp(), message),
        );
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn append_line(path: &Path, line: &str) {
    let file = OpenOptions::new().create(true).append(true).open(path);
    if let Ok(mut file) = file {
        let _ = writeln!(file, "{}", line);
    }
}
