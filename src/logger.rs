/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Provide structured, append-only diagnostics for vsce-stats
    runs without touching the CSV output stream.

  Security / Safety Notes:
    Log lines carry command lines and counts only; marketplace
    payloads are never logged.

  Dependencies:
    std::fs::File, std::sync::Mutex, chrono for timestamps.

  Operational Scope:
    Used by runtime components to emit RFC-3339 UTC stamped
    entries on stderr and, optionally, to a log file.

  Revision History:
    2026-10-15 COD  Adapted logging module for vsce-stats.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - stdout reserved for report records
    - Graceful error propagation on I/O failures
============================================================*/

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::error::{Result, StatsError};

/// Structured log level for vsce-stats events.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Shared logger writing to stderr and optionally to a file.
pub struct Logger {
    file: Option<Mutex<BufWriter<File>>>,
    path: Option<PathBuf>,
    scope: Option<String>,
    verbose: bool,
}

impl Logger {
    /// Build a logger; `path` enables the append-only log file.
    pub fn new(path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let file = if let Some(ref file_path) = path {
            if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|err| {
                    StatsError::Filesystem(format!(
                        "Failed to create log directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)
                .map_err(|err| {
                    StatsError::Filesystem(format!(
                        "Failed to open log file {}: {err}",
                        file_path.display()
                    ))
                })?;
            Some(Mutex::new(BufWriter::new(file)))
        } else {
            None
        };

        Ok(Self {
            file,
            path,
            scope: None,
            verbose,
        })
    }

    /// Tag every entry with `scope`, typically the `publisher.extension`
    /// being reported, so lines from scheduled runs stay attributable.
    pub fn scoped(mut self, scope: impl fmt::Display) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    /// Emit a log entry with the given level, code, and message.
    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = match &self.scope {
            Some(scope) => format!(
                "{timestamp} [{}] [{scope}] [{}] {}",
                level.as_str(),
                code,
                message.as_ref()
            ),
            None => format!(
                "{timestamp} [{}] [{}] {}",
                level.as_str(),
                code,
                message.as_ref()
            ),
        };

        if self.verbose || level == LogLevel::Error || level == LogLevel::Warn {
            eprintln!("{payload}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                if writeln!(guard, "{payload}").and_then(|_| guard.flush()).is_err() {
                    eprintln!(
                        "{timestamp} [{}] [LOGGER] Failed to write to log file",
                        LogLevel::Warn.as_str()
                    );
                }
            }
        }
    }

    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    /// Return the path backing this logger, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entries_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("stats.log");

        let logger = Logger::new(Some(path.clone()), false).unwrap();
        logger.info("FETCH", "first");
        logger.debug("FETCH", "second");
        drop(logger);
        let logger = Logger::new(Some(path.clone()), false).unwrap();
        assert_eq!(logger.path(), Some(path.as_path()));
        logger.warn("REPORT", "third");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[INFO] [FETCH] first"));
        assert!(lines[1].ends_with("[DEBUG] [FETCH] second"));
        assert!(lines[2].ends_with("[WARN] [REPORT] third"));
    }

    #[test]
    fn scoped_entries_name_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.log");

        let logger = Logger::new(Some(path.clone()), false)
            .unwrap()
            .scoped(crate::config::DEFAULT_TARGET);
        logger.warn("STATTYPE", "install is not numeric");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents
            .trim_end()
            .ends_with("[WARN] [golang.go] [STATTYPE] install is not numeric"));
    }

    #[test]
    fn stderr_only_logger_has_no_path() {
        let logger = Logger::new(None, false).unwrap();
        assert!(logger.path().is_none());
    }
}
