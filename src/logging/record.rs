//! Log record formatting and daily file naming
//!
//! Lines look like `HH:mm:ss.mmm LEVEL [label]: message` and live in files
//! named `yyyy-MM-dd.log`, so name order equals chronological order.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use super::level::LogLevel;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const LOG_EXTENSION: &str = ".log";

/// A single record, built per call and dropped after formatting
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    /// Wall-clock time of the call
    pub timestamp: NaiveDateTime,
    pub level: LogLevel,
    /// Caller-supplied call-site label
    pub label: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        timestamp: NaiveDateTime,
        level: LogLevel,
        label: Option<&'a str>,
        message: &'a str,
    ) -> Self {
        Self {
            timestamp,
            level,
            label,
            message,
        }
    }

    /// Format the record as a single line, without the trailing newline
    pub fn format_line(&self) -> String {
        let time = self.timestamp.format(TIME_FORMAT);
        match self.label {
            Some(label) => format!("{} {} [{}]: {}", time, self.level, label, self.message),
            None => format!("{} {}: {}", time, self.level, self.message),
        }
    }
}

/// Name of the log file for a calendar day, e.g. `2026-10-18.log`
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}{}", date.format(DATE_FORMAT), LOG_EXTENSION)
}

/// Full path of the log file for a calendar day inside `dir`
pub fn log_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(log_file_name(date))
}

/// Parse the date out of a daily log file name
///
/// Returns `None` unless the name is exactly `yyyy-MM-dd.log` with a valid date.
pub fn parse_log_file_date(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(LOG_EXTENSION)?;
    let date = NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()?;
    // chrono tolerates padding, signs and unpadded fields; only the canonical name counts
    (log_file_name(date) == name).then_some(date)
}
