//! Log levels and the level-to-destination policy table
//!
//! Every record is classified by its level, and the level alone decides
//! whether the line goes to the daily file, the console, both, or neither.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LogError;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels, in ascending severity
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Get the name written into log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn index(self) -> usize {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warn => 2,
            LogLevel::Error => 3,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Parse a level name, case-insensitively. `WARNING` is accepted as `WARN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// Where a record of a given level is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destinations {
    /// Append to the daily log file
    #[serde(default)]
    pub file: bool,
    /// Echo to the console sink
    #[serde(default)]
    pub console: bool,
}

impl Destinations {
    pub const NONE: Destinations = Destinations::new(false, false);
    pub const FILE: Destinations = Destinations::new(true, false);
    pub const CONSOLE: Destinations = Destinations::new(false, true);
    pub const BOTH: Destinations = Destinations::new(true, true);

    pub const fn new(file: bool, console: bool) -> Self {
        Self { file, console }
    }
}

/// Decision table mapping each level to its destinations
///
/// The default table is:
///
/// | level | file | console |
/// |-------|------|---------|
/// | DEBUG | no   | yes     |
/// | INFO  | yes  | no      |
/// | WARN  | yes  | yes     |
/// | ERROR | yes  | yes     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPolicy {
    table: [Destinations; 4],
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self {
            table: [
                Destinations::CONSOLE,
                Destinations::FILE,
                Destinations::BOTH,
                Destinations::BOTH,
            ],
        }
    }
}

impl LevelPolicy {
    /// Look up the destinations for a level
    pub fn destinations(&self, level: LogLevel) -> Destinations {
        self.table[level.index()]
    }

    /// Return a copy of this policy with one level overridden
    pub fn with(mut self, level: LogLevel, destinations: Destinations) -> Self {
        self.set(level, destinations);
        self
    }

    /// Override the destinations for one level in place
    pub fn set(&mut self, level: LogLevel, destinations: Destinations) {
        self.table[level.index()] = destinations;
    }
}
