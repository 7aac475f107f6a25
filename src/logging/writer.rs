//! Daily-rotating log file writer
//!
//! [`LogWriter`] appends formatted lines to `<directory>/yyyy-MM-dd.log`,
//! echoes selected levels to a console sink, and prunes old daily files.
//! One mutex guards the directory and the open file; every public operation
//! takes it exactly once.
//!
//! Each operation comes in two flavors. The plain one never fails and reports
//! problems as `tracing` diagnostics, so logging cannot take the host process
//! down. The `try_*` one returns the same problems as [`LogError`].

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::config::LoggerConfig;

use super::clock::{Clock, LocalClock};
use super::console::{ConsoleSink, StderrConsole};
use super::error::LogError;
use super::level::{LevelPolicy, LogLevel};
use super::record::{log_file_path, LogRecord};
use super::retention::{prune_dir, PruneReport, PruneScope};

/// Directory used when none is configured, and when the requested one
/// cannot be created
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// How a directory request was satisfied
#[derive(Debug)]
pub enum DirectoryResolution {
    /// The requested directory exists and is now in use
    Requested(PathBuf),
    /// The requested directory could not be created or written; the fallback is in use
    Fallback {
        requested: PathBuf,
        effective: PathBuf,
        reason: std::io::Error,
    },
}

impl DirectoryResolution {
    /// The directory log files now go to
    pub fn effective(&self) -> &Path {
        match self {
            DirectoryResolution::Requested(path) => path,
            DirectoryResolution::Fallback { effective, .. } => effective,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DirectoryResolution::Fallback { .. })
    }
}

/// Which destinations a write actually reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub file: bool,
    pub console: bool,
}

/// The currently open daily file
struct OpenLogFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OpenLogFile {
    fn open(path: PathBuf) -> Result<Self, LogError> {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Ok(Self {
                path,
                writer: BufWriter::new(file),
            }),
            Err(source) => Err(LogError::FileOpen { path, source }),
        }
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

/// State guarded by the writer's mutex
struct WriterState {
    directory: PathBuf,
    current: Option<OpenLogFile>,
}

impl WriterState {
    /// Append a line to the file for `date`, switching files if needed
    fn append(&mut self, date: NaiveDate, line: &str) -> Result<(), LogError> {
        let path = log_file_path(&self.directory, date);

        if self.current.as_ref().is_some_and(|f| f.path != path) {
            if let Err(e) = self.close() {
                tracing::warn!("{}", e);
            }
        }

        let mut file = match self.current.take() {
            Some(file) => file,
            None => OpenLogFile::open(path)?,
        };

        // On failure the handle is dropped so the next write reopens it
        file.write_line(line).map_err(|source| LogError::FileWrite {
            path: file.path.clone(),
            source,
        })?;

        self.current = Some(file);
        Ok(())
    }

    /// Flush and release the open file, if any
    fn close(&mut self) -> Result<(), LogError> {
        match self.current.take() {
            Some(mut file) => file
                .writer
                .flush()
                .map_err(|source| LogError::FileWrite {
                    path: file.path.clone(),
                    source,
                }),
            None => Ok(()),
        }
    }

    /// Switch to `directory`, releasing the open file if it changes
    fn switch_directory(&mut self, directory: PathBuf) {
        if directory == self.directory {
            return;
        }
        if let Err(e) = self.close() {
            tracing::warn!("{}", e);
        }
        self.directory = directory;
    }
}

/// Scratch file created and removed to prove a directory accepts writes
const WRITE_CHECK_FILE: &str = ".daylog-write-check";

/// Create `dir` if needed and check that files can be created in it
fn ensure_writable_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let check = dir.join(WRITE_CHECK_FILE);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&check)?;
    fs::remove_file(&check)
}

/// Use `requested`, or `fallback` if it cannot be created or written
fn resolve_directory(requested: &Path, fallback: &Path) -> Result<DirectoryResolution, LogError> {
    let reason = match ensure_writable_dir(requested) {
        Ok(()) => return Ok(DirectoryResolution::Requested(requested.to_path_buf())),
        Err(e) => e,
    };

    ensure_writable_dir(fallback).map_err(|source| LogError::DirectoryCreation {
        path: fallback.to_path_buf(),
        source,
    })?;

    Ok(DirectoryResolution::Fallback {
        requested: requested.to_path_buf(),
        effective: fallback.to_path_buf(),
        reason,
    })
}

/// Leveled, daily-rotating file logger
///
/// Construct one in the composition root and share it by `Arc`.
pub struct LogWriter {
    state: Mutex<WriterState>,
    fallback_directory: PathBuf,
    policy: LevelPolicy,
    prune_scope: PruneScope,
    clock: Arc<dyn Clock>,
    console: Arc<dyn ConsoleSink>,
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter {
    /// Create a writer logging to `./logs` with the default level policy
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LogWriterBuilder {
        LogWriterBuilder::default()
    }

    /// Create a writer from loaded configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::builder()
            .directory(&config.directory)
            .fallback_directory(&config.fallback_directory)
            .policy(config.level_policy())
            .prune_scope(config.prune_scope)
            .build()
    }

    fn lock(&self) -> MutexGuard<'_, WriterState> {
        // A panic elsewhere must not disable logging
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The effective log directory
    pub fn directory(&self) -> PathBuf {
        self.lock().directory.clone()
    }

    /// Path of the currently open daily file, if any
    pub fn current_file_path(&self) -> Option<PathBuf> {
        self.lock().current.as_ref().map(|f| f.path.clone())
    }

    pub fn level_policy(&self) -> LevelPolicy {
        self.policy
    }

    pub fn prune_scope(&self) -> PruneScope {
        self.prune_scope
    }

    /// Set the log directory, creating it if needed
    ///
    /// Falls back to the fallback directory when the requested one cannot be
    /// created. Problems are reported as diagnostics only.
    pub fn set_directory(&self, path: impl AsRef<Path>) {
        match self.try_set_directory(path) {
            Ok(DirectoryResolution::Requested(_)) => {}
            Ok(DirectoryResolution::Fallback {
                requested,
                effective,
                reason,
            }) => {
                tracing::warn!(
                    "Failed to create log directory {}: {}; using {}",
                    requested.display(),
                    reason,
                    effective.display()
                );
            }
            Err(e) => {
                tracing::warn!("{}; file logging is disabled", e);
            }
        }
    }

    /// Set the log directory, reporting how the request was satisfied
    ///
    /// Returns an error only if the fallback directory could not be created
    /// either. The fallback path is still recorded in that case, so file
    /// writes fail fast while console echo keeps working.
    pub fn try_set_directory(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<DirectoryResolution, LogError> {
        let mut state = self.lock();
        let result = resolve_directory(path.as_ref(), &self.fallback_directory);
        let effective = match &result {
            Ok(resolution) => resolution.effective().to_path_buf(),
            Err(_) => self.fallback_directory.clone(),
        };
        state.switch_directory(effective);
        result
    }

    /// Delete old daily files, keeping the newest `retain_days`
    ///
    /// Future-dated files are always deleted first.
    pub fn prune_old_files(&self, retain_days: usize) {
        match self.try_prune_old_files(retain_days) {
            Ok(report) => {
                if report.removed_count() > 0 {
                    tracing::info!("Pruned {} old log files", report.removed_count());
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    /// Delete old daily files and report what was removed
    pub fn try_prune_old_files(&self, retain_days: usize) -> Result<PruneReport, LogError> {
        let mut state = self.lock();
        let today = self.clock.now().date();
        let report = prune_dir(&state.directory, self.prune_scope, today, retain_days)?;

        // The open file may have just been unlinked
        if state
            .current
            .as_ref()
            .is_some_and(|f| report.removed(&f.path))
        {
            state.current = None;
        }

        Ok(report)
    }

    /// Write one record, routed by the level policy
    pub fn write_log(&self, label: Option<&str>, message: &str, level: LogLevel) {
        if let Err(e) = self.try_write_log(label, message, level) {
            tracing::warn!("{}", e);
        }
    }

    /// Write one record, reporting which destinations it reached
    ///
    /// The console echo happens even when the file write fails.
    pub fn try_write_log(
        &self,
        label: Option<&str>,
        message: &str,
        level: LogLevel,
    ) -> Result<WriteOutcome, LogError> {
        let destinations = self.policy.destinations(level);

        // Read the clock under the lock so concurrent writers agree on the day
        let mut state = destinations.file.then(|| self.lock());
        let now = self.clock.now();
        let line = LogRecord::new(now, level, label, message).format_line();

        let file_result = match state.as_mut() {
            Some(state) => state.append(now.date(), &line).map(|()| true),
            None => Ok(false),
        };
        drop(state);

        if destinations.console {
            self.console.echo(&line);
        }

        file_result.map(|file| WriteOutcome {
            file,
            console: destinations.console,
        })
    }

    /// Write one record whose level is given by name
    ///
    /// Unknown level names discard the record entirely.
    pub fn write_log_named(&self, label: Option<&str>, message: &str, level_name: &str) {
        if let Err(e) = self.try_write_log_named(label, message, level_name) {
            tracing::warn!("{}", e);
        }
    }

    pub fn try_write_log_named(
        &self,
        label: Option<&str>,
        message: &str,
        level_name: &str,
    ) -> Result<WriteOutcome, LogError> {
        let level = level_name.parse::<LogLevel>()?;
        self.try_write_log(label, message, level)
    }

    /// Flush and release the open log file
    ///
    /// Does nothing if no file is open. The next write reopens the file.
    pub fn close_logs_file(&self) {
        if let Err(e) = self.try_close_logs_file() {
            tracing::warn!("{}", e);
        }
    }

    pub fn try_close_logs_file(&self) -> Result<(), LogError> {
        self.lock().close()
    }
}

/// Builder for [`LogWriter`]
pub struct LogWriterBuilder {
    directory: PathBuf,
    fallback_directory: PathBuf,
    policy: LevelPolicy,
    prune_scope: PruneScope,
    clock: Arc<dyn Clock>,
    console: Arc<dyn ConsoleSink>,
}

impl Default for LogWriterBuilder {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            fallback_directory: PathBuf::from(DEFAULT_LOG_DIR),
            policy: LevelPolicy::default(),
            prune_scope: PruneScope::default(),
            clock: Arc::new(LocalClock),
            console: Arc::new(StderrConsole),
        }
    }
}

impl LogWriterBuilder {
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn fallback_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.fallback_directory = directory.into();
        self
    }

    pub fn policy(mut self, policy: LevelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn prune_scope(mut self, scope: PruneScope) -> Self {
        self.prune_scope = scope;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = console;
        self
    }

    /// Build the writer and create its directory (best effort)
    pub fn build(self) -> LogWriter {
        let directory = self.directory;
        let writer = LogWriter {
            state: Mutex::new(WriterState {
                directory: directory.clone(),
                current: None,
            }),
            fallback_directory: self.fallback_directory,
            policy: self.policy,
            prune_scope: self.prune_scope,
            clock: self.clock,
            console: self.console,
        };
        writer.set_directory(directory);
        writer
    }
}
