//! Logging system for daylog
//!
//! Provides a leveled logger that appends to one file per calendar day,
//! echoes selected levels to a console, and prunes old daily files.

mod clock;
mod console;
mod diagnostics;
mod error;
mod level;
mod record;
mod retention;
mod writer;

pub use clock::{Clock, LocalClock, ManualClock};
pub use console::{CapturedConsole, ConsoleSink, StderrConsole};
pub use diagnostics::{init_diagnostics, DEFAULT_DIAGNOSTIC_FILTER};
pub use error::LogError;
pub use level::{Destinations, LevelPolicy, LogLevel};
pub use record::{log_file_name, log_file_path, parse_log_file_date, LogRecord};
pub use retention::{PruneReport, PruneScope, DEFAULT_RETAIN_DAYS};
pub use writer::{DirectoryResolution, LogWriter, LogWriterBuilder, WriteOutcome, DEFAULT_LOG_DIR};
