//! Call-site labels and leveled logging macros

/// Label for the current source position, e.g. `src/main.rs::daylog.42`
#[macro_export]
macro_rules! call_site {
    () => {
        concat!(file!(), "::", module_path!(), ".", line!())
    };
}

/// Write a DEBUG record labelled with the call site
///
/// ```no_run
/// let logger = daylog::logging::LogWriter::new();
/// daylog::log_debug!(logger, "loaded {} items", 3);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($writer:expr, $($arg:tt)+) => {
        $writer.write_log(
            Some($crate::call_site!()),
            &format!($($arg)+),
            $crate::logging::LogLevel::Debug,
        )
    };
}

/// Write an INFO record labelled with the call site
#[macro_export]
macro_rules! log_info {
    ($writer:expr, $($arg:tt)+) => {
        $writer.write_log(
            Some($crate::call_site!()),
            &format!($($arg)+),
            $crate::logging::LogLevel::Info,
        )
    };
}

/// Write a WARN record labelled with the call site
#[macro_export]
macro_rules! log_warn {
    ($writer:expr, $($arg:tt)+) => {
        $writer.write_log(
            Some($crate::call_site!()),
            &format!($($arg)+),
            $crate::logging::LogLevel::Warn,
        )
    };
}

/// Write an ERROR record labelled with the call site
#[macro_export]
macro_rules! log_error {
    ($writer:expr, $($arg:tt)+) => {
        $writer.write_log(
            Some($crate::call_site!()),
            &format!($($arg)+),
            $crate::logging::LogLevel::Error,
        )
    };
}
