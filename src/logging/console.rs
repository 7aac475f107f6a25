//! Console echo sinks
//!
//! Levels whose policy asks for a console echo hand the formatted line to a
//! [`ConsoleSink`]. The default sink is stderr. [`CapturedConsole`] keeps
//! recent lines in memory instead, for embedding and tests.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::RwLock;

/// Destination for echoed log lines
///
/// Echo is best-effort: sinks swallow their own failures.
pub trait ConsoleSink: Send + Sync {
    /// Echo one formatted line (without trailing newline)
    fn echo(&self, line: &str);
}

/// Echo to the process's stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrConsole;

impl ConsoleSink for StderrConsole {
    fn echo(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// Thread-safe ring buffer of echoed lines
#[derive(Debug)]
pub struct CapturedConsole {
    lines: RwLock<VecDeque<String>>,
    max_lines: usize,
}

impl CapturedConsole {
    /// Create a capture that keeps at most `max_lines` recent lines
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: RwLock::new(VecDeque::with_capacity(max_lines.min(1024))),
            max_lines,
        }
    }

    /// Get all captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of captured lines
    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Check if nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all captured lines
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }
}

impl ConsoleSink for CapturedConsole {
    fn echo(&self, line: &str) {
        if self.max_lines == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.write() {
            if lines.len() >= self.max_lines {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
    }
}
