//! Log file retention management
//!
//! Pruning keeps the newest `retain_days` daily files. Files dated after
//! today are removed first, since they cannot be legitimate past logs.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::LogError;
use super::record::parse_log_file_date;

/// Default number of daily files kept by the CLI
pub const DEFAULT_RETAIN_DAYS: usize = 7;

/// Which files in the log directory are candidates for pruning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PruneScope {
    /// Only files named `yyyy-MM-dd.log` with a valid date
    #[default]
    DatedLogs,
    /// Every regular file in the directory, dated or not (legacy behavior)
    AllFiles,
}

/// Outcome of a prune pass
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Files removed because their date is after today
    pub removed_future: Vec<PathBuf>,
    /// Oldest files removed to get down to the retention count
    pub removed_expired: Vec<PathBuf>,
    /// Candidate files left in place, oldest first
    pub retained: Vec<PathBuf>,
    /// Files that should have been removed but could not be
    pub failed: Vec<PathBuf>,
}

impl PruneReport {
    /// Total number of files actually deleted
    pub fn removed_count(&self) -> usize {
        self.removed_future.len() + self.removed_expired.len()
    }

    /// Check whether a path was deleted by this pass
    pub fn removed(&self, path: &Path) -> bool {
        self.removed_future
            .iter()
            .chain(&self.removed_expired)
            .any(|p| p == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    name: OsString,
    path: PathBuf,
    date: Option<NaiveDate>,
}

#[derive(Debug, Default)]
struct PrunePlan {
    future: Vec<Candidate>,
    expired: Vec<Candidate>,
    retained: Vec<Candidate>,
}

/// List prune candidates directly inside `dir`, in name order
fn list_candidates(dir: &Path, scope: PruneScope) -> std::io::Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Symlinks and subdirectories are never touched
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let date = name.to_str().and_then(parse_log_file_date);
        if scope == PruneScope::DatedLogs && date.is_none() {
            continue;
        }

        candidates.push(Candidate {
            path: entry.path(),
            name,
            date,
        });
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}

/// Split sorted candidates into future-dated, expired and retained files
fn plan_prune(candidates: Vec<Candidate>, today: NaiveDate, retain_days: usize) -> PrunePlan {
    let (future, valid): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| c.date.is_some_and(|d| d > today));

    let excess = valid.len().saturating_sub(retain_days);
    let mut expired = valid;
    let retained = expired.split_off(excess);

    PrunePlan {
        future,
        expired,
        retained,
    }
}

/// Remove files from `dir` so that at most `retain_days` remain
pub(crate) fn prune_dir(
    dir: &Path,
    scope: PruneScope,
    today: NaiveDate,
    retain_days: usize,
) -> Result<PruneReport, LogError> {
    let candidates = list_candidates(dir, scope).map_err(|source| LogError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let plan = plan_prune(candidates, today, retain_days);
    let mut report = PruneReport {
        retained: plan.retained.into_iter().map(|c| c.path).collect(),
        ..PruneReport::default()
    };

    for candidate in plan.future {
        tracing::debug!("Removing future-dated log file {}", candidate.path.display());
        if remove(&candidate.path) {
            report.removed_future.push(candidate.path);
        } else {
            report.failed.push(candidate.path);
        }
    }

    for candidate in plan.expired {
        tracing::debug!("Removing expired log file {}", candidate.path.display());
        if remove(&candidate.path) {
            report.removed_expired.push(candidate.path);
        } else {
            report.failed.push(candidate.path);
        }
    }

    Ok(report)
}

fn remove(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to remove log file {}: {}", path.display(), e);
            false
        }
    }
}
