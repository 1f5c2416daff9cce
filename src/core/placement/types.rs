//! Types for the placement engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal state of one file in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceStatus {
    /// The file was moved to its resolved destination
    Placed,
    /// The file was already at its destination; nothing to do
    Skipped,
    /// Fingerprinting, resolution, or the move itself failed
    Failed,
}

/// Per-file outcome of a placement batch.
///
/// `path` is the file's path at the start of the run; `new_path` is set
/// only for `Placed`. There is never an aggregate pass/fail - callers get
/// one of these per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub new_path: Option<PathBuf>,
    pub status: PlaceStatus,
    pub reason: Option<String>,
}

impl FileOutcome {
    pub fn placed(path: PathBuf, new_path: PathBuf) -> Self {
        Self {
            path,
            new_path: Some(new_path),
            status: PlaceStatus::Placed,
            reason: None,
        }
    }

    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            new_path: None,
            status: PlaceStatus::Skipped,
            reason: Some(reason.into()),
        }
    }

    pub fn failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            new_path: None,
            status: PlaceStatus::Failed,
            reason: Some(reason.into()),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.status == PlaceStatus::Placed
    }
}

/// Counts over a batch's outcomes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlacementSummary {
    pub placed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PlacementSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status {
                PlaceStatus::Placed => summary.placed += 1,
                PlaceStatus::Skipped => summary.skipped += 1,
                PlaceStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

impl std::fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceStatus::Placed => write!(f, "placed"),
            PlaceStatus::Skipped => write!(f, "skipped"),
            PlaceStatus::Failed => write!(f, "failed"),
        }
    }
}
