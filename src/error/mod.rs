//! # Error Module
//!
//! Error types for the photo organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file failures stay per-file** - a file that cannot be read,
//!   resolved, or moved is recorded in the batch outcome; the remaining
//!   files are always attempted

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that occur while scanning the target directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file metadata for {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-file errors from the placement engine.
///
/// Every variant is non-fatal to the batch: it is converted into a
/// `Failed` outcome for the offending file and processing continues.
#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("Cannot read file contents of {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} has no {attribute}, required by this policy")]
    MissingAttribute {
        path: PathBuf,
        attribute: &'static str,
    },

    #[error("Failed to place {path}: {reason}")]
    PlacementFailed { path: PathBuf, reason: String },
}

/// Errors that occur while writing a summary report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;
