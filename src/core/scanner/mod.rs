//! # Scanner Module
//!
//! Discovers image files in the target directory and builds the per-file
//! records the rest of the engine consumes.
//!
//! The scan is deliberately flat: only the top level of the directory is
//! examined, because organizing moves files *into* subdirectories and a
//! recursive scan would pick its own output back up on the next run.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::DirectoryScanner;

use crate::core::fingerprint::Fingerprint;
use crate::error::ScanError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-file record flowing through grouping and placement.
///
/// `path` is updated in place after a successful move so that a later
/// operation in the same run sees the file where it now lives. The
/// optional attributes stay `None` when absent; the resolver reports a
/// missing attribute instead of ever seeing a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Current path of the file (updated on successful move)
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Date the photo was taken, if EXIF provided one
    pub capture_date: Option<NaiveDate>,
    /// Camera model, if EXIF provided one
    pub camera_model: Option<String>,
    /// Content fingerprint, computed once by the fingerprint pass
    pub fingerprint: Option<Fingerprint>,
}

impl FileRecord {
    /// Create a record with no metadata attached
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            capture_date: None,
            camera_model: None,
            fingerprint: None,
        }
    }

    /// The file name component of the current path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The extension of the current path, including the leading dot
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// Result of a directory scan
#[derive(Debug)]
pub struct ScanResult {
    /// Records for every image found, in directory iteration order
    pub records: Vec<FileRecord>,
    /// Per-entry errors (unreadable metadata etc.), non-fatal
    pub errors: Vec<ScanError>,
}
