//! # Reporter Module
//!
//! Writes a summary of a collection - image count, total size, duplicate
//! sets - to a timestamped report file in the scanned directory.

mod export;

pub use export::{export_csv, export_text};

use crate::core::duplicates::DuplicateSet;
use crate::core::scanner::FileRecord;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Csv,
}

impl ReportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
        }
    }
}

/// The data a report is rendered from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub image_count: usize,
    pub total_bytes: u64,
    /// One path list per duplicate set, retained file first
    pub duplicate_sets: Vec<Vec<PathBuf>>,
}

impl CollectionSummary {
    pub fn new(records: &[FileRecord], sets: &[DuplicateSet]) -> Self {
        Self {
            image_count: records.len(),
            total_bytes: records.iter().map(|r| r.size).sum(),
            duplicate_sets: sets.iter().map(|s| s.paths(records)).collect(),
        }
    }

    pub fn total_megabytes(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Write a report file into `directory` and return its path.
///
/// The file is named `report_YYYYMMDD_HHMMSS.<ext>` from the local time.
pub fn write_report(
    summary: &CollectionSummary,
    directory: &Path,
    format: ReportFormat,
) -> Result<PathBuf, ReportError> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = directory.join(format!("report_{}.{}", timestamp, format.extension()));

    let file = File::create(&path).map_err(|source| ReportError::CreateFailed {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ReportFormat::Text => export_text(summary, &mut writer)?,
        ReportFormat::Csv => export_csv(summary, &mut writer)?,
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn summary() -> CollectionSummary {
        CollectionSummary {
            image_count: 3,
            total_bytes: 2 * 1024 * 1024,
            duplicate_sets: vec![vec![
                PathBuf::from("/photos/a.jpg"),
                PathBuf::from("/photos/c.jpg"),
            ]],
        }
    }

    #[test]
    fn report_file_lands_in_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_report(&summary(), dir.path(), ReportFormat::Text).unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total Images: 3"));
    }

    #[test]
    fn csv_report_uses_csv_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_report(&summary(), dir.path(), ReportFormat::Csv).unwrap();
        assert!(path.to_string_lossy().ends_with(".csv"));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let result = write_report(
            &summary(),
            Path::new("/nonexistent/dir"),
            ReportFormat::Text,
        );
        assert!(matches!(result, Err(ReportError::CreateFailed { .. })));
    }

    #[test]
    fn megabytes_conversion() {
        assert!((summary().total_megabytes() - 2.0).abs() < f64::EPSILON);
    }
}
