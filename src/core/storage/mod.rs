//! # Storage Module
//!
//! Aggregates storage usage over a batch and flags compression
//! candidates.

use crate::core::scanner::FileRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Files larger than this are suggested for compression
const COMPRESSION_THRESHOLD: u64 = 1024 * 1024;

/// A file worth compressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionHint {
    pub path: PathBuf,
    pub size: u64,
}

/// Storage usage summary for a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageReport {
    /// Number of images in the batch
    pub image_count: usize,
    /// Total size of all images in bytes
    pub total_bytes: u64,
    /// Files over the compression threshold, in batch order
    pub recommendations: Vec<CompressionHint>,
}

/// Analyzes storage usage of a batch
pub struct StorageAnalyzer;

impl StorageAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[FileRecord]) -> StorageReport {
        let mut total_bytes = 0u64;
        let mut recommendations = Vec::new();

        for record in records {
            total_bytes += record.size;
            if record.size > COMPRESSION_THRESHOLD {
                recommendations.push(CompressionHint {
                    path: record.path.clone(),
                    size: record.size,
                });
            }
        }

        StorageReport {
            image_count: records.len(),
            total_bytes,
            recommendations,
        }
    }
}

impl Default for StorageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord::new(PathBuf::from(format!("/photos/{name}")), size)
    }

    #[test]
    fn totals_are_summed() {
        let records = vec![record("a.jpg", 100), record("b.jpg", 250)];

        let report = StorageAnalyzer::new().analyze(&records);
        assert_eq!(report.image_count, 2);
        assert_eq!(report.total_bytes, 350);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn large_files_are_flagged() {
        let records = vec![
            record("small.jpg", 512 * 1024),
            record("large.jpg", 3 * 1024 * 1024),
        ];

        let report = StorageAnalyzer::new().analyze(&records);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].path.ends_with("large.jpg"));
    }

    #[test]
    fn threshold_is_exclusive() {
        let records = vec![record("exact.jpg", COMPRESSION_THRESHOLD)];

        let report = StorageAnalyzer::new().analyze(&records);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn empty_batch_is_empty_report() {
        let report = StorageAnalyzer::new().analyze(&[]);
        assert_eq!(report.image_count, 0);
        assert_eq!(report.total_bytes, 0);
    }
}
