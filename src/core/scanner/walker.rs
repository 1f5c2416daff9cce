//! Flat directory scan building file records.

use super::{FileRecord, ImageFilter, ScanResult};
use crate::core::metadata;
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Scans the top level of a directory for image files
pub struct DirectoryScanner {
    filter: ImageFilter,
}

impl DirectoryScanner {
    pub fn new() -> Self {
        Self {
            filter: ImageFilter::new(),
        }
    }

    pub fn with_filter(filter: ImageFilter) -> Self {
        Self { filter }
    }

    /// Scan `root` and build a record per image file.
    ///
    /// Entries are visited in file-name order so that repeated runs over
    /// the same directory produce the same batch order (first-seen
    /// semantics downstream depend on it). Entries whose metadata cannot
    /// be read are collected as errors and skipped; the scan itself only
    /// fails when the directory is missing or unreadable.
    pub fn scan(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            directory: root.to_path_buf(),
        }));

        let mut records = Vec::new();
        let mut errors = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk error"));
                    errors.push(ScanError::ReadDirectory {
                        path: path.clone(),
                        source,
                    });
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: "failed to read directory entry".to_string(),
                    }));
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.filter.should_include(path) {
                continue;
            }

            let size = match fs::metadata(path) {
                Ok(meta) => meta.len(),
                Err(source) => {
                    let error = ScanError::ReadEntry {
                        path: path.to_path_buf(),
                        source,
                    };
                    events.send(Event::Scan(ScanEvent::Error {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    }));
                    errors.push(error);
                    continue;
                }
            };

            let extracted = metadata::extract_metadata(path);
            let mut record = FileRecord::new(path.to_path_buf(), size);
            record.capture_date = extracted.capture_date;
            record.camera_model = extracted.camera_model;

            events.send(Event::Scan(ScanEvent::FileFound {
                path: record.path.clone(),
            }));
            records.push(record);
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: records.len(),
        }));

        Ok(ScanResult { records, errors })
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_image(dir: &TempDir, name: &str) {
        let mut file = File::create(dir.path().join(name)).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    }

    #[test]
    fn scan_empty_directory_returns_no_records() {
        let dir = TempDir::new().unwrap();
        let result = DirectoryScanner::new()
            .scan(dir.path(), &null_sender())
            .unwrap();

        assert!(result.records.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_finds_images_with_sizes() {
        let dir = TempDir::new().unwrap();
        create_image(&dir, "photo.jpg");

        let result = DirectoryScanner::new()
            .scan(dir.path(), &null_sender())
            .unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].size, 4);
        assert!(result.records[0].path.ends_with("photo.jpg"));
    }

    #[test]
    fn scan_is_flat() {
        let dir = TempDir::new().unwrap();
        create_image(&dir, "top.jpg");

        let sub = dir.path().join("2023-05");
        fs::create_dir(&sub).unwrap();
        let mut nested = File::create(sub.join("nested.jpg")).unwrap();
        nested.write_all(&[0xFF, 0xD8]).unwrap();

        let result = DirectoryScanner::new()
            .scan(dir.path(), &null_sender())
            .unwrap();

        assert_eq!(result.records.len(), 1);
        assert!(result.records[0].path.ends_with("top.jpg"));
    }

    #[test]
    fn scan_order_is_by_file_name() {
        let dir = TempDir::new().unwrap();
        create_image(&dir, "b.jpg");
        create_image(&dir, "a.jpg");
        create_image(&dir, "c.jpg");

        let result = DirectoryScanner::new()
            .scan(dir.path(), &null_sender())
            .unwrap();

        let names: Vec<String> = result.records.iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn scan_excludes_unsupported_files() {
        let dir = TempDir::new().unwrap();
        create_image(&dir, "photo.jpg");
        File::create(dir.path().join("notes.txt")).unwrap();

        let result = DirectoryScanner::new()
            .scan(dir.path(), &null_sender())
            .unwrap();

        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn scan_missing_directory_is_an_error() {
        let result = DirectoryScanner::new().scan(Path::new("/nonexistent/dir"), &null_sender());
        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
