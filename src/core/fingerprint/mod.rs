//! # Fingerprint Module
//!
//! Content-identity fingerprints for exact duplicate detection.
//!
//! The fingerprint is the 128-bit XXH3 digest of a file's full byte
//! content, streamed in fixed-size chunks. Two files with identical bytes
//! always produce identical fingerprints; XXH3-128 is not cryptographic,
//! but its collision probability is negligible for grouping a photo
//! library.

use crate::core::scanner::FileRecord;
use crate::error::PlaceError;
use crate::events::{Event, EventSender, FingerprintEvent};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Read buffer size for streaming file content
const CHUNK_SIZE: usize = 64 * 1024;

/// A 128-bit content fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Get the fingerprint as a hexadecimal string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the raw fingerprint bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Computes content fingerprints for files
pub struct ContentFingerprinter;

impl ContentFingerprinter {
    pub fn new() -> Self {
        Self
    }

    /// Fingerprint a single file by streaming its full content.
    ///
    /// Fails with [`PlaceError::UnreadableFile`] when the file cannot be
    /// opened or read; the caller reports the failure and excludes the
    /// file from grouping.
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, PlaceError> {
        let unreadable = |source| PlaceError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(unreadable)?;
        let mut hasher = Xxh3::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let read = file.read(&mut buffer).map_err(unreadable)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(Fingerprint(hasher.digest128().to_be_bytes()))
    }

    /// Fingerprint every record in the batch, in input order.
    ///
    /// Each record's fingerprint is computed once and stored on the record.
    /// Unreadable files are returned as per-file errors and left without a
    /// fingerprint; the rest of the batch is always attempted.
    pub fn fingerprint_records(
        &self,
        records: &mut [FileRecord],
        events: &EventSender,
    ) -> Vec<PlaceError> {
        let total = records.len();
        events.send(Event::Fingerprint(FingerprintEvent::Started {
            total_files: total,
        }));

        let mut failures = Vec::new();
        for (i, record) in records.iter_mut().enumerate() {
            events.send(Event::Fingerprint(FingerprintEvent::Progress {
                completed: i,
                total,
                current: record.path.clone(),
            }));

            match self.fingerprint_file(&record.path) {
                Ok(fingerprint) => record.fingerprint = Some(fingerprint),
                Err(error) => {
                    tracing::warn!(path = %record.path.display(), %error, "fingerprint failed");
                    events.send(Event::Fingerprint(FingerprintEvent::Error {
                        path: record.path.clone(),
                        message: error.to_string(),
                    }));
                    failures.push(error);
                }
            }
        }

        events.send(Event::Fingerprint(FingerprintEvent::Completed {
            fingerprinted: total - failures.len(),
            failed: failures.len(),
        }));

        failures
    }
}

impl Default for ContentFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn identical_content_identical_fingerprint() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.jpg", b"hello");
        let b = write_file(&dir, "b.jpg", b"hello");

        let fp = ContentFingerprinter::new();
        assert_eq!(
            fp.fingerprint_file(&a).unwrap(),
            fp.fingerprint_file(&b).unwrap()
        );
    }

    #[test]
    fn distinct_content_distinct_fingerprint() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.jpg", b"hello");
        let b = write_file(&dir, "b.jpg", b"world");

        let fp = ContentFingerprinter::new();
        assert_ne!(
            fp.fingerprint_file(&a).unwrap(),
            fp.fingerprint_file(&b).unwrap()
        );
    }

    #[test]
    fn fingerprint_is_stable_across_reads() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.jpg", &[0xABu8; 200_000]);

        let fp = ContentFingerprinter::new();
        assert_eq!(
            fp.fingerprint_file(&a).unwrap(),
            fp.fingerprint_file(&a).unwrap()
        );
    }

    #[test]
    fn unreadable_file_is_reported() {
        let fp = ContentFingerprinter::new();
        let result = fp.fingerprint_file(Path::new("/nonexistent/file.jpg"));

        match result {
            Err(PlaceError::UnreadableFile { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/file.jpg"));
            }
            other => panic!("expected UnreadableFile, got {:?}", other.map(|f| f.to_hex())),
        }
    }

    #[test]
    fn batch_pass_skips_unreadable_and_continues() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.jpg", b"hello");

        let mut records = vec![
            FileRecord::new(a, 5),
            FileRecord::new(dir.path().join("missing.jpg"), 0),
        ];

        let failures =
            ContentFingerprinter::new().fingerprint_records(&mut records, &null_sender());

        assert_eq!(failures.len(), 1);
        assert!(records[0].fingerprint.is_some());
        assert!(records[1].fingerprint.is_none());
    }

    #[test]
    fn hex_is_32_chars() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.jpg", b"hello");

        let fingerprint = ContentFingerprinter::new().fingerprint_file(&a).unwrap();
        assert_eq!(fingerprint.to_hex().len(), 32);
    }
}
