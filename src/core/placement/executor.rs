//! Executes resolved placements on disk.

use crate::core::scanner::FileRecord;
use crate::error::PlaceError;
use std::fs;
use std::path::Path;

/// Moves a file to its resolved destination.
///
/// The executor never overwrites: if the destination exists at the
/// moment of the move - even though resolution found it free - the
/// operation fails and the source is left untouched. A failure is
/// always scoped to the one file; the batch driver continues.
pub struct PlacementExecutor;

impl PlacementExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Move `record`'s file to `destination`, updating the record's path
    /// on success. The destination's parent directory is created if
    /// missing.
    pub fn place(&self, record: &mut FileRecord, destination: &Path) -> Result<(), PlaceError> {
        let source = record.path.clone();
        let fail = |reason: String| PlaceError::PlacementFailed {
            path: source.clone(),
            reason,
        };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| fail(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        if !source.exists() {
            return Err(fail("source file no longer exists".to_string()));
        }

        // Late collision check: resolution may have raced a concurrent
        // writer, and fs::rename would replace the target silently.
        if destination.exists() {
            return Err(fail(format!(
                "destination {} already exists",
                destination.display()
            )));
        }

        self.move_file(&source, destination).map_err(|e| fail(e.to_string()))?;

        record.path = destination.to_path_buf();
        Ok(())
    }

    /// Same-filesystem rename, with a copy+delete fallback that verifies
    /// the copied size before removing the source.
    fn move_file(&self, source: &Path, destination: &Path) -> std::io::Result<()> {
        fs::rename(source, destination).or_else(|_| {
            let source_size = fs::metadata(source)?.len();
            fs::copy(source, destination)?;

            let dest_size = fs::metadata(destination)?.len();
            if dest_size != source_size {
                // Incomplete copy: keep the source
                let _ = fs::remove_file(destination);
                return Err(std::io::Error::other(format!(
                    "copy verification failed: source {} bytes, destination {} bytes",
                    source_size, dest_size
                )));
            }

            fs::remove_file(source)
        })
    }
}

impl Default for PlacementExecutor {
    fn default() -> Self {
        Self::new()
    }
}
