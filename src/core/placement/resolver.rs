//! Destination resolution with deterministic collision handling.
//!
//! The resolver turns a policy's desired name into a concrete destination
//! path, consulting both the filesystem and the run's [`CollisionState`]
//! so that two source files can never be assigned the same destination
//! within one batch - even when the disk check alone would miss it.

use super::policy::{DesiredName, PlacementPolicy};
use crate::core::scanner::FileRecord;
use crate::error::PlaceError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound on the numeric-suffix search. In practice collisions are
/// bounded by the batch size; hitting this cap reports a per-file failure
/// instead of looping.
const MAX_SUFFIX_ATTEMPTS: u32 = 9_999;

/// Destination paths already claimed during this run.
///
/// Threaded explicitly through every resolution - there is no ambient
/// global - so the resolver stays testable in isolation and the whole
/// batch remains safely sequential.
#[derive(Debug, Default)]
pub struct CollisionState {
    claimed: HashSet<PathBuf>,
}

impl CollisionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, path: &Path) -> bool {
        self.claimed.contains(path)
    }

    /// Record a path as taken for the remainder of the run
    pub fn claim(&mut self, path: PathBuf) {
        self.claimed.insert(path);
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// What the resolver decided for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Move the file to this destination
    Move(PathBuf),
    /// Source and destination coincide; the move is a no-op
    AlreadyInPlace,
}

/// Resolves destination paths under a root directory
pub struct DestinationResolver {
    root: PathBuf,
}

impl DestinationResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the destination for one record under the given policy.
    ///
    /// Organize policies keep the original file name inside the policy's
    /// subdirectory; a file already at its destination resolves to
    /// [`Resolution::AlreadyInPlace`]. The rename policy appends the
    /// original extension to the templated base name and suffixes
    /// `_001`, `_002`, ... on collision. Every resolved path is claimed
    /// in `state` before it is returned.
    pub fn resolve(
        &self,
        record: &FileRecord,
        policy: &PlacementPolicy,
        state: &mut CollisionState,
    ) -> Result<Resolution, PlaceError> {
        match policy.desired_name(record)? {
            DesiredName::Subdirectory(subdir) => {
                let destination = self.root.join(subdir).join(record.file_name());
                if destination == record.path {
                    state.claim(destination);
                    return Ok(Resolution::AlreadyInPlace);
                }
                state.claim(destination.clone());
                Ok(Resolution::Move(destination))
            }
            DesiredName::BaseName(base) => {
                let ext = record.extension();
                // A file already bearing its target name must not be
                // suffixed into churn on a rerun.
                let unsuffixed = self.root.join(format!("{base}{ext}"));
                if unsuffixed == record.path {
                    state.claim(unsuffixed);
                    return Ok(Resolution::AlreadyInPlace);
                }
                let destination = self.free_slot(&self.root, &base, &ext, record, state)?;
                Ok(Resolution::Move(destination))
            }
        }
    }

    /// Resolve a destination in `directory` keeping `file_name`, applying
    /// the same collision rule as renaming. Used when relocating
    /// duplicates into the `Duplicates` directory.
    pub fn resolve_keeping_name(
        &self,
        directory: &Path,
        record: &FileRecord,
        state: &mut CollisionState,
    ) -> Result<PathBuf, PlaceError> {
        let name = record.file_name();
        let path = Path::new(&name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        let ext = record.extension();

        self.free_slot(directory, &stem, &ext, record, state)
    }

    /// Find the first unclaimed, non-existing path `dir/stem{suffix}ext`.
    ///
    /// The unsuffixed candidate is tried first, then `_001`, `_002`, ...
    /// zero-padded to three digits. A candidate is taken if it exists on
    /// disk *or* was already claimed earlier in this run.
    fn free_slot(
        &self,
        directory: &Path,
        stem: &str,
        ext: &str,
        record: &FileRecord,
        state: &mut CollisionState,
    ) -> Result<PathBuf, PlaceError> {
        let unsuffixed = directory.join(format!("{stem}{ext}"));
        if self.is_free(&unsuffixed, state) {
            state.claim(unsuffixed.clone());
            return Ok(unsuffixed);
        }

        for counter in 1..=MAX_SUFFIX_ATTEMPTS {
            let candidate = directory.join(format!("{stem}_{counter:03}{ext}"));
            if self.is_free(&candidate, state) {
                state.claim(candidate.clone());
                return Ok(candidate);
            }
        }

        Err(PlaceError::PlacementFailed {
            path: record.path.clone(),
            reason: format!("no free destination name for '{stem}{ext}' after {MAX_SUFFIX_ATTEMPTS} attempts"),
        })
    }

    fn is_free(&self, candidate: &Path, state: &CollisionState) -> bool {
        !candidate.exists() && !state.is_claimed(candidate)
    }
}
