//! # Duplicates Module
//!
//! Groups file records into sets sharing a content fingerprint.
//!
//! ## Retention policy
//! Within a set, members keep the order they were encountered in the
//! input batch and **the first member is always the one retained**; the
//! rest are candidates for relocation. This is a deliberate policy, not a
//! side effect of container ordering: changing the member order changes
//! which physical file survives a "move duplicates" run.

mod grouper;

pub use grouper::FingerprintGrouper;

use crate::core::fingerprint::Fingerprint;
use crate::core::scanner::FileRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A group of two or more records with identical content.
///
/// Members are indices into the caller's batch, in first-seen order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateSet {
    /// The fingerprint every member shares
    pub fingerprint: Fingerprint,
    /// Indices into the batch, first-seen order; index 0 is retained
    pub members: Vec<usize>,
}

impl DuplicateSet {
    /// The batch index of the record that is kept
    pub fn retained(&self) -> usize {
        self.members[0]
    }

    /// Batch indices of the members that are candidates for relocation
    pub fn removable(&self) -> &[usize] {
        &self.members[1..]
    }

    /// Number of redundant copies in this set
    pub fn duplicate_count(&self) -> usize {
        self.members.len() - 1
    }

    /// Snapshot of member paths, retained file first
    pub fn paths(&self, records: &[FileRecord]) -> Vec<PathBuf> {
        self.members.iter().map(|&i| records[i].path.clone()).collect()
    }

    /// Bytes reclaimable by removing the non-retained members
    pub fn duplicate_size_bytes(&self, records: &[FileRecord]) -> u64 {
        self.removable().iter().map(|&i| records[i].size).sum()
    }
}
