//! Partitions fingerprinted records into duplicate sets.

use super::DuplicateSet;
use crate::core::fingerprint::Fingerprint;
use crate::core::scanner::FileRecord;
use std::collections::HashMap;

/// Groups records by exact content fingerprint
pub struct FingerprintGrouper;

impl FingerprintGrouper {
    pub fn new() -> Self {
        Self
    }

    /// Partition the batch into duplicate sets.
    ///
    /// Input records must already carry fingerprints; records whose
    /// fingerprint pass failed are expected to have been excluded by the
    /// caller and are ignored here.
    ///
    /// Output order is deterministic: sets appear in the order their
    /// fingerprint was first encountered in the input, and members keep
    /// input order. Only the internal lookup uses a hash map; the emitted
    /// sequence never depends on its iteration order.
    pub fn group(&self, records: &[FileRecord]) -> Vec<DuplicateSet> {
        let mut by_fingerprint: HashMap<Fingerprint, usize> = HashMap::new();
        let mut ordered: Vec<(Fingerprint, Vec<usize>)> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let Some(fingerprint) = record.fingerprint else {
                continue;
            };

            match by_fingerprint.get(&fingerprint) {
                Some(&slot) => ordered[slot].1.push(index),
                None => {
                    by_fingerprint.insert(fingerprint, ordered.len());
                    ordered.push((fingerprint, vec![index]));
                }
            }
        }

        ordered
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(fingerprint, members)| DuplicateSet {
                fingerprint,
                members,
            })
            .collect()
    }
}

impl Default for FingerprintGrouper {
    fn default() -> Self {
        Self::new()
    }
}
