//! # Placement Module
//!
//! The collision-safe file-placement engine: resolves a destination for
//! each record under a policy and realizes the moves on disk.
//!
//! Files are processed one at a time in batch order. Each file's
//! placement is its own unit of work - a failure is recorded in that
//! file's outcome and the batch moves on; there is no rollback across
//! the batch. Per file the lifecycle is Pending -> Resolved -> Placed,
//! or a terminal Failed at either step, plus Skipped for the
//! already-in-place no-op.

mod executor;
mod policy;
mod resolver;
mod types;

pub use executor::PlacementExecutor;
pub use policy::{DesiredName, PlacementPolicy};
pub use resolver::{CollisionState, DestinationResolver, Resolution};
pub use types::{FileOutcome, PlaceStatus, PlacementSummary};

use crate::core::duplicates::DuplicateSet;
use crate::core::scanner::FileRecord;
use crate::events::{Event, EventSender, PlaceEvent};
use std::fs;
use std::path::Path;

/// Name of the directory duplicates are relocated into
pub const DUPLICATES_DIR: &str = "Duplicates";

/// Place every record in the batch under `policy`, rooted at `root`.
///
/// Records are visited in input order sharing one [`CollisionState`],
/// so resolved destinations are pairwise distinct across the whole run.
/// Successful moves update each record's path in place. Returns one
/// outcome per record, in input order.
pub fn place_all(
    records: &mut [FileRecord],
    policy: &PlacementPolicy,
    root: &Path,
    events: &EventSender,
) -> Vec<FileOutcome> {
    let resolver = DestinationResolver::new(root);
    let executor = PlacementExecutor::new();
    let mut state = CollisionState::new();

    events.send(Event::Place(PlaceEvent::Started {
        total_files: records.len(),
    }));

    let mut outcomes = Vec::with_capacity(records.len());
    for record in records.iter_mut() {
        let outcome = place_one(record, policy, &resolver, &executor, &mut state, events);
        outcomes.push(outcome);
    }

    let summary = PlacementSummary::from_outcomes(&outcomes);
    events.send(Event::Place(PlaceEvent::Completed {
        placed: summary.placed,
        skipped: summary.skipped,
        failed: summary.failed,
    }));

    outcomes
}

fn place_one(
    record: &mut FileRecord,
    policy: &PlacementPolicy,
    resolver: &DestinationResolver,
    executor: &PlacementExecutor,
    state: &mut CollisionState,
    events: &EventSender,
) -> FileOutcome {
    let source = record.path.clone();

    let resolution = match resolver.resolve(record, policy, state) {
        Ok(resolution) => resolution,
        Err(error) => {
            tracing::warn!(path = %source.display(), %error, "resolution failed");
            events.send(Event::Place(PlaceEvent::Failed {
                path: source.clone(),
                message: error.to_string(),
            }));
            return FileOutcome::failed(source, error.to_string());
        }
    };

    let destination = match resolution {
        Resolution::AlreadyInPlace => {
            events.send(Event::Place(PlaceEvent::Skipped {
                path: source.clone(),
            }));
            return FileOutcome::skipped(source, "already at destination");
        }
        Resolution::Move(destination) => destination,
    };

    match executor.place(record, &destination) {
        Ok(()) => {
            events.send(Event::Place(PlaceEvent::Placed {
                from: source.clone(),
                to: destination.clone(),
            }));
            FileOutcome::placed(source, destination)
        }
        Err(error) => {
            tracing::warn!(path = %source.display(), %error, "move failed");
            events.send(Event::Place(PlaceEvent::Failed {
                path: source.clone(),
                message: error.to_string(),
            }));
            FileOutcome::failed(source, error.to_string())
        }
    }
}

/// Relocate every non-retained duplicate into `root/Duplicates`.
///
/// The directory is created if absent. Each moved file keeps its
/// original name, falling back to the numeric-suffix collision rule
/// scoped to the `Duplicates` directory. The retained (first-seen)
/// member of each set is never touched. Returns one outcome per
/// relocated candidate, in set order.
pub fn relocate_duplicates(
    records: &mut [FileRecord],
    sets: &[DuplicateSet],
    root: &Path,
    events: &EventSender,
) -> Vec<FileOutcome> {
    let duplicates_dir = root.join(DUPLICATES_DIR);
    let candidates: Vec<usize> = sets.iter().flat_map(|s| s.removable().to_vec()).collect();

    events.send(Event::Place(PlaceEvent::Started {
        total_files: candidates.len(),
    }));

    if let Err(e) = fs::create_dir_all(&duplicates_dir) {
        // Without the target directory nothing can move; report every
        // candidate as failed rather than aborting with a fatal error.
        let reason = format!("cannot create {}: {}", duplicates_dir.display(), e);
        let outcomes: Vec<FileOutcome> = candidates
            .iter()
            .map(|&i| FileOutcome::failed(records[i].path.clone(), reason.clone()))
            .collect();
        events.send(Event::Place(PlaceEvent::Completed {
            placed: 0,
            skipped: 0,
            failed: outcomes.len(),
        }));
        return outcomes;
    }

    let resolver = DestinationResolver::new(root);
    let executor = PlacementExecutor::new();
    let mut state = CollisionState::new();

    let mut outcomes = Vec::with_capacity(candidates.len());
    for index in candidates {
        let record = &mut records[index];
        let source = record.path.clone();

        let destination = match resolver.resolve_keeping_name(&duplicates_dir, record, &mut state)
        {
            Ok(destination) => destination,
            Err(error) => {
                tracing::warn!(path = %source.display(), %error, "resolution failed");
                events.send(Event::Place(PlaceEvent::Failed {
                    path: source.clone(),
                    message: error.to_string(),
                }));
                outcomes.push(FileOutcome::failed(source, error.to_string()));
                continue;
            }
        };

        match executor.place(record, &destination) {
            Ok(()) => {
                events.send(Event::Place(PlaceEvent::Placed {
                    from: source.clone(),
                    to: destination.clone(),
                }));
                outcomes.push(FileOutcome::placed(source, destination));
            }
            Err(error) => {
                tracing::warn!(path = %source.display(), %error, "move failed");
                events.send(Event::Place(PlaceEvent::Failed {
                    path: source.clone(),
                    message: error.to_string(),
                }));
                outcomes.push(FileOutcome::failed(source, error.to_string()));
            }
        }
    }

    let summary = PlacementSummary::from_outcomes(&outcomes);
    events.send(Event::Place(PlaceEvent::Completed {
        placed: summary.placed,
        skipped: summary.skipped,
        failed: summary.failed,
    }));

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::duplicates::FingerprintGrouper;
    use crate::core::fingerprint::ContentFingerprinter;
    use crate::events::null_sender;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(dir: &TempDir, name: &str, content: &[u8], date: Option<(i32, u32, u32)>) -> FileRecord {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        let mut record = FileRecord::new(path, content.len() as u64);
        record.capture_date = date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        record
    }

    #[test]
    fn organize_by_date_moves_into_month_folders() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![
            record(&dir, "a.jpg", b"a", Some((2023, 5, 1))),
            record(&dir, "b.jpg", b"b", Some((2024, 1, 2))),
        ];

        let outcomes = place_all(
            &mut records,
            &PlacementPolicy::ByDate,
            dir.path(),
            &null_sender(),
        );

        assert!(outcomes.iter().all(FileOutcome::is_placed));
        assert!(dir.path().join("2023-05").join("a.jpg").exists());
        assert!(dir.path().join("2024-01").join("b.jpg").exists());
        assert_eq!(records[0].path, dir.path().join("2023-05").join("a.jpg"));
    }

    #[test]
    fn organize_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![record(&dir, "a.jpg", b"a", Some((2023, 5, 1)))];

        let first = place_all(
            &mut records,
            &PlacementPolicy::ByDate,
            dir.path(),
            &null_sender(),
        );
        assert_eq!(PlacementSummary::from_outcomes(&first).placed, 1);

        // Second run over the updated records: everything already sits
        // where the policy wants it.
        let second = place_all(
            &mut records,
            &PlacementPolicy::ByDate,
            dir.path(),
            &null_sender(),
        );
        let summary = PlacementSummary::from_outcomes(&second);
        assert_eq!(summary.placed, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn missing_attribute_fails_one_file_and_continues() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![
            record(&dir, "undated.jpg", b"x", None),
            record(&dir, "dated.jpg", b"y", Some((2023, 5, 1))),
        ];

        let outcomes = place_all(
            &mut records,
            &PlacementPolicy::ByDate,
            dir.path(),
            &null_sender(),
        );

        assert_eq!(outcomes[0].status, PlaceStatus::Failed);
        assert!(outcomes[0].reason.as_deref().unwrap().contains("capture date"));
        assert_eq!(outcomes[1].status, PlaceStatus::Placed);
        // The undated file was not moved
        assert!(dir.path().join("undated.jpg").exists());
    }

    #[test]
    fn rename_batch_yields_distinct_destinations() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![
            record(&dir, "x.jpg", b"1", Some((2023, 5, 1))),
            record(&dir, "y.jpg", b"2", Some((2023, 5, 1))),
            record(&dir, "z.jpg", b"3", Some((2023, 5, 1))),
        ];
        for r in &mut records {
            r.camera_model = Some("NikonD90".to_string());
        }

        let policy = PlacementPolicy::RenamePattern("YYYY-MM-DD_Model".to_string());
        let outcomes = place_all(&mut records, &policy, dir.path(), &null_sender());

        assert!(outcomes.iter().all(FileOutcome::is_placed));
        assert!(dir.path().join("2023-05-01_NikonD90.jpg").exists());
        assert!(dir.path().join("2023-05-01_NikonD90_001.jpg").exists());
        assert!(dir.path().join("2023-05-01_NikonD90_002.jpg").exists());
    }

    #[test]
    fn relocate_moves_all_but_first_seen() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![
            record(&dir, "a.jpg", b"same", None),
            record(&dir, "b.jpg", b"other", None),
            record(&dir, "c.jpg", b"same", None),
        ];
        ContentFingerprinter::new().fingerprint_records(&mut records, &null_sender());
        let sets = FingerprintGrouper::new().group(&records);

        let outcomes = relocate_duplicates(&mut records, &sets, dir.path(), &null_sender());

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_placed());
        assert!(dir.path().join("a.jpg").exists());
        assert!(dir.path().join("b.jpg").exists());
        assert!(dir.path().join(DUPLICATES_DIR).join("c.jpg").exists());
        assert_eq!(records[2].path, dir.path().join(DUPLICATES_DIR).join("c.jpg"));
    }

    #[test]
    fn relocate_suffixes_same_named_duplicates() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("Duplicates");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.jpg"), b"taken").unwrap();

        let mut records = vec![
            record(&dir, "a.jpg", b"same", None),
            record(&dir, "c.jpg", b"same", None),
        ];
        ContentFingerprinter::new().fingerprint_records(&mut records, &null_sender());
        let sets = FingerprintGrouper::new().group(&records);

        let outcomes = relocate_duplicates(&mut records, &sets, dir.path(), &null_sender());

        assert!(outcomes[0].is_placed());
        assert!(sub.join("c_001.jpg").exists());
    }

    #[test]
    fn relocate_creates_duplicates_dir_even_without_candidates() {
        let dir = TempDir::new().unwrap();
        let mut records = vec![record(&dir, "a.jpg", b"unique", None)];
        ContentFingerprinter::new().fingerprint_records(&mut records, &null_sender());
        let sets = FingerprintGrouper::new().group(&records);

        let outcomes = relocate_duplicates(&mut records, &sets, dir.path(), &null_sender());

        assert!(outcomes.is_empty());
        assert!(dir.path().join(DUPLICATES_DIR).is_dir());
    }
}
