//! # Events Module
//!
//! Progress events emitted by the engine while it scans, fingerprints, and
//! places files. The CLI subscribes through an [`EventReceiver`] to drive
//! its progress bar; library callers that don't care pass [`null_sender`].
//!
//! Events are delivered over a crossbeam channel so a UI can consume them
//! from its own thread while the engine stays single-threaded.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while processing a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory scanning phase
    Scan(ScanEvent),
    /// Content fingerprinting phase
    Fingerprint(FingerprintEvent),
    /// File placement phase
    Place(PlaceEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    Started { directory: PathBuf },
    FileFound { path: PathBuf },
    /// An entry could not be read; scanning continues
    Error { path: PathBuf, message: String },
    Completed { total_files: usize },
}

/// Events during the fingerprinting phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FingerprintEvent {
    Started { total_files: usize },
    Progress { completed: usize, total: usize, current: PathBuf },
    /// A file could not be fingerprinted; it is excluded from grouping
    Error { path: PathBuf, message: String },
    Completed { fingerprinted: usize, failed: usize },
}

/// Events during the placement phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaceEvent {
    Started { total_files: usize },
    Placed { from: PathBuf, to: PathBuf },
    Skipped { path: PathBuf },
    /// The file could not be moved; the batch continues
    Failed { path: PathBuf, message: String },
    Completed { placed: usize, skipped: usize, failed: usize },
}

/// Sends events from the engine.
///
/// A thin wrapper around crossbeam's `Sender` that can be cloned and
/// handed to each processing phase. If the receiver is dropped, events
/// are silently discarded so progress reporting stays optional.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events for a UI layer
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once all senders are gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Iterate over events until all senders are dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Create a connected sender/receiver pair
pub fn channel() -> (EventSender, EventReceiver) {
    let (sender, receiver) = unbounded();
    (EventSender { inner: sender }, EventReceiver { inner: receiver })
}

/// A no-op sender for tests and headless callers
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = channel();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn events_cross_threads() {
        let (sender, receiver) = channel();

        let handle = thread::spawn(move || {
            sender.send(Event::Scan(ScanEvent::Completed { total_files: 7 }));
        });
        handle.join().unwrap();

        match receiver.recv().unwrap() {
            Event::Scan(ScanEvent::Completed { total_files }) => {
                assert_eq!(total_files, 7);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Place(PlaceEvent::Started { total_files: 0 }));
    }

    #[test]
    fn events_are_serializable() {
        let event = Event::Place(PlaceEvent::Failed {
            path: PathBuf::from("/photos/a.jpg"),
            message: "disk full".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        match back {
            Event::Place(PlaceEvent::Failed { message, .. }) => {
                assert_eq!(message, "disk full");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
