//! # Photo Organizer
//!
//! Organizes a flat directory of photos by their metadata: groups files
//! into folders, detects byte-identical duplicates, renames by pattern,
//! and summarizes storage usage.
//!
//! ## Core Guarantees
//! - **Never overwrite** - destination collisions are resolved with
//!   deterministic numeric suffixes, and a move fails rather than
//!   replacing an existing file
//! - **Never abort a batch** - every failure is per-file; the remaining
//!   files are always attempted
//! - **Stable grouping** - duplicate sets and their members follow input
//!   order, and the first-seen copy is always the one retained
//!
//! ## Architecture
//! The library is split into an engine and presentation layers:
//! - `core` - scanning, fingerprinting, grouping, placement, reporting
//! - `events` - progress reporting for UI layers
//! - `error` - error types
//! - `cli` - command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
