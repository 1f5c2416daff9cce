//! # photo-org CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! photo-org organize ~/Photos --by date
//! photo-org duplicates ~/Photos --action move
//! photo-org rename ~/Photos --pattern YYYY-MM-DD_Model
//! ```

mod cli;

use photo_organizer::Result;

fn main() -> Result<()> {
    cli::run()
}
