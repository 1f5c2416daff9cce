//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Show extracted metadata
//! photo-org extract ~/Photos
//!
//! # Move photos into YYYY-MM folders
//! photo-org organize ~/Photos --by date
//!
//! # List byte-identical duplicates, or move them aside
//! photo-org duplicates ~/Photos
//! photo-org duplicates ~/Photos --action move
//!
//! # Batch rename from metadata
//! photo-org rename ~/Photos --pattern YYYY-MM-DD_Model
//!
//! # Storage usage and summary report
//! photo-org storage ~/Photos
//! photo-org report ~/Photos --format csv
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::duplicates::{DuplicateSet, FingerprintGrouper};
use photo_organizer::core::fingerprint::ContentFingerprinter;
use photo_organizer::core::placement::{
    self, FileOutcome, PlaceStatus, PlacementPolicy, PlacementSummary,
};
use photo_organizer::core::reporter::{self, CollectionSummary, ReportFormat};
use photo_organizer::core::scanner::{DirectoryScanner, FileRecord};
use photo_organizer::core::storage::StorageAnalyzer;
use photo_organizer::error::{PlaceError, Result};
use photo_organizer::events::{self, Event, EventReceiver, FingerprintEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Organizer - organize, deduplicate, and rename photo folders
#[derive(Parser, Debug)]
#[command(name = "photo-org")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the metadata extracted from each image
    Extract {
        /// Directory containing images
        directory: PathBuf,
    },

    /// Move images into subdirectories by metadata
    Organize {
        /// Directory containing images
        directory: PathBuf,

        /// Grouping criterion
        #[arg(long, value_enum, default_value = "date")]
        by: OrganizeBy,
    },

    /// Detect byte-identical duplicate images
    Duplicates {
        /// Directory containing images
        directory: PathBuf,

        /// What to do with detected duplicates
        #[arg(long, value_enum, default_value = "list")]
        action: DuplicateAction,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Summarize storage usage
    Storage {
        /// Directory containing images
        directory: PathBuf,
    },

    /// Batch rename images from a metadata template
    Rename {
        /// Directory containing images
        directory: PathBuf,

        /// Template with YYYY-MM-DD and Model tokens
        #[arg(long, default_value = "YYYY-MM-DD_Model")]
        pattern: String,
    },

    /// Write a summary report file into the directory
    Report {
        /// Directory containing images
        directory: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormatArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrganizeBy {
    /// Group into YYYY-MM folders by capture date
    Date,
    /// Group into folders by camera model
    Camera,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DuplicateAction {
    /// List duplicate sets
    List,
    /// Move non-first copies into a Duplicates folder
    Move,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (removable paths only)
    Minimal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormatArg {
    Text,
    Csv,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(format: ReportFormatArg) -> Self {
        match format {
            ReportFormatArg::Text => ReportFormat::Text,
            ReportFormatArg::Csv => ReportFormat::Csv,
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    photo_organizer::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { directory } => run_extract(&directory),
        Commands::Organize { directory, by } => {
            let policy = match by {
                OrganizeBy::Date => PlacementPolicy::ByDate,
                OrganizeBy::Camera => PlacementPolicy::ByCamera,
            };
            run_placement(&directory, &policy, &format!("Organize {}", policy))
        }
        Commands::Rename { directory, pattern } => {
            let policy = PlacementPolicy::RenamePattern(pattern);
            run_placement(&directory, &policy, "Rename")
        }
        Commands::Duplicates {
            directory,
            action,
            output,
        } => run_duplicates(&directory, action, output),
        Commands::Storage { directory } => run_storage(&directory),
        Commands::Report { directory, format } => run_report(&directory, format.into()),
    }
}

/// Scan the directory with a progress spinner, warning about unreadable
/// entries.
fn scan(directory: &Path) -> Result<Vec<FileRecord>> {
    let term = Term::stderr();
    let (sender, _receiver) = events::channel();

    let result = DirectoryScanner::new().scan(directory, &sender)?;

    for error in &result.errors {
        term.write_line(&format!("{} {}", style("warning:").yellow().bold(), error))
            .ok();
    }

    Ok(result.records)
}

/// Fingerprint the batch behind a progress bar; unreadable files are
/// reported and excluded from grouping.
fn fingerprint(records: &mut [FileRecord]) -> Vec<FileOutcome> {
    let (sender, receiver) = events::channel();
    let progress_thread = spawn_fingerprint_progress(receiver);

    let failures = ContentFingerprinter::new().fingerprint_records(records, &sender);

    drop(sender);
    progress_thread.join().ok();

    failures
        .into_iter()
        .map(|error| {
            let path = match &error {
                PlaceError::UnreadableFile { path, .. }
                | PlaceError::MissingAttribute { path, .. }
                | PlaceError::PlacementFailed { path, .. } => path.clone(),
            };
            FileOutcome::failed(path, error.to_string())
        })
        .collect()
}

fn spawn_fingerprint_progress(receiver: EventReceiver) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut bar: Option<ProgressBar> = None;
        for event in receiver.iter() {
            match event {
                Event::Fingerprint(FingerprintEvent::Started { total_files }) => {
                    let pb = ProgressBar::new(total_files as u64);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                            .unwrap()
                            .progress_chars("█▓░"),
                    );
                    bar = Some(pb);
                }
                Event::Fingerprint(FingerprintEvent::Progress {
                    completed, current, ..
                }) => {
                    if let Some(ref pb) = bar {
                        pb.set_position(completed as u64);
                        pb.set_message(
                            current
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .into_owned(),
                        );
                    }
                }
                Event::Fingerprint(FingerprintEvent::Completed { .. }) => {
                    if let Some(ref pb) = bar {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    })
}

fn run_extract(directory: &Path) -> Result<()> {
    let term = Term::stdout();
    let records = scan(directory)?;

    for record in &records {
        term.write_line(&format!(
            "{} {}",
            style("File:").bold(),
            display_path(&record.path)
        ))
        .ok();
        term.write_line(&format!("  size: {}", format_bytes(record.size))).ok();
        term.write_line(&format!(
            "  date: {}",
            record
                .capture_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| style("unknown").dim().to_string())
        ))
        .ok();
        term.write_line(&format!(
            "  camera: {}",
            record
                .camera_model
                .clone()
                .unwrap_or_else(|| style("unknown").dim().to_string())
        ))
        .ok();
    }

    let term = Term::stderr();
    term.write_line(&format!(
        "{} {} images",
        style("✓").green().bold(),
        records.len()
    ))
    .ok();

    Ok(())
}

fn run_placement(directory: &Path, policy: &PlacementPolicy, heading: &str) -> Result<()> {
    let mut records = scan(directory)?;
    let outcomes = placement::place_all(&mut records, policy, directory, &events::null_sender());

    print_outcomes(&outcomes, heading);
    Ok(())
}

fn run_duplicates(directory: &Path, action: DuplicateAction, output: OutputFormat) -> Result<()> {
    let mut records = scan(directory)?;
    let fingerprint_failures = fingerprint(&mut records);
    let sets = FingerprintGrouper::new().group(&records);

    match action {
        DuplicateAction::List => match output {
            OutputFormat::Pretty => print_sets_pretty(&records, &sets, &fingerprint_failures),
            OutputFormat::Json => print_sets_json(&records, &sets),
            OutputFormat::Minimal => print_sets_minimal(&records, &sets),
        },
        DuplicateAction::Move => {
            let mut outcomes =
                placement::relocate_duplicates(&mut records, &sets, directory, &events::null_sender());
            let mut all = fingerprint_failures;
            all.append(&mut outcomes);
            print_outcomes(&all, "Move duplicates");
        }
    }

    Ok(())
}

fn run_storage(directory: &Path) -> Result<()> {
    let term = Term::stdout();
    let records = scan(directory)?;
    let report = StorageAnalyzer::new().analyze(&records);

    term.write_line(&format!(
        "{} across {} images",
        style(format_bytes(report.total_bytes)).cyan(),
        style(report.image_count).cyan()
    ))
    .ok();

    if report.recommendations.is_empty() {
        term.write_line("No compression candidates.").ok();
    } else {
        term.write_line(&format!(
            "{}",
            style("Compression recommendations:").bold()
        ))
        .ok();
        for hint in &report.recommendations {
            term.write_line(&format!(
                "  {} ({})",
                display_path(&hint.path),
                format_bytes(hint.size)
            ))
            .ok();
        }
    }

    Ok(())
}

fn run_report(directory: &Path, format: ReportFormat) -> Result<()> {
    let term = Term::stderr();
    let mut records = scan(directory)?;
    fingerprint(&mut records);
    let sets = FingerprintGrouper::new().group(&records);

    let summary = CollectionSummary::new(&records, &sets);
    let path = reporter::write_report(&summary, directory, format)?;

    term.write_line(&format!(
        "{} Report written to {}",
        style("✓").green().bold(),
        display_path(&path)
    ))
    .ok();

    Ok(())
}

fn print_outcomes(outcomes: &[FileOutcome], heading: &str) {
    let term = Term::stdout();
    let summary = PlacementSummary::from_outcomes(outcomes);

    term.write_line(&format!(
        "{} {}: {} placed, {} skipped, {} failed",
        style("✓").green().bold(),
        heading,
        style(summary.placed).green(),
        style(summary.skipped).dim(),
        if summary.failed > 0 {
            style(summary.failed).red()
        } else {
            style(summary.failed).dim()
        }
    ))
    .ok();

    for outcome in outcomes {
        match outcome.status {
            PlaceStatus::Placed => {
                if let Some(ref new_path) = outcome.new_path {
                    term.write_line(&format!(
                        "  {} {} -> {}",
                        style("moved").green(),
                        display_path(&outcome.path),
                        display_path(new_path)
                    ))
                    .ok();
                }
            }
            PlaceStatus::Skipped => {}
            PlaceStatus::Failed => {
                term.write_line(&format!(
                    "  {} {}: {}",
                    style("failed").red().bold(),
                    display_path(&outcome.path),
                    outcome.reason.as_deref().unwrap_or("unknown")
                ))
                .ok();
            }
        }
    }
}

fn print_sets_pretty(
    records: &[FileRecord],
    sets: &[DuplicateSet],
    fingerprint_failures: &[FileOutcome],
) {
    let term = Term::stdout();

    if sets.is_empty() {
        term.write_line(&format!("{} No duplicates found!", style("✓").green()))
            .ok();
    } else {
        term.write_line(&format!("{}", style("Duplicate Sets:").bold().underlined()))
            .ok();
        term.write_line("").ok();

        for (i, set) in sets.iter().enumerate() {
            term.write_line(&format!(
                "  {} ({} copies, {} reclaimable)",
                style(format!("Set {}:", i + 1)).bold(),
                set.members.len(),
                format_bytes(set.duplicate_size_bytes(records))
            ))
            .ok();

            for (position, path) in set.paths(records).iter().enumerate() {
                let marker = if position == 0 {
                    style("★").green().to_string()
                } else {
                    style("○").dim().to_string()
                };
                term.write_line(&format!("    {} {}", marker, display_path(path)))
                    .ok();
            }
            term.write_line("").ok();
        }

        term.write_line(&format!(
            "{}",
            style("The starred (★) file in each set is kept by a move.").dim()
        ))
        .ok();
    }

    for failure in fingerprint_failures {
        term.write_line(&format!(
            "  {} {}: {}",
            style("unreadable").yellow(),
            display_path(&failure.path),
            failure.reason.as_deref().unwrap_or("unknown")
        ))
        .ok();
    }
}

fn print_sets_json(records: &[FileRecord], sets: &[DuplicateSet]) {
    let output = serde_json::json!({
        "duplicate_sets": sets.len(),
        "duplicate_count": sets.iter().map(DuplicateSet::duplicate_count).sum::<usize>(),
        "reclaimable_bytes": sets.iter().map(|s| s.duplicate_size_bytes(records)).sum::<u64>(),
        "sets": sets.iter().map(|s| {
            serde_json::json!({
                "fingerprint": s.fingerprint.to_hex(),
                "paths": s.paths(records),
                "retained": records[s.retained()].path,
            })
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_sets_minimal(records: &[FileRecord], sets: &[DuplicateSet]) {
    for set in sets {
        for &index in set.removable() {
            println!("{}", records[index].path.display());
        }
    }
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
