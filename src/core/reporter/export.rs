//! Report rendering for text and CSV output.

use super::CollectionSummary;
use std::io::Write;

/// Render the summary as a human-readable text report
pub fn export_text<W: Write>(summary: &CollectionSummary, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "Image Collection Report")?;
    writeln!(writer, "Total Images: {}", summary.image_count)?;
    writeln!(writer, "Total Size: {:.2} MB", summary.total_megabytes())?;
    writeln!(writer, "Duplicates Found: {}", summary.duplicate_sets.len())?;

    for set in &summary.duplicate_sets {
        let paths: Vec<String> = set.iter().map(|p| p.display().to_string()).collect();
        writeln!(writer, "Duplicate set: {}", paths.join(", "))?;
    }

    Ok(())
}

/// Render the summary as CSV rows
pub fn export_csv<W: Write>(summary: &CollectionSummary, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "Metric,Value")?;
    writeln!(writer, "Total Images,{}", summary.image_count)?;
    writeln!(writer, "Total Size (MB),{:.2}", summary.total_megabytes())?;
    writeln!(writer, "Duplicates Found,{}", summary.duplicate_sets.len())?;

    for (i, set) in summary.duplicate_sets.iter().enumerate() {
        let paths: Vec<String> = set.iter().map(|p| p.display().to_string()).collect();
        writeln!(writer, "Duplicate Set {},\"{}\"", i + 1, paths.join(", "))?;
    }

    Ok(())
}
