//! # Metadata Module
//!
//! Extracts the attributes the placement policies need from a photo's EXIF
//! data: capture date and camera model.
//!
//! A file without EXIF (or without the relevant tags) yields `None` for the
//! missing fields. The fields are never defaulted to empty strings - the
//! resolver must be able to distinguish "absent" from "present but empty"
//! to report a missing attribute per file.

use chrono::NaiveDate;
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Attributes extracted from a photo file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Date the photo was taken (EXIF DateTimeOriginal, then DateTime)
    pub capture_date: Option<NaiveDate>,
    /// Camera model (EXIF Model)
    pub camera_model: Option<String>,
}

impl CaptureMetadata {
    /// Check if any attribute was extracted
    pub fn has_data(&self) -> bool {
        self.capture_date.is_some() || self.camera_model.is_some()
    }
}

/// Extract capture metadata from a photo file.
///
/// Extraction failures are not errors: a file that cannot be opened or has
/// no EXIF container simply has no metadata.
pub fn extract_metadata(path: &Path) -> CaptureMetadata {
    let mut metadata = CaptureMetadata::default();

    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return metadata,
    };

    let mut bufreader = BufReader::new(&file);
    let exif_reader = match Reader::new().read_from_container(&mut bufreader) {
        Ok(r) => r,
        Err(_) => return metadata,
    };

    // DateTimeOriginal is when the photo was taken; DateTime is a fallback
    for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
        if metadata.capture_date.is_some() {
            break;
        }
        if let Some(field) = exif_reader.get_field(tag, In::PRIMARY) {
            metadata.capture_date = get_string_value(&field.value)
                .as_deref()
                .and_then(parse_exif_date);
        }
    }

    if let Some(field) = exif_reader.get_field(Tag::Model, In::PRIMARY) {
        metadata.camera_model = get_string_value(&field.value);
    }

    metadata
}

/// Parse the date part of an EXIF datetime ("YYYY:MM:DD HH:MM:SS")
fn parse_exif_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split_whitespace().next()?;
    let normalized = date_part.replace(':', "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}

/// Extract a trimmed string from an EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
