//! Placement policies: how a record's desired destination name is derived.
//!
//! A policy is a pure function of the record's attributes. Organize
//! policies name a subdirectory and keep the original file name; the
//! rename policy produces a new base name from a template.
//!
//! ## Template substitution
//! The rename template replaces the literal tokens `YYYY-MM-DD` and
//! `Model` with the record's capture date and camera model; all other
//! template text passes through unchanged. Substitution is purely
//! textual: an attribute value that itself contains one of the token
//! strings will corrupt the result. This is a known, documented
//! limitation of the template language.

use crate::core::scanner::FileRecord;
use crate::error::PlaceError;
use serde::{Deserialize, Serialize};

/// Date token recognized in rename templates
const DATE_TOKEN: &str = "YYYY-MM-DD";
/// Camera token recognized in rename templates
const MODEL_TOKEN: &str = "Model";

/// How destination paths are derived from a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Group into `YYYY-MM/` subdirectories by capture date
    ByDate,
    /// Group into per-camera-model subdirectories
    ByCamera,
    /// Rename in place using a token template
    RenamePattern(String),
}

/// The policy-dictated part of a destination, before collision handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredName {
    /// Move into this subdirectory, keeping the original file name
    Subdirectory(String),
    /// Rename to this base name (extension appended by the resolver)
    BaseName(String),
}

impl PlacementPolicy {
    /// Compute the desired name for a record.
    ///
    /// Fails with [`PlaceError::MissingAttribute`] when the record lacks
    /// an attribute the policy needs; the caller reports it and moves on
    /// to the next file.
    pub fn desired_name(&self, record: &FileRecord) -> Result<DesiredName, PlaceError> {
        match self {
            PlacementPolicy::ByDate => {
                let date = record.capture_date.ok_or_else(|| missing(record, "capture date"))?;
                Ok(DesiredName::Subdirectory(date.format("%Y-%m").to_string()))
            }
            PlacementPolicy::ByCamera => {
                let camera = record
                    .camera_model
                    .as_deref()
                    .ok_or_else(|| missing(record, "camera model"))?;
                Ok(DesiredName::Subdirectory(camera.to_string()))
            }
            PlacementPolicy::RenamePattern(template) => {
                let mut name = template.clone();
                if template.contains(DATE_TOKEN) {
                    let date = record.capture_date.ok_or_else(|| missing(record, "capture date"))?;
                    name = name.replace(DATE_TOKEN, &date.format("%Y-%m-%d").to_string());
                }
                if template.contains(MODEL_TOKEN) {
                    let camera = record
                        .camera_model
                        .as_deref()
                        .ok_or_else(|| missing(record, "camera model"))?;
                    name = name.replace(MODEL_TOKEN, camera);
                }
                Ok(DesiredName::BaseName(name))
            }
        }
    }
}

fn missing(record: &FileRecord, attribute: &'static str) -> PlaceError {
    PlaceError::MissingAttribute {
        path: record.path.clone(),
        attribute,
    }
}

impl std::fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementPolicy::ByDate => write!(f, "by date"),
            PlacementPolicy::ByCamera => write!(f, "by camera"),
            PlacementPolicy::RenamePattern(template) => write!(f, "rename '{}'", template),
        }
    }
}
