//! Listing summaries returned to the frontend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image-level labeling progress. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    /// No curated record exists yet.
    Untouched,
    /// A curated record exists but no box is labeled yet.
    Touched,
    InProgress,
    Completed,
}

impl ImageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStatus::Untouched => "untouched",
            ImageStatus::Touched => "touched",
            ImageStatus::InProgress => "in_progress",
            ImageStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-image row in a split listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub filename: String,
    pub status: ImageStatus,
    pub total_boxes: usize,
    pub labeled_ids: Vec<String>,
}

/// Per-dataset row in the dataset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub image_count: usize,
}

/// Acknowledgement of a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Curated record file that was written.
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ImageStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(ImageStatus::Untouched.to_string(), "untouched");
    }
}
