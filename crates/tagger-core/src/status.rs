//! Labeling progress classification.

use crate::models::{AnnotationRecord, ImageStatus, LabelBox};

/// Derived progress of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: ImageStatus,
    /// Non-empty identities in box order, duplicates kept.
    pub identities: Vec<String>,
}

/// Classify the boxes of an existing curated record.
///
/// An empty box list is `touched`, never `completed`.
pub fn classify(boxes: &[LabelBox]) -> Classification {
    let total = boxes.len();
    let labeled = boxes.iter().filter(|b| b.is_labeled()).count();

    let status = if total > 0 && labeled == total {
        ImageStatus::Completed
    } else if labeled > 0 {
        ImageStatus::InProgress
    } else {
        ImageStatus::Touched
    };

    let identities = boxes
        .iter()
        .filter_map(|b| b.identity().map(String::from))
        .collect();

    Classification { status, identities }
}

/// Classify an image that may not have a curated record yet.
pub fn classify_record(record: Option<&AnnotationRecord>) -> Classification {
    match record {
        Some(record) => classify(&record.annotations),
        None => Classification {
            status: ImageStatus::Untouched,
            identities: Vec::new(),
        },
    }
}
