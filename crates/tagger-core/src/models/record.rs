//! The curated annotation record for one image.

use crate::error::{Result, TaggerError};
use crate::models::LabelBox;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dataset partition an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl FromStr for Split {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            other => Err(TaggerError::InvalidSplit(other.to_string())),
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full curated state for one image.
///
/// Box order is meaningful: the frontend addresses boxes by index, so the
/// sequence is written and read back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Only present in the multi-dataset layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    pub filename: String,
    pub split: Split,
    pub width: u32,
    pub height: u32,
    pub annotations: Vec<LabelBox>,
}

impl AnnotationRecord {
    /// Pixel dimensions must both be positive.
    pub fn check_dimensions(&self) -> std::result::Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "image dimensions {}x{} must be positive",
                self.width, self.height
            ));
        }
        Ok(())
    }

    pub fn labeled_count(&self) -> usize {
        self.annotations.iter().filter(|b| b.is_labeled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoxStatus;

    #[test]
    fn test_split_parsing() {
        assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("val".parse::<Split>().unwrap(), Split::Val);
        assert!(matches!(
            "test".parse::<Split>(),
            Err(TaggerError::InvalidSplit(s)) if s == "test"
        ));
        assert!("Train".parse::<Split>().is_err());
    }

    #[test]
    fn test_record_without_dataset_omits_field() {
        let record = AnnotationRecord {
            dataset: None,
            filename: "cow001.jpg".into(),
            split: Split::Train,
            width: 640,
            height: 480,
            annotations: vec![LabelBox::unlabeled([0.5, 0.5, 0.2, 0.3])],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("dataset").is_none());
        assert_eq!(value["split"], "train");
        assert_eq!(value["annotations"][0]["yolo"][2], 0.2);
    }

    #[test]
    fn test_record_parses_frontend_payload() {
        let json = r#"{
            "dataset": "bucket_1_dataset",
            "filename": "cow001.jpg",
            "split": "val",
            "width": 1920,
            "height": 1080,
            "annotations": [
                {"yolo": [0.5, 0.5, 0.2, 0.3], "status": "labeled", "cow_id": "4521"},
                {"yolo": [0.1, 0.1, 0.05, 0.05]}
            ]
        }"#;
        let record: AnnotationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.dataset.as_deref(), Some("bucket_1_dataset"));
        assert_eq!(record.split, Split::Val);
        assert_eq!(record.annotations[0].status, BoxStatus::Labeled);
        assert_eq!(record.annotations[1].status, BoxStatus::Unknown);
        assert_eq!(record.labeled_count(), 1);
    }

    #[test]
    fn test_zero_dimensions_fail_check() {
        let record = AnnotationRecord {
            dataset: None,
            filename: "cow001.jpg".into(),
            split: Split::Train,
            width: 0,
            height: 480,
            annotations: vec![],
        };
        assert!(record.check_dimensions().is_err());
    }
}
