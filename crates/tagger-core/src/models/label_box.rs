//! A single normalized bounding box and its labeling state.

use crate::config::IdentityConfig;
use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};

/// Labeling state of a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxStatus {
    /// Fresh from the detector, no identity assigned yet.
    #[default]
    Unknown,
    Labeled,
}

/// One detected or labeled region.
///
/// `yolo` holds center-x, center-y, width and height, all relative to the
/// image size. A record written without a `status` field loads as
/// [`BoxStatus::Unknown`]; a missing `cow_id` loads as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub yolo: [f64; 4],
    #[serde(default)]
    pub status: BoxStatus,
    #[serde(default)]
    pub cow_id: Option<String>,
}

impl LabelBox {
    /// A box straight from a machine label line.
    pub fn unlabeled(yolo: [f64; 4]) -> Self {
        Self {
            yolo,
            status: BoxStatus::Unknown,
            cow_id: None,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.status == BoxStatus::Labeled
    }

    /// The assigned identity, treating an empty string as unset.
    pub fn identity(&self) -> Option<&str> {
        self.cow_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Check the normalized rectangle invariant.
    ///
    /// Centers must lie in [0,1]; width and height in (0,1].
    pub fn validate_geometry(&self) -> std::result::Result<(), String> {
        let [cx, cy, w, h] = self.yolo;
        if self.yolo.iter().any(|v| !v.is_finite()) {
            return Err(format!("non-finite coordinate in {:?}", self.yolo));
        }
        if !(0.0..=1.0).contains(&cx) || !(0.0..=1.0).contains(&cy) {
            return Err(format!("center ({cx}, {cy}) outside [0,1]"));
        }
        if !(w > 0.0 && w <= 1.0) || !(h > 0.0 && h <= 1.0) {
            return Err(format!("size ({w}, {h}) outside (0,1]"));
        }
        Ok(())
    }

    /// Check the identity rules enforced when a record is saved.
    ///
    /// A non-empty `cow_id` must be 1-6 ASCII digits and requires the box to
    /// be `labeled`.
    pub fn validate_identity(&self) -> std::result::Result<(), String> {
        let Some(id) = self.identity() else {
            return Ok(());
        };
        let len_ok = (IdentityConfig::MIN_DIGITS..=IdentityConfig::MAX_DIGITS).contains(&id.len());
        if !len_ok || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!(
                "cow_id '{id}' must be {}-{} digits",
                IdentityConfig::MIN_DIGITS,
                IdentityConfig::MAX_DIGITS
            ));
        }
        if !self.is_labeled() {
            return Err(format!("cow_id '{id}' set on a box whose status is not 'labeled'"));
        }
        Ok(())
    }

    /// Run every save-time check, reporting the offending box index.
    pub fn validate(&self, index: usize) -> Result<()> {
        self.validate_geometry()
            .map_err(|message| TaggerError::validation(format!("annotations[{index}].yolo"), message))?;
        self.validate_identity()
            .map_err(|message| TaggerError::validation(format!("annotations[{index}].cow_id"), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(id: &str) -> LabelBox {
        LabelBox {
            yolo: [0.5, 0.5, 0.2, 0.3],
            status: BoxStatus::Labeled,
            cow_id: Some(id.to_string()),
        }
    }

    #[test]
    fn test_missing_status_defaults_to_unknown() {
        let parsed: LabelBox = serde_json::from_str(r#"{"yolo": [0.1, 0.2, 0.3, 0.4]}"#).unwrap();
        assert_eq!(parsed.status, BoxStatus::Unknown);
        assert_eq!(parsed.cow_id, None);
    }

    #[test]
    fn test_unknown_status_string_is_rejected() {
        let parsed = serde_json::from_str::<LabelBox>(
            r#"{"yolo": [0.1, 0.2, 0.3, 0.4], "status": "maybe"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_yolo_must_have_four_values() {
        let parsed = serde_json::from_str::<LabelBox>(r#"{"yolo": [0.1, 0.2, 0.3]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serializes_unset_identity_as_null() {
        let value = serde_json::to_value(LabelBox::unlabeled([0.5, 0.5, 0.2, 0.3])).unwrap();
        assert_eq!(value["status"], "unknown");
        assert!(value["cow_id"].is_null());
    }

    #[test]
    fn test_empty_identity_is_unset() {
        let mut b = labeled("");
        assert_eq!(b.identity(), None);
        b.status = BoxStatus::Unknown;
        assert!(b.validate_identity().is_ok());
    }

    #[test]
    fn test_geometry_validation() {
        assert!(LabelBox::unlabeled([0.5, 0.5, 0.2, 0.3]).validate_geometry().is_ok());
        assert!(LabelBox::unlabeled([1.2, 0.5, 0.2, 0.3]).validate_geometry().is_err());
        assert!(LabelBox::unlabeled([0.5, 0.5, 0.0, 0.3]).validate_geometry().is_err());
        assert!(LabelBox::unlabeled([0.5, f64::NAN, 0.2, 0.3]).validate_geometry().is_err());
    }

    #[test]
    fn test_identity_validation() {
        assert!(labeled("4521").validate_identity().is_ok());
        assert!(labeled("123456").validate_identity().is_ok());
        assert!(labeled("1234567").validate_identity().is_err());
        assert!(labeled("45a1").validate_identity().is_err());

        let mut unlabeled_with_id = labeled("4521");
        unlabeled_with_id.status = BoxStatus::Unknown;
        assert!(unlabeled_with_id.validate_identity().is_err());
    }

    #[test]
    fn test_validate_reports_box_index() {
        let err = labeled("x").validate(3).unwrap_err();
        match err {
            TaggerError::Validation { field, .. } => assert_eq!(field, "annotations[3].cow_id"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
