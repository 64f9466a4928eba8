//! Reader and writer for curated annotation records.
//!
//! The store is the only component that writes under `labeled_data/`. Every
//! save replaces the whole record; there is no merge and no version check, so
//! the last writer wins.

use crate::config::TaggerConfig;
use crate::models::AnnotationRecord;
use crate::paths::ImagePaths;
use crate::store::atomic::{atomic_read_json, atomic_write_json};
use crate::{Result, TaggerError};
use std::path::Path;
use tracing::{debug, info};

/// Loads and saves curated records.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    keep_backup: bool,
}

impl AnnotationStore {
    pub fn new(config: &TaggerConfig) -> Self {
        Self {
            keep_backup: config.keep_backup,
        }
    }

    /// Load the curated record at `path`.
    ///
    /// Returns `Ok(None)` when no record has been saved yet. A record that
    /// exists but does not match the schema is a [`TaggerError::Parse`]; it is
    /// never repaired or skipped.
    pub fn load(&self, path: &Path) -> Result<Option<AnnotationRecord>> {
        let Some(record) = atomic_read_json::<AnnotationRecord>(path)? else {
            return Ok(None);
        };

        record.check_dimensions().map_err(|message| TaggerError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!(
            "Loaded curated record {} ({} boxes)",
            path.display(),
            record.annotations.len()
        );
        Ok(Some(record))
    }

    /// Validate `record` against its target and write it atomically.
    ///
    /// A record saved into a named dataset without a `dataset` field is
    /// written with the target's dataset filled in.
    pub fn save(&self, paths: &ImagePaths, record: &AnnotationRecord) -> Result<()> {
        Self::validate_for(paths, record)?;
        let mut record = record.clone();
        if record.dataset.is_none() {
            record.dataset = paths.dataset.clone();
        }
        atomic_write_json(&paths.curated, &record, self.keep_backup)?;
        info!(
            "Saved {} boxes ({} labeled) to {}",
            record.annotations.len(),
            record.labeled_count(),
            paths.curated.display()
        );
        Ok(())
    }

    /// Save-time checks: the record must describe the image it is saved for
    /// and every box must satisfy the geometry and identity rules.
    pub fn validate_for(paths: &ImagePaths, record: &AnnotationRecord) -> Result<()> {
        if record.filename != paths.filename {
            return Err(TaggerError::validation(
                "filename",
                format!(
                    "record is for '{}' but is being saved as '{}'",
                    record.filename, paths.filename
                ),
            ));
        }
        if record.split != paths.split {
            return Err(TaggerError::validation(
                "split",
                format!(
                    "record is for split '{}' but is being saved under '{}'",
                    record.split, paths.split
                ),
            ));
        }
        if let Some(dataset) = &record.dataset {
            if paths.dataset.as_deref() != Some(dataset.as_str()) {
                return Err(TaggerError::validation(
                    "dataset",
                    format!("record names dataset '{dataset}' which does not match the target"),
                ));
            }
        }
        record
            .check_dimensions()
            .map_err(|message| TaggerError::validation("width/height", message))?;

        for (index, label_box) in record.annotations.iter().enumerate() {
            label_box.validate(index)?;
        }
        Ok(())
    }
}
