//! Annotation reconciliation.
//!
//! A saved curated record always wins. Only when none exists is a fresh,
//! unsaved record assembled from the image header and the machine labels.
//! Once a human has saved an image, later changes to its machine label file
//! are ignored.

use crate::config::DatasetLayout;
use crate::labels::read_machine_labels;
use crate::models::{AnnotationRecord, Split};
use crate::paths::PathResolver;
use crate::store::AnnotationStore;
use crate::{Result, TaggerError};
use std::path::Path;
use tracing::debug;

/// Produces the authoritative annotation state for an image.
#[derive(Debug, Clone)]
pub struct Reconciler {
    resolver: PathResolver,
    store: AnnotationStore,
}

impl Reconciler {
    pub fn new(resolver: PathResolver, store: AnnotationStore) -> Self {
        Self { resolver, store }
    }

    /// Return the curated record if one exists, otherwise a machine-label
    /// fallback. Never writes.
    ///
    /// A curated record that fails to parse is returned as an error rather
    /// than silently replaced by machine labels.
    pub fn resolve(
        &self,
        dataset: Option<&str>,
        split: Split,
        filename: &str,
    ) -> Result<AnnotationRecord> {
        let paths = self.resolver.resolve(dataset, split, filename)?;

        if let Some(record) = self.store.load(&paths.curated)? {
            debug!("Using curated record for {}", paths.image.display());
            return Ok(record);
        }

        if !paths.image.is_file() {
            return Err(TaggerError::ImageNotFound { path: paths.image });
        }
        let (width, height) = read_image_dimensions(&paths.image)?;
        let annotations = read_machine_labels(&paths.labels)?;
        debug!(
            "Built fallback record for {} from {} machine boxes",
            paths.image.display(),
            annotations.len()
        );

        Ok(AnnotationRecord {
            dataset: match self.resolver.layout() {
                DatasetLayout::Multi => paths.dataset,
                DatasetLayout::Single => None,
            },
            filename: paths.filename,
            split,
            width,
            height,
            annotations,
        })
    }
}

/// Read pixel dimensions from the image header without decoding pixels.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32)> {
    let size = imagesize::size(path).map_err(|e| TaggerError::ImageProbe {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let to_u32 = |value: usize, axis: &str| -> Result<u32> {
        u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| TaggerError::ImageProbe {
                path: path.to_path_buf(),
                message: format!("image {axis} {value} is not a positive 32-bit value"),
            })
    };

    Ok((to_u32(size.width, "width")?, to_u32(size.height, "height")?))
}
