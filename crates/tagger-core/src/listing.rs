//! Dataset and split enumeration.
//!
//! Results are always sorted explicitly; directory iteration order is not
//! stable across platforms.

use crate::config::{DatasetLayout, PathsConfig, TaggerConfig};
use crate::labels::count_label_lines;
use crate::models::{DatasetSummary, ImageSummary, Split};
use crate::paths::{images_dir, PathResolver};
use crate::status::classify_record;
use crate::store::AnnotationStore;
use crate::{Result, TaggerError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Walks dataset directories and summarizes labeling progress.
#[derive(Debug, Clone)]
pub struct Enumerator {
    resolver: PathResolver,
    store: AnnotationStore,
    config: TaggerConfig,
}

impl Enumerator {
    pub fn new(config: &TaggerConfig, resolver: PathResolver, store: AnnotationStore) -> Self {
        Self {
            resolver,
            store,
            config: config.clone(),
        }
    }

    /// Summarize every image of a split, sorted by filename.
    ///
    /// Images with a curated record are classified from it. The rest are
    /// `untouched` with a box count taken from their machine label line count.
    pub fn list_images(&self, dataset: Option<&str>, split: Split) -> Result<Vec<ImageSummary>> {
        let dataset_root = self.resolver.dataset_root(dataset)?;
        let filenames = self.image_filenames(&images_dir(&dataset_root, split))?;

        let mut summaries = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let paths = self.resolver.resolve(dataset, split, &filename)?;
            let summary = match self.store.load(&paths.curated)? {
                Some(record) => {
                    let classification = classify_record(Some(&record));
                    ImageSummary {
                        filename,
                        status: classification.status,
                        total_boxes: record.annotations.len(),
                        labeled_ids: classification.identities,
                    }
                }
                None => ImageSummary {
                    filename,
                    status: classify_record(None).status,
                    total_boxes: count_label_lines(&paths.labels)?,
                    labeled_ids: Vec::new(),
                },
            };
            summaries.push(summary);
        }

        debug!(
            "Listed {} images in {}/{}",
            summaries.len(),
            dataset_root.display(),
            split
        );
        Ok(summaries)
    }

    /// Summarize every `*_dataset` directory under the root, sorted by name.
    pub fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        if self.resolver.layout() != DatasetLayout::Multi {
            return Err(TaggerError::validation(
                "layout",
                "dataset listing requires the multi-dataset layout",
            ));
        }

        let mut datasets = Vec::new();
        for entry in read_dir_sorted(self.resolver.root())? {
            let Some(name) = entry.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };
            if !entry.is_dir() || !name.ends_with(PathsConfig::DATASET_SUFFIX) {
                continue;
            }

            let mut image_count = 0;
            for split in Split::ALL {
                image_count += self.image_filenames(&images_dir(&entry, split))?.len();
            }
            datasets.push(DatasetSummary { name, image_count });
        }
        Ok(datasets)
    }

    /// Sorted file names in `dir` with an image extension. A missing
    /// directory has no images.
    fn image_filenames(&self, dir: &Path) -> Result<Vec<String>> {
        Ok(read_dir_sorted(dir)?
            .into_iter()
            .filter(|p| p.is_file() && self.is_image(p))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect())
    }

    fn is_image(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.config.is_image_extension(ext)
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(TaggerError::io_with_path(e, dir)),
    };

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| TaggerError::io_with_path(e, dir))?;
    paths.sort();
    Ok(paths)
}
