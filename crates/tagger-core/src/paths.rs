//! Storage path resolution.
//!
//! Maps a (dataset, split, filename) triple onto the three files that may
//! describe an image:
//! - `<dataset_root>/images/<split>/<filename>`
//! - `<dataset_root>/labels/<split>/<stem>.txt`
//! - `<dataset_root>/labeled_data/<split>/<stem>.json`
//!
//! This is the only place unknown datasets are rejected.

use crate::config::{DatasetLayout, PathsConfig, TaggerConfig};
use crate::error::{Result, TaggerError};
use crate::models::Split;
use std::path::{Component, Path, PathBuf};

/// Every location that may hold information about one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePaths {
    pub dataset: Option<String>,
    pub dataset_root: PathBuf,
    pub split: Split,
    pub filename: String,
    pub image: PathBuf,
    pub labels: PathBuf,
    pub curated: PathBuf,
}

/// Resolves dataset roots and per-image paths under a configured root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    layout: DatasetLayout,
}

impl PathResolver {
    pub fn new(config: &TaggerConfig) -> Self {
        Self {
            root: config.root.clone(),
            layout: config.layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> DatasetLayout {
        self.layout
    }

    /// Resolve the directory holding `images/`, `labels/` and `labeled_data/`.
    pub fn dataset_root(&self, dataset: Option<&str>) -> Result<PathBuf> {
        match (self.layout, dataset) {
            (DatasetLayout::Single, None) => Ok(self.root.clone()),
            (DatasetLayout::Single, Some(name)) => Err(TaggerError::validation(
                "dataset",
                format!("dataset '{name}' given but the root holds a single dataset"),
            )),
            (DatasetLayout::Multi, None) => Err(TaggerError::validation(
                "dataset",
                "a dataset name is required in the multi-dataset layout",
            )),
            (DatasetLayout::Multi, Some(name)) => {
                validate_component("dataset", name)?;
                let path = self.root.join(name);
                if !path.is_dir() {
                    return Err(TaggerError::DatasetNotFound {
                        name: name.to_string(),
                    });
                }
                Ok(path)
            }
        }
    }

    /// Resolve all paths for one image.
    pub fn resolve(&self, dataset: Option<&str>, split: Split, filename: &str) -> Result<ImagePaths> {
        validate_component("filename", filename)?;
        let dataset_root = self.dataset_root(dataset)?;
        let stem = file_stem(filename);

        Ok(ImagePaths {
            dataset: dataset.map(String::from),
            image: images_dir(&dataset_root, split).join(filename),
            labels: labels_dir(&dataset_root, split)
                .join(format!("{}.{}", stem, PathsConfig::LABEL_EXTENSION)),
            curated: curated_dir(&dataset_root, split)
                .join(format!("{}.{}", stem, PathsConfig::RECORD_EXTENSION)),
            dataset_root,
            split,
            filename: filename.to_string(),
        })
    }
}

/// `<dataset_root>/images/<split>`
pub fn images_dir(dataset_root: &Path, split: Split) -> PathBuf {
    dataset_root
        .join(PathsConfig::IMAGES_DIR_NAME)
        .join(split.as_str())
}

/// `<dataset_root>/labels/<split>`
pub fn labels_dir(dataset_root: &Path, split: Split) -> PathBuf {
    dataset_root
        .join(PathsConfig::LABELS_DIR_NAME)
        .join(split.as_str())
}

/// `<dataset_root>/labeled_data/<split>`
pub fn curated_dir(dataset_root: &Path, split: Split) -> PathBuf {
    dataset_root
        .join(PathsConfig::CURATED_DIR_NAME)
        .join(split.as_str())
}

fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

/// Reject anything that is not a single plain path component.
fn validate_component(field: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if value.is_empty() || !single_normal || value.contains(['/', '\\', '\0']) {
        return Err(TaggerError::validation(
            field,
            format!("'{value}' is not a plain file name"),
        ));
    }
    Ok(())
}
