//! Centralized configuration for the tagger core.
//!
//! Directory names and file extensions of the on-disk layout live here as
//! constants. The runtime configuration is an explicit [`TaggerConfig`] value
//! handed to each component at construction.

use std::path::PathBuf;

/// Directory and file naming for a dataset root.
pub struct PathsConfig;

impl PathsConfig {
    pub const IMAGES_DIR_NAME: &'static str = "images";
    pub const LABELS_DIR_NAME: &'static str = "labels";
    pub const CURATED_DIR_NAME: &'static str = "labeled_data";
    pub const DATASET_SUFFIX: &'static str = "_dataset";
    pub const LABEL_EXTENSION: &'static str = "txt";
    pub const RECORD_EXTENSION: &'static str = "json";
    pub const BACKUP_EXTENSION: &'static str = "json.bak";
    pub const DEFAULT_IMAGE_EXTENSIONS: &'static [&'static str] = &["jpg"];
}

/// Identity token rules.
pub struct IdentityConfig;

impl IdentityConfig {
    pub const MIN_DIGITS: usize = 1;
    pub const MAX_DIGITS: usize = 6;
}

/// How datasets are laid out under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetLayout {
    /// The root itself holds `images/`, `labels/` and `labeled_data/`.
    #[default]
    Single,
    /// The root holds one `<name>_dataset/` directory per dataset.
    Multi,
}

impl DatasetLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetLayout::Single => "single",
            DatasetLayout::Multi => "multi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" => Some(DatasetLayout::Single),
            "multi" => Some(DatasetLayout::Multi),
            _ => None,
        }
    }
}

impl std::fmt::Display for DatasetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime configuration shared by every component.
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Root directory holding the dataset hierarchy.
    pub root: PathBuf,
    pub layout: DatasetLayout,
    /// Extensions (without the dot) that count as images when listing.
    pub image_extensions: Vec<String>,
    /// Copy the previous curated record to `<stem>.json.bak` before overwriting.
    pub keep_backup: bool,
}

impl TaggerConfig {
    pub fn new(root: impl Into<PathBuf>, layout: DatasetLayout) -> Self {
        Self {
            root: root.into(),
            layout,
            image_extensions: PathsConfig::DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            keep_backup: false,
        }
    }

    /// True if `ext` matches one of the configured image extensions.
    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_roundtrip() {
        for layout in [DatasetLayout::Single, DatasetLayout::Multi] {
            let parsed = DatasetLayout::parse(layout.as_str()).expect("Should parse");
            assert_eq!(layout, parsed);
        }
        assert_eq!(DatasetLayout::parse("MULTI"), Some(DatasetLayout::Multi));
        assert_eq!(DatasetLayout::parse("nested"), None);
    }

    #[test]
    fn test_image_extension_match_ignores_case() {
        let config = TaggerConfig::new("/data", DatasetLayout::Single);
        assert!(config.is_image_extension("jpg"));
        assert!(config.is_image_extension("JPG"));
        assert!(!config.is_image_extension("png"));
    }
}
