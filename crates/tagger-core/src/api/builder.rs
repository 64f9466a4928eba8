//! Builder for configuring TaggerApi initialization.

use std::path::PathBuf;

use crate::config::{DatasetLayout, TaggerConfig};
use crate::error::{Result, TaggerError};
use crate::TaggerApi;

/// Builder for configuring TaggerApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use tagger_core::{DatasetLayout, TaggerApi};
///
/// let api = TaggerApi::builder("./dataset")
///     .layout(DatasetLayout::Multi)
///     .auto_create_dirs(true)
///     .build()?;
/// ```
pub struct TaggerApiBuilder {
    root: PathBuf,
    layout: DatasetLayout,
    image_extensions: Option<Vec<String>>,
    keep_backup: bool,
    auto_create_dirs: bool,
}

impl TaggerApiBuilder {
    /// Create a new builder with the dataset root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: DatasetLayout::Single,
            image_extensions: None,
            keep_backup: false,
            auto_create_dirs: false,
        }
    }

    /// How datasets are laid out under the root.
    ///
    /// Default: [`DatasetLayout::Single`]
    pub fn layout(mut self, layout: DatasetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Extensions (without the dot) that count as images when listing.
    ///
    /// Default: `["jpg"]`
    pub fn image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Keep a `.json.bak` copy of the previous curated record on every save.
    ///
    /// Default: `false`
    pub fn keep_backup(mut self, enable: bool) -> Self {
        self.keep_backup = enable;
        self
    }

    /// Create the root directory if it doesn't exist.
    ///
    /// Default: `false` (the root must exist)
    pub fn auto_create_dirs(mut self, enable: bool) -> Self {
        self.auto_create_dirs = enable;
        self
    }

    /// Build the TaggerApi instance.
    pub fn build(self) -> Result<TaggerApi> {
        if self.auto_create_dirs && !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| TaggerError::Io {
                message: format!("Failed to create dataset root: {}", self.root.display()),
                path: Some(self.root.clone()),
                source: Some(e),
            })?;
        }

        if !self.root.is_dir() {
            return Err(TaggerError::Io {
                message: format!("Dataset root does not exist: {}", self.root.display()),
                path: Some(self.root.clone()),
                source: None,
            });
        }

        let mut config = TaggerConfig::new(self.root, self.layout);
        if let Some(extensions) = self.image_extensions {
            if extensions.is_empty() {
                return Err(TaggerError::validation(
                    "image_extensions",
                    "at least one image extension is required",
                ));
            }
            config.image_extensions = extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }
        config.keep_backup = self.keep_backup;

        Ok(TaggerApi::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_requires_existing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("dataset");
        assert!(TaggerApiBuilder::new(&missing).build().is_err());
    }

    #[test]
    fn test_auto_create_dirs_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("dataset");

        TaggerApiBuilder::new(&root).auto_create_dirs(true).build().unwrap();
        assert!(root.is_dir());
        TaggerApiBuilder::new(&root).auto_create_dirs(true).build().unwrap();
    }

    #[test]
    fn test_options_reach_config() {
        let temp_dir = TempDir::new().unwrap();
        let api = TaggerApiBuilder::new(temp_dir.path())
            .layout(DatasetLayout::Multi)
            .image_extensions([".jpg", "png"])
            .keep_backup(true)
            .build()
            .unwrap();

        let config = api.config();
        assert_eq!(config.layout, DatasetLayout::Multi);
        assert_eq!(config.image_extensions, vec!["jpg", "png"]);
        assert!(config.keep_backup);
    }

    #[test]
    fn test_empty_extension_list_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = TaggerApiBuilder::new(temp_dir.path())
            .image_extensions(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(TaggerError::Validation { .. })));
    }
}
