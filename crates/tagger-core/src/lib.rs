//! Tagger Core - headless annotation reconciliation for the cow tagger.
//!
//! Reconciles detector-generated YOLO boxes with human-assigned cow IDs and
//! persists the curated result per image. It can be used programmatically
//! without any HTTP/RPC layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use tagger_core::{Split, TaggerApi};
//!
//! #[tokio::main]
//! async fn main() -> tagger_core::Result<()> {
//!     let api = TaggerApi::new("/path/to/dataset")?;
//!
//!     let mut record = api.resolve(None, Split::Train, "cow001.jpg").await?;
//!     record.annotations[0].cow_id = Some("4521".into());
//!     record.annotations[0].status = tagger_core::BoxStatus::Labeled;
//!     api.save(None, Split::Train, "cow001.jpg", record).await?;
//!
//!     for image in api.enumerate(None, Split::Train).await? {
//!         println!("{} {} {}", image.filename, image.status, image.total_boxes);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod listing;
pub mod models;
pub mod paths;
pub mod reconcile;
pub mod status;
pub mod store;

mod api;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::TaggerApiBuilder;
pub use config::{DatasetLayout, TaggerConfig};
pub use error::{Result, TaggerError};
pub use listing::Enumerator;
pub use models::{
    AnnotationRecord, BoxStatus, DatasetSummary, ImageStatus, ImageSummary, LabelBox,
    SaveOutcome, Split,
};
pub use paths::{ImagePaths, PathResolver};
pub use reconcile::Reconciler;
pub use status::{classify, classify_record, Classification};
pub use store::AnnotationStore;

use std::path::Path;
use std::sync::Arc;

/// Main API struct for tagger operations.
///
/// Every call is independent: nothing about annotation state is cached
/// between calls. Filesystem work runs on tokio's blocking pool.
#[derive(Clone)]
pub struct TaggerApi {
    inner: Arc<Components>,
}

struct Components {
    config: TaggerConfig,
    resolver: PathResolver,
    store: AnnotationStore,
    reconciler: Reconciler,
    enumerator: Enumerator,
}

impl TaggerApi {
    /// Create a builder for TaggerApi.
    pub fn builder(root: impl Into<std::path::PathBuf>) -> TaggerApiBuilder {
        TaggerApiBuilder::new(root)
    }

    /// Create an API over an existing single-dataset root with defaults.
    pub fn new(root: impl Into<std::path::PathBuf>) -> Result<Self> {
        TaggerApiBuilder::new(root).build()
    }

    pub(crate) fn from_config(config: TaggerConfig) -> Self {
        let resolver = PathResolver::new(&config);
        let store = AnnotationStore::new(&config);
        let reconciler = Reconciler::new(resolver.clone(), store.clone());
        let enumerator = Enumerator::new(&config, resolver.clone(), store.clone());

        Self {
            inner: Arc::new(Components {
                config,
                resolver,
                store,
                reconciler,
                enumerator,
            }),
        }
    }

    pub fn config(&self) -> &TaggerConfig {
        &self.inner.config
    }

    pub fn root(&self) -> &Path {
        &self.inner.config.root
    }

    /// Authoritative annotation state for an image: the curated record if
    /// one was saved, otherwise an unsaved record built from machine labels.
    pub async fn resolve(
        &self,
        dataset: Option<&str>,
        split: Split,
        filename: &str,
    ) -> Result<AnnotationRecord> {
        let dataset = dataset.map(String::from);
        let filename = filename.to_string();
        self.run_blocking(move |c| c.reconciler.resolve(dataset.as_deref(), split, &filename))
            .await
    }

    /// Validate and atomically persist a full curated record.
    pub async fn save(
        &self,
        dataset: Option<&str>,
        split: Split,
        filename: &str,
        record: AnnotationRecord,
    ) -> Result<SaveOutcome> {
        let dataset = dataset.map(String::from);
        let filename = filename.to_string();
        self.run_blocking(move |c| {
            let paths = c.resolver.resolve(dataset.as_deref(), split, &filename)?;
            c.store.save(&paths, &record)?;
            Ok(SaveOutcome {
                file: paths.curated,
            })
        })
        .await
    }

    /// Per-image progress summaries for a split, sorted by filename.
    pub async fn enumerate(&self, dataset: Option<&str>, split: Split) -> Result<Vec<ImageSummary>> {
        let dataset = dataset.map(String::from);
        self.run_blocking(move |c| c.enumerator.list_images(dataset.as_deref(), split))
            .await
    }

    /// All datasets under the root with their image counts.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        self.run_blocking(|c| c.enumerator.list_datasets()).await
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Components) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&inner))
            .await
            .map_err(|e| TaggerError::Other(format!("Blocking task failed: {}", e)))?
    }
}
