//! Data models for the tagger core.
//!
//! The serialized field names match the curated record files on disk and the
//! payloads the labeling frontend sends, so existing `labeled_data/` trees
//! stay readable.

mod label_box;
mod record;
mod summary;

pub use label_box::*;
pub use record::*;
pub use summary::*;
