//! Curated record persistence.
//!
//! This module provides:
//! - Atomic JSON file operations
//! - The annotation store that validates records at the disk boundary

mod annotation_store;
mod atomic;

pub use annotation_store::AnnotationStore;
pub use atomic::{atomic_read_json, atomic_write_json, read_if_exists};
