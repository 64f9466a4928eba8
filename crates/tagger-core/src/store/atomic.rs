//! Atomic file operations for curated record persistence.
//!
//! Writes go through a temp file in the target directory:
//! 1. Serialize and write to a `NamedTempFile` next to the target
//! 2. fsync so the data reaches disk
//! 3. Optionally copy the previous file to a `.bak` sibling
//! 4. Rename the temp file over the target
//!
//! Readers therefore see either the old file or the new one, never a torn one.

use crate::config::PathsConfig;
use crate::{Result, TaggerError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Read a file's raw bytes, returning `None` if it does not exist.
///
/// Decoding is left to the caller so that bad encodings are reported as
/// content problems rather than I/O failures.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TaggerError::Io {
            message: format!("Failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        }),
    }
}

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist. A file that does not match `T`
/// is reported as [`TaggerError::Parse`] with the offending path.
pub fn atomic_read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(contents) = read_if_exists(path)? else {
        return Ok(None);
    };

    let data: T = serde_json::from_slice(&contents).map_err(|e| TaggerError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(Some(data))
}

/// Write data to a JSON file atomically, creating parent directories.
pub fn atomic_write_json<T: Serialize>(path: &Path, data: &T, keep_backup: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| TaggerError::Io {
        message: format!("Failed to create directory {}", parent.display()),
        path: Some(parent.to_path_buf()),
        source: Some(e),
    })?;

    let serialized = serde_json::to_string_pretty(data).map_err(|e| TaggerError::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| TaggerError::Io {
        message: format!("Failed to create temp file in {}", parent.display()),
        path: Some(parent.to_path_buf()),
        source: Some(e),
    })?;

    temp.write_all(serialized.as_bytes())
        .and_then(|_| temp.flush())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| TaggerError::Io {
            message: format!("Failed to write temp file {}", temp.path().display()),
            path: Some(temp.path().to_path_buf()),
            source: Some(e),
        })?;

    if keep_backup && path.exists() {
        let backup_path = path.with_extension(PathsConfig::BACKUP_EXTENSION);
        if let Err(e) = fs::copy(path, &backup_path) {
            // Backup failure is not fatal
            warn!("Failed to create backup {}: {}", backup_path.display(), e);
        } else {
            debug!("Created backup: {}", backup_path.display());
        }
    }

    temp.persist(path).map_err(|e| TaggerError::Io {
        message: format!("Failed to rename temp file to {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e.error),
    })?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}
