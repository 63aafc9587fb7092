//! # Radiant FileSystem Store
//!
//! A local filesystem backend for radiant's persisted state.
//!
//! This crate implements the [`KeyValueStore`] trait with one file per key,
//! and exposes the [`atomic_write`] helper the image cache uses for its files.
//!
//! ## Features
//!
//! * **Atomic Writes**: Uses temporary files and rename operations so a crash
//!   mid-write never leaves a truncated value behind.
//!
//! ## Usage
//!
//! ```no_run
//! use radiant_fs::FileStore;
//!
//! let store = FileStore::new("./radiant_data/state");
//! ```

use bytes::Bytes;
use radiant_core::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::debug;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary sibling of `path`, unique per write so concurrent writers never
/// share one.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    let id = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}-{id}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Writes `data` to `path` via a temporary file and a rename.
pub async fn atomic_write(path: &Path, data: Bytes) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = tmp_path(path);
    fs::write(&tmp_path, data).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e);
    }

    Ok(())
}

/// Removes a file, treating "already gone" as success.
pub async fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { root: path.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn get_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let path = self.get_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError> {
        let path = self.get_path(key)?;
        debug!(key, bytes = value.len(), "Writing store value");
        atomic_write(&path, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.get_path(key)?;
        remove_if_exists(&path).await?;
        Ok(())
    }
}
