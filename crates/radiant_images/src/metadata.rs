use crate::{ImageError, Result};
use bytes::Bytes;
use radiant_fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Sidecar stored next to every cached file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Catalog version during which the file body was last transferred.
    pub version_downloaded: String,
    /// Catalog version the file was last verified against.
    pub last_version_checked_against: String,
}

impl ImageMetadata {
    /// Reads a sidecar. Missing and unreadable sidecars both yield `None`, so
    /// the file is simply verified again.
    pub async fn read(path: &Path) -> Option<Self> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), "Failed to read image metadata: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!(path = %path.display(), "Ignoring corrupt image metadata: {e}");
                None
            }
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec(self).map_err(ImageError::Metadata)?;
        atomic_write(path, Bytes::from(data)).await?;
        Ok(())
    }
}
