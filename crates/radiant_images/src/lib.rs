//! # Radiant Images
//!
//! Local cache for the images an [`AssetCollection`](radiant_core::collection::AssetCollection)
//! references.
//!
//! Two parts cooperate:
//!
//! * [`ImageCache`]: decodes cached files and keeps small bitmaps in memory.
//! * [`ImageManager`]: downloads files into the cache, at most once per image
//!   at a time, and publishes per-image [`ImageState`] changes in batches.
//!
//! Files live under the configured cache directory at the image URL's path,
//! each next to a `<file>.json` sidecar recording which catalog version it was
//! last verified against.

mod cache;
mod decoder;
mod events;
mod manager;
mod metadata;

pub use cache::{DEFAULT_MAX_CACHED_PIXELS, ImageCache, ImageLookup};
pub use decoder::{ImageDecoder, RasterDecoder};
pub use events::{ImageState, ImageStateBatch};
pub use manager::{DiskUsage, ImageManager, ImageManagerConfig};
pub use metadata::ImageMetadata;

use radiant_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to fetch image: {0}")]
    Client(#[from] ClientError),

    #[error("Image cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid image metadata: {0}")]
    Metadata(#[source] serde_json::Error),

    #[error("Download task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImageError>;
