use crate::Result;
use crate::decoder::{ImageDecoder, RasterDecoder};
use image::DynamicImage;
use radiant_core::image::AssetImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Largest bitmap, in pixels, kept in memory (256 x 256).
pub const DEFAULT_MAX_CACHED_PIXELS: u64 = 65_536;

#[derive(Debug, Clone)]
pub enum ImageLookup {
    /// Decoded and retained. Every lookup hands out the same bitmap.
    Cached(Arc<DynamicImage>),
    /// On disk but above the pixel limit; use [`ImageCache::load`].
    TooLarge,
    Missing,
}

impl ImageLookup {
    pub fn bitmap(&self) -> Option<&Arc<DynamicImage>> {
        match self {
            ImageLookup::Cached(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

/// Memoized view of the on-disk cache.
///
/// Entries are computed on first lookup and kept until [`ImageCache::refresh`],
/// [`ImageCache::invalidate`] or [`ImageCache::clear`]. Lookups are
/// synchronous; the lock is released while a file is decoded.
pub struct ImageCache<D = RasterDecoder> {
    root: PathBuf,
    decoder: Arc<D>,
    max_pixels: u64,
    entries: Arc<Mutex<HashMap<AssetImage, ImageLookup>>>,
}

impl<D> Clone for ImageCache<D> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            decoder: self.decoder.clone(),
            max_pixels: self.max_pixels,
            entries: self.entries.clone(),
        }
    }
}

impl ImageCache<RasterDecoder> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_decoder(root, RasterDecoder, DEFAULT_MAX_CACHED_PIXELS)
    }
}

impl<D: ImageDecoder> ImageCache<D> {
    pub fn with_decoder(root: impl Into<PathBuf>, decoder: D, max_pixels: u64) -> Self {
        Self {
            root: root.into(),
            decoder: Arc::new(decoder),
            max_pixels,
            entries: Arc::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<AssetImage, ImageLookup>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn lookup(&self, image: &AssetImage) -> ImageLookup {
        if let Some(entry) = self.entries().get(image) {
            return entry.clone();
        }

        let entry = self.compute(image);
        // A concurrent lookup may have won; keep its bitmap so callers share it.
        self.entries()
            .entry(image.clone())
            .or_insert(entry)
            .clone()
    }

    /// The bitmap for `image`, decoding from disk without retaining it when it
    /// is too large for the memory cache.
    pub fn load(&self, image: &AssetImage) -> Result<Option<Arc<DynamicImage>>> {
        match self.lookup(image) {
            ImageLookup::Cached(bitmap) => Ok(Some(bitmap)),
            ImageLookup::TooLarge => Ok(self.read(image)?.map(Arc::new)),
            ImageLookup::Missing => Ok(None),
        }
    }

    /// Recomputes the entry from disk, e.g. after the file was replaced.
    pub fn refresh(&self, image: &AssetImage) -> ImageLookup {
        let entry = self.compute(image);
        self.entries().insert(image.clone(), entry.clone());
        entry
    }

    /// Whether a file-backed entry is memoized. A memoized `Missing` does not
    /// count since the file may have appeared since.
    pub fn is_memoized(&self, image: &AssetImage) -> bool {
        matches!(
            self.entries().get(image),
            Some(ImageLookup::Cached(_) | ImageLookup::TooLarge)
        )
    }

    pub fn invalidate(&self, image: &AssetImage) {
        self.entries().remove(image);
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Number of memoized entries, including `TooLarge` and `Missing` ones.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, image: &AssetImage) -> Result<Option<DynamicImage>> {
        let path = image.local_path(&self.root);
        match std::fs::read(&path) {
            Ok(data) => Ok(Some(self.decoder.decode(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn compute(&self, image: &AssetImage) -> ImageLookup {
        match self.read(image) {
            Ok(Some(bitmap)) => {
                let pixels = u64::from(bitmap.width()) * u64::from(bitmap.height());
                if pixels <= self.max_pixels {
                    ImageLookup::Cached(Arc::new(bitmap))
                } else {
                    debug!(%image, pixels, "Image too large for memory cache");
                    ImageLookup::TooLarge
                }
            }
            Ok(None) => ImageLookup::Missing,
            Err(e) => {
                warn!(%image, "Unreadable cached image: {e}");
                ImageLookup::Missing
            }
        }
    }
}
