use crate::cache::{DEFAULT_MAX_CACHED_PIXELS, ImageCache, ImageLookup};
use crate::decoder::{ImageDecoder, RasterDecoder};
use crate::events::{ImageEvent, ImageState, ImageStateBatch, spawn_batcher};
use crate::metadata::ImageMetadata;
use crate::{ImageError, Result};

use futures::future::{BoxFuture, FutureExt, Shared};
use futures::stream::{self, StreamExt};
use radiant_client::{AssetClient, ClientError};
use radiant_core::prelude::*;
use radiant_fs::atomic_write;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Clone, Debug)]
pub struct ImageManagerConfig {
    /// Root of the on-disk cache.
    ///
    /// Defaults to `radiant_data/images`.
    pub cache_dir: PathBuf,
    /// How long state changes are collected before a batch is published.
    ///
    /// Defaults to 50 ms.
    pub batch_window: Duration,
    /// Largest bitmap, in pixels, kept in memory.
    ///
    /// Defaults to [`DEFAULT_MAX_CACHED_PIXELS`].
    pub max_cached_pixels: u64,
    /// Downloads running at once during [`ImageManager::prefetch`].
    ///
    /// Defaults to 8.
    pub prefetch_concurrency: usize,
    /// Catalog version files are verified against. Can be changed later with
    /// [`ImageManager::set_version`].
    pub version: Option<String>,
}

impl Default for ImageManagerConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("radiant_data/images"),
            batch_window: Duration::from_millis(50),
            max_cached_pixels: DEFAULT_MAX_CACHED_PIXELS,
            prefetch_concurrency: 8,
            version: None,
        }
    }
}

/// Files and bytes under the cache root, sidecars excluded from `files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub files: u64,
    pub bytes: u64,
}

type SharedDownload = Shared<BoxFuture<'static, std::result::Result<(), Arc<ImageError>>>>;

struct Inner<T: HttpTransport, D> {
    client: AssetClient<T>,
    cache: ImageCache<D>,
    version: Mutex<Option<String>>,
    states: Mutex<HashMap<AssetImage, ImageState>>,
    in_flight: Mutex<HashMap<AssetImage, SharedDownload>>,
    events: mpsc::UnboundedSender<ImageEvent>,
    batches: broadcast::Sender<ImageStateBatch>,
    prefetch_concurrency: usize,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Downloads images into the cache and tracks their state.
///
/// Cloning is cheap; clones share the cache, the state map and the in-flight
/// downloads. Must be created inside a tokio runtime.
pub struct ImageManager<T: HttpTransport, D: ImageDecoder = RasterDecoder> {
    inner: Arc<Inner<T, D>>,
}

impl<T: HttpTransport, D: ImageDecoder> Clone for ImageManager<T, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: HttpTransport> ImageManager<T, RasterDecoder> {
    pub fn new(client: AssetClient<T>, config: ImageManagerConfig) -> Self {
        Self::with_decoder(client, config, RasterDecoder)
    }
}

impl<T: HttpTransport, D: ImageDecoder> ImageManager<T, D> {
    pub fn with_decoder(client: AssetClient<T>, config: ImageManagerConfig, decoder: D) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let (batches, _) = broadcast::channel(64);
        spawn_batcher(config.batch_window, rx, batches.clone());

        Self {
            inner: Arc::new(Inner {
                client,
                cache: ImageCache::with_decoder(
                    config.cache_dir,
                    decoder,
                    config.max_cached_pixels,
                ),
                version: Mutex::new(config.version),
                states: Mutex::default(),
                in_flight: Mutex::default(),
                events,
                batches,
                prefetch_concurrency: config.prefetch_concurrency.max(1),
            }),
        }
    }

    pub fn cache(&self) -> &ImageCache<D> {
        &self.inner.cache
    }

    pub fn cache_dir(&self) -> &Path {
        self.inner.cache.root()
    }

    pub fn lookup(&self, image: &AssetImage) -> ImageLookup {
        self.inner.cache.lookup(image)
    }

    pub fn version(&self) -> Option<String> {
        lock(&self.inner.version).clone()
    }

    /// Switches the catalog version. A different version drops the memory
    /// cache and all tracked states; files on disk are re-verified lazily.
    pub fn set_version(&self, version: impl Into<String>) {
        let version = version.into();
        {
            let mut current = lock(&self.inner.version);
            if current.as_deref() == Some(version.as_str()) {
                return;
            }
            info!(%version, "Image cache version changed");
            *current = Some(version);
        }
        self.inner.cache.clear();
        lock(&self.inner.states).clear();
    }

    /// Current state of `image`, [`ImageState::Absent`] if never requested.
    pub fn state(&self, image: &AssetImage) -> ImageState {
        lock(&self.inner.states)
            .get(image)
            .cloned()
            .unwrap_or_default()
    }

    /// Batches of state changes, at most one per batch window.
    pub fn subscribe(&self) -> broadcast::Receiver<ImageStateBatch> {
        self.inner.batches.subscribe()
    }

    pub fn is_downloading(&self, image: &AssetImage) -> bool {
        lock(&self.inner.in_flight).contains_key(image)
    }

    /// Makes `image` available on disk and returns its final state.
    ///
    /// A call for an image that is already downloading awaits that download
    /// instead of starting another. The work runs on its own task, so it
    /// completes even if every caller stops waiting.
    pub async fn download(&self, image: &AssetImage) -> ImageState {
        let download = {
            let mut in_flight = lock(&self.inner.in_flight);
            match in_flight.get(image) {
                Some(existing) => {
                    debug!(%image, "Joining in-flight download");
                    existing.clone()
                }
                None => {
                    self.inner.transition(image, ImageState::Downloading);
                    let task = tokio::spawn(run_download(self.inner.clone(), image.clone()));
                    let download = async move {
                        match task.await {
                            Ok(result) => result,
                            Err(e) => Err(Arc::new(ImageError::Join(e))),
                        }
                    }
                    .boxed()
                    .shared();
                    in_flight.insert(image.clone(), download.clone());
                    download
                }
            }
        };

        match download.await {
            Ok(()) => ImageState::Available,
            Err(e) => ImageState::Errored(e),
        }
    }

    /// Downloads every image `collection` references for `kinds`.
    pub async fn prefetch(
        &self,
        collection: &AssetCollection,
        kinds: &[EntityKind],
    ) -> Vec<(AssetImage, ImageState)> {
        let mut seen = HashSet::new();
        let images: Vec<AssetImage> = kinds
            .iter()
            .flat_map(|kind| collection.images(*kind))
            .filter(|image| seen.insert(*image))
            .cloned()
            .collect();
        info!(images = images.len(), "Prefetching images");

        stream::iter(images)
            .map(|image| async move {
                let state = self.download(&image).await;
                (image, state)
            })
            .buffer_unordered(self.inner.prefetch_concurrency)
            .collect()
            .await
    }

    /// Forgets every cached bitmap, tracked state and file on disk.
    ///
    /// Downloads still running are not cancelled; their results land in the
    /// cleared cache.
    pub async fn clear_all(&self) -> Result<()> {
        self.inner.cache.clear();
        lock(&self.inner.states).clear();

        let root = self.cache_dir();
        match tokio::fs::remove_dir_all(root).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        info!(root = %root.display(), "Image cache cleared");
        Ok(())
    }

    pub async fn disk_usage(&self) -> Result<DiskUsage> {
        let root = self.cache_dir().to_path_buf();
        tokio::task::spawn_blocking(move || disk_usage(&root)).await?
    }
}

fn disk_usage(root: &Path) -> Result<DiskUsage> {
    let mut usage = DiskUsage::default();
    if !root.exists() {
        return Ok(usage);
    }

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        usage.bytes += entry.metadata().map_err(std::io::Error::from)?.len();
        if entry.path().extension().is_none_or(|ext| ext != "json") {
            usage.files += 1;
        }
    }
    Ok(usage)
}

impl<T: HttpTransport, D: ImageDecoder> Inner<T, D> {
    fn transition(&self, image: &AssetImage, state: ImageState) {
        lock(&self.states).insert(image.clone(), state.clone());
        // The batcher only stops when the manager is dropped.
        let _ = self.events.send(ImageEvent {
            image: image.clone(),
            state,
        });
    }

    /// Brings the file for `image` up to date. Returns whether a new body
    /// was written.
    async fn fetch(&self, image: &AssetImage) -> Result<bool> {
        let root = self.cache.root();
        let path = image.local_path(root);
        let metadata_path = image.metadata_path(root);
        let version = lock(&self.version).clone();

        let metadata = ImageMetadata::read(&metadata_path).await;
        let local_size = tokio::fs::metadata(&path).await.ok().map(|m| m.len());

        if let (Some(version), Some(metadata), Some(_)) = (&version, &metadata, local_size) {
            if metadata.last_version_checked_against == *version {
                debug!(%image, "Already verified for this version");
                return Ok(false);
            }
        }

        let remote_size = match self.client.fetch_image_size(image).await {
            Ok(size) => size,
            Err(ClientError::Status(status, _)) => {
                debug!(%image, %status, "Size check rejected");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let transferred = match (local_size, remote_size) {
            (Some(local), Some(remote)) if local == remote => {
                debug!(%image, bytes = local, "Size unchanged, skipping body");
                false
            }
            _ => {
                let data = self.client.fetch_image(image).await?;
                debug!(%image, bytes = data.len(), "Downloaded image");
                atomic_write(&path, data).await?;
                true
            }
        };

        if let Some(version) = version {
            let version_downloaded = match metadata {
                Some(previous) if !transferred => previous.version_downloaded,
                _ => version.clone(),
            };
            ImageMetadata {
                version_downloaded,
                last_version_checked_against: version,
            }
            .write(&metadata_path)
            .await?;
        }

        Ok(transferred)
    }
}

async fn run_download<T: HttpTransport, D: ImageDecoder>(
    inner: Arc<Inner<T, D>>,
    image: AssetImage,
) -> std::result::Result<(), Arc<ImageError>> {
    let result = match inner.fetch(&image).await {
        Ok(false) if inner.cache.is_memoized(&image) => Ok(()),
        Ok(_) => {
            let cache = inner.cache.clone();
            let refreshed = image.clone();
            tokio::task::spawn_blocking(move || {
                cache.refresh(&refreshed);
            })
            .await
            .map_err(ImageError::from)
        }
        Err(e) => Err(e),
    };

    let result = match result {
        Ok(()) => {
            inner.transition(&image, ImageState::Available);
            Ok(())
        }
        Err(e) => {
            warn!(%image, "Image download failed: {e}");
            let e = Arc::new(e);
            inner.transition(&image, ImageState::Errored(e.clone()));
            Err(e)
        }
    };

    lock(&inner.in_flight).remove(&image);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::png;
    use bytes::Bytes;
    use http::Method;
    use radiant_mock::MockTransport;
    use radiant_mock::fixtures::{BASE_URL, media_url};
    use tempfile::{TempDir, tempdir};

    fn setup(version: Option<&str>) -> (TempDir, MockTransport, ImageManager<MockTransport>) {
        let dir = tempdir().unwrap();
        let transport = MockTransport::new();
        let client = AssetClient::new(BASE_URL, transport.clone()).unwrap();
        let manager = ImageManager::new(
            client,
            ImageManagerConfig {
                cache_dir: dir.path().join("images"),
                version: version.map(String::from),
                ..Default::default()
            },
        );
        (dir, transport, manager)
    }

    fn icon() -> (String, AssetImage) {
        let url = media_url("agents/agent-jett/displayicon.png");
        let image = AssetImage::parse(&url).unwrap();
        (url, image)
    }

    #[tokio::test]
    async fn downloads_and_records_version() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));

        assert!(matches!(manager.state(&image), ImageState::Absent));
        assert!(manager.download(&image).await.is_available());

        assert!(manager.state(&image).is_available());
        assert!(matches!(manager.lookup(&image), ImageLookup::Cached(_)));
        let metadata = ImageMetadata::read(&image.metadata_path(manager.cache_dir()))
            .await
            .unwrap();
        assert_eq!(metadata.version_downloaded, "v1");
        assert_eq!(metadata.last_version_checked_against, "v1");
        assert!(!manager.is_downloading(&image));
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_download() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        transport.set_latency(Duration::from_millis(20));

        let (first, second) = tokio::join!(manager.download(&image), manager.download(&image));

        assert!(first.is_available() && second.is_available());
        assert_eq!(transport.hits(Method::HEAD, &url), 1);
        assert_eq!(transport.hits(Method::GET, &url), 1);
    }

    #[tokio::test]
    async fn verified_version_skips_the_network() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;
        transport.clear_log();

        assert!(manager.download(&image).await.is_available());

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn matching_size_skips_the_body() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;
        transport.clear_log();

        manager.set_version("v2");
        assert!(manager.download(&image).await.is_available());

        assert_eq!(transport.hits(Method::HEAD, &url), 1);
        assert_eq!(transport.hits(Method::GET, &url), 0);
        let metadata = ImageMetadata::read(&image.metadata_path(manager.cache_dir()))
            .await
            .unwrap();
        assert_eq!(metadata.version_downloaded, "v1");
        assert_eq!(metadata.last_version_checked_against, "v2");
    }

    #[tokio::test]
    async fn skipped_download_keeps_the_decoded_bitmap() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;
        let before = manager.lookup(&image);
        transport.clear_log();

        assert!(manager.download(&image).await.is_available());
        let after = manager.lookup(&image);

        assert!(transport.requests().is_empty());
        assert!(Arc::ptr_eq(before.bitmap().unwrap(), after.bitmap().unwrap()));
    }

    #[tokio::test]
    async fn size_match_after_lookup_keeps_the_decoded_bitmap() {
        let (_dir, transport, manager) = setup(None);
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;
        let before = manager.lookup(&image);

        manager.download(&image).await;
        let after = manager.lookup(&image);

        assert_eq!(transport.hits(Method::GET, &url), 1);
        assert!(Arc::ptr_eq(before.bitmap().unwrap(), after.bitmap().unwrap()));
    }

    #[tokio::test]
    async fn skipped_download_resolves_a_stale_missing_entry() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;

        // Memoize a miss while the file is briefly moved away.
        let path = image.local_path(manager.cache_dir());
        let moved = path.with_extension("moved");
        std::fs::rename(&path, &moved).unwrap();
        manager.cache().invalidate(&image);
        assert!(matches!(manager.lookup(&image), ImageLookup::Missing));
        std::fs::rename(&moved, &path).unwrap();

        transport.clear_log();
        assert!(manager.download(&image).await.is_available());
        assert!(transport.requests().is_empty());
        assert!(matches!(manager.lookup(&image), ImageLookup::Cached(_)));
    }

    #[tokio::test]
    async fn changed_size_replaces_the_file() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;

        transport.serve_file(&url, png(32, 32));
        manager.set_version("v2");
        manager.download(&image).await;

        assert_eq!(transport.hits(Method::GET, &url), 2);
        let bitmap = manager.cache().load(&image).unwrap().unwrap();
        assert_eq!(bitmap.width(), 32);
    }

    #[tokio::test]
    async fn failure_leaves_metadata_untouched_and_retry_recovers() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        transport.fail(Method::GET, &url, "connection reset");

        let state = manager.download(&image).await;

        assert!(matches!(
            state.error().map(|e| e.as_ref()),
            Some(ImageError::Client(ClientError::Transport(_)))
        ));
        assert!(manager.state(&image).error().is_some());
        let metadata_path = image.metadata_path(manager.cache_dir());
        assert!(ImageMetadata::read(&metadata_path).await.is_none());

        transport.serve_file(&url, png(16, 16));
        assert!(manager.download(&image).await.is_available());
        assert!(ImageMetadata::read(&metadata_path).await.is_some());
    }

    #[tokio::test]
    async fn missing_remote_file_is_an_error() {
        let (_dir, _transport, manager) = setup(Some("v1"));
        let (_, image) = icon();

        let state = manager.download(&image).await;

        assert!(matches!(
            state.error().map(|e| e.as_ref()),
            Some(ImageError::Client(ClientError::Status(..)))
        ));
    }

    #[tokio::test]
    async fn unknown_version_always_verifies() {
        let (_dir, transport, manager) = setup(None);
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));

        manager.download(&image).await;
        manager.download(&image).await;

        assert_eq!(transport.hits(Method::HEAD, &url), 2);
        assert_eq!(transport.hits(Method::GET, &url), 1);
        assert!(
            ImageMetadata::read(&image.metadata_path(manager.cache_dir()))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn abandoned_download_still_completes() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        transport.set_latency(Duration::from_millis(20));

        let abandoned = tokio::time::timeout(Duration::from_millis(5), manager.download(&image)).await;
        assert!(abandoned.is_err());

        while manager.is_downloading(&image) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(manager.state(&image).is_available());
        assert!(image.local_path(manager.cache_dir()).exists());
    }

    #[tokio::test]
    async fn clear_all_is_idempotent() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, png(16, 16));
        manager.download(&image).await;

        manager.clear_all().await.unwrap();
        manager.clear_all().await.unwrap();

        assert!(!manager.cache_dir().exists());
        assert!(manager.cache().is_empty());
        assert!(matches!(manager.state(&image), ImageState::Absent));
        assert!(matches!(manager.lookup(&image), ImageLookup::Missing));
        assert_eq!(manager.disk_usage().await.unwrap(), DiskUsage::default());
    }

    #[tokio::test]
    async fn disk_usage_counts_files_not_sidecars() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        let data = png(16, 16);
        transport.serve_file(&url, data.clone());
        manager.download(&image).await;

        let usage = manager.disk_usage().await.unwrap();

        assert_eq!(usage.files, 1);
        assert!(usage.bytes > data.len() as u64);
    }

    #[tokio::test]
    async fn subscribers_receive_batched_states() {
        let (_dir, transport, manager) = setup(Some("v1"));
        let (url, image) = icon();
        transport.serve_file(&url, Bytes::from(png(16, 16)));
        let mut batches = manager.subscribe();

        manager.download(&image).await;

        let mut last = ImageState::Absent;
        while !last.is_available() {
            let batch = batches.recv().await.unwrap();
            last = batch.get(&image).cloned().unwrap_or_default();
        }
    }
}
