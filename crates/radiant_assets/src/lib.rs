//! # Radiant Assets
//!
//! Keeps one [`AssetCollection`] current: compares the remote catalog version
//! with the persisted snapshot, rebuilds when they differ, persists the
//! result and publishes the state through a `watch` channel.
//!
//! ```no_run
//! use radiant_assets::{AssetManager, AssetManagerConfig};
//! use radiant_client::{AssetClient, AssetClientConfig};
//! use radiant_core::store::MemoryStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AssetClient::from_config(&AssetClientConfig::default())?;
//! let manager = AssetManager::new(client, MemoryStore::new(), AssetManagerConfig::default());
//! manager.try_load().await;
//! if let Some(assets) = manager.collection() {
//!     println!("{} weapons", assets.weapons.len());
//! }
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use radiant_client::builder::build_collection;
use radiant_client::{AssetClient, ClientError, DEFAULT_LANGUAGE};
use radiant_core::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Store key of the persisted snapshot.
pub const STORED_KEY: &str = "AssetManager.stored";
/// Store key of the user's language choice.
pub const LANGUAGE_OVERRIDE_KEY: &str = "AssetManager.languageOverride";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to fetch assets: {0}")]
    Client(#[from] ClientError),

    #[error("Asset store error: {0}")]
    Store(#[from] StoreError),

    #[error("Stored asset snapshot is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AssetError>;

#[derive(Clone, Debug)]
pub struct AssetManagerConfig {
    /// Language used when no override is stored.
    ///
    /// Defaults to `en-US`.
    pub default_language: String,
}

impl Default for AssetManagerConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Downloading,
}

/// What subscribers see. `error` is the outcome of the last attempt and does
/// not invalidate `collection`.
#[derive(Debug, Clone, Default)]
pub struct AssetState {
    pub phase: LoadPhase,
    pub collection: Option<Arc<AssetCollection>>,
    pub error: Option<Arc<AssetError>>,
}

impl AssetState {
    pub fn is_downloading(&self) -> bool {
        self.phase == LoadPhase::Downloading
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Another load was running; nothing was done.
    AlreadyLoading,
    /// The current snapshot matched the remote version and language.
    Reused,
    /// A new snapshot was built and persisted.
    Downloaded,
    /// [`AssetManager::reset`] ran while loading; the result was dropped.
    Discarded,
    Failed(Arc<AssetError>),
}

/// Held for the duration of a load. Dropping it, including when the load
/// future is cancelled, returns the manager to idle. `busy` is cleared before
/// the idle phase is published, so a subscriber that sees `Idle` can start
/// the next load.
struct LoadGuard<'a> {
    busy: &'a AtomicBool,
    state: &'a watch::Sender<AssetState>,
}

impl<'a> LoadGuard<'a> {
    fn acquire(busy: &'a AtomicBool, state: &'a watch::Sender<AssetState>) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { busy, state })
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        self.state.send_if_modified(|state| {
            let changed = state.phase != LoadPhase::Idle;
            state.phase = LoadPhase::Idle;
            changed
        });
    }
}

pub struct AssetManager<T: HttpTransport, S: KeyValueStore> {
    client: AssetClient<T>,
    store: S,
    config: AssetManagerConfig,
    state: watch::Sender<AssetState>,
    busy: AtomicBool,
    /// Bumped by every reset; a load that started under an older value does
    /// not publish or persist.
    generation: AtomicU64,
}

impl<T: HttpTransport, S: KeyValueStore> AssetManager<T, S> {
    pub fn new(client: AssetClient<T>, store: S, config: AssetManagerConfig) -> Self {
        Self {
            client,
            store,
            config,
            state: watch::Sender::new(AssetState::default()),
            busy: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &AssetClient<T> {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AssetState {
        self.state.borrow().clone()
    }

    pub fn collection(&self) -> Option<Arc<AssetCollection>> {
        self.state.borrow().collection.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AssetState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Brings the collection up to date with the remote version.
    ///
    /// At most one load runs at a time; a call made while another is running
    /// returns [`LoadOutcome::AlreadyLoading`] immediately. Failures end up in
    /// [`AssetState::error`] and keep the previous collection. A load
    /// overtaken by [`reset`](Self::reset) returns [`LoadOutcome::Discarded`]
    /// and leaves the reset state in place.
    pub async fn try_load(&self) -> LoadOutcome {
        let Some(_guard) = LoadGuard::acquire(&self.busy, &self.state) else {
            debug!("Asset load already in progress");
            return LoadOutcome::AlreadyLoading;
        };

        self.state.send_modify(|state| {
            state.phase = LoadPhase::Downloading;
            state.error = None;
        });

        let generation = self.generation.load(Ordering::Acquire);
        let result = self.load(generation).await;
        if !self.is_current(generation) {
            info!("Asset state was reset during load, dropping result");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok((collection, outcome)) => {
                self.state.send_modify(|state| {
                    state.collection = Some(collection);
                    state.error = None;
                });
                outcome
            }
            Err(e) => {
                error!("Asset load failed: {e}");
                let e = Arc::new(e);
                self.state.send_modify(|state| state.error = Some(e.clone()));
                LoadOutcome::Failed(e)
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    async fn load(&self, generation: u64) -> Result<(Arc<AssetCollection>, LoadOutcome)> {
        let has_collection = self.state.borrow().collection.is_some();
        if !has_collection {
            match self.load_stored().await {
                Ok(Some(stored)) if self.is_current(generation) => {
                    info!(version = %stored.version.version, language = %stored.language, "Restored stored assets");
                    let stored = Arc::new(stored);
                    self.state
                        .send_modify(|state| state.collection = Some(stored));
                }
                Ok(_) => {}
                Err(AssetError::Corrupt(e)) => warn!("Ignoring unreadable stored assets: {e}"),
                Err(e) => return Err(e),
            }
        }

        let language = self.language().await?;
        let version = self.client.fetch_version().await?;

        let current = self.state.borrow().collection.clone();
        if let Some(current) = current {
            if current.version.matches(&version) && current.language == language {
                info!(version = %version.version, %language, "Assets are up to date");
                return Ok((current, LoadOutcome::Reused));
            }
            info!(
                from = %current.version.version,
                to = %version.version,
                %language,
                "Asset version or language changed"
            );
        }

        let collection = Arc::new(build_collection(&self.client, version, &language).await?);
        if !self.is_current(generation) {
            return Ok((collection, LoadOutcome::Discarded));
        }
        if let Err(e) = self.persist(&collection).await {
            // The new snapshot is still served from memory.
            error!("Failed to persist assets: {e}");
        }
        if !self.is_current(generation) {
            // A reset landed while writing.
            self.store.delete(STORED_KEY).await?;
            return Ok((collection, LoadOutcome::Discarded));
        }

        Ok((collection, LoadOutcome::Downloaded))
    }

    /// Reads the persisted snapshot without touching the in-memory state.
    pub async fn load_stored(&self) -> Result<Option<AssetCollection>> {
        let Some(data) = self.store.get(STORED_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(AssetError::Corrupt)
    }

    async fn persist(&self, collection: &AssetCollection) -> Result<()> {
        let data = serde_json::to_vec(collection).map_err(StoreError::from)?;
        self.store.set(STORED_KEY, Bytes::from(data)).await?;
        Ok(())
    }

    pub async fn language_override(&self) -> Result<Option<String>> {
        let Some(data) = self.store.get(LANGUAGE_OVERRIDE_KEY).await? else {
            return Ok(None);
        };
        let language = String::from_utf8_lossy(&data).trim().to_string();
        Ok((!language.is_empty()).then_some(language))
    }

    /// The override if one is stored, the configured default otherwise.
    pub async fn language(&self) -> Result<String> {
        Ok(self
            .language_override()
            .await?
            .unwrap_or_else(|| self.config.default_language.clone()))
    }

    /// Stores (or with `None` clears) the language override and reloads.
    ///
    /// A load already running read the language before the change, so this
    /// waits for it to finish and then loads again in the new language.
    pub async fn set_language_override(&self, language: Option<&str>) -> Result<LoadOutcome> {
        match language.map(str::trim).filter(|l| !l.is_empty()) {
            Some(language) => {
                info!(language, "Setting language override");
                self.store
                    .set(LANGUAGE_OVERRIDE_KEY, Bytes::from(language.to_string()))
                    .await?
            }
            None => {
                info!("Clearing language override");
                self.store.delete(LANGUAGE_OVERRIDE_KEY).await?
            }
        }

        let mut updates = self.subscribe();
        loop {
            match self.try_load().await {
                LoadOutcome::AlreadyLoading => {
                    debug!("Waiting for the running load before applying the language");
                    let finished = updates.wait_for(|state| !state.is_downloading()).await.is_ok();
                    if !finished {
                        return Ok(LoadOutcome::AlreadyLoading);
                    }
                }
                outcome => return Ok(outcome),
            }
        }
    }

    /// Forgets the persisted and in-memory snapshot. Does not fetch.
    ///
    /// A load running at the time finishes its requests, but its result is
    /// neither published nor persisted.
    pub async fn reset(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.store.delete(STORED_KEY).await?;
        self.state.send_modify(|state| {
            state.collection = None;
            state.error = None;
        });
        info!("Asset state reset");
        Ok(())
    }
}
