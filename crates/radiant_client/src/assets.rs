use crate::endpoints::{self, ImageData, ImageSize, RawEndpoint};
use crate::request::RequestClient;
use crate::transport::ReqwestTransport;
use crate::Result;

use bytes::Bytes;
use radiant_core::prelude::*;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://valorant-api.com";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Clone, Debug)]
pub struct AssetClientConfig {
    /// Root of the asset API.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Per-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for AssetClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Typed access to every asset endpoint.
#[derive(Clone)]
pub struct AssetClient<T: HttpTransport> {
    requests: RequestClient<T>,
}

impl AssetClient<ReqwestTransport> {
    pub fn from_config(config: &AssetClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout)?;
        Self::new(&config.base_url, transport)
    }
}

impl<T: HttpTransport> AssetClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self> {
        Ok(Self {
            requests: RequestClient::new(base_url, transport)?,
        })
    }

    pub fn requests(&self) -> &RequestClient<T> {
        &self.requests
    }

    pub async fn fetch_version(&self) -> Result<AssetVersion> {
        self.requests.send(&endpoints::version()).await
    }

    pub async fn fetch_agents(&self, language: &str) -> Result<Vec<Agent>> {
        let agents = self.requests.send(&endpoints::agents(language)).await?;
        Ok(agents.into_inner())
    }

    pub async fn fetch_maps(&self, language: &str) -> Result<Vec<MapInfo>> {
        self.requests.send(&endpoints::maps(language)).await
    }

    pub async fn fetch_weapons(&self, language: &str) -> Result<Vec<Weapon>> {
        self.requests.send(&endpoints::weapons(language)).await
    }

    pub async fn fetch_missions(&self, language: &str) -> Result<Vec<Mission>> {
        self.requests.send(&endpoints::missions(language)).await
    }

    pub async fn fetch_objectives(&self, language: &str) -> Result<Vec<Objective>> {
        self.requests.send(&endpoints::objectives(language)).await
    }

    pub async fn fetch_contracts(&self, language: &str) -> Result<Vec<Contract>> {
        self.requests.send(&endpoints::contracts(language)).await
    }

    pub async fn fetch_game_modes(&self, language: &str) -> Result<Vec<GameMode>> {
        self.requests.send(&endpoints::game_modes(language)).await
    }

    pub async fn fetch_queues(&self, language: &str) -> Result<Vec<Queue>> {
        self.requests.send(&endpoints::queues(language)).await
    }

    pub async fn fetch_player_cards(&self, language: &str) -> Result<Vec<PlayerCard>> {
        self.requests.send(&endpoints::player_cards(language)).await
    }

    pub async fn fetch_player_titles(&self, language: &str) -> Result<Vec<PlayerTitle>> {
        self.requests.send(&endpoints::player_titles(language)).await
    }

    pub async fn fetch_seasons(&self, language: &str) -> Result<Vec<Season>> {
        self.requests.send(&endpoints::seasons(language)).await
    }

    pub async fn fetch_competitive_seasons(&self, language: &str) -> Result<Vec<CompetitiveSeason>> {
        self.requests
            .send(&endpoints::competitive_seasons(language))
            .await
    }

    pub async fn fetch_competitive_tiers(
        &self,
        language: &str,
    ) -> Result<Vec<CompetitiveTierTable>> {
        self.requests.send(&endpoints::competitive_tiers(language)).await
    }

    pub async fn fetch_sprays(&self, language: &str) -> Result<Vec<Spray>> {
        self.requests.send(&endpoints::sprays(language)).await
    }

    pub async fn fetch_buddies(&self, language: &str) -> Result<Vec<Buddy>> {
        self.requests.send(&endpoints::buddies(language)).await
    }

    pub async fn fetch_currencies(&self, language: &str) -> Result<Vec<Currency>> {
        self.requests.send(&endpoints::currencies(language)).await
    }

    pub async fn fetch_bundles(&self, language: &str) -> Result<Vec<Bundle>> {
        self.requests.send(&endpoints::bundles(language)).await
    }

    pub async fn fetch_content_tiers(&self, language: &str) -> Result<Vec<ContentTier>> {
        self.requests.send(&endpoints::content_tiers(language)).await
    }

    /// Raw response text of any endpoint, for inspection.
    pub async fn fetch_raw(&self, path: &str) -> Result<String> {
        self.requests
            .send(&RawEndpoint {
                path: path.to_string(),
            })
            .await
    }

    pub async fn fetch_image(&self, image: &AssetImage) -> Result<Bytes> {
        self.requests.send(&ImageData(image)).await
    }

    pub async fn fetch_image_size(&self, image: &AssetImage) -> Result<Option<u64>> {
        self.requests.send(&ImageSize(image)).await
    }
}
