//! Requests for the asset API (`/v1/...`) and for image files.

use crate::envelope::{Envelope, LossyList};
use crate::request::{Request, decode_content_length, decode_json, decode_text};
use crate::Result;

use bytes::Bytes;
use http::Method;
use radiant_core::prelude::*;
use radiant_core::traits::RawResponse;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::Url;

/// `GET <base>/<path>?<query>` answered by an [`Envelope`] around `T`.
#[derive(Debug, Clone)]
pub struct EndpointRequest<T> {
    path: &'static str,
    query: Vec<(&'static str, String)>,
    _response: PhantomData<fn() -> T>,
}

impl<T> EndpointRequest<T> {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            query: Vec::new(),
            _response: PhantomData,
        }
    }

    pub fn localized(path: &'static str, language: &str) -> Self {
        Self::new(path).with_query("language", language)
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<T: DeserializeOwned + Send> Request for EndpointRequest<T> {
    type Response = T;

    fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join(self.path)?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn decode(&self, response: RawResponse) -> Result<T> {
        decode_json::<Envelope<T>>(response.body).map(|envelope| envelope.data)
    }
}

pub fn version() -> EndpointRequest<AssetVersion> {
    EndpointRequest::new("v1/version")
}

pub fn agents(language: &str) -> EndpointRequest<LossyList<Agent>> {
    EndpointRequest::localized("v1/agents", language).with_query("isPlayableCharacter", "true")
}

pub fn maps(language: &str) -> EndpointRequest<Vec<MapInfo>> {
    EndpointRequest::localized("v1/maps", language)
}

pub fn weapons(language: &str) -> EndpointRequest<Vec<Weapon>> {
    EndpointRequest::localized("v1/weapons", language)
}

pub fn missions(language: &str) -> EndpointRequest<Vec<Mission>> {
    EndpointRequest::localized("v1/missions", language)
}

pub fn objectives(language: &str) -> EndpointRequest<Vec<Objective>> {
    EndpointRequest::localized("v1/objectives", language)
}

pub fn contracts(language: &str) -> EndpointRequest<Vec<Contract>> {
    EndpointRequest::localized("v1/contracts", language)
}

pub fn game_modes(language: &str) -> EndpointRequest<Vec<GameMode>> {
    EndpointRequest::localized("v1/gamemodes", language)
}

pub fn queues(language: &str) -> EndpointRequest<Vec<Queue>> {
    EndpointRequest::localized("v1/gamemodes/queues", language)
}

pub fn player_cards(language: &str) -> EndpointRequest<Vec<PlayerCard>> {
    EndpointRequest::localized("v1/playercards", language)
}

pub fn player_titles(language: &str) -> EndpointRequest<Vec<PlayerTitle>> {
    EndpointRequest::localized("v1/playertitles", language)
}

pub fn seasons(language: &str) -> EndpointRequest<Vec<Season>> {
    EndpointRequest::localized("v1/seasons", language)
}

pub fn competitive_seasons(language: &str) -> EndpointRequest<Vec<CompetitiveSeason>> {
    EndpointRequest::localized("v1/seasons/competitive", language)
}

pub fn competitive_tiers(language: &str) -> EndpointRequest<Vec<CompetitiveTierTable>> {
    EndpointRequest::localized("v1/competitivetiers", language)
}

pub fn sprays(language: &str) -> EndpointRequest<Vec<Spray>> {
    EndpointRequest::localized("v1/sprays", language)
}

pub fn buddies(language: &str) -> EndpointRequest<Vec<Buddy>> {
    EndpointRequest::localized("v1/buddies", language)
}

pub fn currencies(language: &str) -> EndpointRequest<Vec<Currency>> {
    EndpointRequest::localized("v1/currencies", language)
}

pub fn bundles(language: &str) -> EndpointRequest<Vec<Bundle>> {
    EndpointRequest::localized("v1/bundles", language)
}

pub fn content_tiers(language: &str) -> EndpointRequest<Vec<ContentTier>> {
    EndpointRequest::localized("v1/contenttiers", language)
}

/// Any path below the base URL, returned as text without unwrapping.
#[derive(Debug, Clone)]
pub struct RawEndpoint {
    pub path: String,
}

impl Request for RawEndpoint {
    type Response = String;

    fn url(&self, base: &Url) -> Result<Url> {
        Ok(base.join(self.path.trim_start_matches('/'))?)
    }

    fn decode(&self, response: RawResponse) -> Result<String> {
        decode_text(response.body)
    }
}

/// `GET` of an image file's bytes.
#[derive(Debug, Clone)]
pub struct ImageData<'a>(pub &'a AssetImage);

impl Request for ImageData<'_> {
    type Response = Bytes;

    fn url(&self, _base: &Url) -> Result<Url> {
        Ok(self.0.url().clone())
    }

    fn decode(&self, response: RawResponse) -> Result<Bytes> {
        Ok(response.body)
    }
}

/// `HEAD` probe for an image file's size, `None` if the server does not say.
#[derive(Debug, Clone)]
pub struct ImageSize<'a>(pub &'a AssetImage);

impl Request for ImageSize<'_> {
    type Response = Option<u64>;

    fn url(&self, _base: &Url) -> Result<Url> {
        Ok(self.0.url().clone())
    }

    fn method(&self) -> Method {
        Method::HEAD
    }

    fn decode(&self, response: RawResponse) -> Result<Option<u64>> {
        Ok(decode_content_length(&response))
    }
}
