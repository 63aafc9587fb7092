//! # Radiant Client
//!
//! HTTP side of the radiant asset client:
//!
//! * [`request`]: the [`Request`] trait and [`RequestClient`], which turn typed
//!   requests into [`RawRequest`](radiant_core::traits::RawRequest)s and decode
//!   the answers.
//! * [`endpoints`]: one request per asset API endpoint, plus image fetches.
//! * [`AssetClient`]: convenience methods over those endpoints.
//! * [`builder`]: concurrent fetch of every category into one
//!   [`AssetCollection`](radiant_core::collection::AssetCollection).
//!
//! ```no_run
//! use radiant_client::{AssetClient, AssetClientConfig};
//!
//! # async fn run() -> radiant_client::Result<()> {
//! let client = AssetClient::from_config(&AssetClientConfig::default())?;
//! let version = client.fetch_version().await?;
//! let assets = radiant_client::builder::build_collection(&client, version, "en-US").await?;
//! println!("{} agents", assets.agents.len());
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use http::StatusCode;
use radiant_core::error::TransportError;
use thiserror::Error;

mod assets;
pub mod builder;
pub mod endpoints;
pub mod envelope;
pub mod request;
mod transport;

pub use assets::{AssetClient, AssetClientConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use envelope::{Envelope, LossyList};
pub use request::{Request, RequestClient};
pub use transport::ReqwestTransport;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server returned error {0}: {1}")]
    Status(StatusCode, String),

    /// The body did not match the expected shape. `payload` keeps the raw
    /// bytes for diagnosis.
    #[error("Failed to decode response ({} bytes): {source}", .payload.len())]
    Decode {
        #[source]
        source: serde_json::Error,
        payload: Bytes,
    },

    #[error("Response is not valid UTF-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl ClientError {
    /// The undecoded body, for decode failures.
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            ClientError::Decode { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
