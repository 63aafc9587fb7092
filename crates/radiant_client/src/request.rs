use crate::{ClientError, Result};

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::Method;
use radiant_core::traits::{HttpTransport, RawRequest, RawResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// A typed HTTP request: where it goes, what it sends, and how its answer is read.
pub trait Request: Send + Sync {
    type Response: Send;

    /// Target URL. Relative endpoints resolve against `base`.
    fn url(&self, base: &Url) -> Result<Url>;

    fn method(&self) -> Method {
        Method::GET
    }

    /// Encoded body, `None` for bodiless requests. See [`json_body`].
    fn body(&self) -> Result<Option<Bytes>> {
        Ok(None)
    }

    /// Decodes a successful (2xx) response.
    fn decode(&self, response: RawResponse) -> Result<Self::Response>;
}

/// JSON-encodes a request body.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Option<Bytes>> {
    serde_json::to_vec(value)
        .map(|data| Some(Bytes::from(data)))
        .map_err(ClientError::Encode)
}

/// Decodes a JSON body. On failure the raw payload travels with the error.
pub fn decode_json<T: DeserializeOwned>(body: Bytes) -> Result<T> {
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
        source,
        payload: body,
    })
}

pub fn decode_text(body: Bytes) -> Result<String> {
    Ok(String::from_utf8(body.to_vec())?)
}

/// Reads the expected body size from the response headers.
pub fn decode_content_length(response: &RawResponse) -> Option<u64> {
    response.content_length()
}

/// Sends [`Request`]s through an [`HttpTransport`].
#[derive(Clone)]
pub struct RequestClient<T: HttpTransport> {
    base_url: Url,
    transport: T,
}

impl<T: HttpTransport> RequestClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send<R: Request>(&self, request: &R) -> Result<R::Response> {
        let url = request.url(&self.base_url)?;
        let mut raw = RawRequest::new(request.method(), url.as_str());
        raw.body = request.body()?;
        if raw.body.is_some() {
            raw.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        debug!(method = %raw.method, url = %raw.url, "Sending request");
        let response = self.transport.execute(raw).await?;

        if !response.status.is_success() {
            let text = String::from_utf8_lossy(&response.body).into_owned();
            return Err(ClientError::Status(response.status, text));
        }

        request.decode(response)
    }
}
