use crate::error::*;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

/// Persistent key-value slots. Writers are last-write-wins.
pub trait KeyValueStore: Send + Sync + 'static + Clone {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Bytes>, StoreError>> + Send;
    fn set(&self, key: &str, value: Bytes) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// A fully built request, ready to go on the wire.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RawRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::HEAD, url)
    }
}

/// Status, headers and the complete body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// The `Content-Length` header, if present and well-formed.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(http::header::CONTENT_LENGTH)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.trim().parse::<u64>().ok())
    }
}

/// Moves a [`RawRequest`] over the network. Status codes are not interpreted here.
pub trait HttpTransport: Send + Sync + 'static + Clone {
    fn execute(
        &self,
        request: RawRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
