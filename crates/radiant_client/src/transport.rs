use crate::{ClientError, Result};

use radiant_core::error::TransportError;
use radiant_core::traits::{HttpTransport, RawRequest, RawResponse};
use reqwest::Client;
use std::time::Duration;

/// [`HttpTransport`] backed by a shared `reqwest` connection pool.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Setup)?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RawRequest) -> std::result::Result<RawResponse, TransportError> {
        let RawRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::with_source(format!("Request to {url} failed"), e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            TransportError::with_source(format!("Failed to read response body from {url}"), e)
        })?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
