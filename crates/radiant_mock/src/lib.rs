//! A scripted [`HttpTransport`] for tests and demos.
//!
//! Routes match on method and URL with the query string stripped. Every
//! executed request is recorded so tests can assert on what went over the
//! "wire". Unknown routes answer `404`.

pub mod fixtures;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, HeaderValue};
use http::{Method, StatusCode};
use radiant_core::error::TransportError;
use radiant_core::traits::{HttpTransport, RawRequest, RawResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Respond(RawResponse),
    Fail(String),
}

#[derive(Default)]
struct Routes {
    replies: HashMap<(Method, String), Reply>,
    log: Vec<RawRequest>,
    latency: Duration,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<Routes>>,
}

fn route_key(url: &str) -> String {
    url.split(['?', '#']).next().unwrap_or(url).to_string()
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn routes(&self) -> MutexGuard<'_, Routes> {
        // A panicking test thread poisons the lock; the data is still usable.
        self.routes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answers `method url` with `response`, replacing any earlier route.
    pub fn on(&self, method: Method, url: &str, response: RawResponse) -> &Self {
        self.routes()
            .replies
            .insert((method, route_key(url)), Reply::Respond(response));
        self
    }

    pub fn on_json(&self, method: Method, url: &str, body: serde_json::Value) -> &Self {
        self.on(method, url, RawResponse::new(StatusCode::OK, body.to_string()))
    }

    /// Serves a file: `GET` returns `data`, `HEAD` reports its length.
    pub fn serve_file(&self, url: &str, data: impl Into<Bytes>) -> &Self {
        let data = data.into();
        self.serve_file_with_length(url, data.clone(), data.len() as u64)
    }

    /// Like [`MockTransport::serve_file`] but `HEAD` reports `length`.
    pub fn serve_file_with_length(&self, url: &str, data: Bytes, length: u64) -> &Self {
        let mut head = RawResponse::new(StatusCode::OK, Bytes::new());
        head.headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        self.on(Method::HEAD, url, head);
        self.on(Method::GET, url, RawResponse::new(StatusCode::OK, data))
    }

    /// Fails `method url` below the HTTP layer.
    pub fn fail(&self, method: Method, url: &str, message: &str) -> &Self {
        self.routes()
            .replies
            .insert((method, route_key(url)), Reply::Fail(message.to_string()));
        self
    }

    pub fn remove(&self, method: Method, url: &str) -> &Self {
        self.routes().replies.remove(&(method, route_key(url)));
        self
    }

    /// Delay applied before every reply.
    pub fn set_latency(&self, latency: Duration) -> &Self {
        self.routes().latency = latency;
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<RawRequest> {
        self.routes().log.clone()
    }

    /// Number of executed requests for `method url`, ignoring the query string.
    pub fn hits(&self, method: Method, url: &str) -> usize {
        let key = route_key(url);
        self.routes()
            .log
            .iter()
            .filter(|r| r.method == method && route_key(&r.url) == key)
            .count()
    }

    pub fn clear_log(&self) {
        self.routes().log.clear();
    }
}

impl HttpTransport for MockTransport {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        let (reply, latency) = {
            let mut routes = self.routes();
            let reply = routes
                .replies
                .get(&(request.method.clone(), route_key(&request.url)))
                .cloned();
            routes.log.push(request);
            (reply, routes.latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError::new(message)),
            None => Ok(RawResponse::new(StatusCode::NOT_FOUND, "no route")),
        }
    }
}
