//! Single-attempt HTTP transport.
//!
//! The executor owns retry and classification; a [`Transport`] only moves one
//! request over the wire and hands back the status and the fully read body.
//! Swapping the transport lets the executor run against scripted responses.

use std::{error::Error as StdError, fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Fully built outbound request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL with path segments and query already percent-encoded.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Deadline for this attempt.
    pub timeout: Duration,
}

/// Status code and body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network-level failure reported by a [`Transport`].
#[derive(Debug)]
pub struct TransportFailure {
    message: String,
    retryable: bool,
    source: Option<BoxError>,
}

impl TransportFailure {
    /// A failure worth retrying (connection refused, timeout, reset).
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
            source: None,
        }
    }

    /// A failure that will not go away on its own (malformed URL, bad header).
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for TransportFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let retryable = err.is_timeout() || err.is_connect() || err.is_request() || err.is_body();
        Self {
            message: err.to_string(),
            retryable,
            source: Some(Box::new(err)),
        }
    }
}

/// Performs exactly one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// Default transport backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing `reqwest` client, keeping its connection pool and TLS setup.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let url = reqwest::Url::parse(&request.url).map_err(|err| {
            TransportFailure::permanent(format!("invalid request url '{}'", request.url))
                .with_source(err)
        })?;

        let mut builder = self
            .http
            .request(request.method, url)
            .headers(request.headers)
            .timeout(request.timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // Reading to the end hands the connection back to the pool.
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
