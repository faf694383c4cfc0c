use std::{fmt, sync::Arc};

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::sleep;

use crate::{
    request::{build_url, QueryString},
    ClientOptions, Config, HttpRequest, HttpResponse, LangfuseError, Projects, Prompts,
    ReqwestTransport, Result, Transport, TransportFailure,
};

#[derive(Clone)]
/// HTTP client for the Langfuse public API.
///
/// Cloning is cheap; clones share the transport and read the same
/// immutable credentials.
pub struct LangfuseClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    token: String,
    options: ClientOptions,
}

impl fmt::Debug for LangfuseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangfuseClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl LangfuseClient {
    /// Creates a client from a validated [`Config`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use langfuse_http::{Config, LangfuseClient};
    ///
    /// let config = Config::from_env().expect("missing LANGFUSE_* env vars");
    /// let client = LangfuseClient::new(&config);
    /// ```
    pub fn new(config: &Config) -> Self {
        Self::from_token(config.server_url(), config.auth_token())
    }

    /// Creates a client from a base URL and an already-encoded Basic token.
    ///
    /// An empty token is accepted here; every request then fails with
    /// [`LangfuseError::MissingCredentials`] before touching the network.
    pub fn from_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.into(),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from `LANGFUSE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Config::from_env().map(|config| Self::new(&config))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the transport, e.g. with a preconfigured `reqwest::Client`
    /// or a scripted one in tests.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Project endpoints.
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    /// Prompt endpoints.
    pub fn prompts(&self) -> Prompts<'_> {
        Prompts::new(self)
    }

    /// Sends one request and returns the raw body of a 2xx/3xx response.
    ///
    /// `path` must already be percent-encoded; build dynamic segments with
    /// [`crate::encode_path_segment`]. 5xx responses and retryable network
    /// failures are retried per [`crate::RetryPolicy`]; 4xx responses are
    /// returned at once as [`LangfuseError::Client`].
    pub async fn execute<T>(
        &self,
        method: Method,
        path: &str,
        query: &QueryString,
        payload: Option<&T>,
    ) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let body = payload
            .map(serde_json::to_vec)
            .transpose()
            .map_err(LangfuseError::Serialization)?;

        if self.token.is_empty() {
            return Err(LangfuseError::MissingCredentials);
        }

        let url = build_url(&self.base_url, path, query);
        let headers = self.headers(body.is_some())?;
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: self.options.timeout(),
        };

        let response = self.send_with_retry(request).await?;
        Ok(response.body)
    }

    /// `GET` and decode the JSON response.
    pub async fn get_json<R>(&self, path: &str, query: &QueryString) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = self
            .execute::<()>(Method::GET, path, query, None)
            .await?;
        decode_json(&body)
    }

    /// Send a JSON payload and decode the JSON response.
    pub async fn send_json<T, R>(&self, method: Method, path: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self
            .execute(method, path, &QueryString::new(), Some(payload))
            .await?;
        decode_json(&body)
    }

    fn headers(&self, has_body: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&format!("Basic {}", self.token))
            .map_err(|_| LangfuseError::InvalidHeader {
                header: "authorization",
            })?;
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        if has_body {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        let user_agent = HeaderValue::from_str(&self.options.user_agent).map_err(|_| {
            LangfuseError::InvalidHeader {
                header: "user-agent",
            }
        })?;
        headers.insert(header::USER_AGENT, user_agent);
        Ok(headers)
    }

    async fn send_with_retry(&self, request: HttpRequest) -> Result<HttpResponse> {
        let policy = &self.options.retry;
        let max_attempts = policy.attempts();
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                "sending langfuse request"
            );

            match self.transport.send(request.clone()).await {
                Ok(response) => match response.status {
                    200..=399 => return Ok(response),
                    500..=599 if attempt < max_attempts => {
                        self.wait_before_retry(attempt - 1, RetryCause::Status(response.status))
                            .await;
                    }
                    500..=599 => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            status = response.status,
                            attempts = attempt,
                            "langfuse request failed after retries"
                        );
                        return Err(LangfuseError::Server {
                            status: response.status,
                            body: response.text(),
                            attempts: attempt,
                        });
                    }
                    400..=499 => {
                        return Err(LangfuseError::Client {
                            status: response.status,
                            body: response.text(),
                        })
                    }
                    _ => {
                        return Err(LangfuseError::UnexpectedStatus {
                            status: response.status,
                            body: response.text(),
                        })
                    }
                },
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    self.wait_before_retry(attempt - 1, RetryCause::Transport(&err))
                        .await;
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        error = %err,
                        attempts = attempt,
                        "langfuse request failed"
                    );
                    return Err(LangfuseError::Transport {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Sleeps for the policy backoff before retry number `retry`.
    async fn wait_before_retry(&self, retry: usize, cause: RetryCause<'_>) {
        let delay = self.options.retry.backoff(retry);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            cause = %cause,
            "retrying langfuse request"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = cause;

        sleep(delay).await;
    }
}

enum RetryCause<'a> {
    Status(u16),
    Transport(&'a TransportFailure),
}

impl fmt::Display for RetryCause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryCause::Status(status) => write!(f, "status {status}"),
            RetryCause::Transport(err) => write!(f, "transport error: {err}"),
        }
    }
}

fn decode_json<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    serde_json::from_slice(body).map_err(|err| {
        LangfuseError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            String::from_utf8_lossy(body)
        ))
    })
}
