use crate::{ConfigField, TransportFailure};

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum LangfuseError {
    /// A required configuration field was missing or blank.
    #[error("{} is required", .field.env_var())]
    MissingConfig { field: ConfigField },
    /// Request payload could not be encoded as JSON.
    #[error("error marshalling request body: {0}")]
    Serialization(#[source] serde_json::Error),
    /// The client holds no authorization token.
    #[error("basic auth token is required")]
    MissingCredentials,
    /// A header value (token or user agent) contains bytes HTTP forbids.
    #[error("invalid {header} header value")]
    InvalidHeader { header: &'static str },
    /// Network-level failure that survived the retry policy.
    #[error("error making request after {attempts} attempt(s): {source}")]
    Transport {
        attempts: usize,
        #[source]
        source: TransportFailure,
    },
    /// 400-499 response. Never retried.
    #[error("client error {status}: {body}")]
    Client { status: u16, body: String },
    /// Informational or out-of-range status (below 200 or above 599). Never retried.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    /// 5xx response after the retry policy gave up.
    #[error("server error {status}: giving up after {attempts} attempt(s): {body}")]
    Server {
        status: u16,
        body: String,
        attempts: usize,
    },
    /// Response body was not JSON or did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Failure of a resource operation, tagged with what was being done.
    #[error("error {operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<LangfuseError>,
    },
}

impl LangfuseError {
    pub(crate) fn context(operation: &'static str) -> impl FnOnce(LangfuseError) -> LangfuseError {
        move |source| LangfuseError::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, skipping operation context.
    pub fn root(&self) -> &LangfuseError {
        match self {
            LangfuseError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status code for `Client`, `Server` and `UnexpectedStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            LangfuseError::Client { status, .. }
            | LangfuseError::Server { status, .. }
            | LangfuseError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body for `Client`, `Server` and `UnexpectedStatus` errors.
    pub fn body(&self) -> Option<&str> {
        match self.root() {
            LangfuseError::Client { body, .. }
            | LangfuseError::Server { body, .. }
            | LangfuseError::UnexpectedStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
