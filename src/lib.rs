//! `langfuse-http` is an async HTTP client for the Langfuse public API.
//!
//! The crate wraps the project and prompt endpoints:
//! - [`Projects::get`]
//! - [`Prompts::list`], [`Prompts::get`], [`Prompts::create`]
//! - [`Prompts::update_version_labels`]
//!
//! Every call goes through [`LangfuseClient::execute`], which adds Basic
//! auth, retries 5xx responses and network failures with bounded backoff,
//! and maps 4xx responses to [`LangfuseError::Client`].

mod client;
mod config;
mod decode;
mod error;
mod options;
mod projects;
mod prompts;
mod request;
mod transport;
mod types;
mod wire;

pub use client::LangfuseClient;
pub use config::{Config, ConfigField, HOST_ENV, PUBLIC_KEY_ENV, SECRET_KEY_ENV, SERVER_URL_ENV};
pub use error::LangfuseError;
pub use options::{ClientOptions, RetryPolicy, DEFAULT_USER_AGENT};
pub use projects::Projects;
pub use prompts::Prompts;
pub use request::{encode_path_segment, QueryString};
pub use reqwest::Method;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportFailure};
pub use types::{ChatMessage, GetPromptOptions, JsonObject, Prompt, PromptContent};

pub type Result<T> = std::result::Result<T, LangfuseError>;
