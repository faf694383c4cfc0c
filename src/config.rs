use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{LangfuseError, Result};

/// Environment variable holding the Langfuse server base URL.
pub const SERVER_URL_ENV: &str = "LANGFUSE_SERVER_URL";
/// Fallback variable for the server URL, as used by the official SDKs.
pub const HOST_ENV: &str = "LANGFUSE_HOST";
/// Environment variable holding the project public key.
pub const PUBLIC_KEY_ENV: &str = "LANGFUSE_PUBLIC_KEY";
/// Environment variable holding the project secret key.
pub const SECRET_KEY_ENV: &str = "LANGFUSE_SECRET_KEY";

/// Required configuration field, in validation order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigField {
    ServerUrl,
    PublicKey,
    SecretKey,
}

impl ConfigField {
    /// Name of the environment variable backing this field.
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigField::ServerUrl => SERVER_URL_ENV,
            ConfigField::PublicKey => PUBLIC_KEY_ENV,
            ConfigField::SecretKey => SECRET_KEY_ENV,
        }
    }
}

/// Validated endpoint and credentials for one Langfuse project.
///
/// Immutable once built. The Basic auth token is derived from the key pair
/// at construction time.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    server_url: String,
    public_key: String,
    secret_key: String,
    auth_token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_url", &self.server_url)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Builds a configuration from explicit values.
    ///
    /// Fields are checked in order (server URL, public key, secret key) and
    /// the first blank one is reported.
    ///
    /// # Example
    ///
    /// ```
    /// use langfuse_http::Config;
    ///
    /// let config = Config::new("https://cloud.langfuse.com", "pk-lf-xxx", "sk-lf-xxx")
    ///     .expect("all fields are present");
    /// assert_eq!(config.server_url(), "https://cloud.langfuse.com");
    /// ```
    pub fn new(
        server_url: impl AsRef<str>,
        public_key: impl AsRef<str>,
        secret_key: impl AsRef<str>,
    ) -> Result<Self> {
        let server_url = required(
            server_url.as_ref().trim().trim_end_matches('/'),
            ConfigField::ServerUrl,
        )?;
        let public_key = required(public_key.as_ref(), ConfigField::PublicKey)?;
        let secret_key = required(secret_key.as_ref(), ConfigField::SecretKey)?;

        Ok(Self {
            server_url: server_url.to_owned(),
            auth_token: basic_auth_token(public_key, secret_key),
            public_key: public_key.to_owned(),
            secret_key: secret_key.to_owned(),
        })
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads:
    /// - `LANGFUSE_SERVER_URL` (or `LANGFUSE_HOST` when unset)
    /// - `LANGFUSE_PUBLIC_KEY`
    /// - `LANGFUSE_SECRET_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration by resolving the `LANGFUSE_*` variable names
    /// through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let server_url = present(SERVER_URL_ENV)
            .or_else(|| present(HOST_ENV))
            .unwrap_or_default();
        let public_key = present(PUBLIC_KEY_ENV).unwrap_or_default();
        let secret_key = present(SECRET_KEY_ENV).unwrap_or_default();

        Self::new(server_url, public_key.trim(), secret_key.trim())
    }

    /// Server base URL without a trailing slash.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// `base64(public_key + ":" + secret_key)`, sent as `Authorization: Basic <token>`.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

/// Rejects blank values; non-blank values are returned untouched.
fn required(value: &str, field: ConfigField) -> Result<&str> {
    if value.trim().is_empty() {
        return Err(LangfuseError::MissingConfig { field });
    }
    Ok(value)
}

pub(crate) fn basic_auth_token(public_key: &str, secret_key: &str) -> String {
    STANDARD.encode(format!("{public_key}:{secret_key}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use base64::{engine::general_purpose::STANDARD, Engine};

    use super::{Config, ConfigField};
    use crate::LangfuseError;

    fn missing_field(err: LangfuseError) -> ConfigField {
        match err {
            LangfuseError::MissingConfig { field } => field,
            other => panic!("expected missing config error, got {other:?}"),
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn derives_basic_auth_token() {
        let config = Config::new("https://cloud.langfuse.com", "pk-lf-test-123", "sk-lf-test-456")
            .expect("must build config");

        let expected = STANDARD.encode("pk-lf-test-123:sk-lf-test-456");
        assert_eq!(config.auth_token(), expected);

        let decoded = STANDARD
            .decode(config.auth_token())
            .expect("token must be valid base64");
        assert_eq!(decoded, b"pk-lf-test-123:sk-lf-test-456");
    }

    #[test]
    fn token_round_trips_keys_with_special_characters() {
        let pairs = [
            ("pk", "sk"),
            ("pk:with:colons", "sk"),
            ("pk-ünïcode", "sk/+=="),
            ("a", "b c d"),
        ];
        for (public_key, secret_key) in pairs {
            let config = Config::new("http://localhost:3000", public_key, secret_key)
                .expect("must build config");
            let decoded = STANDARD.decode(config.auth_token()).expect("valid base64");
            assert_eq!(
                String::from_utf8(decoded).expect("valid utf-8"),
                format!("{public_key}:{secret_key}")
            );
        }
    }

    #[test]
    fn validation_reports_first_missing_field() {
        let err = Config::new("", "", "").expect_err("must fail");
        assert_eq!(missing_field(err), ConfigField::ServerUrl);

        let err = Config::new("https://cloud.langfuse.com", "", "").expect_err("must fail");
        assert_eq!(missing_field(err), ConfigField::PublicKey);

        let err = Config::new("https://cloud.langfuse.com", "pk", "").expect_err("must fail");
        assert_eq!(missing_field(err), ConfigField::SecretKey);

        let err = Config::new("", "pk", "").expect_err("must fail");
        assert_eq!(missing_field(err), ConfigField::ServerUrl);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let err = Config::new("https://cloud.langfuse.com", "   ", "sk").expect_err("must fail");
        assert_eq!(missing_field(err), ConfigField::PublicKey);
    }

    #[test]
    fn strips_trailing_slash_from_server_url() {
        let config = Config::new("http://localhost:3000/", "pk", "sk").expect("must build");
        assert_eq!(config.server_url(), "http://localhost:3000");
    }

    #[test]
    fn slash_only_server_url_counts_as_missing() {
        for url in ["/", "//", " / "] {
            let err = Config::new(url, "pk", "sk").expect_err("must fail");
            assert_eq!(missing_field(err), ConfigField::ServerUrl);
        }
    }

    #[test]
    fn explicit_keys_are_encoded_verbatim() {
        let config =
            Config::new("http://localhost:3000", " pk ", "sk\t").expect("must build config");

        assert_eq!(config.public_key(), " pk ");
        assert_eq!(config.secret_key(), "sk\t");
        let decoded = STANDARD.decode(config.auth_token()).expect("valid base64");
        assert_eq!(decoded, b" pk :sk\t");
    }

    #[test]
    fn lookup_trims_environment_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("LANGFUSE_SERVER_URL", " https://test.langfuse.com/ "),
            ("LANGFUSE_PUBLIC_KEY", " pk\n"),
            ("LANGFUSE_SECRET_KEY", "sk "),
        ]))
        .expect("must build from lookup");

        assert_eq!(config.server_url(), "https://test.langfuse.com");
        assert_eq!(config.auth_token(), STANDARD.encode("pk:sk"));
    }

    #[test]
    fn keeps_custom_server_urls() {
        for url in [
            "https://cloud.langfuse.com",
            "https://us.cloud.langfuse.com",
            "https://eu.cloud.langfuse.com",
            "https://langfuse.example.com",
            "http://localhost:3000",
        ] {
            let config = Config::new(url, "pk-test", "sk-test").expect("must build");
            assert_eq!(config.server_url(), url);
        }
    }

    #[test]
    fn lookup_reads_langfuse_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("LANGFUSE_SERVER_URL", "https://test.langfuse.com"),
            ("LANGFUSE_PUBLIC_KEY", "test-public-key"),
            ("LANGFUSE_SECRET_KEY", "test-secret-key"),
        ]))
        .expect("must build from lookup");

        assert_eq!(config.server_url(), "https://test.langfuse.com");
        assert_eq!(
            config.auth_token(),
            STANDARD.encode("test-public-key:test-secret-key")
        );
    }

    #[test]
    fn lookup_falls_back_to_host_variable() {
        let config = Config::from_lookup(lookup_from(&[
            ("LANGFUSE_SERVER_URL", ""),
            ("LANGFUSE_HOST", "https://eu.cloud.langfuse.com"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
            ("LANGFUSE_SECRET_KEY", "sk"),
        ]))
        .expect("must build from lookup");

        assert_eq!(config.server_url(), "https://eu.cloud.langfuse.com");
    }

    #[test]
    fn lookup_reports_missing_variables_in_order() {
        let err = Config::from_lookup(lookup_from(&[])).expect_err("must fail");
        assert_eq!(err.to_string(), "LANGFUSE_SERVER_URL is required");

        let err = Config::from_lookup(lookup_from(&[
            ("LANGFUSE_SERVER_URL", "https://test.langfuse.com"),
            ("LANGFUSE_SECRET_KEY", "sk"),
        ]))
        .expect_err("must fail");
        assert_eq!(err.to_string(), "LANGFUSE_PUBLIC_KEY is required");

        let err = Config::from_lookup(lookup_from(&[
            ("LANGFUSE_SERVER_URL", "https://test.langfuse.com"),
            ("LANGFUSE_PUBLIC_KEY", "pk"),
        ]))
        .expect_err("must fail");
        assert_eq!(err.to_string(), "LANGFUSE_SECRET_KEY is required");
    }

    #[test]
    fn independent_configs_do_not_interfere() {
        let first = Config::new("https://a.example.com", "pk-a", "sk-a").expect("must build");
        let second = Config::new("https://b.example.com", "pk-b", "sk-b").expect("must build");

        assert_ne!(first.auth_token(), second.auth_token());
        assert_eq!(first.server_url(), "https://a.example.com");
        assert_eq!(second.server_url(), "https://b.example.com");
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = Config::new("https://cloud.langfuse.com", "pk", "super-secret")
            .expect("must build");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains(config.auth_token()));
    }
}
