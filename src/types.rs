use serde::{Deserialize, Serialize};

use crate::wire;

/// Untyped JSON object, for endpoints whose schema the client does not enforce.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// A Langfuse prompt version.
///
/// Serializes to and from the camelCase JSON used by the API; the `type`
/// field selects the [`PromptContent`] variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "wire::PromptRecord", into = "wire::PromptRecord")]
pub struct Prompt {
    pub name: String,
    pub content: PromptContent,
    /// Assigned by the server; leave `None` when creating.
    pub version: Option<u32>,
    pub config: Option<serde_json::Value>,
    pub labels: Vec<String>,
    pub tags: Vec<String>,
    pub commit_message: Option<String>,
}

impl Prompt {
    /// Creates a text prompt with no labels or tags.
    pub fn text(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::with_content(name, PromptContent::Text(template.into()))
    }

    /// Creates a chat prompt with no labels or tags.
    pub fn chat(name: impl Into<String>, messages: impl Into<Vec<ChatMessage>>) -> Self {
        Self::with_content(name, PromptContent::Chat(messages.into()))
    }

    fn with_content(name: impl Into<String>, content: PromptContent) -> Self {
        Self {
            name: name.into(),
            content,
            version: None,
            config: None,
            labels: Vec::new(),
            tags: Vec::new(),
            commit_message: None,
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    /// Wire value of the `type` field.
    pub fn kind(&self) -> &'static str {
        self.content.kind()
    }
}

/// Prompt body, keyed by the prompt's declared type.
#[derive(Clone, Debug, PartialEq)]
pub enum PromptContent {
    /// `"type": "text"`: a single template string.
    Text(String),
    /// `"type": "chat"`: an ordered list of messages.
    Chat(Vec<ChatMessage>),
}

impl PromptContent {
    pub fn kind(&self) -> &'static str {
        match self {
            PromptContent::Text(_) => "text",
            PromptContent::Chat(_) => "chat",
        }
    }
}

/// One entry of a chat prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatMessage {
    /// Role-tagged message (`system`, `user`, `assistant`, ...).
    Message { role: String, content: String },
    /// Slot filled with a message list at compile time.
    Placeholder { name: String },
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Message {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::Placeholder { name: name.into() }
    }
}

/// Selects which version of a prompt to fetch.
///
/// With neither field set the server returns the version labeled `production`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetPromptOptions {
    pub label: Option<String>,
    pub version: Option<u32>,
}

impl GetPromptOptions {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            version: None,
        }
    }

    pub fn version(version: u32) -> Self {
        Self {
            label: None,
            version: Some(version),
        }
    }
}
