use reqwest::Method;

use crate::{
    encode_path_segment, wire::UpdateLabelsRequest, GetPromptOptions, JsonObject, LangfuseClient,
    LangfuseError, Prompt, QueryString, Result,
};

const PROMPTS_PATH: &str = "/api/public/v2/prompts";

/// Prompt endpoints, borrowed from a [`LangfuseClient`].
#[derive(Clone, Copy, Debug)]
pub struct Prompts<'a> {
    client: &'a LangfuseClient,
}

impl<'a> Prompts<'a> {
    pub(crate) fn new(client: &'a LangfuseClient) -> Self {
        Self { client }
    }

    /// Lists prompt metadata. The payload (`data`, `meta`) is returned as-is.
    pub async fn list(&self) -> Result<JsonObject> {
        self.client
            .get_json(PROMPTS_PATH, &QueryString::new())
            .await
            .map_err(LangfuseError::context("listing prompts"))
    }

    /// Fetches one prompt version by name.
    ///
    /// `label` is sent only when non-empty and `version` only when set.
    pub async fn get(&self, name: &str, options: GetPromptOptions) -> Result<Prompt> {
        let mut query = QueryString::new();
        if let Some(label) = options.label.as_deref().filter(|label| !label.is_empty()) {
            query.push("label", label);
        }
        if let Some(version) = options.version {
            query.push("version", version.to_string());
        }

        self.client
            .get_json(&prompt_path(name), &query)
            .await
            .map_err(LangfuseError::context("fetching prompt"))
    }

    /// Creates a new prompt, or a new version of an existing one.
    ///
    /// Returns the stored record including the version assigned by the server.
    pub async fn create(&self, prompt: &Prompt) -> Result<Prompt> {
        self.client
            .send_json(Method::POST, PROMPTS_PATH, prompt)
            .await
            .map_err(LangfuseError::context("creating prompt"))
    }

    /// Replaces the labels of one prompt version.
    ///
    /// An empty slice removes all labels; it is sent as `"newLabels": []`.
    pub async fn update_version_labels(
        &self,
        name: &str,
        version: u32,
        new_labels: &[String],
    ) -> Result<Prompt> {
        let path = format!("{}/versions/{version}", prompt_path(name));
        let body = UpdateLabelsRequest { new_labels };

        self.client
            .send_json(Method::PATCH, &path, &body)
            .await
            .map_err(LangfuseError::context("updating prompt version labels"))
    }
}

fn prompt_path(name: &str) -> String {
    format!("{PROMPTS_PATH}/{}", encode_path_segment(name))
}
