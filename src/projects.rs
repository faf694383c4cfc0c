use crate::{JsonObject, LangfuseClient, LangfuseError, QueryString, Result};

const PROJECTS_PATH: &str = "/api/public/projects";

/// Project endpoints, borrowed from a [`LangfuseClient`].
#[derive(Clone, Copy, Debug)]
pub struct Projects<'a> {
    client: &'a LangfuseClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a LangfuseClient) -> Self {
        Self { client }
    }

    /// Fetches the project(s) the API keys belong to.
    ///
    /// The response is returned as an untyped JSON object.
    pub async fn get(&self) -> Result<JsonObject> {
        self.client
            .get_json(PROJECTS_PATH, &QueryString::new())
            .await
            .map_err(LangfuseError::context("fetching project"))
    }
}
