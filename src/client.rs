//! The GraphQL request helper: one HTTP POST per operation, decoded into a
//! tagged result.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::graphql::{GraphQlRequest, GraphQlResponse};
use crate::utils::string::{MAX_PREVIEW_LEN, safe_preview};
use crate::validation;

/// Header carrying the workspace API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A client for one workspace of the remote service.
///
/// Owns the HTTP connection pool, the endpoint, and the credentials; all
/// configuration is scoped to the instance, not the process. Requests are
/// issued one at a time by callers; the client itself performs a single
/// attempt per operation with no retry or backoff.
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
    app_base: String,
    api_key: SecretString,
    workspace_id: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint.as_str())
            .field("workspace_id", &self.workspace_id)
            .field("api_key", &"<secret>")
            .finish()
    }
}

impl Client {
    /// Builds a client from configuration, validating it up front.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.api.endpoint)
            .map_err(|e| Error::Validation(format!("Invalid endpoint URL: {}", e)))?;

        validation::validate_workspace_id(&config.api.workspace_id)?;

        let api_key = config.api.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(Error::Validation("API key cannot be empty".to_string()));
        }
        // Reject keys that cannot be sent as a header value instead of
        // failing on every request.
        HeaderValue::from_str(api_key)
            .map_err(|_| Error::Validation("API key is not a valid header value".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .user_agent(concat!("calctree-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            app_base: config.api.app_base.trim_end_matches('/').to_string(),
            api_key: config.api.api_key.clone(),
            workspace_id: config.api.workspace_id.trim().to_string(),
        })
    }

    /// The workspace all operations are scoped to.
    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// The user-facing edit URL of a page in this workspace.
    pub fn page_url(&self, page_id: &str) -> String {
        format!("{}/edit/{}/{}", self.app_base, self.workspace_id, page_id)
    }

    /// Executes one GraphQL operation and decodes the response envelope.
    ///
    /// The returned [`GraphQlResponse`] always carries at least one of
    /// `data` or `errors`; use [`GraphQlResponse::into_data`] or the typed
    /// [`Client::request`] to apply the errors-first contract.
    pub async fn execute(&self, query: &str, variables: Option<Value>) -> Result<GraphQlResponse> {
        let body = GraphQlRequest { query, variables };

        tracing::debug!(
            query = %safe_preview(query, MAX_PREVIEW_LEN),
            "Executing GraphQL operation"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // The service reports business failures in the `errors` list, often
        // with a 200 status; the body is decoded regardless of status so
        // those surface as Api errors rather than opaque HTTP ones.
        let text = response.text().await?;
        let decoded: GraphQlResponse = serde_json::from_str(&text)?;

        if decoded.has_errors() {
            tracing::warn!(%status, "GraphQL operation returned errors");
        } else {
            tracing::debug!(%status, "GraphQL operation succeeded");
        }

        Ok(decoded)
    }

    /// Executes an operation and deserializes `data.<field>` into `T`.
    ///
    /// Checks `errors` before touching `data`. A `null` field deserializes
    /// into `Option::None` when `T` is an `Option`; pick `T` accordingly for
    /// queries that can legitimately find nothing. Pass `Value::Null` for
    /// operations without variables.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T> {
        let variables = if variables.is_null() { None } else { Some(variables) };
        let response = self.execute(query, variables).await?;
        let value = response.into_field(field)?;
        Ok(serde_json::from_value(value)?)
    }
}
