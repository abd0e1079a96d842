use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Default GraphQL endpoint of the service.
pub const DEFAULT_ENDPOINT: &str = "https://graph.calctree.com/graphql";

/// Default base URL of the web app, used to build edit links.
pub const DEFAULT_APP_BASE: &str = "https://app.calctree.com";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// The GraphQL endpoint every request is POSTed to.
    pub endpoint: String,
    /// Base URL for user-facing edit links.
    pub app_base: String,
    /// Workspace API key, sent as the `x-api-key` header.
    #[serde(skip_serializing)]
    pub api_key: SecretString,
    /// The workspace all operations are scoped to (a UUID).
    pub workspace_id: String,
    /// Request timeout in seconds. One attempt per operation, no retries.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `CALCTREE__` prefix and `__` separator
            // e.g., CALCTREE__API__API_KEY="..."
            .add_source(
                config::Environment::with_prefix("CALCTREE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

// Default values for the API configuration
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_base: DEFAULT_APP_BASE.to_string(),
            api_key: String::new().into(),
            workspace_id: String::new(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use serde to serialize to pretty JSON
        // API key is automatically skipped due to #[serde(skip_serializing)]
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
