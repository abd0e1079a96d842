use thiserror::Error;

use crate::models::graphql::ApiError;

/// The custom error type for the client.
///
/// Mirrors the failure taxonomy of the remote API: transport failures,
/// undecodable bodies, GraphQL-level `errors` entries, and responses whose
/// `data` lacks the requested field.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not complete (DNS, connection, timeout).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON, or a field had an unexpected shape.
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried a non-empty `errors` list.
    #[error("GraphQL error: {}", join_messages(.0))]
    Api(Vec<ApiError>),

    /// The response had no `errors` but the requested field was absent.
    #[error("Response data is missing field `{0}`")]
    MissingData(String),

    /// Local input validation failed before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The messages of the GraphQL errors, if this is an API error.
    pub fn api_messages(&self) -> Option<Vec<&str>> {
        match self {
            Error::Api(errors) => Some(errors.iter().map(|e| e.message.as_str()).collect()),
            _ => None,
        }
    }
}

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
