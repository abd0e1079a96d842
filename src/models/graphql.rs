//! The GraphQL wire envelope: request body and response decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The JSON body of a GraphQL POST: `{query, variables}`.
///
/// `variables` is omitted entirely when absent; some servers reject an
/// explicit `"variables": null`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

/// A decoded GraphQL response.
///
/// Always has at least one of `data` or `errors`; both can be present
/// when an operation partially succeeded. Callers must check `errors`
/// first, which [`GraphQlResponse::into_data`] does.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<ApiError>>,
}

/// One entry of a GraphQL `errors` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

impl GraphQlResponse {
    /// Whether the response carries a non-empty `errors` list.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Converts the untagged wire shape into a tagged result.
    ///
    /// A non-empty `errors` list wins even when partial `data` is present.
    pub fn into_data(self) -> Result<Value> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            return Err(Error::Api(errors));
        }
        self.data
            .ok_or_else(|| Error::MissingData("data".to_string()))
    }

    /// Extracts `data.<field>` as a tagged result.
    ///
    /// An absent field is an error; an explicit `null` is passed through so
    /// callers deserializing into `Option<T>` observe `None`.
    pub fn into_field(self, field: &str) -> Result<Value> {
        let data = self.into_data()?;
        match data {
            Value::Object(mut map) => map
                .remove(field)
                .ok_or_else(|| Error::MissingData(field.to_string())),
            _ => Err(Error::MissingData(field.to_string())),
        }
    }
}
