//! Calculations: revisioned statement groups attached to a page.
//!
//! A calculation is keyed by a client-assigned id, conventionally the id of
//! its owning page. Every write produces a new revision; statements are
//! immutable once created and are superseded by revision, not mutation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

use crate::ids;

/// The revision the service has been observed to accept in place of a real
/// token, disabling its optimistic-concurrency check. A service quirk, not
/// a documented guarantee.
pub const SENTINEL_REVISION: &str = "ffffffff";

/// The formula evaluators the service recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Engine {
    /// Single-expression engine with unit support (`x = 1 m`).
    Mathjs,
    /// Multi-statement block engine, one assignment per line.
    MultilineMathjs,
    /// General-purpose scripting engine; sees variables from the other engines.
    Python,
}

/// Input for creating one statement, standalone or as part of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatementInput {
    pub statement_id: String,
    pub title: String,
    pub engine: Engine,
    pub formula: String,
}

/// A statement as returned by the `calculation` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub statement_id: String,
    pub title: String,
    pub engine: Engine,
    pub formula: String,
}

/// The payload of the calculation write mutations.
///
/// `revision_id` is the concurrency token for the next append. The service
/// has been observed returning `null` here; [`Revision::from_response`]
/// falls back to the sentinel in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRevision {
    pub calculation_id: String,
    #[serde(default)]
    pub revision_id: Option<String>,
}

/// A calculation with its statements at one revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub calculation_id: String,
    #[serde(default)]
    pub revision_id: Option<String>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// One node of the `calculationHistory` connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionNode {
    pub revision_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// The optimistic-concurrency token expected by the append mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Revision {
    /// The sentinel override; skips the concurrency check.
    #[default]
    Latest,
    /// A token returned by a previous write.
    Exact(String),
}

impl Revision {
    /// The wire value passed as `revisionId`.
    pub fn as_id(&self) -> &str {
        match self {
            Revision::Latest => SENTINEL_REVISION,
            Revision::Exact(id) => id,
        }
    }

    /// Builds the token to thread into the next append from a mutation
    /// payload's `revisionId`.
    pub fn from_response(revision_id: Option<String>) -> Self {
        match revision_id {
            Some(id) if !id.is_empty() => Revision::Exact(id),
            _ => Revision::Latest,
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_id())
    }
}

/// The `data: JSON` side-channel sent with calculation writes.
///
/// `page_id` links the calculation to its owning page on creation; appends
/// carry the new statement's id instead. The remaining fields are bookkeeping
/// the service expects on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    pub id: String,
    pub cursor: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_id: Option<String>,
}

impl CalculationData {
    /// The payload shape for `createOrUpdateCalculation`: carries the owning
    /// page id and cursor `"0"`.
    pub fn for_creation(page_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
            id: ids::generate(),
            cursor: "0".to_string(),
            timestamp: Utc::now().timestamp_millis(),
            user_id,
            statement_id: None,
        }
    }

    /// The payload shape for `addStatementToCalculation`: carries the new
    /// statement's id and an empty cursor.
    pub fn for_append(statement_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            page_id: None,
            id: ids::generate(),
            cursor: String::new(),
            timestamp: Utc::now().timestamp_millis(),
            user_id,
            statement_id: Some(statement_id.into()),
        }
    }
}
