//! Page resources: document nodes in the workspace's navigable tree.
//!
//! Page creation is a two-step affair: `createPageSync` writes the record,
//! `addPageNode` attaches it to the tree. A page that was created but never
//! attached is orphaned; it does not appear in listings and its content is
//! not reachable through the tree.

use serde::{Deserialize, Serialize};

/// A page record as returned by the `page`/`pages` queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Set when the page is a tombstone; listings include deleted pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl Page {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.as_deref().is_some_and(|d| d != "null")
    }
}

/// Input for `createPageSync`. The id is client-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageInput {
    pub id: String,
    pub title: String,
    pub workspace_id: String,
}

/// The mutation payload of `createPageSync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
}

/// Input for `addPageNode`: which page to attach, and where.
///
/// Without `parent_id` the page lands at the top level of the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPageNodeInput {
    pub page_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl AddPageNodeInput {
    pub fn top_level(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            parent_id: None,
        }
    }

    pub fn under(page_id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            parent_id: Some(parent_id.into()),
        }
    }
}

/// The mutation payload of `addPageNode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNodePlacement {
    pub new_page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A page's content block: markdown plus calculation references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default)]
    pub calculations: Vec<CalculationRef>,
}

/// Reference from page content to a calculation revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
}

/// Input for `putInitialPageContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutPageContentInput {
    pub page_id: String,
    pub markdown: String,
}
