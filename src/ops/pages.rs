//! Page operations: creation, tree attachment, lookup, and content.

use serde_json::{Value, json};

use crate::client::Client;
use crate::error::Result;
use crate::models::page::{
    AddPageNodeInput, CreatePageInput, Page, PageContent, PageNodePlacement, PageSummary,
    PutPageContentInput,
};

const CREATE_PAGE: &str = r#"
    mutation CreatePage($workspaceId: ID!, $input: CreatePageInput!) {
      createPageSync(workspaceId: $workspaceId, input: $input) {
        id
        title
      }
    }
"#;

const ADD_PAGE_NODE: &str = r#"
    mutation AddPageNode($workspaceId: ID!, $input: AddPageNodeInput!) {
      addPageNode(workspaceId: $workspaceId, input: $input) {
        newPageId
        parentId
      }
    }
"#;

const GET_PAGE: &str = r#"
    query GetPage($workspaceId: ID!, $id: ID!) {
      page(workspaceId: $workspaceId, id: $id) {
        id
        title
        header
        cursor
        deletedAt
      }
    }
"#;

const LIST_PAGES: &str = r#"
    query GetPages($workspaceId: ID!) {
      pages(workspaceId: $workspaceId) {
        id
        title
        deletedAt
      }
    }
"#;

const GET_PAGE_CONTENT: &str = r#"
    query GetPageContent($workspaceId: ID!, $pageId: ID!) {
      pageContent(workspaceId: $workspaceId, pageId: $pageId) {
        pageId
        markdown
        calculations {
          id
          revisionId
        }
      }
    }
"#;

const PUT_PAGE_CONTENT: &str = r#"
    mutation PutContent($workspaceId: ID!, $input: PutPageContentInput!) {
      putInitialPageContent(workspaceId: $workspaceId, input: $input)
    }
"#;

/// Creates a page record with a client-assigned id.
///
/// The page is not part of the tree yet; without a subsequent
/// [`add_page_node`] it stays orphaned and invisible in listings.
pub async fn create_page(client: &Client, input: &CreatePageInput) -> Result<PageSummary> {
    tracing::info!(page_id = %input.id, title = %input.title, "Creating page");
    client
        .request(
            CREATE_PAGE,
            json!({
                "workspaceId": client.workspace_id(),
                "input": input,
            }),
            "createPageSync",
        )
        .await
}

/// Attaches a created page into the navigable page tree.
pub async fn add_page_node(client: &Client, input: &AddPageNodeInput) -> Result<PageNodePlacement> {
    tracing::info!(page_id = %input.page_id, parent_id = ?input.parent_id, "Attaching page to tree");
    client
        .request(
            ADD_PAGE_NODE,
            json!({
                "workspaceId": client.workspace_id(),
                "input": input,
            }),
            "addPageNode",
        )
        .await
}

/// Fetches a page by id. `None` when the id is unknown to the workspace.
pub async fn get_page(client: &Client, id: &str) -> Result<Option<Page>> {
    client
        .request(
            GET_PAGE,
            json!({
                "workspaceId": client.workspace_id(),
                "id": id,
            }),
            "page",
        )
        .await
}

/// Lists the workspace's pages, tombstones included.
pub async fn list_pages(client: &Client) -> Result<Vec<Page>> {
    client
        .request(
            LIST_PAGES,
            json!({ "workspaceId": client.workspace_id() }),
            "pages",
        )
        .await
}

/// Fetches a page's content block, if it has one.
pub async fn get_page_content(client: &Client, page_id: &str) -> Result<Option<PageContent>> {
    client
        .request(
            GET_PAGE_CONTENT,
            json!({
                "workspaceId": client.workspace_id(),
                "pageId": page_id,
            }),
            "pageContent",
        )
        .await
}

/// Writes a page's initial markdown content.
pub async fn put_initial_page_content(client: &Client, input: &PutPageContentInput) -> Result<()> {
    tracing::info!(page_id = %input.page_id, "Writing initial page content");
    // The mutation returns a bare scalar acknowledgement.
    client
        .request::<Value>(
            PUT_PAGE_CONTENT,
            json!({
                "workspaceId": client.workspace_id(),
                "input": input,
            }),
            "putInitialPageContent",
        )
        .await?;
    Ok(())
}
