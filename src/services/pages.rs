//! The page bootstrap sequence.
//!
//! The service's resource graph requires explicit, ordered linking: a page
//! record exists but is invisible until attached to the page tree, and a
//! calculation only shows on a page when its `data.pageId` names that page.
//! [`publish_page`] encodes that order; each step needs an id or revision
//! token produced by the one before it, so the sequence is strictly
//! sequential. A failed step aborts the remainder; resources already
//! created are left in place, there is no rollback.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::ids;
use crate::models::calculation::{
    CalculationData, CreateStatementInput, Engine, Revision,
};
use crate::models::page::{AddPageNodeInput, CreatePageInput, PutPageContentInput};
use crate::ops::{calculations, pages, users};
use crate::validation;

/// A statement to create, before an id is assigned.
#[derive(Debug, Clone)]
pub struct StatementDraft {
    pub title: String,
    pub engine: Engine,
    pub formula: String,
}

impl StatementDraft {
    pub fn new(title: impl Into<String>, engine: Engine, formula: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            engine,
            formula: formula.into(),
        }
    }

    fn into_input(self) -> CreateStatementInput {
        CreateStatementInput {
            statement_id: ids::generate(),
            title: self.title,
            engine: self.engine,
            formula: self.formula,
        }
    }
}

/// Request for publishing a page with a calculation in one sequence.
#[derive(Debug, Clone, Default)]
pub struct PublishPageRequest {
    /// Client-assigned page id; generated when absent.
    pub page_id: Option<String>,
    pub title: String,
    /// Attach under this page instead of the tree's top level.
    pub parent_id: Option<String>,
    /// Acting user recorded on statements; looked up via `currentUser`
    /// when absent.
    pub user_id: Option<String>,
    /// Initial markdown content for the page body.
    pub markdown: Option<String>,
    /// Statements created in one batch with the calculation.
    pub statements: Vec<StatementDraft>,
    /// Statements appended one by one afterwards, threading revision tokens.
    pub appendices: Vec<StatementDraft>,
}

/// Result of a completed publish sequence.
#[derive(Debug, Clone)]
pub struct PublishedPage {
    pub page_id: String,
    /// Equal to `page_id`; the calculation is keyed by its owning page.
    pub calculation_id: String,
    /// Token of the last write, when the service returned one.
    pub revision_id: Option<String>,
    /// User-facing edit URL.
    pub url: String,
}

/// Creates a page, attaches it to the tree, and fills it with a calculation.
///
/// Step order is strict: create page, attach to tree, write the statement
/// batch, then optional content and appendices. Parallelizing would break
/// the id and revision-token dependencies between steps.
pub async fn publish_page(client: &Client, request: PublishPageRequest) -> Result<PublishedPage> {
    let title = validation::validate_title(&request.title)?;

    if request.statements.is_empty() {
        return Err(Error::Validation(
            "A page needs at least one statement".to_string(),
        ));
    }
    for draft in request.statements.iter().chain(&request.appendices) {
        validation::validate_title(&draft.title)?;
        validation::validate_formula(&draft.formula)?;
    }
    if let Some(id) = &request.page_id {
        validation::validate_resource_id(id, "page id")?;
    }
    if let Some(id) = &request.parent_id {
        validation::validate_resource_id(id, "parent id")?;
    }

    // Resolve the acting user unless the caller already knows it.
    let user_id = match request.user_id {
        Some(id) => id,
        None => users::current_user(client).await?.id,
    };

    let page_id = request.page_id.unwrap_or_else(ids::generate);

    // Step 1: create the page record.
    let page = pages::create_page(
        client,
        &CreatePageInput {
            id: page_id.clone(),
            title,
            workspace_id: client.workspace_id().to_string(),
        },
    )
    .await?;
    tracing::info!(page_id = %page.id, "Page created");

    // Step 2: attach it to the tree; skipping this leaves the page orphaned.
    let placement = match request.parent_id {
        Some(parent) => AddPageNodeInput::under(page_id.clone(), parent),
        None => AddPageNodeInput::top_level(page_id.clone()),
    };
    pages::add_page_node(client, &placement).await?;
    tracing::info!(page_id = %page_id, "Page attached to tree");

    // Step 3: the calculation, keyed by the page id and linked back to the
    // page through data.pageId.
    let statements: Vec<CreateStatementInput> = request
        .statements
        .into_iter()
        .map(StatementDraft::into_input)
        .collect();
    let written = calculations::create_or_update_calculation(
        client,
        &page_id,
        &statements,
        &CalculationData::for_creation(page_id.clone(), Some(user_id.clone())),
    )
    .await?;
    tracing::info!(
        calculation_id = %written.calculation_id,
        revision_id = ?written.revision_id,
        "Calculation written"
    );

    if let Some(markdown) = request.markdown {
        pages::put_initial_page_content(
            client,
            &PutPageContentInput {
                page_id: page_id.clone(),
                markdown,
            },
        )
        .await?;
    }

    // Step 4: appendices, threading each returned revision into the next
    // append.
    let mut revision_id = written.revision_id;
    if !request.appendices.is_empty() {
        revision_id = append_statements(
            client,
            &page_id,
            Revision::from_response(revision_id),
            request.appendices,
            Some(user_id),
        )
        .await?;
    }

    Ok(PublishedPage {
        url: client.page_url(&page_id),
        calculation_id: page_id.clone(),
        page_id,
        revision_id,
    })
}

/// Appends statements to an existing calculation, one request each.
///
/// `revision` is the concurrency token to present for the first append;
/// every subsequent append uses the token the previous one returned, or the
/// sentinel when the service returned none. Returns the final revision id.
pub async fn append_statements(
    client: &Client,
    calculation_id: &str,
    revision: Revision,
    drafts: Vec<StatementDraft>,
    user_id: Option<String>,
) -> Result<Option<String>> {
    validation::validate_resource_id(calculation_id, "calculation id")?;
    for draft in &drafts {
        validation::validate_title(&draft.title)?;
        validation::validate_formula(&draft.formula)?;
    }

    let mut revision = revision;
    let mut last_revision_id = None;
    for draft in drafts {
        let statement = draft.into_input();
        let data = CalculationData::for_append(statement.statement_id.clone(), user_id.clone());
        let written =
            calculations::add_statement(client, calculation_id, &revision, &statement, &data)
                .await?;
        last_revision_id = written.revision_id.clone();
        revision = Revision::from_response(written.revision_id);
    }

    Ok(last_revision_id)
}
