//! Calculation operations: revisioned statement writes and reads.

use serde_json::json;

use crate::client::Client;
use crate::error::Result;
use crate::models::calculation::{
    Calculation, CalculationData, CalculationRevision, CreateStatementInput, Revision,
    RevisionNode,
};
use crate::utils::string::{MAX_PREVIEW_LEN, safe_preview};

const CREATE_OR_UPDATE_CALCULATION: &str = r#"
    mutation CreateCalc($workspaceId: ID!, $calculationId: ID!, $withStatements: [CreateStatementInput!]!, $data: JSON) {
      createOrUpdateCalculation(
        workspaceId: $workspaceId
        calculationId: $calculationId
        withStatements: $withStatements
        data: $data
      ) {
        calculationId
        revisionId
      }
    }
"#;

const ADD_STATEMENT: &str = r#"
    mutation AddStatement($workspaceId: ID!, $calculationId: ID!, $revisionId: ID!, $withStatement: CreateStatementInput!, $data: JSON) {
      addStatementToCalculation(
        workspaceId: $workspaceId
        calculationId: $calculationId
        revisionId: $revisionId
        withStatement: $withStatement
        data: $data
      ) {
        calculationId
        revisionId
      }
    }
"#;

const GET_CALCULATION: &str = r#"
    query GetCalc($workspaceId: ID!, $calculationId: ID!, $revisionId: ID!) {
      calculation(
        workspaceId: $workspaceId
        calculationId: $calculationId
        revisionId: $revisionId
      ) {
        calculationId
        revisionId
        statements {
          statementId
          title
          formula
          engine
        }
      }
    }
"#;

const GET_HISTORY: &str = r#"
    query GetHistory($workspaceId: ID!, $calculationId: ID!, $first: Int!) {
      calculationHistory(workspaceId: $workspaceId, calculationId: $calculationId, first: $first) {
        edges {
          cursor
          node {
            revisionId
            statementCount
            timestamp
          }
        }
      }
    }
"#;

/// Creates a calculation, or replaces its statements wholesale.
///
/// `data.pageId` must name the owning page or the calculation will not be
/// associated with any page. By convention `calculation_id` equals the
/// owning page's id.
pub async fn create_or_update_calculation(
    client: &Client,
    calculation_id: &str,
    statements: &[CreateStatementInput],
    data: &CalculationData,
) -> Result<CalculationRevision> {
    tracing::info!(
        calculation_id,
        statement_count = statements.len(),
        "Writing calculation"
    );
    client
        .request(
            CREATE_OR_UPDATE_CALCULATION,
            json!({
                "workspaceId": client.workspace_id(),
                "calculationId": calculation_id,
                "withStatements": statements,
                "data": data,
            }),
            "createOrUpdateCalculation",
        )
        .await
}

/// Appends one statement to a calculation.
///
/// `revision` is the optimistic-concurrency token from the previous write;
/// [`Revision::Latest`] sends the sentinel the service accepts in place of
/// a real token.
pub async fn add_statement(
    client: &Client,
    calculation_id: &str,
    revision: &Revision,
    statement: &CreateStatementInput,
    data: &CalculationData,
) -> Result<CalculationRevision> {
    tracing::info!(
        calculation_id,
        revision = %revision,
        statement = %statement.title,
        formula = %safe_preview(&statement.formula, MAX_PREVIEW_LEN),
        "Appending statement"
    );
    client
        .request(
            ADD_STATEMENT,
            json!({
                "workspaceId": client.workspace_id(),
                "calculationId": calculation_id,
                "revisionId": revision.as_id(),
                "withStatement": statement,
                "data": data,
            }),
            "addStatementToCalculation",
        )
        .await
}

/// Fetches a calculation's statements at a revision. `None` when the id or
/// revision is unknown.
pub async fn get_calculation(
    client: &Client,
    calculation_id: &str,
    revision: &Revision,
) -> Result<Option<Calculation>> {
    client
        .request(
            GET_CALCULATION,
            json!({
                "workspaceId": client.workspace_id(),
                "calculationId": calculation_id,
                "revisionId": revision.as_id(),
            }),
            "calculation",
        )
        .await
}

/// Fetches the newest `first` revisions of a calculation.
pub async fn calculation_history(
    client: &Client,
    calculation_id: &str,
    first: u32,
) -> Result<Vec<RevisionNode>> {
    #[derive(serde::Deserialize)]
    struct Connection {
        #[serde(default)]
        edges: Vec<Edge>,
    }

    #[derive(serde::Deserialize)]
    struct Edge {
        node: RevisionNode,
    }

    let connection: Option<Connection> = client
        .request(
            GET_HISTORY,
            json!({
                "workspaceId": client.workspace_id(),
                "calculationId": calculation_id,
                "first": first,
            }),
            "calculationHistory",
        )
        .await?;

    Ok(connection
        .map(|c| c.edges.into_iter().map(|e| e.node).collect())
        .unwrap_or_default())
}
