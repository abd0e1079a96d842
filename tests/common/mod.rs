//! Mock GraphQL server for integration tests.
//!
//! Runs an Axum server on a random port so tests can execute in parallel,
//! records every operation in arrival order, and plays back the response
//! shapes the real service produces, with incrementing revision tokens
//! (`r1`, `r2`, ...). Failure injection per operation covers the error
//! paths.

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use calctree_client::{Client, Config};

/// Workspace id the mock accepts; any valid UUID works.
pub const TEST_WORKSPACE_ID: &str = "98ea9cce-909a-44e9-9359-be53c3d67d04";

/// User id the mock's `currentUser` reports.
pub const TEST_USER_ID: &str = "user-1";

/// One recorded GraphQL call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: String,
    pub variables: Value,
    pub api_key: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    revision_counter: Mutex<u64>,
    /// Operations that reply with `errors` only.
    fail_ops: Mutex<HashSet<String>>,
    /// Operations that reply with partial `data` plus `errors`.
    partial_ops: Mutex<HashSet<String>>,
    /// When set, calculation writes return `revisionId: null`.
    null_revisions: Mutex<bool>,
    pages: Mutex<HashMap<String, Value>>,
    contents: Mutex<HashMap<String, String>>,
    statements: Mutex<HashMap<String, Vec<Value>>>,
    revisions: Mutex<Vec<(String, String)>>,
}

impl MockState {
    fn next_revision(&self) -> String {
        let mut counter = self.revision_counter.lock().unwrap();
        *counter += 1;
        format!("r{}", counter)
    }
}

/// Mock API wrapper
///
/// Manages an Axum server running on a random port. Each test gets its own
/// instance and its own recording, allowing parallel test execution.
pub struct MockApi {
    pub address: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    /// Starts the mock server on a random port.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/graphql", post(handle_graphql))
            .route("/broken", post(handle_broken))
            .with_state(state.clone());

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give server time to start
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        Self { address, state }
    }

    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.address)
    }

    /// An endpoint whose responses are not JSON.
    pub fn broken_url(&self) -> String {
        format!("{}/broken", self.address)
    }

    /// A config pointing the client at this mock.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.endpoint = self.graphql_url();
        config.api.api_key = "test-api-key".to_string().into();
        config.api.workspace_id = TEST_WORKSPACE_ID.to_string();
        config.api.timeout_secs = 5;
        config
    }

    /// A client wired to this mock.
    pub fn client(&self) -> Client {
        Client::new(&self.config()).expect("Failed to build client against mock")
    }

    /// Operation names in arrival order.
    pub fn operations(&self) -> Vec<String> {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.operation.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Makes `operation` reply with an `errors` list only.
    pub fn fail(&self, operation: &str) {
        self.state
            .fail_ops
            .lock()
            .unwrap()
            .insert(operation.to_string());
    }

    /// Makes `operation` reply with partial data plus `errors`.
    pub fn partial(&self, operation: &str) {
        self.state
            .partial_ops
            .lock()
            .unwrap()
            .insert(operation.to_string());
    }

    /// Makes calculation writes return `revisionId: null`.
    pub fn null_revisions(&self, on: bool) {
        *self.state.null_revisions.lock().unwrap() = on;
    }
}

/// Maps a query document to the operation it exercises. Longest names are
/// matched first; `calculationHistory` contains `calculation` and `pages(`
/// contains `page(`.
fn classify(query: &str) -> String {
    for name in [
        "createPageSync",
        "addPageNode",
        "createOrUpdateCalculation",
        "addStatementToCalculation",
        "putInitialPageContent",
        "pageContent",
        "calculationHistory",
        "calculation(",
        "currentUser",
        "pages(",
        "page(",
        "__schema",
        "__type",
    ] {
        if query.contains(name) {
            return name.trim_end_matches('(').to_string();
        }
    }
    "unknown".to_string()
}

fn errors_body(operation: &str) -> Value {
    json!({
        "errors": [{"message": format!("mock failure for {operation}")}]
    })
}

async fn handle_broken() -> &'static str {
    "this is not json {"
}

async fn handle_graphql(
    State(state): State<Arc<MockState>>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    let variables = body.get("variables").cloned().unwrap_or(Value::Null);
    let operation = classify(&query);

    state.calls.lock().unwrap().push(RecordedCall {
        operation: operation.clone(),
        variables: variables.clone(),
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if state.fail_ops.lock().unwrap().contains(&operation) {
        return Json(errors_body(&operation));
    }

    if state.partial_ops.lock().unwrap().contains(&operation) {
        let mut body = errors_body(&operation);
        let mut data = serde_json::Map::new();
        data.insert(operation.clone(), Value::Null);
        body["data"] = Value::Object(data);
        return Json(body);
    }

    let response = match operation.as_str() {
        "currentUser" => json!({
            "data": {"currentUser": {"id": TEST_USER_ID, "email": "robot@example.com"}}
        }),
        "createPageSync" => {
            let input = &variables["input"];
            let id = input["id"].as_str().unwrap_or_default().to_string();
            state.pages.lock().unwrap().insert(id, input.clone());
            json!({"data": {"createPageSync": {"id": input["id"], "title": input["title"]}}})
        }
        "addPageNode" => {
            let input = &variables["input"];
            json!({
                "data": {"addPageNode": {
                    "newPageId": input["pageId"],
                    "parentId": input.get("parentId").cloned().unwrap_or(Value::Null),
                }}
            })
        }
        "createOrUpdateCalculation" => {
            let calculation_id = variables["calculationId"].as_str().unwrap_or_default();
            let batch: Vec<Value> = variables["withStatements"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            state
                .statements
                .lock()
                .unwrap()
                .insert(calculation_id.to_string(), batch);
            let revision = if *state.null_revisions.lock().unwrap() {
                Value::Null
            } else {
                let revision = state.next_revision();
                state
                    .revisions
                    .lock()
                    .unwrap()
                    .push((calculation_id.to_string(), revision.clone()));
                Value::String(revision)
            };
            json!({
                "data": {"createOrUpdateCalculation": {
                    "calculationId": calculation_id,
                    "revisionId": revision,
                }}
            })
        }
        "addStatementToCalculation" => {
            let calculation_id = variables["calculationId"].as_str().unwrap_or_default();
            state
                .statements
                .lock()
                .unwrap()
                .entry(calculation_id.to_string())
                .or_default()
                .push(variables["withStatement"].clone());
            let revision = if *state.null_revisions.lock().unwrap() {
                Value::Null
            } else {
                let revision = state.next_revision();
                state
                    .revisions
                    .lock()
                    .unwrap()
                    .push((calculation_id.to_string(), revision.clone()));
                Value::String(revision)
            };
            json!({
                "data": {"addStatementToCalculation": {
                    "calculationId": calculation_id,
                    "revisionId": revision,
                }}
            })
        }
        "putInitialPageContent" => {
            let input = &variables["input"];
            let page_id = input["pageId"].as_str().unwrap_or_default().to_string();
            let markdown = input["markdown"].as_str().unwrap_or_default().to_string();
            state.contents.lock().unwrap().insert(page_id, markdown);
            json!({"data": {"putInitialPageContent": true}})
        }
        "page" => {
            let id = variables["id"].as_str().unwrap_or_default();
            let page = state.pages.lock().unwrap().get(id).map(|input| {
                json!({
                    "id": input["id"],
                    "title": input["title"],
                    "header": null,
                    "cursor": null,
                    "deletedAt": null,
                })
            });
            json!({"data": {"page": page.unwrap_or(Value::Null)}})
        }
        "pages" => {
            let pages: Vec<Value> = state
                .pages
                .lock()
                .unwrap()
                .values()
                .map(|input| json!({"id": input["id"], "title": input["title"], "deletedAt": null}))
                .collect();
            json!({"data": {"pages": pages}})
        }
        "pageContent" => {
            let page_id = variables["pageId"].as_str().unwrap_or_default();
            let markdown = state.contents.lock().unwrap().get(page_id).cloned();
            let calculations: Vec<Value> = state
                .revisions
                .lock()
                .unwrap()
                .iter()
                .filter(|(calc, _)| calc == page_id)
                .next_back()
                .map(|(calc, revision)| vec![json!({"id": calc, "revisionId": revision})])
                .unwrap_or_default();
            if markdown.is_none() && calculations.is_empty() {
                json!({"data": {"pageContent": null}})
            } else {
                json!({
                    "data": {"pageContent": {
                        "pageId": page_id,
                        "markdown": markdown,
                        "calculations": calculations,
                    }}
                })
            }
        }
        "calculation" => {
            let calculation_id = variables["calculationId"].as_str().unwrap_or_default();
            let statements = state.statements.lock().unwrap().get(calculation_id).cloned();
            match statements {
                Some(statements) => json!({
                    "data": {"calculation": {
                        "calculationId": calculation_id,
                        "revisionId": variables["revisionId"],
                        "statements": statements,
                    }}
                }),
                None => json!({"data": {"calculation": null}}),
            }
        }
        "calculationHistory" => {
            let calculation_id = variables["calculationId"].as_str().unwrap_or_default();
            let edges: Vec<Value> = state
                .revisions
                .lock()
                .unwrap()
                .iter()
                .filter(|(calc, _)| calc == calculation_id)
                .enumerate()
                .map(|(i, (_, revision))| {
                    json!({
                        "cursor": i.to_string(),
                        "node": {
                            "revisionId": revision,
                            "statementCount": null,
                            "timestamp": 1700000000000i64 + i as i64,
                        }
                    })
                })
                .collect();
            json!({"data": {"calculationHistory": {"edges": edges}}})
        }
        "__type" => {
            let name = variables["name"].as_str().unwrap_or_default();
            json!({
                "data": {"__type": {
                    "name": name,
                    "fields": [
                        {"name": "calculationId", "type": {"name": "ID", "kind": "SCALAR", "ofType": null}},
                        {"name": "statements", "type": {"name": null, "kind": "LIST", "ofType": {"name": "Statement", "kind": "OBJECT", "ofType": null}}},
                    ]
                }}
            })
        }
        "__schema" => json!({
            "data": {"__schema": {"mutationType": {"fields": [
                {"name": "createPageSync"},
                {"name": "addPageNode"},
                {"name": "createOrUpdateCalculation"},
                {"name": "addStatementToCalculation"},
                {"name": "putInitialPageContent"},
            ]}}}
        }),
        _ => errors_body(&operation),
    };

    Json(response)
}
