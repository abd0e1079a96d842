//! Schema introspection, for poking at the service's undocumented surface.

use serde_json::{Value, json};

use crate::client::Client;
use crate::error::Result;
use crate::models::schema::TypeDescription;

const INTROSPECT_TYPE: &str = r#"
    query IntrospectType($name: String!) {
      __type(name: $name) {
        name
        fields {
          name
          type {
            name
            kind
            ofType {
              name
              kind
              ofType {
                name
              }
            }
          }
        }
      }
    }
"#;

const INTROSPECT_MUTATIONS: &str = r#"
    query IntrospectMutations {
      __schema {
        mutationType {
          fields {
            name
          }
        }
      }
    }
"#;

/// Introspects a named type. `None` when the schema has no such type.
pub async fn type_fields(client: &Client, type_name: &str) -> Result<Option<TypeDescription>> {
    client
        .request(INTROSPECT_TYPE, json!({ "name": type_name }), "__type")
        .await
}

/// Lists the names of all mutations the schema exposes.
pub async fn mutation_names(client: &Client) -> Result<Vec<String>> {
    let schema: Value = client
        .request(INTROSPECT_MUTATIONS, Value::Null, "__schema")
        .await?;

    let names = schema["mutationType"]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Ok(names)
}
