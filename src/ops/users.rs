use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::models::user::CurrentUser;

const GET_CURRENT_USER: &str = r#"
    query GetCurrentUser {
      currentUser {
        id
        email
      }
    }
"#;

/// Fetches the user the API key acts as.
///
/// The cheapest way to verify a key: a bad key comes back as a GraphQL
/// error here before anything is created.
pub async fn current_user(client: &Client) -> Result<CurrentUser> {
    client
        .request(GET_CURRENT_USER, Value::Null, "currentUser")
        .await
}
