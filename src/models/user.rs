use serde::{Deserialize, Serialize};

/// The user a workspace API key acts as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}
