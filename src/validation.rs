//! Input validation for the client surface.
//!
//! The remote service rejects malformed ids and empty inputs server-side;
//! validating here turns those round trips into immediate, descriptive
//! errors before any request is sent.

use crate::error::{Error, Result};
use crate::ids;

/// Validates a client-assigned resource id (page, calculation, statement).
///
/// Must be exactly 21 characters over `[A-Za-z0-9_-]`; the service rejects
/// anything else at creation time.
pub fn validate_resource_id(id: &str, field_name: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field_name)));
    }

    if !ids::is_valid(id) {
        return Err(Error::Validation(format!(
            "{} must be {} characters over [A-Za-z0-9_-], got {:?}",
            field_name,
            ids::LEN,
            id
        )));
    }

    Ok(())
}

/// Validates a workspace id (a UUID, unlike the client-assigned ids).
pub fn validate_workspace_id(workspace_id: &str) -> Result<uuid::Uuid> {
    let workspace_id = workspace_id.trim();

    if workspace_id.is_empty() {
        return Err(Error::Validation("Workspace id cannot be empty".to_string()));
    }

    uuid::Uuid::parse_str(workspace_id)
        .map_err(|_| Error::Validation("Workspace id must be a UUID".to_string()))
}

/// Validates a page or statement title.
pub fn validate_title(title: &str) -> Result<String> {
    let title = validate_required_string(title, "Title")?;

    if title.len() > 200 {
        return Err(Error::Validation(
            "Title must be less than 200 characters".to_string(),
        ));
    }

    if title.chars().any(|c| c.is_control()) {
        return Err(Error::Validation(
            "Title cannot contain control characters".to_string(),
        ));
    }

    Ok(title)
}

/// Validates a statement formula. Formulas are multi-line for the block and
/// scripting engines, so only emptiness is checked.
pub fn validate_formula(formula: &str) -> Result<()> {
    if formula.trim().is_empty() {
        return Err(Error::Validation("Formula cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates that a string is not empty after trimming.
pub fn validate_required_string(input: &str, field_name: &str) -> Result<String> {
    let sanitized = input.trim().to_string();

    if sanitized.is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field_name)));
    }

    Ok(sanitized)
}
