//! Introspection results, kept shallow: one type with its field names and
//! a printable type reference each.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A type as reported by the `__type` introspection query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescription {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

/// One field of an introspected type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A (possibly wrapped) type reference: `[Statement!]!` comes back as
/// nested NON_NULL/LIST kinds with the named type innermost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, rename = "ofType")]
    pub of_type: Option<Value>,
}

impl TypeRef {
    /// The innermost named type, unwrapping NON_NULL and LIST layers.
    pub fn named(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        let mut inner = self.of_type.as_ref();
        while let Some(value) = inner {
            if let Some(name) = value.get("name").and_then(Value::as_str) {
                return Some(name.to_string());
            }
            inner = value.get("ofType");
        }
        None
    }
}
