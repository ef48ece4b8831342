//! JSON Patch (RFC 6902) over the top-level members of a JSON object
//!
//! Patch targets here are flat update bodies, so paths address a single
//! member (`/title`). Member names match ignoring ASCII case. A document
//! is applied atomically: if any operation fails nothing changes.

use crate::core::error::ValidationError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One JSON Patch operation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// Why a patch document could not be applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("patch target is not a JSON object")]
    NotAnObject,

    #[error("path '{0}' does not address a top-level member")]
    InvalidPath(String),

    #[error("member '{0}' does not exist on the target")]
    UnknownMember(String),

    #[error("test failed at '{0}'")]
    TestFailed(String),
}

impl From<PatchError> for ValidationError {
    fn from(err: PatchError) -> Self {
        ValidationError::InvalidPatch {
            message: err.to_string(),
        }
    }
}

/// Apply `operations` in order to `document`
///
/// `remove` resets a member to `null` and `add` on an existing member
/// replaces it, since the target members are fixed.
pub fn apply_patch(document: &mut Value, operations: &[PatchOperation]) -> Result<(), PatchError> {
    let Value::Object(target) = document else {
        return Err(PatchError::NotAnObject);
    };

    let mut patched = target.clone();
    for operation in operations {
        apply_operation(&mut patched, operation)?;
    }

    *target = patched;
    Ok(())
}

fn apply_operation(target: &mut Map<String, Value>, operation: &PatchOperation) -> Result<(), PatchError> {
    match operation {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let member = member(target, path)?;
            target.insert(member, value.clone());
        }
        PatchOperation::Remove { path } => {
            let member = member(target, path)?;
            target.insert(member, Value::Null);
        }
        PatchOperation::Move { from, path } => {
            let source = member(target, from)?;
            let destination = member(target, path)?;
            if source != destination {
                let value = target.insert(source, Value::Null).unwrap_or(Value::Null);
                target.insert(destination, value);
            }
        }
        PatchOperation::Copy { from, path } => {
            let source = member(target, from)?;
            let destination = member(target, path)?;
            let value = target.get(&source).cloned().unwrap_or(Value::Null);
            target.insert(destination, value);
        }
        PatchOperation::Test { path, value } => {
            let member = member(target, path)?;
            if target.get(&member) != Some(value) {
                return Err(PatchError::TestFailed(path.clone()));
            }
        }
    }
    Ok(())
}

/// Resolve a JSON pointer to the name of an existing top-level member
fn member(target: &Map<String, Value>, path: &str) -> Result<String, PatchError> {
    let name = path
        .strip_prefix('/')
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| PatchError::InvalidPath(path.to_string()))?
        .replace("~1", "/")
        .replace("~0", "~");

    target
        .keys()
        .find(|key| key.eq_ignore_ascii_case(&name))
        .cloned()
        .ok_or(PatchError::UnknownMember(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Value {
        json!({ "title": "It", "description": "A clown" })
    }

    fn ops(value: Value) -> Vec<PatchOperation> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_replace_and_remove() {
        let mut doc = book();
        apply_patch(
            &mut doc,
            &ops(json!([
                { "op": "replace", "path": "/title", "value": "Carrie" },
                { "op": "remove", "path": "/description" }
            ])),
        )
        .unwrap();
        assert_eq!(doc, json!({ "title": "Carrie", "description": null }));
    }

    #[test]
    fn test_member_names_ignore_case() {
        let mut doc = book();
        apply_patch(
            &mut doc,
            &ops(json!([{ "op": "add", "path": "/Title", "value": "Misery" }])),
        )
        .unwrap();
        assert_eq!(doc["title"], "Misery");
    }

    #[test]
    fn test_copy_and_move() {
        let mut doc = book();
        apply_patch(
            &mut doc,
            &ops(json!([{ "op": "copy", "from": "/title", "path": "/description" }])),
        )
        .unwrap();
        assert_eq!(doc["description"], "It");

        let mut doc = book();
        apply_patch(
            &mut doc,
            &ops(json!([{ "op": "move", "from": "/description", "path": "/title" }])),
        )
        .unwrap();
        assert_eq!(doc, json!({ "title": "A clown", "description": null }));
    }

    #[test]
    fn test_failed_test_leaves_document_untouched() {
        let mut doc = book();
        let err = apply_patch(
            &mut doc,
            &ops(json!([
                { "op": "replace", "path": "/title", "value": "Carrie" },
                { "op": "test", "path": "/description", "value": "Something else" }
            ])),
        )
        .unwrap_err();
        assert_eq!(err, PatchError::TestFailed("/description".to_string()));
        assert_eq!(doc, book());
    }

    #[test]
    fn test_unknown_and_nested_paths() {
        let mut doc = book();
        assert_eq!(
            apply_patch(
                &mut doc,
                &ops(json!([{ "op": "replace", "path": "/isbn", "value": "x" }]))
            ),
            Err(PatchError::UnknownMember("isbn".to_string()))
        );
        assert_eq!(
            apply_patch(
                &mut doc,
                &ops(json!([{ "op": "remove", "path": "/title/0" }]))
            ),
            Err(PatchError::InvalidPath("/title/0".to_string()))
        );
    }

    #[test]
    fn test_unknown_operation_is_rejected_when_parsing() {
        let parsed: Result<Vec<PatchOperation>, _> =
            serde_json::from_value(json!([{ "op": "increment", "path": "/title" }]));
        assert!(parsed.is_err());
    }
}
