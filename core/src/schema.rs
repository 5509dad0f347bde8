#![deny(missing_docs)]

//! # Schema Node Classification
//!
//! Schema subtrees are dynamically shaped JSON. Each visited node is
//! classified exactly once into a tagged variant, so the recursive validator
//! matches on a tag instead of re-probing the runtime shape at every step.

use serde_json::{Map, Value};

/// Borrowed, tagged view of one schema node.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    /// `{"$ref": "#/..."}`: an alias for another node in the same document.
    Reference(&'a str),
    /// Element-wise collection, validated by index.
    Array(&'a [Value]),
    /// Field mapping, validated by key.
    Object(&'a Map<String, Value>),
    /// Leaf value with no structural requirements of its own.
    Scalar,
}

impl<'a> SchemaNode<'a> {
    /// Decides the shape of `value`.
    ///
    /// An object counts as a reference node only when its `$ref` member is a
    /// string; any other shape keeps ordinary object semantics.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => SchemaNode::Array(items),
            Value::Object(entries) => match entries.get("$ref").and_then(Value::as_str) {
                Some(reference) => SchemaNode::Reference(reference),
                None => SchemaNode::Object(entries),
            },
            _ => SchemaNode::Scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_reference() {
        let value = json!({ "$ref": "#/definitions/Pet" });
        assert!(matches!(
            SchemaNode::classify(&value),
            SchemaNode::Reference("#/definitions/Pet")
        ));
    }

    #[test]
    fn test_classify_non_string_ref_is_object() {
        let value = json!({ "$ref": 42 });
        assert!(matches!(SchemaNode::classify(&value), SchemaNode::Object(_)));
    }

    #[test]
    fn test_classify_array_object_scalar() {
        assert!(matches!(
            SchemaNode::classify(&json!([1, 2])),
            SchemaNode::Array(_)
        ));
        assert!(matches!(
            SchemaNode::classify(&json!({ "type": "string" })),
            SchemaNode::Object(_)
        ));
        assert!(matches!(SchemaNode::classify(&json!("string")), SchemaNode::Scalar));
        assert!(matches!(SchemaNode::classify(&json!(null)), SchemaNode::Scalar));
    }
}
