//! Block instances
//!
//! A `Block` is one unit of editor content: an identifier, the name of its
//! registered type, and the attribute values it carries. Blocks are plain
//! values; every engine operation hands back new ones rather than editing
//! its inputs.

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeValue, Attributes};
use super::BlockId;

/// Name given to freshly created reusable blocks
pub const UNTITLED_REUSABLE_BLOCK: &str = "Untitled block";

/// A single content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique block identifier
    pub id: BlockId,
    /// Registered type name
    pub name: String,
    /// Whether the block's content matched its type when it was parsed
    pub is_valid: bool,
    /// Attribute values, keyed by schema attribute name
    pub attributes: Attributes,
}

impl Block {
    /// Look up a single attribute
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// A saved block that can be inserted in many places.
///
/// `type_name` names the type of the block it stands for; `name` is the
/// user-facing title of the reusable block itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReusableBlock {
    /// Unique reusable block identifier
    pub id: BlockId,
    /// Human-readable title
    pub name: String,
    /// Type of the referenced block
    #[serde(rename = "type")]
    pub type_name: String,
    /// Attributes of the referenced block
    pub attributes: Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serializes_with_camel_case_fields() {
        let mut attributes = Attributes::new();
        attributes.insert("content".into(), "Hello".into());
        let block = Block {
            id: BlockId::new(),
            name: "core/paragraph".into(),
            is_valid: true,
            attributes,
        };

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["isValid"], serde_json::json!(true));
        assert_eq!(json["name"], serde_json::json!("core/paragraph"));
        assert_eq!(json["attributes"]["content"], serde_json::json!("Hello"));

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_reusable_block_uses_type_key() {
        let reusable = ReusableBlock {
            id: BlockId::new(),
            name: UNTITLED_REUSABLE_BLOCK.into(),
            type_name: "core/quote".into(),
            attributes: Attributes::new(),
        };

        let json = serde_json::to_value(&reusable).unwrap();
        assert_eq!(json["type"], serde_json::json!("core/quote"));
        assert!(json.get("typeName").is_none());
    }
}
