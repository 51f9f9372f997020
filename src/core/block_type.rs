//! Block type definitions
//!
//! A `BlockType` is what the registry hands out: the attribute schema used to
//! build blocks and the transformation rules used to convert them. Schemas can
//! be declared in JSON through `BlockTypeManifest`; transforms are code and
//! are attached with the builder methods.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::attribute::AttributeValue;
use super::transform::{BlockTransform, TransformationRule};

/// Attribute schema of a type, in declaration order
pub type AttributeSchema = IndexMap<String, AttributeDescriptor>;

/// Declared value kind of an attribute (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// String attribute
    String,
    /// Numeric attribute
    Number,
    /// Integer attribute
    Integer,
    /// Boolean attribute
    Boolean,
    /// Array attribute
    Array,
    /// Object attribute
    Object,
}

/// Schema entry for one attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Declared kind
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttributeKind>,
    /// Value used when a block is created without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<AttributeValue>,
}

impl AttributeDescriptor {
    /// Descriptor of the given kind with no default
    pub fn of(kind: AttributeKind) -> Self {
        Self {
            kind: Some(kind),
            default: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Default value, if one is declared and non-empty
    pub fn effective_default(&self) -> Option<&AttributeValue> {
        self.default.as_ref().filter(|d| d.is_truthy())
    }
}

/// A registered block type
#[derive(Debug, Clone)]
pub struct BlockType {
    /// Unique type name, e.g. `core/paragraph`
    pub name: String,
    /// Human-readable title
    pub title: Option<String>,
    /// Inserter category
    pub category: Option<String>,
    /// Attribute schema
    pub attributes: AttributeSchema,
    /// Rules converting other types into this one
    pub transforms_from: Vec<TransformationRule>,
    /// Rules converting this type into others
    pub transforms_to: Vec<TransformationRule>,
}

impl BlockType {
    /// Create a type with an empty schema and no transforms
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            category: None,
            attributes: AttributeSchema::new(),
            transforms_from: Vec::new(),
            transforms_to: Vec::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Declare an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, descriptor: AttributeDescriptor) -> Self {
        self.attributes.insert(key.into(), descriptor);
        self
    }

    /// Add an inbound rule
    pub fn with_transform_from(mut self, rule: impl Into<TransformationRule>) -> Self {
        self.transforms_from.push(rule.into());
        self
    }

    /// Add an outbound rule
    pub fn with_transform_to(mut self, rule: impl Into<TransformationRule>) -> Self {
        self.transforms_to.push(rule.into());
        self
    }

    /// Inbound block-to-block rules, other kinds skipped
    pub fn block_transforms_from(&self) -> impl Iterator<Item = &BlockTransform> {
        self.transforms_from.iter().filter_map(TransformationRule::as_block)
    }

    /// Outbound block-to-block rules, other kinds skipped
    pub fn block_transforms_to(&self) -> impl Iterator<Item = &BlockTransform> {
        self.transforms_to.iter().filter_map(TransformationRule::as_block)
    }
}

/// Declarative, serialisable part of a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeManifest {
    /// Unique type name
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Inserter category
    #[serde(default)]
    pub category: Option<String>,
    /// Attribute schema
    #[serde(default)]
    pub attributes: AttributeSchema,
}

impl BlockTypeManifest {
    /// Parse a manifest from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<BlockTypeManifest> for BlockType {
    fn from(manifest: BlockTypeManifest) -> Self {
        Self {
            name: manifest.name,
            title: manifest.title,
            category: manifest.category,
            attributes: manifest.attributes,
            transforms_from: Vec::new(),
            transforms_to: Vec::new(),
        }
    }
}
