//! Transformation rules between block types
//!
//! A block type lists rules in two directions: `transforms_from` says which
//! other types may become this one, `transforms_to` says what this type may
//! become. Rules are tagged by kind; the engine only acts on `Block` rules and
//! skips the rest, so new kinds can be declared without touching it.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use super::attribute::Attributes;
use super::BlockId;

/// Transform callback shared between every holder of a rule
pub type TransformFn = Arc<dyn Fn(TransformInput<'_>) -> TransformOutput + Send + Sync>;

/// Kind discriminant of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Block-to-block conversion
    Block,
    /// Conversion from raw pasted content
    Raw,
    /// Conversion from a shortcode
    Shortcode,
}

/// A declarative conversion rule
#[derive(Debug, Clone)]
pub enum TransformationRule {
    /// Converts blocks of one registered type into another
    Block(BlockTransform),
    /// Converts raw content; not handled by the block engine
    Raw,
    /// Converts a shortcode; not handled by the block engine
    Shortcode {
        /// Shortcode tag, e.g. `gallery`
        tag: String,
    },
}

impl TransformationRule {
    /// Kind discriminant of this rule
    pub fn kind(&self) -> RuleKind {
        match self {
            TransformationRule::Block(_) => RuleKind::Block,
            TransformationRule::Raw => RuleKind::Raw,
            TransformationRule::Shortcode { .. } => RuleKind::Shortcode,
        }
    }

    /// The block-to-block payload, if this is a block rule
    pub fn as_block(&self) -> Option<&BlockTransform> {
        match self {
            TransformationRule::Block(rule) => Some(rule),
            TransformationRule::Raw | TransformationRule::Shortcode { .. } => None,
        }
    }
}

impl From<BlockTransform> for TransformationRule {
    fn from(rule: BlockTransform) -> Self {
        TransformationRule::Block(rule)
    }
}

/// Block-to-block conversion rule
#[derive(Clone)]
pub struct BlockTransform {
    /// Source type names (in `transforms_from`) or target type names (in `transforms_to`)
    pub blocks: Vec<String>,
    /// Whether the rule takes the whole selection at once
    pub is_multi_block: bool,
    /// Conversion callback
    pub transform: TransformFn,
}

impl BlockTransform {
    /// Create a single-block rule
    pub fn new<I, S, F>(blocks: I, transform: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(TransformInput<'_>) -> TransformOutput + Send + Sync + 'static,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
            is_multi_block: false,
            transform: Arc::new(transform),
        }
    }

    /// Mark the rule as consuming the whole selection
    pub fn multi_block(mut self) -> Self {
        self.is_multi_block = true;
        self
    }

    /// Whether `name` is listed by this rule
    pub fn lists(&self, name: &str) -> bool {
        self.blocks.iter().any(|b| b == name)
    }

    /// Whether the rule may be applied to a selection of the given multiplicity.
    ///
    /// Multi-block selections need a multi-block rule; single selections
    /// accept either.
    pub fn accepts_selection(&self, is_multi_selection: bool) -> bool {
        self.is_multi_block || !is_multi_selection
    }

    /// Run the callback
    pub fn apply(&self, input: TransformInput<'_>) -> TransformOutput {
        (self.transform)(input)
    }
}

impl fmt::Debug for BlockTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTransform")
            .field("blocks", &self.blocks)
            .field("is_multi_block", &self.is_multi_block)
            .finish_non_exhaustive()
    }
}

/// Attributes handed to a transform callback
#[derive(Debug, Clone)]
pub enum TransformInput<'a> {
    /// The first selected block, for single-block rules
    Single(&'a Attributes),
    /// Every selected block in selection order, for multi-block rules
    Multi(Vec<&'a Attributes>),
}

impl<'a> TransformInput<'a> {
    /// Number of attribute maps in the input
    pub fn len(&self) -> usize {
        match self {
            TransformInput::Single(_) => 1,
            TransformInput::Multi(all) => all.len(),
        }
    }

    /// Always false for `Single`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the callback was given the whole selection
    pub fn is_multi(&self) -> bool {
        matches!(self, TransformInput::Multi(_))
    }

    /// First attribute map of the input
    pub fn first(&self) -> Option<&'a Attributes> {
        match self {
            TransformInput::Single(attrs) => Some(*attrs),
            TransformInput::Multi(all) => all.first().copied(),
        }
    }

    /// All attribute maps of the input, in order
    pub fn to_vec(&self) -> Vec<&'a Attributes> {
        match self {
            TransformInput::Single(attrs) => vec![*attrs],
            TransformInput::Multi(all) => all.clone(),
        }
    }
}

/// Block-shaped record produced by a transform callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedBlock {
    /// Type name the record claims
    pub name: String,
    /// Attribute values, taken as-is; a missing or null map reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Attributes,
    /// Identifier suggested by the callback; always replaced by the engine,
    /// so JSON records may carry any `id` shape
    #[serde(default, skip_deserializing)]
    pub id: Option<BlockId>,
    /// Validity flag carried over to the resulting block
    #[serde(default = "default_valid")]
    pub is_valid: bool,
}

fn default_valid() -> bool {
    true
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Attributes, D::Error> {
    Ok(Option::<Attributes>::deserialize(deserializer)?.unwrap_or_default())
}

impl TransformedBlock {
    /// Create a record of the given type
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            id: None,
            is_valid: true,
        }
    }
}

/// Whatever a transform callback hands back
#[derive(Debug, Clone)]
pub enum TransformOutput {
    /// The callback produced nothing
    Nothing,
    /// One record
    Single(TransformedBlock),
    /// Several records, in document order
    Many(Vec<TransformedBlock>),
    /// Ad hoc JSON; must be a record or an array of records
    Json(serde_json::Value),
}

/// Why a transform output was not record-like
#[derive(Debug, thiserror::Error)]
pub enum MalformedOutput {
    /// The callback produced nothing
    #[error("transform produced no output")]
    Nothing,

    /// A JSON value that is not an object
    #[error("expected a block record, found {0}")]
    NotARecord(&'static str),

    /// An object that does not read as a block record
    #[error("invalid block record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

impl TransformOutput {
    /// Normalise the output into a sequence of records.
    ///
    /// A single record becomes a one-element sequence. Only the shape is
    /// checked here; type names are left for the caller to resolve.
    pub fn into_records(self) -> Result<Vec<TransformedBlock>, MalformedOutput> {
        match self {
            TransformOutput::Nothing => Err(MalformedOutput::Nothing),
            TransformOutput::Single(record) => Ok(vec![record]),
            TransformOutput::Many(records) => Ok(records),
            TransformOutput::Json(value) => match value {
                serde_json::Value::Array(items) => items.into_iter().map(json_record).collect(),
                other => Ok(vec![json_record(other)?]),
            },
        }
    }
}

fn json_record(value: serde_json::Value) -> Result<TransformedBlock, MalformedOutput> {
    let found = match &value {
        serde_json::Value::Object(_) => return Ok(serde_json::from_value(value)?),
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a nested array",
    };
    Err(MalformedOutput::NotARecord(found))
}

impl From<TransformedBlock> for TransformOutput {
    fn from(record: TransformedBlock) -> Self {
        TransformOutput::Single(record)
    }
}

impl From<Vec<TransformedBlock>> for TransformOutput {
    fn from(records: Vec<TransformedBlock>) -> Self {
        TransformOutput::Many(records)
    }
}

impl From<Option<TransformedBlock>> for TransformOutput {
    fn from(record: Option<TransformedBlock>) -> Self {
        record.map_or(TransformOutput::Nothing, TransformOutput::Single)
    }
}

impl From<serde_json::Value> for TransformOutput {
    fn from(value: serde_json::Value) -> Self {
        TransformOutput::Json(value)
    }
}
