//! Transformation execution
//!
//! Switches a selection of blocks to another type by running the matching
//! transformation rule and validating what it returns. The switch is
//! all-or-nothing: either every result block is valid and handed back, or the
//! caller gets an error and keeps its original selection.

use tracing::{debug, trace};

use crate::core::{
    Block, BlockTransform, BlockType, IdGenerator, MalformedOutput, TransformInput, TypeRegistry,
};

use super::discovery::selection_type;

/// Why a switch was refused
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Nothing was selected
    #[error("no blocks selected")]
    EmptySelection,

    /// A multi-block selection mixes types
    #[error("selection mixes block types")]
    MixedSelection,

    /// A type taking part in the switch is not registered
    #[error("block type not registered: {0}")]
    UnknownBlockType(String),

    /// Neither type declares a usable rule
    #[error("no transformation from {source_type} to {destination}")]
    NoMatchingRule {
        /// Type of the selection
        source_type: String,
        /// Requested type
        destination: String,
    },

    /// The transform returned something that is not block-shaped
    #[error("malformed transform output: {0}")]
    MalformedOutput(#[from] MalformedOutput),

    /// The transform produced a block of an unregistered type
    #[error("transform produced unregistered block type: {0}")]
    UnregisteredResult(String),

    /// The transform never produced the requested type
    #[error("transform produced no {0} block")]
    DestinationMissing(String),
}

/// Pick the rule converting `source` into `destination`.
///
/// Inbound rules declared by the destination are searched before the
/// outbound rules declared by the source, so the destination's rule wins when
/// both exist. Within each list the first match wins.
pub(crate) fn find_transformation<'a>(
    source: &'a BlockType,
    destination: &'a BlockType,
    is_multi: bool,
) -> Option<&'a BlockTransform> {
    destination
        .block_transforms_from()
        .find(|rule| rule.lists(&source.name) && rule.accepts_selection(is_multi))
        .or_else(|| {
            source
                .block_transforms_to()
                .find(|rule| rule.lists(&destination.name) && rule.accepts_selection(is_multi))
        })
}

/// Switch `blocks` to `destination`.
///
/// The first result block of the destination type inherits the id of the
/// first selected block; every other result block gets a fresh id.
pub fn switch_to_block_type(
    registry: &dyn TypeRegistry,
    ids: &dyn IdGenerator,
    blocks: &[Block],
    destination: &str,
) -> Result<Vec<Block>, TransformError> {
    let result = run_switch(registry, ids, blocks, destination);
    if let Err(err) = &result {
        debug!(
            destination = %destination,
            selected = blocks.len(),
            error = %err,
            "block switch refused"
        );
    }
    result
}

fn run_switch(
    registry: &dyn TypeRegistry,
    ids: &dyn IdGenerator,
    blocks: &[Block],
    destination: &str,
) -> Result<Vec<Block>, TransformError> {
    let first = blocks.first().ok_or(TransformError::EmptySelection)?;
    let source_name = selection_type(blocks).ok_or(TransformError::MixedSelection)?;
    let is_multi = blocks.len() > 1;

    let destination_type = registry
        .block_type(destination)
        .ok_or_else(|| TransformError::UnknownBlockType(destination.to_string()))?;
    let source_type = registry
        .block_type(source_name)
        .ok_or_else(|| TransformError::UnknownBlockType(source_name.to_string()))?;

    let rule = find_transformation(&source_type, &destination_type, is_multi).ok_or_else(|| {
        TransformError::NoMatchingRule {
            source_type: source_name.to_string(),
            destination: destination.to_string(),
        }
    })?;
    trace!(
        source = %source_name,
        destination = %destination,
        multi_block = rule.is_multi_block,
        "selected transformation rule"
    );

    let input = if rule.is_multi_block {
        TransformInput::Multi(blocks.iter().map(|b| &b.attributes).collect())
    } else {
        TransformInput::Single(&first.attributes)
    };
    let records = rule.apply(input).into_records()?;

    if let Some(bad) = records.iter().find(|r| registry.block_type(&r.name).is_none()) {
        return Err(TransformError::UnregisteredResult(bad.name.clone()));
    }

    let continuation = records
        .iter()
        .position(|r| r.name == destination)
        .ok_or_else(|| TransformError::DestinationMissing(destination.to_string()))?;

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Block {
            id: if index == continuation { first.id } else { ids.new_id() },
            name: record.name,
            is_valid: record.is_valid,
            attributes: record.attributes,
        })
        .collect())
}
