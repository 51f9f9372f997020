//! Block factory
//!
//! Builds new blocks from a registered type's schema.

use crate::core::block::UNTITLED_REUSABLE_BLOCK;
use crate::core::{Attributes, Block, IdGenerator, ReusableBlock, TypeRegistry};

use super::EngineError;

/// Create a block of `type_name`.
///
/// For every attribute the schema declares, a supplied value wins, otherwise a
/// non-empty default is used, otherwise the key is left out. Supplied keys the
/// schema does not declare are dropped.
pub fn create_block(
    registry: &dyn TypeRegistry,
    ids: &dyn IdGenerator,
    type_name: &str,
    mut supplied: Attributes,
) -> Result<Block, EngineError> {
    let block_type = registry
        .block_type(type_name)
        .ok_or_else(|| EngineError::UnknownBlockType(type_name.to_string()))?;

    let mut attributes = Attributes::with_capacity(block_type.attributes.len());
    for (key, descriptor) in &block_type.attributes {
        if let Some(value) = supplied.remove(key) {
            attributes.insert(key.clone(), value);
        } else if let Some(default) = descriptor.effective_default() {
            attributes.insert(key.clone(), default.clone());
        }
    }

    Ok(Block {
        id: ids.new_id(),
        name: block_type.name.clone(),
        is_valid: true,
        attributes,
    })
}

/// Create a reusable block wrapping a block of `type_name`.
///
/// The type is not looked up; reusable blocks may reference types that are
/// registered later.
pub fn create_reusable_block(
    ids: &dyn IdGenerator,
    type_name: &str,
    attributes: Attributes,
) -> ReusableBlock {
    ReusableBlock {
        id: ids.new_id(),
        name: UNTITLED_REUSABLE_BLOCK.to_string(),
        type_name: type_name.to_string(),
        attributes,
    }
}
