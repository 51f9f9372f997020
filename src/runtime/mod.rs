//! Block engine
//!
//! This module ties the three block operations together behind `BlockEngine`:
//! creating blocks from a type schema, discovering which types a selection can
//! become, and switching a selection to another type. The engine owns nothing
//! but its two capabilities, the type registry and the id generator.

pub mod discovery;
pub mod factory;
pub mod switcher;

use std::sync::Arc;

use crate::core::{
    Attributes, Block, BlockType, IdGenerator, ReusableBlock, TypeRegistry, UuidGenerator,
};

pub use switcher::TransformError;

/// Errors from the block factory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The requested type is not registered
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}

/// Entry point for creating and transforming blocks
#[derive(Clone)]
pub struct BlockEngine {
    registry: Arc<dyn TypeRegistry>,
    ids: Arc<dyn IdGenerator>,
}

impl BlockEngine {
    /// Create an engine over explicit capabilities
    pub fn new(registry: Arc<dyn TypeRegistry>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { registry, ids }
    }

    /// Create an engine that draws random UUIDs
    pub fn with_registry(registry: Arc<dyn TypeRegistry>) -> Self {
        Self::new(registry, Arc::new(UuidGenerator))
    }

    /// Create a block of `type_name`, keeping the supplied attributes the
    /// schema declares and filling the rest from non-empty defaults.
    pub fn create_block(&self, type_name: &str, attributes: Attributes) -> Result<Block, EngineError> {
        factory::create_block(self.registry.as_ref(), self.ids.as_ref(), type_name, attributes)
    }

    /// Create a reusable block referencing a block of `type_name`
    pub fn create_reusable_block(&self, type_name: &str, attributes: Attributes) -> ReusableBlock {
        factory::create_reusable_block(self.ids.as_ref(), type_name, attributes)
    }

    /// Types the given selection could be switched to
    pub fn possible_transformations(&self, blocks: &[Block]) -> Vec<Arc<BlockType>> {
        discovery::possible_transformations(self.registry.as_ref(), blocks)
    }

    /// Switch the selection to `destination`, or `None` if no transformation applies.
    ///
    /// The inputs are never modified; on `None` the caller keeps its selection.
    pub fn switch_to_block_type(&self, blocks: &[Block], destination: &str) -> Option<Vec<Block>> {
        self.try_switch_to_block_type(blocks, destination).ok()
    }

    /// Like [`switch_to_block_type`](Self::switch_to_block_type), reporting why
    /// a transformation was refused.
    pub fn try_switch_to_block_type(
        &self,
        blocks: &[Block],
        destination: &str,
    ) -> Result<Vec<Block>, TransformError> {
        switcher::switch_to_block_type(self.registry.as_ref(), self.ids.as_ref(), blocks, destination)
    }
}

impl std::fmt::Debug for BlockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockEngine").finish_non_exhaustive()
    }
}
