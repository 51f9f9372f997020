//! Editor Blocks - Block creation and transformation engine
//!
//! This crate provides the block model of a visual editor: creating blocks from
//! registered type schemas, discovering which types a selection can become, and
//! switching blocks between types through declarative transformation rules.

pub mod core;
pub mod runtime;
mod tests;

// Re-export commonly used types
pub use crate::core::{
    AttributeValue, Attributes, Block, BlockId, BlockType, BlockTypeRegistry, IdGenerator,
    TypeRegistry,
};
pub use crate::runtime::{BlockEngine, EngineError, TransformError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
