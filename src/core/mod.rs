//! Core block abstractions and types
//!
//! This module defines the block data model, the type definitions held by the
//! registry, transformation rules, and the identifier capability the engine
//! draws fresh ids from.

pub mod attribute;
pub mod block;
pub mod block_type;
pub mod registry;
pub mod transform;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub use attribute::{AttributeValue, Attributes};
pub use block::{Block, ReusableBlock};
pub use block_type::{AttributeDescriptor, AttributeKind, AttributeSchema, BlockType, BlockTypeManifest};
pub use registry::{BlockTypeRegistry, RegistryError, TypeRegistry};
pub use transform::{
    BlockTransform, MalformedOutput, RuleKind, TransformFn, TransformInput, TransformOutput, TransformedBlock,
    TransformationRule,
};

/// Unique identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BlockId {
    fn from(u: Uuid) -> Self {
        BlockId(u)
    }
}

/// Source of fresh block identifiers.
///
/// Implementations must never hand out the same id twice for the lifetime of
/// the process.
pub trait IdGenerator: Send + Sync {
    /// Produce a new unique identifier
    fn new_id(&self) -> BlockId;
}

/// Random UUID v4 identifiers. The default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> BlockId {
        BlockId::new()
    }
}

/// Deterministic identifiers counting up from 1.
///
/// Useful wherever a predictable id sequence matters, mostly tests and
/// snapshot fixtures.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Create a generator whose first id is `1`
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> BlockId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        BlockId(Uuid::from_u128(n as u128))
    }
}
