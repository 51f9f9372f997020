//! Block Type Registry - Lookup of block types by name
//!
//! The engine reads types through the `TypeRegistry` trait and never mutates
//! them. `BlockTypeRegistry` is the in-memory implementation: it supports
//! - Type registration and unregistration
//! - Lookup by name and listing in registration order
//! - Validation of definitions before they become visible

use crate::core::block_type::BlockType;
use crate::core::transform::TransformationRule;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Read-only view of the registered block types.
///
/// Every call is a fresh lookup; implementations may be updated between calls.
pub trait TypeRegistry: Send + Sync {
    /// Look up a type by name
    fn block_type(&self, name: &str) -> Option<Arc<BlockType>>;

    /// All registered types, in registration order
    fn block_types(&self) -> Vec<Arc<BlockType>>;
}

/// Registry for managing available block types
///
/// The registry uses `Arc<RwLock<IndexMap>>` for thread-safe access to types.
/// Readers never hold the lock beyond a single lookup, so registration may
/// happen concurrently with engine calls.
#[derive(Clone, Default)]
pub struct BlockTypeRegistry {
    types: Arc<RwLock<IndexMap<String, Arc<BlockType>>>>,
}

impl BlockTypeRegistry {
    /// Create a new empty registry
    ///
    /// # Example
    /// ```
    /// use editor_blocks::core::registry::BlockTypeRegistry;
    ///
    /// let registry = BlockTypeRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new block type
    ///
    /// # Returns
    /// * `Ok(Arc<BlockType>)` with the shared definition if registration succeeds
    /// * `Err(RegistryError)` if the name is taken or validation fails
    ///
    /// # Example
    /// ```
    /// use editor_blocks::core::{BlockType, BlockTypeRegistry};
    ///
    /// let registry = BlockTypeRegistry::new();
    /// registry.register(BlockType::new("core/paragraph")).unwrap();
    /// assert!(registry.contains("core/paragraph"));
    /// ```
    pub fn register(&self, block_type: BlockType) -> Result<Arc<BlockType>, RegistryError> {
        validate_block_type(&block_type)?;

        let mut types = self.types.write();
        if types.contains_key(&block_type.name) {
            return Err(RegistryError::DuplicateBlockType(block_type.name));
        }

        let name = block_type.name.clone();
        let shared = Arc::new(block_type);
        types.insert(name.clone(), Arc::clone(&shared));
        debug!(block_type = %name, "registered block type");
        Ok(shared)
    }

    /// Unregister a block type
    ///
    /// # Returns
    /// * `Ok(Arc<BlockType>)` with the removed definition
    /// * `Err(RegistryError)` if no type has that name
    pub fn unregister(&self, name: &str) -> Result<Arc<BlockType>, RegistryError> {
        let removed = self
            .types
            .write()
            .shift_remove(name)
            .ok_or_else(|| RegistryError::BlockTypeNotFound(name.to_string()))?;

        debug!(block_type = %name, "unregistered block type");
        Ok(removed)
    }

    /// Get a block type by name
    pub fn get(&self, name: &str) -> Result<Arc<BlockType>, RegistryError> {
        self.types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::BlockTypeNotFound(name.to_string()))
    }

    /// Names of all registered types, in registration order
    pub fn names(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    /// Get the number of registered types
    pub fn count(&self) -> usize {
        self.types.read().len()
    }

    /// Check if a type with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Remove every registered type
    pub fn clear(&self) {
        self.types.write().clear();
    }
}

impl TypeRegistry for BlockTypeRegistry {
    fn block_type(&self, name: &str) -> Option<Arc<BlockType>> {
        self.types.read().get(name).cloned()
    }

    fn block_types(&self) -> Vec<Arc<BlockType>> {
        self.types.read().values().cloned().collect()
    }
}

/// Validate a block type before registration
fn validate_block_type(block_type: &BlockType) -> Result<(), RegistryError> {
    if block_type.name.trim().is_empty() {
        return Err(RegistryError::ValidationError(
            "Block type name cannot be empty".into(),
        ));
    }

    if block_type.attributes.keys().any(|key| key.is_empty()) {
        return Err(RegistryError::ValidationError(format!(
            "{}: attribute names cannot be empty",
            block_type.name
        )));
    }

    let rules = block_type
        .transforms_from
        .iter()
        .chain(&block_type.transforms_to)
        .filter_map(TransformationRule::as_block);

    for rule in rules {
        if rule.blocks.is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "{}: block transform must list at least one block type",
                block_type.name
            )));
        }
        if rule.blocks.iter().any(|b| b.is_empty()) {
            return Err(RegistryError::ValidationError(format!(
                "{}: block transform lists an empty block type name",
                block_type.name
            )));
        }
    }

    Ok(())
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No type with the given name
    #[error("Block type not found: {0}")]
    BlockTypeNotFound(String),

    /// Attempted to register a name twice
    #[error("Duplicate block type: {0}")]
    DuplicateBlockType(String),

    /// Definition failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),
}
