//! Transformation discovery
//!
//! Works out which registered types a selection of blocks could be switched
//! to. Discovery is informational: it lists candidates from the rules alone and
//! never runs a transform.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::core::{Block, BlockType, TypeRegistry};

/// Name of the type shared by every block of the selection.
///
/// `None` for an empty selection or one that mixes types.
pub(crate) fn selection_type(blocks: &[Block]) -> Option<&str> {
    let first = blocks.first()?;
    blocks
        .iter()
        .all(|b| b.name == first.name)
        .then_some(first.name.as_str())
}

/// Types the selection could become, without duplicates.
///
/// Types accepting the source through their inbound rules come first, in
/// registry order, followed by the targets of the source's own outbound rules
/// in declaration order. Names that are no longer registered are dropped.
pub fn possible_transformations(registry: &dyn TypeRegistry, blocks: &[Block]) -> Vec<Arc<BlockType>> {
    let Some(source_name) = selection_type(blocks) else {
        return Vec::new();
    };
    let Some(source) = registry.block_type(source_name) else {
        return Vec::new();
    };
    let is_multi = blocks.len() > 1;

    let inbound = registry
        .block_types()
        .into_iter()
        .filter(|candidate| {
            candidate
                .block_transforms_from()
                .any(|rule| rule.lists(source_name) && rule.accepts_selection(is_multi))
        })
        .map(|candidate| candidate.name.clone())
        .collect::<Vec<_>>();

    let outbound = source
        .block_transforms_to()
        .filter(|rule| rule.accepts_selection(is_multi))
        .flat_map(|rule| rule.blocks.iter().cloned());

    let mut seen = HashSet::new();
    let allowed: Vec<_> = inbound
        .into_iter()
        .chain(outbound)
        .filter(|name| seen.insert(name.clone()))
        .filter_map(|name| registry.block_type(&name))
        .collect();

    trace!(
        source = %source_name,
        selected = blocks.len(),
        candidates = allowed.len(),
        "computed possible transformations"
    );
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attributes, BlockId, BlockTransform, BlockTypeRegistry, TransformOutput};

    fn block(name: &str) -> Block {
        Block {
            id: BlockId::new(),
            name: name.into(),
            is_valid: true,
            attributes: Attributes::new(),
        }
    }

    fn noop(blocks: &[&str]) -> BlockTransform {
        BlockTransform::new(blocks.iter().copied(), |_| TransformOutput::Nothing)
    }

    fn names(types: &[Arc<BlockType>]) -> Vec<&str> {
        types.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_selection_type() {
        assert_eq!(selection_type(&[]), None);
        assert_eq!(selection_type(&[block("a")]), Some("a"));
        assert_eq!(selection_type(&[block("a"), block("a")]), Some("a"));
        assert_eq!(selection_type(&[block("a"), block("b")]), None);
    }

    #[test]
    fn test_inbound_before_outbound_and_deduplicated() {
        let registry = BlockTypeRegistry::new();
        registry
            .register(BlockType::new("a").with_transform_to(noop(&["c", "b", "c"])))
            .unwrap();
        registry
            .register(BlockType::new("b").with_transform_from(noop(&["a"])))
            .unwrap();
        registry.register(BlockType::new("c")).unwrap();

        let found = possible_transformations(&registry, &[block("a")]);
        assert_eq!(names(&found), ["b", "c"]);
    }

    #[test]
    fn test_unregistered_targets_are_dropped() {
        let registry = BlockTypeRegistry::new();
        registry
            .register(BlockType::new("a").with_transform_to(noop(&["ghost", "b"])))
            .unwrap();
        registry.register(BlockType::new("b")).unwrap();

        let found = possible_transformations(&registry, &[block("a")]);
        assert_eq!(names(&found), ["b"]);
    }

    #[test]
    fn test_unregistered_source_has_no_candidates() {
        let registry = BlockTypeRegistry::new();
        registry
            .register(BlockType::new("b").with_transform_from(noop(&["a"])))
            .unwrap();

        assert!(possible_transformations(&registry, &[block("a")]).is_empty());
    }
}
