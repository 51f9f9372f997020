//! Discovery scenarios over the example vocabulary

use std::sync::Arc;

use crate::core::{Attributes, BlockTransform, BlockType, TransformOutput};

use super::example_blocks::{attrs, engine_with, example_registry, HEADING, LIST, PARAGRAPH, QUOTE};

fn names(types: &[Arc<BlockType>]) -> Vec<String> {
    types.iter().map(|t| t.name.clone()).collect()
}

#[test]
fn test_empty_selection_has_no_candidates() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);

    assert!(engine.possible_transformations(&[]).is_empty());
}

#[test]
fn test_single_paragraph_candidates() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);
    let paragraph = engine.create_block(PARAGRAPH, Attributes::new()).unwrap();

    // Multi-block rules also apply to a single selection.
    let found = engine.possible_transformations(&[paragraph]);
    assert_eq!(names(&found), [HEADING, QUOTE, LIST]);
}

#[test]
fn test_multi_paragraph_candidates_need_multi_rules() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);
    let selection = vec![
        engine.create_block(PARAGRAPH, attrs([("content", "one".into())])).unwrap(),
        engine.create_block(PARAGRAPH, attrs([("content", "two".into())])).unwrap(),
    ];

    let found = engine.possible_transformations(&selection);
    assert_eq!(names(&found), [QUOTE, LIST]);
}

#[test]
fn test_outbound_candidates() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);
    let heading = engine.create_block(HEADING, Attributes::new()).unwrap();

    // quote accepts headings inbound; heading itself declares paragraph outbound.
    let found = engine.possible_transformations(&[heading]);
    assert_eq!(names(&found), [QUOTE, PARAGRAPH]);
}

#[test]
fn test_heterogeneous_selection_has_no_candidates() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);
    let selection = vec![
        engine.create_block(PARAGRAPH, Attributes::new()).unwrap(),
        engine.create_block(HEADING, Attributes::new()).unwrap(),
    ];

    assert!(engine.possible_transformations(&selection).is_empty());
}

#[test]
fn test_candidates_are_deduplicated() {
    let registry = example_registry();
    registry
        .register(
            BlockType::new("test/callout")
                .with_transform_from(BlockTransform::new([PARAGRAPH], |_| TransformOutput::Nothing))
                .with_transform_from(BlockTransform::new([PARAGRAPH, HEADING], |_| TransformOutput::Nothing))
                .with_transform_to(BlockTransform::new([PARAGRAPH, PARAGRAPH], |_| TransformOutput::Nothing)),
        )
        .unwrap();
    let (engine, _) = engine_with(&registry);
    let callout = engine.create_block("test/callout", Attributes::new()).unwrap();
    let paragraph = engine.create_block(PARAGRAPH, Attributes::new()).unwrap();

    assert_eq!(names(&engine.possible_transformations(&[callout])), [PARAGRAPH]);
    assert_eq!(
        names(&engine.possible_transformations(&[paragraph])),
        [HEADING, QUOTE, LIST, "test/callout"]
    );
}

/// Types registered between calls are picked up by the next call.
#[test]
fn test_registry_changes_are_seen_between_calls() {
    let registry = example_registry();
    let (engine, _) = engine_with(&registry);
    let quote = engine.create_block(QUOTE, Attributes::new()).unwrap();

    assert_eq!(names(&engine.possible_transformations(&[quote.clone()])), [PARAGRAPH]);

    registry.unregister(PARAGRAPH).unwrap();
    assert!(engine.possible_transformations(&[quote.clone()]).is_empty());

    registry
        .register(BlockType::new("core/pullquote").with_transform_from(BlockTransform::new([QUOTE], |_| {
            TransformOutput::Nothing
        })))
        .unwrap();
    assert_eq!(names(&engine.possible_transformations(&[quote])), ["core/pullquote"]);
}
