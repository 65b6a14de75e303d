//! Debug-build invariant validator
//!
//! Recomputes the structural invariants from scratch after every public
//! mutation. A violation is a bug in split/remove/compaction — never a
//! user-input problem — so it panics rather than returning an error:
//! silently continuing risks losing user panes.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use super::tree::{ContainerNode, PaneNode};

/// Asserts every invariant over the manager's state.
///
/// # Panics
///
/// Panics on any violation; see the individual messages.
pub(crate) fn validate_manager<C>(root: Option<&ContainerNode<C>>, focused: Option<C>, tracked: &[C])
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    let Some(root) = root else {
        assert!(
            focused.is_none(),
            "internal error: focus set while the tree is empty"
        );
        assert!(
            tracked.is_empty(),
            "internal error: focus history tracked while the tree is empty"
        );
        return;
    };

    validate_container(root, None, true);

    let contents = root.contents();
    let mut seen = HashSet::new();
    for content in &contents {
        assert!(
            seen.insert(*content),
            "internal error: duplicate content handle {content:?} in tree"
        );
    }

    if let Some(focused) = focused {
        assert!(
            seen.contains(&focused),
            "internal error: focused pane {focused:?} is not in the tree"
        );
    }
    for content in tracked {
        assert!(
            seen.contains(content),
            "internal error: focus history references removed pane {content:?}"
        );
    }
}

fn validate_container<C>(
    container: &ContainerNode<C>,
    parent_direction: Option<super::types::SplitDirection>,
    is_root: bool,
) where
    C: Copy + Eq + Hash + fmt::Debug,
{
    let n = container.child_count();
    assert!(n > 0, "internal error: container with no children");
    if n == 1 {
        assert!(
            is_root,
            "internal error: non-root container with a single child"
        );
        assert!(
            container.slots[0].node.is_leaf(),
            "internal error: root wraps a single non-leaf child"
        );
    }
    if let Some(parent_direction) = parent_direction {
        assert_ne!(
            container.direction, parent_direction,
            "internal error: container child repeats parent split direction"
        );
    }

    let expected_separators: Vec<usize> = (1..n).collect();
    assert_eq!(
        container.separators, expected_separators,
        "internal error: separator list out of sync with slot count"
    );

    for (i, slot) in container.slots.iter().enumerate() {
        assert!(
            slot.weight.is_finite() && slot.weight > 0.0,
            "internal error: slot weight {} is not positive finite",
            slot.weight
        );
        assert_eq!(
            slot.leading_margin,
            i > 0,
            "internal error: leading margin wrong on slot {i}"
        );
        if let PaneNode::Container(child) = &slot.node {
            validate_container(child, Some(container.direction), false);
        }
    }
}
