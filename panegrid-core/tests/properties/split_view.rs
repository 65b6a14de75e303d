//! Property-based tests for the split view manager
//!
//! Any randomized sequence of split/remove/clear/focus operations must
//! keep the tree canonical (the debug validator panics otherwise), keep
//! exact pane-count accounting, keep focus on a live pane, and survive a
//! save/load round trip isomorphically.

use proptest::prelude::*;

use panegrid_core::split::{
    ContainerNode, LayoutNode, PaneNode, SplitDirection, SplitViewManager, SplitViewOptions,
};

// ============================================================================
// Test Strategies
// ============================================================================

/// Manager whose factory hands out sequential handles starting at `base`.
fn counting_manager(base: u32, distribute: bool) -> SplitViewManager<u32> {
    let mut manager = SplitViewManager::with_options(SplitViewOptions {
        distribute_split_size: distribute,
    });
    let mut next = base;
    manager.set_content_factory(move || {
        let content = next;
        next += 1;
        content
    });
    manager
}

/// Strategy for generating split directions
fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontally),
        Just(SplitDirection::Vertically),
    ]
}

/// Represents an operation that can be performed on a manager
#[derive(Debug, Clone)]
enum LayoutOperation {
    /// Split the focused pane in the given direction
    Split(SplitDirection),
    /// Split the focused pane into several weighted siblings
    SplitMany {
        direction: SplitDirection,
        sizes: Vec<f64>,
    },
    /// Remove the focused pane
    Remove,
    /// Collapse back to a single pane
    Clear,
    /// Set focus to a pane (by index into panes())
    SetFocus { pane_index: usize },
}

/// Strategy for generating layout operations
fn layout_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        4 => split_direction_strategy().prop_map(LayoutOperation::Split),
        2 => (
            split_direction_strategy(),
            proptest::collection::vec(0.1f64..8.0, 2..=4),
        )
            .prop_map(|(direction, sizes)| LayoutOperation::SplitMany { direction, sizes }),
        3 => Just(LayoutOperation::Remove),
        1 => Just(LayoutOperation::Clear),
        3 => (0usize..16).prop_map(|pane_index| LayoutOperation::SetFocus { pane_index }),
    ]
}

/// Strategy for generating a sequence of layout operations
fn layout_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(layout_operation_strategy(), 0..=max_ops)
}

/// Apply an operation, ignoring user no-op errors, and return the change
/// in pane count the operation reported through its result.
fn apply_operation(manager: &mut SplitViewManager<u32>, op: &LayoutOperation) -> isize {
    let before = manager.pane_count() as isize;
    match op {
        LayoutOperation::Split(direction) => {
            let _ = manager.split(*direction);
        }
        LayoutOperation::SplitMany { direction, sizes } => {
            let _ = manager.split_many(*direction, sizes);
        }
        LayoutOperation::Remove => {
            let _ = manager.remove();
        }
        LayoutOperation::Clear => {
            let _ = manager.clear();
        }
        LayoutOperation::SetFocus { pane_index } => {
            let panes = manager.panes();
            if !panes.is_empty() {
                let _ = manager.set_focus(panes[pane_index % panes.len()]);
            }
        }
    }
    manager.pane_count() as isize - before
}

/// Walks the public tree view, asserting every weight is positive finite.
fn assert_positive_weights(container: &ContainerNode<u32>) {
    for slot in &container.slots {
        assert!(
            slot.weight.is_finite() && slot.weight > 0.0,
            "weight {} is not positive finite",
            slot.weight
        );
        if let PaneNode::Container(child) = &slot.node {
            assert_positive_weights(child);
        }
    }
}

/// Asserts two descriptions describe the same structure: identical split
/// directions, identical leaf-UID order, and identical size ratios.
fn assert_isomorphic(a: &LayoutNode, b: &LayoutNode) {
    match (a, b) {
        (
            LayoutNode::Leaf {
                leaf_uid: uid_a,
                index: index_a,
            },
            LayoutNode::Leaf {
                leaf_uid: uid_b,
                index: index_b,
            },
        ) => {
            assert_eq!(uid_a, uid_b, "leaf UID order diverged");
            assert_eq!(index_a, index_b, "leaf index diverged");
        }
        (
            LayoutNode::Container {
                split_direction: dir_a,
                sizes: sizes_a,
                children: children_a,
                index: index_a,
            },
            LayoutNode::Container {
                split_direction: dir_b,
                sizes: sizes_b,
                children: children_b,
                index: index_b,
            },
        ) => {
            assert_eq!(dir_a, dir_b, "split direction diverged");
            assert_eq!(index_a, index_b, "container index diverged");
            assert_eq!(sizes_a.len(), sizes_b.len(), "slot count diverged");
            assert_eq!(children_a.len(), children_b.len());
            let total_a: f64 = sizes_a.iter().sum();
            let total_b: f64 = sizes_b.iter().sum();
            for (size_a, size_b) in sizes_a.iter().zip(sizes_b) {
                let ratio_a = size_a / total_a;
                let ratio_b = size_b / total_b;
                assert!(
                    (ratio_a - ratio_b).abs() < 1e-9,
                    "size ratios diverged: {ratio_a} vs {ratio_b}"
                );
            }
            for (child_a, child_b) in children_a.iter().zip(children_b) {
                assert_isomorphic(child_a, child_b);
            }
        }
        _ => panic!("tree shapes diverged: leaf vs container"),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any operation sequence keeps the tree canonical: the debug-build
    /// validator runs after every mutation and panics on violations, and
    /// the observable state stays sane.
    #[test]
    fn prop_operations_never_corrupt_the_tree(
        distribute in any::<bool>(),
        ops in layout_operations_strategy(14),
    ) {
        let mut manager = counting_manager(0, distribute);
        for op in &ops {
            apply_operation(&mut manager, op);

            prop_assert!(manager.pane_count() >= 1);
            let focused = manager.focused_pane().expect("focus never empties");
            prop_assert!(manager.contains_pane(focused));
            assert_positive_weights(manager.root().expect("root exists"));
        }
    }

    /// Pane count changes by exactly +1 per successful split, -1 per
    /// successful remove, and never changes through compaction alone.
    #[test]
    fn prop_pane_count_accounting(
        ops in layout_operations_strategy(14),
    ) {
        let mut manager = counting_manager(0, true);
        for op in &ops {
            let panes_before = manager.pane_count();
            let delta = apply_operation(&mut manager, op);
            match op {
                LayoutOperation::Split(_) => prop_assert!(delta == 0 || delta == 1),
                LayoutOperation::SplitMany { sizes, .. } => {
                    prop_assert!(delta == 0 || delta == sizes.len() as isize - 1);
                }
                LayoutOperation::Remove => prop_assert!(delta == 0 || delta == -1),
                LayoutOperation::Clear => {
                    prop_assert_eq!(manager.pane_count(), 1);
                    prop_assert_eq!(delta, 1 - panes_before as isize);
                }
                LayoutOperation::SetFocus { .. } => prop_assert_eq!(delta, 0),
            }
        }
    }

    /// After a successful remove, focus lands on a surviving pane and the
    /// removed pane is gone.
    #[test]
    fn prop_remove_moves_focus_to_survivor(
        ops in layout_operations_strategy(10),
    ) {
        let mut manager = counting_manager(0, true);
        for op in &ops {
            apply_operation(&mut manager, op);
        }

        let focused = manager.focused_pane().expect("focus never empties");
        if let Ok(removed) = manager.remove() {
            prop_assert_eq!(removed, focused);
            prop_assert!(!manager.contains_pane(removed));
            let successor = manager.focused_pane().expect("a pane survives");
            prop_assert!(manager.contains_pane(successor));
        } else {
            prop_assert_eq!(manager.pane_count(), 1);
        }
    }

    /// Save then load on a fresh manager reproduces an isomorphic tree:
    /// identical directions, identical weight ratios, identical leaf-UID
    /// assignment order.
    #[test]
    fn prop_save_load_round_trip(
        ops in layout_operations_strategy(12),
    ) {
        let mut original = counting_manager(0, true);
        for op in &ops {
            apply_operation(&mut original, op);
        }

        let mut saved_uids = Vec::new();
        let description = original
            .save(|_content, uid| saved_uids.push(uid))
            .expect("save succeeds");
        prop_assert_eq!(saved_uids.len(), original.pane_count());
        // UIDs are sequential in traversal order
        for (expected, uid) in saved_uids.iter().enumerate() {
            prop_assert_eq!(*uid as usize, expected);
        }

        let mut restored = counting_manager(1000, true);
        let mut restored_uids = Vec::new();
        restored
            .load(&description, |_content, uid| restored_uids.push(uid))
            .expect("load succeeds");

        prop_assert_eq!(restored.pane_count(), original.pane_count());
        prop_assert_eq!(restored_uids, saved_uids);
        let description_again = restored.save(|_, _| {}).expect("second save succeeds");
        assert_isomorphic(&description, &description_again);
    }

    /// Clear always collapses to exactly one pane holding focus.
    #[test]
    fn prop_clear_collapses_to_single_pane(
        ops in layout_operations_strategy(10),
    ) {
        let mut manager = counting_manager(0, true);
        for op in &ops {
            apply_operation(&mut manager, op);
        }

        let survivor = manager.clear().expect("clear succeeds");
        prop_assert_eq!(manager.pane_count(), 1);
        prop_assert_eq!(manager.focused_pane(), Some(survivor));
        prop_assert_eq!(manager.panes(), vec![survivor]);
    }
}
