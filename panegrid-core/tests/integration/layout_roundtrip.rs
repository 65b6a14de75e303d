//! Save/load round-trip tests with caller-managed per-pane state
//!
//! The serializer hands the caller one `(content_handle, uid)` pair per
//! pane; these tests persist per-pane state keyed by UID the way a host
//! application would, and verify the state lands in the right panes after
//! a load into a fresh manager.

use std::collections::HashMap;

use panegrid_core::split::{
    LayoutNode, LayoutSnapshot, SplitDirection, SplitError, SplitViewManager, SplitViewOptions,
    weights_eq,
};

use SplitDirection::{Horizontally, Vertically};

/// Manager whose factory hands out sequential handles starting at `base`.
fn counting_manager(base: u32) -> SplitViewManager<u32> {
    let mut manager = SplitViewManager::with_options(SplitViewOptions {
        distribute_split_size: false,
    });
    let mut next = base;
    manager.set_content_factory(move || {
        let content = next;
        next += 1;
        content
    });
    manager
}

/// The three-pane workspace: one pane on the left, two stacked on the
/// right, with uneven weights.
fn three_pane_manager() -> SplitViewManager<u32> {
    let mut manager = counting_manager(0);
    manager.split(Horizontally).unwrap();
    manager.split(Vertically).unwrap();
    manager
}

#[test]
fn save_emits_uids_in_traversal_order() {
    let manager = three_pane_manager();

    let mut emitted = Vec::new();
    let description = manager
        .save(|content, uid| emitted.push((content, uid)))
        .unwrap();

    // panes 0, 1, 2 in pre-order, uids sequential from zero
    assert_eq!(emitted, vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(description.leaf_count(), 3);
    assert!(description.is_container());
}

#[test]
fn round_trip_restores_shape_and_weights() {
    let original = three_pane_manager();
    let description = original.save(|_, _| {}).unwrap();

    let mut restored = counting_manager(100);
    restored.load(&description, |_, _| {}).unwrap();

    let root = restored.root().unwrap();
    assert_eq!(root.direction, Horizontally);
    assert_eq!(root.child_count(), 2);
    assert!(weights_eq(root.slots[0].weight, 0.5));
    assert!(weights_eq(root.slots[1].weight, 0.5));

    let nested = root.slots[1].node.as_container().expect("nested container");
    assert_eq!(nested.direction, Vertically);
    assert_eq!(nested.weights(), vec![1.0, 1.0]);
    assert_eq!(restored.pane_count(), 3);
}

#[test]
fn round_trip_correlates_external_state_by_uid() {
    let original = three_pane_manager();
    let names: HashMap<u32, &str> = [(0, "editor"), (1, "terminal"), (2, "logs")].into();

    // save: external store keyed by uid
    let mut store: HashMap<u32, String> = HashMap::new();
    let description = original
        .save(|content, uid| {
            store.insert(uid, (*names.get(&content).unwrap()).to_string());
        })
        .unwrap();

    // load into a fresh manager with fresh handles
    let mut restored_names: HashMap<u32, String> = HashMap::new();
    let mut restored = counting_manager(100);
    restored
        .load(&description, |content, uid| {
            restored_names.insert(content, store[&uid].clone());
        })
        .unwrap();

    // panes are handed out in description order: 100 survives the clear,
    // 101 and 102 fill the remaining slots
    let panes = restored.panes();
    assert_eq!(panes.len(), 3);
    assert_eq!(restored_names[&panes[0]], "editor");
    assert_eq!(restored_names[&panes[1]], "terminal");
    assert_eq!(restored_names[&panes[2]], "logs");
}

#[test]
fn single_pane_round_trip_keeps_direction() {
    let manager = counting_manager(0);
    let description = manager.save(|_, _| {}).unwrap();

    let mut uids = Vec::new();
    let mut restored = counting_manager(50);
    restored.load(&description, |_, uid| uids.push(uid)).unwrap();

    assert_eq!(restored.pane_count(), 1);
    assert_eq!(uids, vec![0]);
    let description_again = restored.save(|_, _| {}).unwrap();
    assert_eq!(description_again, description);
}

#[test]
fn load_rejects_malformed_description_and_leaves_single_pane() {
    let mut manager = three_pane_manager();
    assert_eq!(manager.pane_count(), 3);

    // sizes/children mismatch
    let bad = LayoutNode::Container {
        split_direction: Horizontally,
        sizes: vec![1.0],
        children: vec![
            LayoutNode::Leaf {
                leaf_uid: 0,
                index: 0,
            },
            LayoutNode::Leaf {
                leaf_uid: 1,
                index: 1,
            },
        ],
        index: 0,
    };

    let result = manager.load(&bad, |_, _| {});
    assert!(matches!(
        result,
        Err(SplitError::InvalidLayoutDescription(_))
    ));
    // validation failed after the initial clear: single-pane state remains
    assert_eq!(manager.pane_count(), 1);
    let focused = manager.focused_pane().unwrap();
    assert!(manager.contains_pane(focused));
}

#[test]
fn load_without_factory_is_rejected() {
    let mut manager: SplitViewManager<u32> = SplitViewManager::new();
    let description = LayoutNode::Leaf {
        leaf_uid: 0,
        index: 0,
    };
    assert!(matches!(
        manager.load(&description, |_, _| {}),
        Err(SplitError::NoContentFactory)
    ));
}

#[test]
fn deep_layout_round_trips_exactly() {
    let mut original = counting_manager(0);
    original.split_many(Horizontally, &[3.0, 1.0, 2.0]).unwrap();
    let panes = original.panes();
    original.set_focus(panes[1]).unwrap();
    original.split_many(Vertically, &[1.0, 4.0]).unwrap();
    assert_eq!(original.pane_count(), 4);

    let description = original.save(|_, _| {}).unwrap();

    let mut restored = counting_manager(200);
    restored.load(&description, |_, _| {}).unwrap();

    let description_again = restored.save(|_, _| {}).unwrap();
    assert_eq!(description_again, description);
}

#[test]
fn snapshot_file_round_trip_restores_layout() {
    let original = three_pane_manager();
    let description = original.save(|_, _| {}).unwrap();

    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("workspace.json");

    LayoutSnapshot::new(description.clone())
        .save_to_file(&path)
        .expect("save should succeed");
    let snapshot = LayoutSnapshot::load_from_file(&path).expect("load should succeed");
    assert_eq!(snapshot.root, description);

    let mut restored = counting_manager(300);
    restored.load(&snapshot.root, |_, _| {}).unwrap();
    assert_eq!(restored.pane_count(), 3);
    assert_eq!(restored.root().unwrap().direction, Horizontally);
}

#[test]
fn load_replaces_existing_layout() {
    let mut manager = three_pane_manager();
    let description = manager.save(|_, _| {}).unwrap();

    // grow the layout further, then load the saved three-pane version back
    manager.split(Horizontally).unwrap();
    manager.split(Vertically).unwrap();
    assert_eq!(manager.pane_count(), 5);

    manager.load(&description, |_, _| {}).unwrap();
    assert_eq!(manager.pane_count(), 3);
    let root = manager.root().unwrap();
    assert_eq!(root.direction, Horizontally);
    assert_eq!(root.child_count(), 2);
}
