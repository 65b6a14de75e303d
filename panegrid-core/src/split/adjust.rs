//! Compaction pass restoring the canonical minimal tree shape
//!
//! Runs after every mutation. Canonical form: no container holds a single
//! child (except the root wrapping the sole remaining leaf), and no
//! container child shares its parent's split direction — directions
//! alternate strictly down the tree. Strict alternation is what makes the
//! persisted layout format round-trip safe.
//!
//! The pass iterates three rewrite rules to a fixpoint, then rebuilds the
//! derived separator and margin state. It never changes the set of leaf
//! panes; a changed leaf count is a fatal internal error.

use super::tree::{ContainerNode, PaneNode, Slot};

/// What to do with the slot currently under inspection.
enum Action {
    Keep,
    Recurse,
    Hoist,
    Merge,
}

/// Runs the compaction pass over the whole tree.
///
/// # Panics
///
/// Panics if the pass would drop or duplicate a leaf pane — that is a bug
/// in the rewrite rules, not a recoverable condition.
pub(crate) fn run<C: Copy + Eq>(root: &mut ContainerNode<C>) {
    let before = root.leaf_count();
    let mut passes = 0usize;
    loop {
        let mut changed = splice_root(root);
        changed |= canonicalize(root);
        passes += 1;
        if !changed {
            break;
        }
    }
    rebuild_separators(root);
    tracing::trace!(passes, leaves = before, "layout compaction finished");

    let after = root.leaf_count();
    assert_eq!(
        before, after,
        "internal error: compaction changed pane count from {before} to {after}"
    );
}

/// Replaces a root holding exactly one container child with that child.
fn splice_root<C>(root: &mut ContainerNode<C>) -> bool {
    if root.slots.len() != 1 || !root.slots[0].node.is_container() {
        return false;
    }
    match root.slots.pop() {
        Some(slot) => match slot.node {
            PaneNode::Container(child) => {
                *root = child;
                true
            }
            // unreachable: guarded above; put the leaf back untouched
            PaneNode::Leaf(leaf) => {
                root.slots
                    .push(Slot::new(slot.weight, PaneNode::Leaf(leaf)));
                false
            }
        },
        None => false,
    }
}

/// Applies the hoist and merge rules through one subtree.
///
/// - Hoist: a container holding exactly one child is replaced by that
///   child, which inherits the container's slot and weight. A chain of
///   single-child ancestors collapses one level per iteration because the
///   slot is re-examined after each rewrite.
/// - Merge: a container child sharing its parent's direction is spliced
///   into the parent at its position; the spliced weights are scaled by
///   `slot_weight / child_total` so on-screen ratios are preserved.
fn canonicalize<C: Copy + Eq>(container: &mut ContainerNode<C>) -> bool {
    let mut changed = false;
    let mut i = 0;
    while i < container.slots.len() {
        let action = match &container.slots[i].node {
            PaneNode::Leaf(_) => Action::Keep,
            PaneNode::Container(child) => {
                if child.slots.len() == 1 {
                    Action::Hoist
                } else if child.direction == container.direction {
                    Action::Merge
                } else {
                    Action::Recurse
                }
            }
        };
        match action {
            Action::Keep => i += 1,
            Action::Recurse => {
                if let PaneNode::Container(child) = &mut container.slots[i].node {
                    changed |= canonicalize(child);
                }
                i += 1;
            }
            Action::Hoist => {
                let inner = match &mut container.slots[i].node {
                    PaneNode::Container(child) => child.slots.pop(),
                    PaneNode::Leaf(_) => None,
                };
                if let Some(inner) = inner {
                    container.slots[i].node = inner.node;
                }
                changed = true;
            }
            Action::Merge => {
                let removed = container.slots.remove(i);
                let weight = removed.weight;
                if let PaneNode::Container(child) = removed.node {
                    let total = child.total_weight();
                    let scale = if total > 0.0 { weight / total } else { 1.0 };
                    for (offset, mut slot) in child.slots.into_iter().enumerate() {
                        slot.weight *= scale;
                        container.slots.insert(i + offset, slot);
                    }
                }
                changed = true;
            }
        }
    }
    changed
}

/// Rebuilds separator boundaries and leading margins through the subtree.
///
/// One separator per boundary between adjacent slots; a leading margin on
/// every slot except the first.
fn rebuild_separators<C>(container: &mut ContainerNode<C>) {
    let boundaries = 1..container.slots.len();
    container.separators.clear();
    container.separators.extend(boundaries);
    for (i, slot) in container.slots.iter_mut().enumerate() {
        slot.leading_margin = i > 0;
        if let PaneNode::Container(child) = &mut slot.node {
            rebuild_separators(child);
        }
    }
}
