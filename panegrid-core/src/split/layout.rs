//! Portable layout descriptions and structural persistence
//!
//! A [`LayoutNode`] mirrors the pane tree without any live identity:
//! container nodes carry `{splitDirection, sizes, children, index}`, leaf
//! nodes carry `{leafUID, index}`. Leaf UIDs are sequential, 0-based and
//! assigned in traversal order during save; the caller persists per-pane
//! state externally keyed by UID and restores it through the load
//! callback.
//!
//! [`LayoutSnapshot`] wraps a root description in a versioned envelope
//! with JSON and file helpers for callers that want whole-file
//! persistence.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::SplitError;
use super::tree::{ContainerNode, PaneNode};
use super::types::SplitDirection;

/// Current version of the snapshot envelope format.
pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

/// One node of a portable layout description.
///
/// A node is exactly one of the two shapes; the wire representation never
/// carries both shapes' fields simultaneously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode {
    /// A container subdividing its slot along one direction.
    Container {
        /// Direction the container splits in.
        #[serde(rename = "splitDirection")]
        split_direction: SplitDirection,
        /// Star sizes of the children, in slot order.
        sizes: Vec<f64>,
        /// Child descriptions; each carries its own slot index.
        children: Vec<LayoutNode>,
        /// This node's slot index among its siblings (0 for the root).
        index: usize,
    },
    /// A leaf pane.
    Leaf {
        /// Sequential identifier assigned during save, used by the caller
        /// to correlate externally persisted per-pane state.
        #[serde(rename = "leafUID")]
        leaf_uid: u32,
        /// This node's slot index among its siblings.
        index: usize,
    },
}

impl LayoutNode {
    /// Returns true if this is a leaf description.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns true if this is a container description.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Slot index of this node among its siblings.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Container { index, .. } | Self::Leaf { index, .. } => *index,
        }
    }

    /// Number of leaf descriptions in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Container { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Sorts every child list by slot index, recursively.
    ///
    /// Emission order need not match slot order on the wire; sorting after
    /// traversal makes the description canonical.
    pub fn sort_children_by_index(&mut self) {
        if let Self::Container { children, .. } = self {
            children.sort_by_key(Self::index);
            for child in children {
                child.sort_children_by_index();
            }
        }
    }
}

/// Serializes a container subtree, assigning leaf UIDs in traversal order.
///
/// `emit` receives one `(content_handle, uid)` pair per leaf.
pub(crate) fn save_container<C, F>(
    container: &ContainerNode<C>,
    index: usize,
    next_uid: &mut u32,
    emit: &mut F,
) -> LayoutNode
where
    C: Copy + Eq,
    F: FnMut(C, u32),
{
    let mut children = Vec::with_capacity(container.slots.len());
    for (i, slot) in container.slots.iter().enumerate() {
        match &slot.node {
            PaneNode::Leaf(leaf) => {
                let uid = *next_uid;
                *next_uid += 1;
                emit(leaf.content, uid);
                children.push(LayoutNode::Leaf {
                    leaf_uid: uid,
                    index: i,
                });
            }
            PaneNode::Container(child) => {
                children.push(save_container(child, i, next_uid, emit));
            }
        }
    }
    LayoutNode::Container {
        split_direction: container.direction,
        sizes: container.weights(),
        children,
        index,
    }
}

/// Structurally validates a description before it is loaded.
///
/// Runs before any tree mutation beyond the initial clear, so a rejected
/// description always leaves the manager in its post-clear single-pane
/// state.
pub(crate) fn validate_description(root: &LayoutNode) -> Result<(), SplitError> {
    let mut seen_uids = HashSet::new();
    validate_node(root, true, &mut seen_uids)
}

fn validate_node(
    node: &LayoutNode,
    is_root: bool,
    seen_uids: &mut HashSet<u32>,
) -> Result<(), SplitError> {
    match node {
        LayoutNode::Leaf { leaf_uid, .. } => {
            if seen_uids.insert(*leaf_uid) {
                Ok(())
            } else {
                Err(SplitError::InvalidLayoutDescription(format!(
                    "duplicate leaf UID {leaf_uid}"
                )))
            }
        }
        LayoutNode::Container {
            sizes, children, ..
        } => {
            if children.is_empty() {
                return Err(SplitError::InvalidLayoutDescription(
                    "container with no children".into(),
                ));
            }
            if sizes.len() != children.len() {
                return Err(SplitError::InvalidLayoutDescription(format!(
                    "container has {} sizes for {} children",
                    sizes.len(),
                    children.len()
                )));
            }
            if children.len() == 1 && !(is_root && children[0].is_leaf()) {
                return Err(SplitError::InvalidLayoutDescription(
                    "only the root container may hold a single child, and only a leaf".into(),
                ));
            }
            for &size in sizes {
                if !size.is_finite() || size <= 0.0 {
                    return Err(SplitError::InvalidLayoutDescription(format!(
                        "size {size} is not a positive finite number"
                    )));
                }
            }
            let mut taken = vec![false; children.len()];
            for child in children {
                let index = child.index();
                if index >= children.len() {
                    return Err(SplitError::InvalidLayoutDescription(format!(
                        "child index {index} out of range for {} children",
                        children.len()
                    )));
                }
                if taken[index] {
                    return Err(SplitError::InvalidLayoutDescription(format!(
                        "duplicate child index {index}"
                    )));
                }
                taken[index] = true;
                validate_node(child, false, seen_uids)?;
            }
            Ok(())
        }
    }
}

/// Versioned envelope around a root layout description.
///
/// Carries the format version and the save timestamp alongside the tree so
/// layouts can be persisted to disk and restored across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Format version, for forward compatibility.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// Root of the layout description.
    pub root: LayoutNode,
}

impl LayoutSnapshot {
    /// Wraps a root description in a current-version envelope.
    #[must_use]
    pub fn new(root: LayoutNode) -> Self {
        Self {
            version: LAYOUT_SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            root,
        }
    }

    /// Serializes the snapshot to pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SplitError> {
        serde_json::to_string_pretty(self).map_err(SplitError::Serialization)
    }

    /// Deserializes a snapshot from JSON, rejecting unknown versions.
    ///
    /// # Errors
    /// Returns an error if parsing fails or the version is unsupported.
    pub fn from_json(json: &str) -> Result<Self, SplitError> {
        let snapshot: Self = serde_json::from_str(json).map_err(SplitError::Deserialization)?;
        if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
            return Err(SplitError::UnsupportedSnapshotVersion {
                expected: LAYOUT_SNAPSHOT_VERSION,
                actual: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    /// Saves the snapshot to a file, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SplitError> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a snapshot from a file.
    ///
    /// # Errors
    /// Returns an error if reading or parsing fails.
    pub fn load_from_file(path: &Path) -> Result<Self, SplitError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
