//! Split pane layout engine
//!
//! This module provides the core data model for recursively subdividable
//! workspaces. Panes are organized in an n-ary tree of weighted containers
//! alternating horizontal and vertical split directions; every mutation is
//! followed by a compaction pass that keeps the tree in canonical minimal
//! shape.
//!
//! # Architecture
//!
//! - **Manager-scoped layouts**: each [`SplitViewManager`] owns one tree
//! - **Weighted n-ary containers**: star sizes, only ratios matter
//! - **Focus history**: removal falls back to the most recently visited pane
//! - **Structural persistence**: portable descriptions with leaf-UID
//!   correlation for caller-managed per-pane state
//!
//! # Module Structure
//!
//! - `types` - Core type definitions (`ContentId`, `SplitDirection`)
//! - `tree` - Pane tree structure (`PaneNode`, `LeafPane`, `ContainerNode`)
//! - `manager` - Split view manager (`SplitViewManager`)
//! - `adjust` - Compaction pass restoring canonical tree shape
//! - `focus` - Visit-order bookkeeping for successor selection
//! - `layout` - Portable layout descriptions (`LayoutNode`, `LayoutSnapshot`)
//! - `validate` - Debug-build invariant validator
//! - `error` - Error types (`SplitError`)
//!
//! # Example
//!
//! ```
//! use panegrid_core::split::{SplitDirection, SplitViewManager};
//!
//! let mut manager: SplitViewManager<u32> = SplitViewManager::new();
//! let mut next = 0u32;
//! manager.set_content_factory(move || {
//!     next += 1;
//!     next
//! });
//!
//! // the factory registration established the initial pane
//! assert_eq!(manager.pane_count(), 1);
//!
//! // split it side by side, then stack the new pane
//! manager.split(SplitDirection::Horizontally).unwrap();
//! manager.split(SplitDirection::Vertically).unwrap();
//! assert_eq!(manager.pane_count(), 3);
//!
//! // removing the focused pane collapses the nested container again
//! manager.remove().unwrap();
//! assert_eq!(manager.pane_count(), 2);
//! ```

mod adjust;
mod error;
mod focus;
mod layout;
mod manager;
mod tree;
mod types;
#[cfg(debug_assertions)]
mod validate;

pub use error::SplitError;
pub use layout::{LAYOUT_SNAPSHOT_VERSION, LayoutNode, LayoutSnapshot};
pub use manager::{SplitViewEvent, SplitViewManager, SplitViewOptions};
pub use tree::{ContainerNode, LeafPane, PaneNode, Slot};
pub use types::{ContentId, DEFAULT_WEIGHT, SplitDirection, WEIGHT_EPSILON, weights_eq};
