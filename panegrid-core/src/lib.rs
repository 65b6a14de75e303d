//! `PaneGrid` Core Library
//!
//! This crate provides the layout-tree engine behind the `PaneGrid`
//! split-pane manager: a recursively subdividable workspace of resizable
//! panes arranged by alternating horizontal/vertical splits, each pane
//! hosting one opaque content cell.
//!
//! # Crate Structure
//!
//! - [`split`] - The layout engine: tree model, split/remove/clear
//!   operations, compaction, focus history and structural save/restore
//! - [`tracing`] - Optional `tracing` subscriber setup helpers for hosts
//!
//! Rendering, pointer wiring and splitter-bar drag gestures are the host's
//! job: the engine hands out split directions, slot weights and separator
//! boundaries, and the host feeds pixel budgets into its own box layout.
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
//! manager.split(SplitDirection::Horizontally).unwrap();
//! assert_eq!(manager.pane_count(), 2);
//!
//! // persist the structure; per-pane state is keyed by leaf UID
//! let description = manager.save(|_content, _uid| {}).unwrap();
//! assert!(description.is_container());
//! ```

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod split;
pub mod tracing;

pub use split::{
    ContentId, LayoutNode, LayoutSnapshot, SplitDirection, SplitError, SplitViewEvent,
    SplitViewManager, SplitViewOptions,
};
