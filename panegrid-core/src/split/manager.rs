//! Split view manager composing the tree, focus and compaction layers
//!
//! [`SplitViewManager`] owns one pane tree and exposes the public
//! operations: split, multi-way split, remove, clear, focus selection and
//! structural save/load. It is generic over the content handle type `C` —
//! any `Copy + Eq + Hash + Debug` value with stable identity works; hosts
//! without their own handle type can use
//! [`ContentId`](super::types::ContentId).
//!
//! All operations are synchronous and run to completion on the caller's
//! thread. The content factory and event handler are called back
//! synchronously and must not re-enter the manager.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::adjust;
use super::error::SplitError;
use super::focus::FocusTracker;
use super::layout::{self, LayoutNode};
use super::tree::{ContainerNode, PaneNode, Slot};
use super::types::{DEFAULT_WEIGHT, SplitDirection};

/// Configuration for one manager instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitViewOptions {
    /// Weight policy for parallel splits.
    ///
    /// If false, a split halves the focused slot's weight between the two
    /// panes. If true (default), all sibling weights are recomputed to the
    /// mean of the prior weights so N parallel panes stay evenly sized.
    pub distribute_split_size: bool,
}

impl Default for SplitViewOptions {
    fn default() -> Self {
        Self {
            distribute_split_size: true,
        }
    }
}

/// Notification raised to the host collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitViewEvent<C> {
    /// A new pane's content was created by the factory.
    ContentCreated(C),
    /// A pane's content was removed from the layout.
    ContentRemoved(C),
    /// The focused pane changed.
    FocusChanged(Option<C>),
}

/// Outcome of the recursive leaf removal walk.
enum Removal {
    /// The target leaf is not in this subtree.
    NotFound,
    /// The leaf was removed and the freed weight reintegrated.
    Done,
    /// This container holds only the target; the parent must drop it.
    Collapse,
}

/// Manages the split layout for one workspace.
///
/// # Example
///
/// ```
/// use panegrid_core::split::{SplitDirection, SplitViewManager};
///
/// let mut manager: SplitViewManager<u32> = SplitViewManager::new();
/// let mut next = 0u32;
/// manager.set_content_factory(move || {
///     next += 1;
///     next
/// });
///
/// assert_eq!(manager.pane_count(), 1);
/// let pane = manager.split(SplitDirection::Horizontally).unwrap();
/// assert_eq!(manager.pane_count(), 2);
/// assert_eq!(manager.focused_pane(), Some(pane));
/// ```
pub struct SplitViewManager<C> {
    /// Root container; `None` until a content factory is registered.
    root: Option<ContainerNode<C>>,
    /// Currently focused pane, target of the next split/remove.
    focused: Option<C>,
    /// Visit-order bookkeeping for successor selection.
    tracker: FocusTracker<C>,
    /// Creates content for new panes.
    factory: Option<Box<dyn FnMut() -> C>>,
    /// Receives lifecycle and focus notifications.
    on_event: Option<Box<dyn FnMut(SplitViewEvent<C>)>>,
    options: SplitViewOptions,
}

impl<C: Copy + Eq + Hash + fmt::Debug> SplitViewManager<C> {
    /// Creates a manager with default options and no content factory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SplitViewOptions::default())
    }

    /// Creates a manager with the given options.
    #[must_use]
    pub fn with_options(options: SplitViewOptions) -> Self {
        Self {
            root: None,
            focused: None,
            tracker: FocusTracker::new(),
            factory: None,
            on_event: None,
            options,
        }
    }

    /// Current options.
    pub const fn options(&self) -> &SplitViewOptions {
        &self.options
    }

    /// Switches the parallel-split weight policy.
    pub fn set_distribute_split_size(&mut self, distribute: bool) {
        self.options.distribute_split_size = distribute;
    }

    /// Registers the content factory.
    ///
    /// The first registration creates the initial content and establishes
    /// the one-pane root.
    pub fn set_content_factory<F>(&mut self, factory: F)
    where
        F: FnMut() -> C + 'static,
    {
        self.factory = Some(Box::new(factory));
        if self.root.is_none()
            && let Ok(content) = self.create_content()
        {
            self.root = Some(ContainerNode::with_slots(
                SplitDirection::Vertically,
                vec![Slot::new(DEFAULT_WEIGHT, PaneNode::leaf(content))],
            ));
            self.run_adjust();
            self.focus_pane(content);
            self.debug_validate();
        }
    }

    /// Registers the event handler.
    pub fn set_event_handler<F>(&mut self, handler: F)
    where
        F: FnMut(SplitViewEvent<C>) + 'static,
    {
        self.on_event = Some(Box::new(handler));
    }

    /// Currently focused pane.
    pub const fn focused_pane(&self) -> Option<C> {
        self.focused
    }

    /// Total number of panes.
    pub fn pane_count(&self) -> usize {
        self.root.as_ref().map_or(0, ContainerNode::leaf_count)
    }

    /// All content handles, pre-order (leftmost/topmost first).
    pub fn panes(&self) -> Vec<C> {
        self.root.as_ref().map_or_else(Vec::new, ContainerNode::contents)
    }

    /// Returns true if the layout holds the given pane.
    pub fn contains_pane(&self, content: C) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains(content))
    }

    /// Returns true if the workspace is subdivided into more than one pane.
    pub fn is_split(&self) -> bool {
        self.pane_count() > 1
    }

    /// Depth of the layout tree; a single pane has depth 1.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, ContainerNode::depth)
    }

    /// Read-only view of the root container, for hosts computing pixel
    /// sizes from the weights.
    pub const fn root(&self) -> Option<&ContainerNode<C>> {
        self.root.as_ref()
    }

    /// Focuses the given pane.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::PaneNotFound`] if the pane is not part of
    /// this layout.
    pub fn set_focus(&mut self, content: C) -> Result<(), SplitError> {
        if !self.contains_pane(content) {
            tracing::warn!(pane = ?content, "refusing to focus a pane outside this layout");
            return Err(SplitError::PaneNotFound);
        }
        self.focus_pane(content);
        Ok(())
    }

    /// Splits the focused pane in the given direction.
    ///
    /// Parallel splits (same direction as the focused pane's container)
    /// insert the new pane right after the focused one; transverse splits
    /// wrap both panes in a new container that inherits the focused slot
    /// and weight. The new pane receives focus.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoFocusedPane`] or
    /// [`SplitError::NoContentFactory`]; the layout is unchanged.
    pub fn split(&mut self, direction: SplitDirection) -> Result<C, SplitError> {
        let focused = self.focused.ok_or(SplitError::NoFocusedPane)?;
        if self.factory.is_none() {
            return Err(SplitError::NoContentFactory);
        }
        tracing::debug!(pane = ?focused, %direction, "splitting focused pane");

        let distribute = self.options.distribute_split_size;
        let content = self.create_content()?;
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NoContentFactory);
        };

        // the initial root wrapping a single pane has no committed
        // direction yet; it adopts the first requested one
        if root.child_count() == 1 {
            root.direction = direction;
        }

        let Some(container) = root.container_of_mut(focused) else {
            return Err(SplitError::PaneNotFound);
        };
        let Some(index) = container.position_of_leaf(focused) else {
            return Err(SplitError::PaneNotFound);
        };

        if container.direction == direction {
            let weight = if distribute {
                let mean = container.total_weight() / container.child_count() as f64;
                for slot in &mut container.slots {
                    slot.weight = mean;
                }
                mean
            } else {
                let half = container.slots[index].weight / 2.0;
                container.slots[index].weight = half;
                half
            };
            container
                .slots
                .insert(index + 1, Slot::new(weight, PaneNode::leaf(content)));
        } else {
            let former = std::mem::replace(
                &mut container.slots[index].node,
                PaneNode::Container(ContainerNode::new(direction)),
            );
            if let PaneNode::Container(group) = &mut container.slots[index].node {
                group.slots.push(Slot::new(DEFAULT_WEIGHT, former));
                group
                    .slots
                    .push(Slot::new(DEFAULT_WEIGHT, PaneNode::leaf(content)));
            }
        }

        self.run_adjust();
        self.focus_pane(content);
        self.debug_validate();
        Ok(content)
    }

    /// Splits the focused pane into `sizes.len()` siblings.
    ///
    /// Performs N−1 pairwise splits, then overwrites each produced slot's
    /// weight from `sizes` in index order. Returns the handles in slot
    /// order; the first is the originally focused pane. Used by
    /// [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::TooFewSizes`] for fewer than two sizes,
    /// [`SplitError::InvalidWeight`] for a non-positive or non-finite
    /// size, and the same user no-ops as [`split`](Self::split).
    pub fn split_many(
        &mut self,
        direction: SplitDirection,
        sizes: &[f64],
    ) -> Result<Vec<C>, SplitError> {
        if sizes.len() < 2 {
            return Err(SplitError::TooFewSizes(sizes.len()));
        }
        for &size in sizes {
            if !size.is_finite() || size <= 0.0 {
                return Err(SplitError::InvalidWeight(size));
            }
        }
        let first = self.focused.ok_or(SplitError::NoFocusedPane)?;
        if self.factory.is_none() {
            return Err(SplitError::NoContentFactory);
        }

        let mut panes = vec![first];
        for _ in 1..sizes.len() {
            panes.push(self.split(direction)?);
        }

        // the produced slots are contiguous starting at the first pane
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NoContentFactory);
        };
        let Some(container) = root.container_of_mut(first) else {
            return Err(SplitError::PaneNotFound);
        };
        let Some(base) = container.position_of_leaf(first) else {
            return Err(SplitError::PaneNotFound);
        };
        for (offset, &size) in sizes.iter().enumerate() {
            container.slots[base + offset].weight = size;
        }

        self.debug_validate();
        Ok(panes)
    }

    /// Removes the focused pane.
    ///
    /// The freed weight is redistributed evenly across the remaining
    /// siblings. The most recently visited surviving pane receives focus.
    /// Returns the removed handle.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoFocusedPane`] or
    /// [`SplitError::CannotRemoveLastPane`]; the layout is unchanged.
    pub fn remove(&mut self) -> Result<C, SplitError> {
        let focused = self.focused.ok_or(SplitError::NoFocusedPane)?;
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NoFocusedPane);
        };
        if root.child_count() == 1 {
            return Err(SplitError::CannotRemoveLastPane);
        }
        tracing::debug!(pane = ?focused, "removing focused pane");

        match remove_leaf(root, focused) {
            Removal::NotFound => return Err(SplitError::PaneNotFound),
            // only the root can bubble a collapse up here and the guard
            // above already rejected it
            Removal::Collapse => return Err(SplitError::CannotRemoveLastPane),
            Removal::Done => {}
        }

        self.tracker.forget(focused);
        self.focused = None;
        match self.tracker.most_recent() {
            Some(successor) => self.focus_pane(successor),
            None => self.emit(SplitViewEvent::FocusChanged(None)),
        }

        self.run_adjust();
        self.prune_tracker();
        self.emit(SplitViewEvent::ContentRemoved(focused));
        self.debug_validate();
        Ok(focused)
    }

    /// Collapses the layout back to a single pane.
    ///
    /// The first (leftmost/topmost) pane survives and receives focus; all
    /// other content is disposed with `ContentRemoved` notifications.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoContentFactory`] if no layout exists yet.
    pub fn clear(&mut self) -> Result<C, SplitError> {
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NoContentFactory);
        };
        let contents = root.contents();
        let Some(survivor) = root.first_content() else {
            return Err(SplitError::NoContentFactory);
        };

        *root = ContainerNode::with_slots(
            SplitDirection::Vertically,
            vec![Slot::new(DEFAULT_WEIGHT, PaneNode::leaf(survivor))],
        );
        self.run_adjust();

        for content in contents {
            if content != survivor {
                self.tracker.forget(content);
                self.emit(SplitViewEvent::ContentRemoved(content));
            }
        }
        self.focus_pane(survivor);
        self.debug_validate();
        tracing::debug!(survivor = ?survivor, "cleared layout to a single pane");
        Ok(survivor)
    }

    /// Serializes the layout to a portable description.
    ///
    /// `emit` receives one `(content_handle, uid)` pair per pane, in UID
    /// order, so the caller can persist per-pane state externally.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoContentFactory`] if no layout exists yet.
    pub fn save<F>(&self, mut emit: F) -> Result<LayoutNode, SplitError>
    where
        F: FnMut(C, u32),
    {
        let root = self.root.as_ref().ok_or(SplitError::NoContentFactory)?;
        let mut next_uid = 0;
        let mut description = layout::save_container(root, 0, &mut next_uid, &mut emit);
        description.sort_children_by_index();
        tracing::debug!(leaves = next_uid, "saved layout structure");
        Ok(description)
    }

    /// Rebuilds the layout from a portable description.
    ///
    /// The layout is cleared, the description validated, then the tree is
    /// rebuilt with fresh content from the factory; `restore` receives one
    /// `(new_content_handle, uid)` pair per pane.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidLayoutDescription`] on a malformed
    /// description; the description is validated after the initial clear
    /// and before any rebuilding, so the manager is then left in its
    /// post-clear single-pane state. Returns
    /// [`SplitError::NoContentFactory`] if no factory is registered.
    pub fn load<F>(&mut self, description: &LayoutNode, mut restore: F) -> Result<(), SplitError>
    where
        F: FnMut(C, u32),
    {
        if self.factory.is_none() {
            return Err(SplitError::NoContentFactory);
        }
        self.clear()?;
        layout::validate_description(description)?;
        self.load_node(description, &mut restore)?;
        self.debug_validate();
        tracing::debug!(leaves = description.leaf_count(), "loaded layout structure");
        Ok(())
    }

    /// Renders the tree one node per line, for debugging.
    ///
    /// The focused pane is marked with an arrow. The output is not meant
    /// to be parsed.
    pub fn structure_string(&self) -> String {
        let mut out = String::new();
        match self.root.as_ref() {
            Some(root) => self.format_container(root, 0, DEFAULT_WEIGHT, 0, &mut out),
            None => out.push_str("(empty)\n"),
        }
        out
    }

    fn format_container(
        &self,
        container: &ContainerNode<C>,
        index: usize,
        weight: f64,
        level: usize,
        out: &mut String,
    ) {
        use std::fmt::Write;

        let indent = "  ".repeat(level);
        let _ = writeln!(
            out,
            "{indent}Container {} cnt:{} (idx:{index} w:{weight})",
            container.direction,
            container.child_count()
        );
        for (i, slot) in container.slots.iter().enumerate() {
            match &slot.node {
                PaneNode::Leaf(leaf) => {
                    let marker = if Some(leaf.content) == self.focused {
                        " <==="
                    } else {
                        ""
                    };
                    let _ = writeln!(
                        out,
                        "{indent}  Leaf {:?} (idx:{i} w:{}){marker}",
                        leaf.content, slot.weight
                    );
                }
                PaneNode::Container(child) => {
                    self.format_container(child, i, slot.weight, level + 1, out);
                }
            }
        }
    }

    fn load_node<F>(&mut self, node: &LayoutNode, restore: &mut F) -> Result<(), SplitError>
    where
        F: FnMut(C, u32),
    {
        match node {
            LayoutNode::Leaf { leaf_uid, .. } => {
                // a bare-leaf description restores the single post-clear pane
                if let Some(focused) = self.focused {
                    restore(focused, *leaf_uid);
                }
                Ok(())
            }
            LayoutNode::Container {
                split_direction,
                sizes,
                children,
                ..
            } => {
                if children.len() == 1 {
                    // root wrapping a single pane: keep the described
                    // direction and size, restore in place
                    if let Some(root) = self.root.as_mut() {
                        root.direction = *split_direction;
                        if let Some(slot) = root.slots.first_mut() {
                            slot.weight = sizes[0];
                        }
                    }
                    if let (Some(focused), LayoutNode::Leaf { leaf_uid, .. }) =
                        (self.focused, &children[0])
                    {
                        restore(focused, *leaf_uid);
                    }
                    return Ok(());
                }

                let panes = self.split_many(*split_direction, sizes)?;
                for child in children {
                    let pane = panes[child.index()];
                    match child {
                        LayoutNode::Leaf { leaf_uid, .. } => restore(pane, *leaf_uid),
                        LayoutNode::Container { .. } => {
                            self.set_focus(pane)?;
                            self.load_node(child, restore)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Requests new content from the factory and announces it.
    fn create_content(&mut self) -> Result<C, SplitError> {
        let factory = self.factory.as_mut().ok_or(SplitError::NoContentFactory)?;
        let content = factory();
        self.emit(SplitViewEvent::ContentCreated(content));
        Ok(content)
    }

    /// Moves focus, records the visit and notifies the host.
    fn focus_pane(&mut self, content: C) {
        if self.focused == Some(content) {
            return;
        }
        self.focused = Some(content);
        self.tracker.record_visit(content);
        self.emit(SplitViewEvent::FocusChanged(Some(content)));
    }

    fn emit(&mut self, event: SplitViewEvent<C>) {
        // the handler is taken for the duration of the call so it can
        // never observe a half-updated manager through reentrancy
        if let Some(mut handler) = self.on_event.take() {
            handler(event);
            self.on_event = Some(handler);
        }
    }

    fn run_adjust(&mut self) {
        if let Some(root) = self.root.as_mut() {
            adjust::run(root);
        }
    }

    /// Sweeps focus history for panes no longer in the tree.
    fn prune_tracker(&mut self) {
        let alive: HashSet<C> = self
            .root
            .as_ref()
            .map(|root| root.contents().into_iter().collect())
            .unwrap_or_default();
        self.tracker.retain_alive(&alive);
        tracing::trace!(tracked = self.tracker.len(), "pruned focus history");
    }

    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        super::validate::validate_manager(self.root.as_ref(), self.focused, &self.tracker.tracked());
    }
}

impl<C: Copy + Eq + Hash + fmt::Debug> Default for SplitViewManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy + Eq + Hash + fmt::Debug> fmt::Debug for SplitViewManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitViewManager")
            .field("panes", &self.pane_count())
            .field("focused", &self.focused)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Removes the leaf holding `target`, reintegrating the freed weight
/// evenly across the remaining siblings.
fn remove_leaf<C: Copy + Eq>(container: &mut ContainerNode<C>, target: C) -> Removal {
    if let Some(index) = container.position_of_leaf(target) {
        if container.child_count() == 1 {
            return Removal::Collapse;
        }
        let freed = container.slots.remove(index).weight;
        let share = freed / container.slots.len() as f64;
        for slot in &mut container.slots {
            slot.weight += share;
        }
        return Removal::Done;
    }

    for i in 0..container.slots.len() {
        let outcome = match &mut container.slots[i].node {
            PaneNode::Container(child) => remove_leaf(child, target),
            PaneNode::Leaf(_) => Removal::NotFound,
        };
        match outcome {
            Removal::NotFound => {}
            Removal::Done => return Removal::Done,
            Removal::Collapse => {
                // the child held only the target; drop the whole slot and
                // reintegrate its weight
                let freed = container.slots.remove(i).weight;
                if container.slots.is_empty() {
                    return Removal::Collapse;
                }
                let share = freed / container.slots.len() as f64;
                for slot in &mut container.slots {
                    slot.weight += share;
                }
                return Removal::Done;
            }
        }
    }
    Removal::NotFound
}
