//! The widget tree: arena storage, structural operations, the measurement
//! and allocation wrappers, and the resize queue.

use std::any::Any;

use geom::{Expanse, Rect};
use slotmap::SlotMap;

use crate::{
    error::{Error, Result},
    id::WidgetId,
    measure::{Measurement, Orientation},
    node::{Node, ResizeMode},
    property::{self, NotificationSink, Value},
    widget::Widget,
};

/// Ambient text direction, mirrored into horizontal layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Arena of widgets plus the shared layout state.
///
/// All operations run on one thread; measurement of a subtree completes
/// before its allocation begins, and repeated invalidations before a tick
/// coalesce into one recomputation.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<WidgetId, Node>,
    /// Currently focused widget.
    pub(crate) focus: Option<WidgetId>,
    /// Ambient text direction.
    text_direction: TextDirection,
    /// Resize roots awaiting the next layout tick.
    pending_resizes: Vec<WidgetId>,
    /// Nodes with a coalesced restyle pending.
    pending_restyles: Vec<WidgetId>,
    /// Observer for property-change notifications.
    sink: Option<Box<dyn NotificationSink>>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            focus: None,
            text_direction: TextDirection::default(),
            pending_resizes: Vec::new(),
            pending_restyles: Vec::new(),
            sink: None,
        }
    }

    /// Add a widget to the arena, detached, and return its id.
    pub fn insert<W>(&mut self, widget: W) -> WidgetId
    where
        W: Widget + 'static,
    {
        self.insert_boxed(Box::new(widget))
    }

    /// Add a boxed widget to the arena, detached, and return its id.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let widget_type = widget.as_ref().type_id();
        let name = widget.name();
        self.nodes.insert(Node::new(widget, widget_type, name))
    }

    /// Return true if the id refers to a live node.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return a reference to a node by id.
    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return a node's children in z order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Return a node's most recently assigned rectangle.
    pub fn allocation(&self, id: WidgetId) -> Rect {
        self.nodes.get(id).map(Node::allocation).unwrap_or_default()
    }

    /// Return a node's most recently assigned baseline.
    pub fn baseline(&self, id: WidgetId) -> Option<i32> {
        self.nodes.get(id).and_then(Node::baseline)
    }

    /// Borrow the widget at a node as a concrete type.
    pub fn widget_ref<W>(&self, id: WidgetId) -> Option<&W>
    where
        W: Widget + 'static,
    {
        let widget = self.nodes.get(id)?.widget.as_deref()?;
        (widget as &dyn Any).downcast_ref::<W>()
    }

    /// Run a closure over the widget at a node, typed, with the tree
    /// available for further operations. The widget is taken out of its slot
    /// for the duration of the call.
    pub fn with_widget_mut<W, R, F>(&mut self, id: WidgetId, f: F) -> Result<R>
    where
        W: Widget + 'static,
        F: FnOnce(&mut W, &mut Self) -> R,
    {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(Error::NodeNotFound(id));
        };
        let Some(mut widget) = node.widget.take() else {
            return Err(Error::ReentrantWidget(id));
        };
        let outcome = (widget.as_mut() as &mut dyn Any)
            .downcast_mut::<W>()
            .map(|typed| f(typed, self));
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        outcome.ok_or(Error::WidgetType(id))
    }

    /// Run a closure over the widget at a node, untyped.
    pub(crate) fn with_widget_dyn<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(Error::NodeNotFound(id));
        };
        let Some(mut widget) = node.widget.take() else {
            return Err(Error::ReentrantWidget(id));
        };
        let result = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(result)
    }

    /// True if `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: WidgetId, node: WidgetId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Attach a detached child under a parent.
    ///
    /// A child that already has a parent is refused with a logged warning.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.attach_inner(parent, child, false)
    }

    /// Attach a child that is an implementation detail of its container,
    /// filtered from external child enumeration.
    pub fn attach_internal(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.attach_inner(parent, child, true)
    }

    /// Shared attach path.
    fn attach_inner(&mut self, parent: WidgetId, child: WidgetId, internal: bool) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        if self.nodes[child].parent.is_some() {
            tracing::warn!(
                "widget {child:?} already has a parent; refusing to attach under {parent:?}"
            );
            return Err(Error::AlreadyParented(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[child].internal = internal;
        self.nodes[parent].children.push(child);

        if let Err(err) =
            self.with_widget_dyn(parent, |widget, tree| widget.child_attached(tree, parent, child))
        {
            tracing::warn!("child_attached hook failed on {parent:?}: {err}");
        }
        if self.nodes.get(child).is_some_and(|n| n.visible) {
            self.queue_resize(child);
        }
        Ok(())
    }

    /// Remove a child from a container, unparenting it. The node stays alive
    /// in the arena. Removing a widget that is not a child of the container
    /// is silently ignored.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) {
        let Some(pnode) = self.nodes.get_mut(parent) else {
            tracing::warn!("remove_child on unknown widget {parent:?}");
            return;
        };
        let Some(idx) = pnode.children.iter().position(|c| *c == child) else {
            return;
        };
        pnode.children.remove(idx);
        if pnode.focus_child == Some(child) {
            pnode.focus_child = None;
        }
        if let Some(chain) = pnode.focus_chain.as_mut() {
            chain.retain(|c| *c != child);
        }

        let mut was_visible = false;
        if let Some(cnode) = self.nodes.get_mut(child) {
            cnode.parent = None;
            cnode.internal = false;
            was_visible = cnode.visible;
        }
        if self
            .focus
            .is_some_and(|focused| focused == child || self.is_ancestor(child, focused))
        {
            self.focus = None;
        }

        if let Err(err) =
            self.with_widget_dyn(parent, |widget, tree| widget.child_detached(tree, parent, child))
        {
            tracing::warn!("child_detached hook failed on {parent:?}: {err}");
        }
        if was_visible {
            self.queue_resize(parent);
        }
    }

    /// Remove a node and all its descendants from the arena.
    pub fn remove_subtree(&mut self, id: WidgetId) {
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            self.remove_child(parent, id);
        }
        for node_id in self.collect_subtree(id) {
            self.nodes.remove(node_id);
        }
        if self.focus.is_some_and(|focused| !self.nodes.contains_key(focused)) {
            self.focus = None;
        }
    }

    /// Collect a subtree in pre-order, including the root.
    fn collect_subtree(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Move a child to a new index in its container's z order.
    pub fn reorder_child(&mut self, parent: WidgetId, child: WidgetId, position: usize) {
        let Some(node) = self.nodes.get_mut(parent) else {
            return;
        };
        let Some(idx) = node.children.iter().position(|c| *c == child) else {
            tracing::warn!("reorder_child: {child:?} is not a child of {parent:?}");
            return;
        };
        node.children.remove(idx);
        let position = position.min(node.children.len());
        node.children.insert(position, child);
    }

    /// Move a child to the top of its container's z order.
    pub fn raise_child(&mut self, parent: WidgetId, child: WidgetId) {
        let count = self.children(parent).len();
        if count > 0 {
            self.reorder_child(parent, child, count - 1);
        }
    }

    /// Move a child to the bottom of its container's z order.
    pub fn lower_child(&mut self, parent: WidgetId, child: WidgetId) {
        self.reorder_child(parent, child, 0);
    }

    /// Invoke a callback for each managed child, in the container's
    /// traversal order. Iterates over a snapshot, so the callback may mutate
    /// the tree, including removing the child it was handed.
    pub fn for_each_child(
        &mut self,
        id: WidgetId,
        include_internal: bool,
        mut f: impl FnMut(&mut Self, WidgetId),
    ) {
        let order: Vec<WidgetId> = {
            let Some(node) = self.nodes.get(id) else {
                return;
            };
            match node
                .widget
                .as_deref()
                .and_then(|w| w.enumerate_children(include_internal))
            {
                Some(list) => list,
                None => node
                    .children
                    .iter()
                    .copied()
                    .filter(|c| {
                        include_internal
                            || !self.nodes.get(*c).is_some_and(|n| n.internal)
                    })
                    .collect(),
            }
        };
        for child in order {
            if self.nodes.get(child).is_some_and(|n| n.parent == Some(id)) {
                f(self, child);
            }
        }
    }

    // ---- per-node layout flags ----

    /// Return whether a widget takes part in layout.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    /// Show or hide a widget, invalidating the layout around it.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        self.queue_resize(id);
    }

    /// Return whether a widget asks for a share of leftover space on an axis.
    pub fn expands(&self, id: WidgetId, orientation: Orientation) -> bool {
        self.nodes.get(id).is_some_and(|n| match orientation {
            Orientation::Horizontal => n.hexpand,
            Orientation::Vertical => n.vexpand,
        })
    }

    /// Set the horizontal expand request.
    pub fn set_hexpand(&mut self, id: WidgetId, expand: bool) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.hexpand != expand
        {
            node.hexpand = expand;
            self.queue_resize(id);
        }
    }

    /// Set the vertical expand request.
    pub fn set_vexpand(&mut self, id: WidgetId, expand: bool) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.vexpand != expand
        {
            node.vexpand = expand;
            self.queue_resize(id);
        }
    }

    /// Return whether a widget participates in baseline rows.
    pub fn is_baseline_aligned(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.baseline_aligned)
    }

    /// Set baseline-row participation.
    pub fn set_baseline_aligned(&mut self, id: WidgetId, aligned: bool) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.baseline_aligned != aligned
        {
            node.baseline_aligned = aligned;
            self.queue_resize(id);
        }
    }

    /// Set the uniform border inset of a container.
    pub fn set_border_width(&mut self, id: WidgetId, width: u16) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.border_width != width
        {
            node.border_width = width;
            self.queue_resize(id);
        }
    }

    /// Set a node's resize-propagation policy.
    pub fn set_resize_mode(&mut self, id: WidgetId, mode: ResizeMode) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.resize_mode != mode
        {
            node.resize_mode = mode;
            self.queue_resize(id);
        }
    }

    /// Return the ambient text direction.
    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    /// Set the ambient text direction. The host re-runs layout afterwards.
    pub fn set_text_direction(&mut self, direction: TextDirection) {
        self.text_direction = direction;
    }

    // ---- notifications ----

    /// Install the observer for property-change notifications.
    pub fn set_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sink = Some(sink);
    }

    /// Report a widget-level property change to the sink.
    pub(crate) fn notify_property(&self, id: WidgetId, name: &str) {
        if let Some(sink) = &self.sink {
            sink.property_changed(id, name);
        }
    }

    /// Report a child-property change to the sink.
    pub(crate) fn notify_child_property(&self, container: WidgetId, child: WidgetId, name: &str) {
        if let Some(sink) = &self.sink {
            sink.child_property_changed(container, child, name);
        }
    }

    // ---- measurement and allocation ----

    /// Measure a widget along an axis, given the size fixed on the other
    /// axis (`None` = unconstrained).
    ///
    /// Hidden widgets measure as zero. Results are cached on the node until
    /// the next resize invalidation. Border folding is applied here for
    /// widgets that opt in.
    ///
    /// Panics if the widget reports a negative minimum or a natural below
    /// its minimum: the distribution arithmetic cannot degrade gracefully
    /// once that invariant is broken.
    pub fn measure(
        &self,
        id: WidgetId,
        orientation: Orientation,
        for_size: Option<i32>,
    ) -> Measurement {
        let Some(node) = self.nodes.get(id) else {
            tracing::warn!("measure of unknown widget {id:?}");
            return Measurement::default();
        };
        if !node.visible {
            return Measurement::default();
        }
        let cached = node.request_cache.borrow().lookup(orientation, for_size);
        if let Some(m) = cached {
            return m;
        }
        let Some(widget) = node.widget.as_deref() else {
            tracing::warn!("reentrant measure of {id:?}");
            return Measurement::default();
        };
        let border = if widget.folds_border() {
            i32::from(node.border_width)
        } else {
            0
        };
        let inner_for = for_size.map(|s| (s - 2 * border).max(0));
        let mut m = widget.measure(self, id, orientation, inner_for);
        assert!(
            m.minimum >= 0 && m.natural >= m.minimum,
            "widget {} ({id:?}) reported a broken size request: minimum {}, natural {}",
            node.name,
            m.minimum,
            m.natural,
        );
        if border > 0 {
            m.minimum += 2 * border;
            m.natural += 2 * border;
            m.minimum_baseline = m.minimum_baseline.map(|b| b + border);
            m.natural_baseline = m.natural_baseline.map(|b| b + border);
        }
        node.request_cache.borrow_mut().store(orientation, for_size, m);
        m
    }

    /// Measure a widget's full preferred size: width unconstrained, then
    /// height for the natural width.
    pub fn preferred_size(&self, id: WidgetId) -> (Expanse, Expanse) {
        let width = self.measure(id, Orientation::Horizontal, None);
        let height = self.measure(id, Orientation::Vertical, Some(width.natural));
        (
            Expanse::new(width.minimum, height.minimum),
            Expanse::new(width.natural, height.natural),
        )
    }

    /// Assign a widget its final rectangle and shared baseline, recursing
    /// through container widgets. Hidden widgets are skipped.
    pub fn allocate(&mut self, id: WidgetId, rect: Rect, baseline: Option<i32>) {
        let Some(node) = self.nodes.get_mut(id) else {
            tracing::warn!("allocate of unknown widget {id:?}");
            return;
        };
        if !node.visible {
            return;
        }
        node.allocation = rect;
        node.baseline = baseline;
        node.resize_pending = false;
        let border = if node.widget.as_deref().is_some_and(Widget::folds_border) {
            i32::from(node.border_width)
        } else {
            0
        };
        let content = if border > 0 { rect.inner(border) } else { rect };
        let child_baseline = if border > 0 {
            baseline.map(|b| (b - border).max(0))
        } else {
            baseline
        };
        let Some(mut widget) = node.widget.take() else {
            tracing::warn!("reentrant allocation of {id:?}");
            return;
        };
        widget.allocate(self, id, content, child_baseline);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }

    // ---- resize queue ----

    /// Invalidate cached size requests from a widget up to its resize root
    /// and schedule the root for recomputation.
    pub fn queue_resize(&mut self, id: WidgetId) {
        self.queue_resize_inner(id, true);
    }

    /// Invalidate cached size requests without scheduling a recomputation.
    pub fn queue_resize_invalidate_only(&mut self, id: WidgetId) {
        self.queue_resize_inner(id, false);
    }

    /// Walk strictly upward, clearing request caches, stopping at and
    /// including the nearest resize root; optionally schedule that root.
    fn queue_resize_inner(&mut self, id: WidgetId, schedule: bool) {
        let mut current = Some(id);
        let mut root = None;
        while let Some(cur) = current {
            let Some(node) = self.nodes.get_mut(cur) else {
                break;
            };
            node.request_cache.get_mut().clear();
            if node.resize_mode != ResizeMode::ParentPropagates || node.parent.is_none() {
                root = Some(cur);
                break;
            }
            current = node.parent;
        }
        let Some(root) = root else {
            return;
        };
        if !schedule {
            return;
        }
        match self.nodes[root].resize_mode {
            ResizeMode::Immediate => self.check_resize(root),
            ResizeMode::Queued | ResizeMode::ParentPropagates => {
                let node = &mut self.nodes[root];
                if !node.resize_pending {
                    node.resize_pending = true;
                    self.pending_resizes.push(root);
                }
            }
        }
    }

    /// Schedule a coalesced restyle for a node.
    pub fn queue_restyle(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id)
            && !node.restyle_pending
        {
            node.restyle_pending = true;
            self.pending_restyles.push(id);
        }
    }

    /// True if a layout tick would do any work. Entries whose pending flag
    /// was already cleared by an intervening allocation do not count.
    pub fn needs_layout_tick(&self) -> bool {
        self.pending_resizes
            .iter()
            .any(|id| self.nodes.get(*id).is_some_and(|n| n.resize_pending))
            || self
                .pending_restyles
                .iter()
                .any(|id| self.nodes.get(*id).is_some_and(|n| n.restyle_pending))
    }

    /// The host's once-per-frame entry point: services coalesced restyles,
    /// then every pending resize root.
    pub fn run_pending_layout(&mut self) {
        let restyles = std::mem::take(&mut self.pending_restyles);
        for id in restyles {
            if let Some(node) = self.nodes.get_mut(id) {
                // Styling itself lives outside this subsystem; the flag only
                // coalesces requests between ticks.
                node.restyle_pending = false;
            }
        }
        let pending = std::mem::take(&mut self.pending_resizes);
        for id in pending {
            let was_pending = self.nodes.get_mut(id).map(|node| {
                let was = node.resize_pending;
                node.resize_pending = false;
                was
            });
            if was_pending == Some(true) {
                self.check_resize(id);
            }
        }
    }

    /// Recompute layout for a node after an invalidation.
    ///
    /// A resize root re-allocates at its previously assigned rectangle even
    /// when the fresh minimum exceeds it: roots absorb overflow instead of
    /// propagating it, and the result is clipped visually. A non-root
    /// re-queues on its parent instead.
    pub fn check_resize(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let is_root = node.resize_mode != ResizeMode::ParentPropagates || node.parent.is_none();
        if !is_root {
            if let Some(parent) = node.parent {
                self.queue_resize(parent);
            }
            return;
        }
        let alloc = node.allocation;
        let baseline = node.baseline;
        if alloc.is_zero() {
            // Never allocated: the host drives the first allocation.
            return;
        }
        let (minimum, _natural) = self.preferred_size(id);
        if minimum.w > alloc.w || minimum.h > alloc.h {
            tracing::debug!(
                "resize root {id:?} needs {minimum:?} but keeps {alloc:?}; contents will clip"
            );
        }
        self.allocate(id, alloc, baseline);
    }

    // ---- child properties ----

    /// Set a named per-child property on a container.
    ///
    /// Unknown names, kind mismatches, and non-children are logged warnings
    /// and otherwise ignored; a successful write notifies the sink, and
    /// queues a resize only when the child is visible.
    pub fn set_child_property(
        &mut self,
        container: WidgetId,
        child: WidgetId,
        name: &str,
        value: Value,
    ) {
        let Some(node) = self.nodes.get(container) else {
            tracing::warn!("set_child_property on unknown widget {container:?}");
            return;
        };
        let container_name = node.name.clone();
        if self.nodes.get(child).and_then(|n| n.parent) != Some(container) {
            tracing::warn!("widget {child:?} is not a child of {container:?}; ignoring");
            return;
        }
        let Some(widget) = node.widget.as_deref() else {
            tracing::warn!("reentrant child-property access on {container:?}");
            return;
        };
        property::ensure_registered(node.widget_type, widget.child_properties());
        let Some(kind) = property::lookup(node.widget_type, name) else {
            tracing::warn!("no child property {name:?} on {container_name}; ignoring");
            return;
        };
        if value.kind() != kind {
            tracing::warn!(
                "child property {name:?} on {container_name} expects {kind:?}, got {:?}; ignoring",
                value.kind()
            );
            return;
        }
        let accepted = match self.with_widget_dyn(container, |widget, _tree| {
            widget.set_child_property(child, name, &value)
        }) {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!("child-property dispatch failed on {container:?}: {err}");
                return;
            }
        };
        if !accepted {
            tracing::warn!("child property {name:?} rejected by {container_name}; ignoring");
            return;
        }
        if self.nodes.get(child).is_some_and(|n| n.visible) {
            self.queue_resize(container);
        }
        self.notify_child_property(container, child, name);
    }

    /// Read a named per-child property from a container. Unknown names are a
    /// logged warning and `None`.
    pub fn child_property(&self, container: WidgetId, child: WidgetId, name: &str) -> Option<Value> {
        let node = self.nodes.get(container)?;
        let widget = node.widget.as_deref()?;
        property::ensure_registered(node.widget_type, widget.child_properties());
        if property::lookup(node.widget_type, name).is_none() {
            tracing::warn!("no child property {name:?} on {}", node.name);
            return None;
        }
        widget.child_property(child, name)
    }

    /// Entry point for the declarative UI loader: attach a child with a
    /// packing kind (`None` = default).
    pub fn add_child_from_markup(
        &mut self,
        container: WidgetId,
        child: WidgetId,
        kind: Option<&str>,
    ) -> Result<()> {
        self.attach(container, child)?;
        self.with_widget_dyn(container, |widget, tree| {
            widget.child_from_markup(tree, container, child, kind);
        })
    }
}
