use std::{any::TypeId, cell::RefCell};

use geom::Rect;

use crate::{id::WidgetId, measure::RequestCache, name::NodeName, widget::Widget};

/// How a pending-resize notification reaching this node is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Forward the invalidation to the parent. Deprecated default.
    #[default]
    ParentPropagates,
    /// Coalesce into a single pending flag serviced on the next layout tick.
    Queued,
    /// Recompute synchronously as soon as the invalidation arrives.
    Immediate,
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Taken out of the slot during mutable
    /// dispatch and restored afterwards.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Concrete type of the widget, recorded at insertion.
    pub(crate) widget_type: TypeId,
    /// Diagnostic name, recorded at insertion.
    pub(crate) name: NodeName,

    /// Parent in the arena tree. Non-owning back-reference.
    pub(crate) parent: Option<WidgetId>,
    /// Children in the arena tree, in insertion (z) order.
    pub(crate) children: Vec<WidgetId>,
    /// Marks a child as an implementation detail of its container, filtered
    /// from external enumeration.
    pub(crate) internal: bool,

    /// Whether the widget takes part in layout.
    pub(crate) visible: bool,
    /// Request for a share of leftover horizontal space.
    pub(crate) hexpand: bool,
    /// Request for a share of leftover vertical space.
    pub(crate) vexpand: bool,
    /// Participates in baseline rows of a horizontal container.
    pub(crate) baseline_aligned: bool,

    /// Uniform pixel inset applied on every side during measurement and
    /// allocation of border-folding containers.
    pub(crate) border_width: u16,
    /// Resize-propagation policy.
    pub(crate) resize_mode: ResizeMode,
    /// A deferred recomputation is scheduled for this resize root.
    pub(crate) resize_pending: bool,
    /// A deferred restyle is scheduled for this node.
    pub(crate) restyle_pending: bool,

    /// The most recently assigned rectangle.
    pub(crate) allocation: Rect,
    /// The most recently assigned baseline.
    pub(crate) baseline: Option<i32>,

    /// The child designated for focus traversal, maintained as focus moves.
    pub(crate) focus_child: Option<WidgetId>,
    /// Explicit focus traversal order overriding the computed one.
    pub(crate) focus_chain: Option<Vec<WidgetId>>,

    /// Remembered size queries, cleared on resize invalidation.
    pub(crate) request_cache: RefCell<RequestCache>,
}

impl Node {
    /// Build a node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>, widget_type: TypeId, name: NodeName) -> Self {
        Self {
            widget: Some(widget),
            widget_type,
            name,
            parent: None,
            children: Vec::new(),
            internal: false,
            visible: true,
            hexpand: false,
            vexpand: false,
            baseline_aligned: false,
            border_width: 0,
            resize_mode: ResizeMode::default(),
            resize_pending: false,
            restyle_pending: false,
            allocation: Rect::default(),
            baseline: None,
            focus_child: None,
            focus_chain: None,
            request_cache: RefCell::new(RequestCache::default()),
        }
    }

    /// Return the node's diagnostic name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Return the node's children in z order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Return true if the widget takes part in layout.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Return the most recently assigned rectangle.
    pub fn allocation(&self) -> Rect {
        self.allocation
    }

    /// Return the most recently assigned baseline.
    pub fn baseline(&self) -> Option<i32> {
        self.baseline
    }

    /// Return the border inset.
    pub fn border_width(&self) -> u16 {
        self.border_width
    }

    /// Return the resize-propagation policy.
    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    /// Return the child designated for focus traversal.
    pub fn focus_child(&self) -> Option<WidgetId> {
        self.focus_child
    }
}
