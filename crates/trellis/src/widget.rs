//! The widget behavior trait.

use std::any::{Any, type_name};

use geom::Rect;

use crate::{
    id::WidgetId,
    measure::{Measurement, Orientation},
    name::NodeName,
    property::{ChildPropertySpec, Value},
    tree::Tree,
};

/// Behavior attached to nodes in the tree arena.
///
/// Leaf widgets implement [`Widget::measure`] and usually nothing else.
/// Containers additionally implement [`Widget::allocate`] to translate their
/// own rectangle into child rectangles, and the child hooks to maintain
/// per-child packing state.
pub trait Widget: Any {
    /// Name used in diagnostics.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }

    /// Measure the minimum and natural size along `orientation`, given the
    /// size already fixed on the other axis (`None` = unconstrained).
    fn measure(
        &self,
        tree: &Tree,
        id: WidgetId,
        orientation: Orientation,
        for_size: Option<i32>,
    ) -> Measurement;

    /// Assign space to children. `content` is this widget's rectangle, less
    /// the border inset when [`Widget::folds_border`] is true. The default
    /// is a leaf: nothing to do.
    fn allocate(&mut self, _tree: &mut Tree, _id: WidgetId, _content: Rect, _baseline: Option<i32>) {
    }

    /// Whether the tree folds the node's border width into measurement and
    /// allocation. Widgets that return false receive raw rectangles and must
    /// handle any border themselves.
    fn folds_border(&self) -> bool {
        false
    }

    /// The child properties this container type supports.
    fn child_properties(&self) -> &'static [ChildPropertySpec] {
        &[]
    }

    /// Store a validated child-property value. Returns whether the value was
    /// accepted; the tree handles notification and relayout.
    fn set_child_property(&mut self, _child: WidgetId, _name: &str, _value: &Value) -> bool {
        false
    }

    /// Read a child-property value.
    fn child_property(&self, _child: WidgetId, _name: &str) -> Option<Value> {
        None
    }

    /// A child was attached under this widget. Containers create their
    /// per-child packing record here.
    fn child_attached(&mut self, _tree: &mut Tree, _id: WidgetId, _child: WidgetId) {}

    /// A child was detached from under this widget. Containers drop the
    /// packing record and cull any designation pointing at the child.
    fn child_detached(&mut self, _tree: &mut Tree, _id: WidgetId, _child: WidgetId) {}

    /// Entry point for the declarative UI loader: a child was attached with
    /// a packing kind (`None` for default packing).
    fn child_from_markup(
        &mut self,
        _tree: &mut Tree,
        _id: WidgetId,
        _child: WidgetId,
        kind: Option<&str>,
    ) {
        if let Some(kind) = kind {
            tracing::warn!("unknown packing kind {kind:?} ignored");
        }
    }

    /// Traversal-order override for focus navigation and child enumeration.
    /// `None` means the arena child order.
    fn enumerate_children(&self, _include_internal: bool) -> Option<Vec<WidgetId>> {
        None
    }

    /// Whether this widget can take keyboard focus.
    fn accepts_focus(&self) -> bool {
        false
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
