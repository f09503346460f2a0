//! A container that places each child at a fixed offset from its own origin.

use std::collections::HashMap;

use geom::{Point, Rect};

use crate::{
    error::Result,
    id::WidgetId,
    measure::{Measurement, Orientation},
    property::{ChildPropertySpec, Value, ValueKind},
    tree::Tree,
    widget::Widget,
};

/// Child properties registered for fixed containers.
const CHILD_PROPERTIES: &[ChildPropertySpec] = &[
    ChildPropertySpec {
        name: "x",
        kind: ValueKind::Int,
    },
    ChildPropertySpec {
        name: "y",
        kind: ValueKind::Int,
    },
];

/// A container with no layout policy: every child sits at an absolute
/// offset, at its own preferred size.
#[derive(Default)]
pub struct Fixed {
    /// Offset per child, relative to the container origin.
    offsets: HashMap<WidgetId, Point>,
}

impl Fixed {
    /// Construct an empty fixed container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a child at an offset.
    pub fn put(tree: &mut Tree, id: WidgetId, child: WidgetId, x: i32, y: i32) -> Result<()> {
        tree.attach(id, child)?;
        tree.with_widget_mut::<Self, _, _>(id, |fixed, _tree| {
            fixed.offsets.insert(child, Point { x, y });
        })?;
        // The attach queued a resize with the default offset; the real offset
        // must reach an immediate-mode root too.
        if tree.is_visible(child) {
            tree.queue_resize(id);
        }
        Ok(())
    }

    /// Move a child to a new offset.
    pub fn move_child(tree: &mut Tree, id: WidgetId, child: WidgetId, x: i32, y: i32) {
        let moved = tree
            .with_widget_mut::<Self, _, _>(id, |fixed, _tree| {
                match fixed.offsets.get_mut(&child) {
                    Some(offset) => {
                        *offset = Point { x, y };
                        true
                    }
                    None => false,
                }
            })
            .unwrap_or(false);
        if !moved {
            tracing::warn!("move_child: {child:?} is not in fixed container {id:?}");
            return;
        }
        if tree.is_visible(child) {
            tree.queue_resize(id);
        }
        tree.notify_child_property(id, child, "x");
        tree.notify_child_property(id, child, "y");
    }

    /// The offset recorded for a child.
    pub fn offset(&self, child: WidgetId) -> Option<Point> {
        self.offsets.get(&child).copied()
    }
}

impl Widget for Fixed {
    fn measure(
        &self,
        tree: &Tree,
        id: WidgetId,
        orientation: Orientation,
        _for_size: Option<i32>,
    ) -> Measurement {
        let mut minimum = 0;
        let mut natural = 0;
        for child in tree.children(id).to_vec() {
            if !tree.is_visible(child) {
                continue;
            }
            let offset = self.offsets.get(&child).copied().unwrap_or_default();
            let m = tree.measure(child, orientation, None);
            let along = orientation.pick(offset.x, offset.y);
            minimum = minimum.max(along + m.minimum);
            natural = natural.max(along + m.natural);
        }
        Measurement::new(minimum, natural)
    }

    fn allocate(&mut self, tree: &mut Tree, id: WidgetId, content: Rect, _baseline: Option<i32>) {
        for child in tree.children(id).to_vec() {
            if !tree.is_visible(child) {
                continue;
            }
            let offset = self.offsets.get(&child).copied().unwrap_or_default();
            let width = tree.measure(child, Orientation::Horizontal, None);
            let height = tree.measure(child, Orientation::Vertical, Some(width.natural));
            let rect = Rect::new(
                content.left() + offset.x,
                content.top() + offset.y,
                width.natural,
                height.natural,
            );
            tree.allocate(child, rect, None);
        }
    }

    fn child_properties(&self) -> &'static [ChildPropertySpec] {
        CHILD_PROPERTIES
    }

    fn set_child_property(&mut self, child: WidgetId, name: &str, value: &Value) -> bool {
        let Some(offset) = self.offsets.get_mut(&child) else {
            return false;
        };
        match (name, value.as_int()) {
            ("x", Some(v)) => {
                offset.x = v;
                true
            }
            ("y", Some(v)) => {
                offset.y = v;
                true
            }
            _ => false,
        }
    }

    fn child_property(&self, child: WidgetId, name: &str) -> Option<Value> {
        let offset = self.offsets.get(&child)?;
        match name {
            "x" => Some(Value::Int(offset.x)),
            "y" => Some(Value::Int(offset.y)),
            _ => None,
        }
    }

    fn child_attached(&mut self, _tree: &mut Tree, _id: WidgetId, child: WidgetId) {
        self.offsets.entry(child).or_insert_with(Point::zero);
    }

    fn child_detached(&mut self, _tree: &mut Tree, _id: WidgetId, child: WidgetId) {
        self.offsets.remove(&child);
    }
}
