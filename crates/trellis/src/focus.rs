//! Focus tracking and directional focus navigation.

use geom::Rect;

use crate::{
    id::WidgetId,
    tree::{TextDirection, Tree},
};

/// A focus movement request.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FocusDirection {
    /// Next in tab order.
    Forward,
    /// Previous in tab order.
    Backward,
    /// Spatially upward.
    Up,
    /// Spatially downward.
    Down,
    /// Spatially leftward.
    Left,
    /// Spatially rightward.
    Right,
}

/// Focus bookkeeping and navigation over a tree.
pub trait FocusNavigator {
    /// The currently focused widget, if any.
    fn focused(&self) -> Option<WidgetId>;

    /// Does this widget hold focus?
    fn is_focused(&self, id: WidgetId) -> bool;

    /// Move focus to a widget (or clear it), updating the focus-child links
    /// on every ancestor.
    fn set_focus(&mut self, target: Option<WidgetId>);

    /// Install an explicit focus traversal order for a container's
    /// descendants, overriding the computed one.
    fn set_focus_chain(&mut self, id: WidgetId, chain: Vec<WidgetId>);

    /// Remove a container's explicit focus traversal order.
    fn unset_focus_chain(&mut self, id: WidgetId);

    /// Move focus within the subtree at `id`. A visible, focusable,
    /// unfocused widget claims focus itself; otherwise candidates are tried
    /// in direction order, recursively. Returns whether any widget accepted.
    fn move_focus(&mut self, id: WidgetId, direction: FocusDirection) -> bool;
}

impl FocusNavigator for Tree {
    fn focused(&self) -> Option<WidgetId> {
        self.focus
    }

    fn is_focused(&self, id: WidgetId) -> bool {
        self.focus == Some(id)
    }

    fn set_focus(&mut self, target: Option<WidgetId>) {
        self.focus = target;
        if let Some(mut current) = target {
            while let Some(parent) = self.nodes.get(current).and_then(|n| n.parent) {
                if let Some(pnode) = self.nodes.get_mut(parent) {
                    pnode.focus_child = Some(current);
                }
                current = parent;
            }
        }
    }

    fn set_focus_chain(&mut self, id: WidgetId, chain: Vec<WidgetId>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.focus_chain = Some(chain);
        }
    }

    fn unset_focus_chain(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.focus_chain = None;
        }
    }

    fn move_focus(&mut self, id: WidgetId, direction: FocusDirection) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.visible {
            return false;
        }
        let focusable = node.widget.as_deref().is_some_and(|w| w.accepts_focus());
        if focusable && !self.is_focused(id) {
            self.set_focus(Some(id));
            return true;
        }

        let mut candidates = gather_candidates(self, id);
        match direction {
            FocusDirection::Forward => {}
            FocusDirection::Backward => candidates.reverse(),
            _ => sort_directional(self, id, &mut candidates, direction),
        }
        for candidate in candidates {
            if self.move_focus(candidate, direction) {
                return true;
            }
        }
        false
    }
}

// Private helper functions

/// Visible candidates in traversal order: the explicit focus chain if set,
/// else the container's child enumeration.
fn gather_candidates(tree: &Tree, id: WidgetId) -> Vec<WidgetId> {
    let Some(node) = tree.nodes.get(id) else {
        return Vec::new();
    };
    let list = match &node.focus_chain {
        Some(chain) => chain.clone(),
        None => node
            .widget
            .as_deref()
            .and_then(|w| w.enumerate_children(false))
            .unwrap_or_else(|| {
                node.children
                    .iter()
                    .copied()
                    .filter(|c| !tree.nodes.get(*c).is_some_and(|n| n.internal))
                    .collect()
            }),
    };
    list.into_iter()
        .filter(|c| tree.nodes.get(*c).is_some_and(|n| n.visible))
        .collect()
}

/// The rect candidates are compared against: the previous focus holder if
/// the container tracks one, else a degenerate anchor on the container edge
/// opposite the motion.
fn reference_rect(tree: &Tree, id: WidgetId, direction: FocusDirection) -> Rect {
    let container = tree.nodes.get(id).map(|n| n.allocation).unwrap_or_default();
    if let Some(focus_child) = tree.nodes.get(id).and_then(|n| n.focus_child)
        && let Some(node) = tree.nodes.get(focus_child)
        && node.visible
    {
        return node.allocation;
    }
    match direction {
        FocusDirection::Down => Rect::new(container.left(), container.top(), container.w, 0),
        FocusDirection::Up => Rect::new(container.left(), container.bottom(), container.w, 0),
        FocusDirection::Right => Rect::new(container.left(), container.top(), 0, container.h),
        FocusDirection::Left => Rect::new(container.right(), container.top(), 0, container.h),
        _ => container,
    }
}

/// Filter candidates to the motion side with perpendicular overlap, then
/// order by center distance along the motion axis, ties by perpendicular
/// center distance, mirrored for right-to-left text.
fn sort_directional(
    tree: &Tree,
    id: WidgetId,
    candidates: &mut Vec<WidgetId>,
    direction: FocusDirection,
) {
    let reference = reference_rect(tree, id, direction);
    let ref_center = reference.center();
    let rtl = tree.text_direction() == TextDirection::Rtl;

    let mut rated: Vec<(WidgetId, Rect)> = candidates
        .iter()
        .filter_map(|c| tree.nodes.get(*c).map(|n| (*c, n.allocation)))
        .collect();

    rated.retain(|(_, rect)| {
        let center = rect.center();
        match direction {
            FocusDirection::Up => {
                rect.overlaps_horizontal(reference) && center.y < ref_center.y
            }
            FocusDirection::Down => {
                rect.overlaps_horizontal(reference) && center.y > ref_center.y
            }
            FocusDirection::Left => rect.overlaps_vertical(reference) && center.x < ref_center.x,
            FocusDirection::Right => rect.overlaps_vertical(reference) && center.x > ref_center.x,
            _ => true,
        }
    });

    rated.sort_by_key(|(_, rect)| {
        let center = rect.center();
        match direction {
            FocusDirection::Up | FocusDirection::Down => {
                let main = center.y.abs_diff(ref_center.y);
                let cross = center.x.abs_diff(ref_center.x);
                let pos = if rtl { -i64::from(center.x) } else { i64::from(center.x) };
                (main, cross, pos)
            }
            FocusDirection::Left | FocusDirection::Right => {
                let main = center.x.abs_diff(ref_center.x);
                let cross = center.y.abs_diff(ref_center.y);
                (main, cross, i64::from(center.y))
            }
            _ => (0, 0, 0),
        }
    });

    *candidates = rated.into_iter().map(|(c, _)| c).collect();
}
