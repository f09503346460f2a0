//! A container that arranges children into a near-square grid.

use geom::Rect;

use crate::{
    distribute::{SizeRequest, distribute_natural_allocation},
    id::WidgetId,
    measure::{Measurement, Orientation},
    tree::Tree,
    widget::Widget,
};

/// Children flow row-by-row into `ceil(sqrt(n))` columns; every column and
/// row is sized to its largest child, and leftover space spreads across the
/// lines the same way box slots grow toward their natural size.
pub struct Grid {
    /// Pixels between adjacent columns and rows.
    spacing: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Construct an empty grid.
    pub fn new() -> Self {
        Self { spacing: 0 }
    }

    /// Set the line spacing at construction.
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    /// Visible children in z order.
    fn cells(tree: &Tree, id: WidgetId) -> Vec<WidgetId> {
        tree.children(id)
            .iter()
            .copied()
            .filter(|c| tree.is_visible(*c))
            .collect()
    }

    /// Column count for a child count.
    fn columns(count: usize) -> usize {
        (count as f64).sqrt().ceil() as usize
    }

    /// Per-line size requests along an axis: the componentwise maximum over
    /// the children in each line.
    fn line_requests(
        tree: &Tree,
        cells: &[WidgetId],
        columns: usize,
        orientation: Orientation,
    ) -> Vec<SizeRequest> {
        let lines = match orientation {
            Orientation::Horizontal => columns,
            Orientation::Vertical => cells.len().div_ceil(columns),
        };
        let mut requests = vec![SizeRequest::new(0, 0); lines];
        for (i, child) in cells.iter().enumerate() {
            let line = match orientation {
                Orientation::Horizontal => i % columns,
                Orientation::Vertical => i / columns,
            };
            let m = tree.measure(*child, orientation, None);
            requests[line].minimum = requests[line].minimum.max(m.minimum);
            requests[line].natural = requests[line].natural.max(m.natural);
        }
        requests
    }

    /// Final line sizes for an available extent: grow lines toward natural,
    /// then spread the remainder one pixel at a time from the first line.
    fn line_sizes(
        tree: &Tree,
        cells: &[WidgetId],
        columns: usize,
        orientation: Orientation,
        avail: i32,
        spacing: i32,
    ) -> Vec<i32> {
        let mut requests = Self::line_requests(tree, cells, columns, orientation);
        let lines = requests.len() as i32;
        if lines == 0 {
            return Vec::new();
        }
        let mut budget = avail - (lines - 1) * spacing;
        for req in &requests {
            budget -= req.minimum;
        }
        let remaining = distribute_natural_allocation(budget, &mut requests);
        let per = remaining / lines;
        let mut leftover = remaining % lines;
        requests
            .iter()
            .map(|req| {
                let mut size = req.minimum + per;
                if leftover > 0 {
                    size += 1;
                    leftover -= 1;
                }
                size
            })
            .collect()
    }
}

impl Widget for Grid {
    fn measure(
        &self,
        tree: &Tree,
        id: WidgetId,
        orientation: Orientation,
        _for_size: Option<i32>,
    ) -> Measurement {
        let cells = Self::cells(tree, id);
        if cells.is_empty() {
            return Measurement::default();
        }
        let columns = Self::columns(cells.len());
        let requests = Self::line_requests(tree, &cells, columns, orientation);
        let mut minimum = (requests.len() as i32 - 1) * self.spacing;
        let mut natural = minimum;
        for req in &requests {
            minimum += req.minimum;
            natural += req.natural;
        }
        Measurement::new(minimum, natural)
    }

    fn allocate(&mut self, tree: &mut Tree, id: WidgetId, content: Rect, _baseline: Option<i32>) {
        let cells = Self::cells(tree, id);
        if cells.is_empty() {
            return;
        }
        let columns = Self::columns(cells.len());
        let widths = Self::line_sizes(
            tree,
            &cells,
            columns,
            Orientation::Horizontal,
            content.w,
            self.spacing,
        );
        let heights = Self::line_sizes(
            tree,
            &cells,
            columns,
            Orientation::Vertical,
            content.h,
            self.spacing,
        );

        let mut y = content.top();
        for (row, height) in heights.iter().enumerate() {
            let mut x = content.left();
            for (col, width) in widths.iter().enumerate() {
                let index = row * columns + col;
                if let Some(child) = cells.get(index) {
                    tree.allocate(*child, Rect::new(x, y, *width, *height), None);
                }
                x += width + self.spacing;
            }
            y += height + self.spacing;
        }
    }
}
