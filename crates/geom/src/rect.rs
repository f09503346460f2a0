use super::Point;

/// A rectangle with a signed origin and signed size.
///
/// Sizes are kept non-negative by every constructor and operation in this
/// crate; the signed representation lets layout arithmetic subtract without
/// intermediate casts.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Does this rect have a zero area?
    pub fn is_zero(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Left edge.
    pub fn left(&self) -> i32 {
        self.tl.x
    }

    /// Right edge, exclusive.
    pub fn right(&self) -> i32 {
        self.tl.x + self.w
    }

    /// Top edge.
    pub fn top(&self) -> i32 {
        self.tl.y
    }

    /// Bottom edge, exclusive.
    pub fn bottom(&self) -> i32 {
        self.tl.y + self.h
    }

    /// Center point, rounded toward the top-left.
    pub fn center(&self) -> Point {
        Point {
            x: self.tl.x + self.w / 2,
            y: self.tl.y + self.h / 2,
        }
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Extract an inner rectangle, given a border width. The size clamps at
    /// zero when the rect is too small to hold the border.
    pub fn inner(&self, border: i32) -> Self {
        Self {
            tl: Point {
                x: self.tl.x + border,
                y: self.tl.y + border,
            },
            w: (self.w - 2 * border).max(0),
            h: (self.h - 2 * border).max(0),
        }
    }

    /// Shift the rectangle by an offset.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            tl: Point {
                x: self.tl.x + dx,
                y: self.tl.y + dy,
            },
            w: self.w,
            h: self.h,
        }
    }

    /// True if the horizontal extents of the two rects overlap.
    pub fn overlaps_horizontal(&self, other: Self) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// True if the vertical extents of the two rects overlap.
    pub fn overlaps_vertical(&self, other: Self) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    /// Reflect this rect about the horizontal center line of `outer`,
    /// preserving its size. Used to mirror layouts for right-to-left text.
    pub fn mirror_x_within(&self, outer: Self) -> Self {
        Self {
            tl: Point {
                x: outer.left() + (outer.right() - self.right()),
                y: self.tl.y,
            },
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(2, 3, 10, 20);
        assert_eq!(r.left(), 2);
        assert_eq!(r.right(), 12);
        assert_eq!(r.top(), 3);
        assert_eq!(r.bottom(), 23);
        assert_eq!(r.center(), Point { x: 7, y: 13 });
    }

    #[test]
    fn contains_point() {
        let r = Rect::new(0, 0, 5, 5);
        assert!(r.contains_point((0, 0).into()));
        assert!(r.contains_point((4, 4).into()));
        assert!(!r.contains_point((5, 4).into()));
        assert!(!r.contains_point((-1, 0).into()));
    }

    #[test]
    fn inner_clamps() {
        let r = Rect::new(0, 0, 10, 10);
        assert_eq!(r.inner(2), Rect::new(2, 2, 6, 6));
        assert_eq!(r.inner(6), Rect::new(6, 6, 0, 0));
    }

    #[test]
    fn overlaps() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 20, 10, 10);
        assert!(a.overlaps_horizontal(b));
        assert!(!a.overlaps_vertical(b));
    }

    #[test]
    fn mirror() {
        let outer = Rect::new(0, 0, 100, 10);
        let r = Rect::new(10, 0, 20, 10);
        assert_eq!(r.mirror_x_within(outer), Rect::new(70, 0, 20, 10));
        // Mirroring twice restores the original.
        assert_eq!(r.mirror_x_within(outer).mirror_x_within(outer), r);
    }
}
