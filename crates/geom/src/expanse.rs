use super::Rect;

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Useful when we want to deal with `Rect`s abstractly.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Expanse {
    /// Construct an expanse from a width and height.
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Expanse {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
