/// A rectangle representing a window's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from left/top/right/bottom edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns `true` when the rectangle has a positive area.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Grows the rectangle upward by `band` pixels, keeping the bottom edge.
    pub fn extend_top(&self, band: i32) -> Self {
        Self::new(self.x, self.y - band, self.width, self.height + band)
    }
}

/// A point in physical screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-edge difference between a window's visible frame and the rectangle
/// the OS reports for it.
///
/// Adding the offset to the reported rectangle yields the visible bounds.
/// On Windows 10/11 the left/right/bottom edges are typically ~7px inside
/// the reported rectangle because of invisible resize borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOffset {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameOffset {
    /// Computes the offset that maps `window` onto `visible`.
    pub fn between(window: &Rect, visible: &Rect) -> Self {
        Self {
            left: visible.x - window.x,
            top: visible.y - window.y,
            right: visible.right() - window.right(),
            bottom: visible.bottom() - window.bottom(),
        }
    }

    /// Applies the offset to a reported window rectangle.
    pub fn apply(&self, window: &Rect) -> Rect {
        Rect::from_edges(
            window.x + self.left,
            window.y + self.top,
            window.right() + self.right,
            window.bottom() + self.bottom,
        )
    }
}
