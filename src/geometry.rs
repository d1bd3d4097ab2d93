//! Core geometry types: Point, Size, Rect, BoundingBox, Orientation.
//!
//! Every widget owns a [`Rect`] in surface units. Hit-testing goes through the
//! derived [`BoundingBox`], which is always computed from the rectangle and
//! never stored on its own.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position on the surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate along `orientation`'s primary axis.
    #[inline]
    pub const fn along(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Size { width, height }
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Primary axis of a layout or slider.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An `(x, y, width, height)` rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dimensions.
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The derived `(x1, y1, x2, y2)` box used for hit-testing.
    #[inline]
    pub const fn bounding_box(self) -> BoundingBox {
        BoundingBox { x1: self.x, y1: self.y, x2: self.right(), y2: self.bottom() }
    }

    /// Whether `p` lies inside the rectangle, edges included.
    #[inline]
    pub const fn contains(self, p: Point) -> bool {
        self.bounding_box().contains(p)
    }

    /// Same rectangle moved to `origin`.
    #[inline]
    pub const fn with_origin(self, origin: Point) -> Rect {
        Rect { x: origin.x, y: origin.y, width: self.width, height: self.height }
    }

    /// Same rectangle resized to `size`.
    #[inline]
    pub const fn with_size(self, size: Size) -> Rect {
        Rect { x: self.x, y: self.y, width: size.width, height: size.height }
    }

    /// Position along `orientation`'s primary axis.
    #[inline]
    pub const fn start(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Extent along `orientation`'s primary axis.
    #[inline]
    pub const fn extent(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Shrink on the cross axis of `orientation` by `inset` on each side.
    ///
    /// The resulting cross extent is clamped to zero.
    #[inline]
    pub const fn inset_cross(self, orientation: Orientation, inset: i32) -> Rect {
        match orientation {
            Orientation::Horizontal => {
                let h = self.height - 2 * inset;
                Rect { x: self.x, y: self.y + inset, width: self.width, height: if h > 0 { h } else { 0 } }
            }
            Orientation::Vertical => {
                let w = self.width - 2 * inset;
                Rect { x: self.x + inset, y: self.y, width: if w > 0 { w } else { 0 }, height: self.height }
            }
        }
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Rect { x, y, width, height }
    }
}

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

/// Axis-aligned `(x1, y1, x2, y2)` corners of a [`Rect`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Inclusive containment test on all four edges.
    #[inline]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}

/// Free-function form of [`BoundingBox::contains`].
#[inline]
pub const fn point_in_rect(p: Point, bbox: BoundingBox) -> bool {
    bbox.contains(p)
}

// ===========================================================================
// Tests
// ===========================================================================
