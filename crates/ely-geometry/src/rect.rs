//! Axis-aligned boxes.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::size::Size;

/// An axis-aligned box defined by its minimum corner and size.
///
/// With `depth == 0` this is a flat 2D rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        position: Point::ZERO,
        size: Size::ZERO,
    };

    /// Create a new rectangle from position and size.
    #[inline]
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a flat rectangle from x, y, width and height.
    #[inline]
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new_2d(x, y),
            size: Size::new_2d(width, height),
        }
    }

    /// Create a rectangle from two corners (min and max points).
    #[inline]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            position: min,
            size: Size::new(max.x - min.x, max.y - min.y, max.z - min.z),
        }
    }

    #[inline]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Replace the position.
    #[inline]
    pub fn set_position(&mut self, position: Point) -> &mut Self {
        self.position = position;
        self
    }

    /// Replace the size.
    #[inline]
    pub fn set_size(&mut self, size: Size) -> &mut Self {
        self.size = size;
        self
    }

    /// The corner opposite [`position`](Self::position): position plus size
    /// on every axis.
    #[inline]
    pub fn second_position(&self) -> Point {
        Point::new(
            self.position.x + self.size.width,
            self.position.y + self.size.height,
            self.position.z + self.size.depth,
        )
    }

    /// The minimum corner.
    #[inline]
    pub const fn min(&self) -> Point {
        self.position
    }

    /// The maximum corner. Same as [`second_position`](Self::second_position).
    #[inline]
    pub fn max(&self) -> Point {
        self.second_position()
    }

    #[inline]
    pub const fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub const fn height(&self) -> f64 {
        self.size.height
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
            self.position.z + self.size.depth / 2.0,
        )
    }

    /// Check if the rectangle is empty (zero or negative area).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// A copy moved by `delta`.
    #[inline]
    pub fn offset(&self, delta: Point) -> Rect {
        Rect {
            position: self.position + delta,
            size: self.size,
        }
    }

    /// Whether position and size are within `epsilon` of `other` on every
    /// axis.
    pub fn approx_eq(&self, other: &Rect, epsilon: f64) -> bool {
        self.position.approx_eq(&other.position, epsilon)
            && self.size.approx_eq(&other.size, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.min(), Point::new_2d(10.0, 20.0));
        assert_eq!(r.second_position(), Point::new_2d(110.0, 70.0));
        assert_eq!(r.max(), r.second_position());
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center(), Point::new_2d(60.0, 45.0));
    }

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(Point::new(1.0, 2.0, 3.0), Point::new(4.0, 6.0, 8.0));
        assert_eq!(r.size, Size::new(3.0, 4.0, 5.0));
        assert_eq!(r.second_position(), Point::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn test_setters_replace_wholesale() {
        let mut r = Rect::ZERO;
        r.set_position(Point::new_2d(5.0, 5.0))
            .set_size(Size::new_2d(1.0, 2.0));
        assert_eq!(r, Rect::from_xywh(5.0, 5.0, 1.0, 2.0));

        // Snapshots do not alias the rect
        let mut pos = r.position();
        pos.set_x(100.0);
        assert_eq!(r.position.x, 5.0);
    }

    #[test]
    fn test_offset_and_approx_eq() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let moved = r.offset(Point::new_2d(2.5, -1.0));
        assert_eq!(moved.position, Point::new_2d(2.5, -1.0));
        assert_eq!(moved.size, r.size);
        assert!(moved.approx_eq(&Rect::from_xywh(2.5, -1.0, 10.0 + 1e-12, 10.0), 1e-9));
        assert!(!moved.approx_eq(&r, 1e-9));
        assert!(Rect::ZERO.is_empty());
    }
}
