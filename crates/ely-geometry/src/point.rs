//! Three-dimensional points.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point in 3D space. 2D consumers leave `z` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A partial set of point coordinates.
///
/// Used as the right-hand side of [`Point::add`], [`Point::mul`] and
/// [`Point::subdivide`] when only some axes should take part.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointAxes {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl PointAxes {
    /// No axes set.
    pub const NONE: Self = Self {
        x: None,
        y: None,
        z: None,
    };

    /// Set the x axis.
    #[inline]
    pub const fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the y axis.
    #[inline]
    pub const fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Set the z axis.
    #[inline]
    pub const fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
}

/// Right-hand side of point arithmetic: a whole point or selected axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOperand {
    Point(Point),
    Axes(PointAxes),
}

impl From<Point> for PointOperand {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<PointAxes> for PointOperand {
    fn from(axes: PointAxes) -> Self {
        Self::Axes(axes)
    }
}

/// Combine `value` with an optional operand; a missing operand leaves the
/// value as it is.
#[inline]
pub(crate) fn apply_axis(value: f64, operand: Option<f64>, op: impl Fn(f64, f64) -> f64) -> f64 {
    operand.map_or(value, |rhs| op(value, rhs))
}

impl Point {
    /// The origin point (0, 0, 0).
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point on the `z = 0` plane.
    #[inline]
    pub const fn new_2d(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Set the x coordinate.
    #[inline]
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.x = x;
        self
    }

    /// Set the y coordinate.
    #[inline]
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.y = y;
        self
    }

    /// Set the z coordinate.
    #[inline]
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        self.z = z;
        self
    }

    /// A copy with the x coordinate replaced.
    #[inline]
    pub const fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// A copy with the y coordinate replaced.
    #[inline]
    pub const fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// A copy with the z coordinate replaced.
    #[inline]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Add a point or selected axes. Axes that are not given add zero.
    ///
    /// ```
    /// use ely_geometry::{Point, PointAxes};
    ///
    /// let p = Point::new(1.0, 2.0, 3.0);
    /// assert_eq!(p.add(Point::new(1.0, 1.0, 1.0)), Point::new(2.0, 3.0, 4.0));
    /// assert_eq!(p.add(PointAxes::NONE.y(10.0)), Point::new(1.0, 12.0, 3.0));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, operand: impl Into<PointOperand>) -> Self {
        match operand.into() {
            PointOperand::Point(p) => self + p,
            PointOperand::Axes(a) => Self::new(
                self.x + a.x.unwrap_or(0.0),
                self.y + a.y.unwrap_or(0.0),
                self.z + a.z.unwrap_or(0.0),
            ),
        }
    }

    /// Multiply per axis by a point or selected axes. Axes that are not
    /// given are left unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, operand: impl Into<PointOperand>) -> Self {
        self.combine(operand.into(), |a, b| a * b)
    }

    /// Divide per axis by a point or selected axes. Axes that are not given
    /// are left unchanged. Division by zero yields `inf` or `NaN`.
    pub fn subdivide(self, operand: impl Into<PointOperand>) -> Self {
        self.combine(operand.into(), |a, b| a / b)
    }

    fn combine(self, operand: PointOperand, op: impl Fn(f64, f64) -> f64) -> Self {
        let axes = match operand {
            PointOperand::Point(p) => PointAxes {
                x: Some(p.x),
                y: Some(p.y),
                z: Some(p.z),
            },
            PointOperand::Axes(a) => a,
        };
        Self::new(
            apply_axis(self.x, axes.x, &op),
            apply_axis(self.y, axes.y, &op),
            apply_axis(self.z, axes.z, &op),
        )
    }

    /// The per-axis sum of `points`.
    pub fn sum<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points.into_iter().fold(Self::ZERO, |acc, p| acc + p)
    }

    /// `self - other` per axis.
    #[inline]
    pub fn difference(&self, other: &Point) -> Point {
        *self - *other
    }

    /// `|self - other|` per axis.
    #[inline]
    pub fn abs_difference(&self, other: &Point) -> Point {
        let d = self.difference(other);
        Point::new(d.x.abs(), d.y.abs(), d.z.abs())
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let d = self.difference(other);
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    /// Whether every axis is within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new_2d(x, y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl Sum for Point {
    fn sum<I: Iterator<Item = Point>>(iter: I) -> Point {
        iter.fold(Point::ZERO, |acc, p| acc + p)
    }
}
