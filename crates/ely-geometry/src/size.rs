//! Extents (width, height, depth).

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::point::apply_axis;

/// A size in 3D space. 2D consumers ignore `depth`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// A partial set of size axes. See [`PointAxes`](crate::PointAxes).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeAxes {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl SizeAxes {
    /// No axes set.
    pub const NONE: Self = Self {
        width: None,
        height: None,
        depth: None,
    };

    #[inline]
    pub const fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[inline]
    pub const fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[inline]
    pub const fn depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }
}

/// Right-hand side of size arithmetic: a whole size or selected axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeOperand {
    Size(Size),
    Axes(SizeAxes),
}

impl From<Size> for SizeOperand {
    fn from(s: Size) -> Self {
        Self::Size(s)
    }
}

impl From<SizeAxes> for SizeOperand {
    fn from(axes: SizeAxes) -> Self {
        Self::Axes(axes)
    }
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
        depth: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Create a flat size with zero depth.
    #[inline]
    pub const fn new_2d(width: f64, height: f64) -> Self {
        Self::new(width, height, 0.0)
    }

    /// A size with every axis equal to `d`.
    #[inline]
    pub const fn diagonal(d: f64) -> Self {
        Self::new(d, d, d)
    }

    #[inline]
    pub const fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub const fn depth(&self) -> f64 {
        self.depth
    }

    #[inline]
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.width = width;
        self
    }

    #[inline]
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.height = height;
        self
    }

    #[inline]
    pub fn set_depth(&mut self, depth: f64) -> &mut Self {
        self.depth = depth;
        self
    }

    /// Set every axis to `d`.
    #[inline]
    pub fn set_diagonal(&mut self, d: f64) -> &mut Self {
        *self = Self::diagonal(d);
        self
    }

    #[inline]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[inline]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Add a size or selected axes. Axes that are not given add zero.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, operand: impl Into<SizeOperand>) -> Self {
        match operand.into() {
            SizeOperand::Size(s) => self + s,
            SizeOperand::Axes(a) => Self::new(
                self.width + a.width.unwrap_or(0.0),
                self.height + a.height.unwrap_or(0.0),
                self.depth + a.depth.unwrap_or(0.0),
            ),
        }
    }

    /// Multiply per axis. Axes that are not given are left unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, operand: impl Into<SizeOperand>) -> Self {
        self.combine(operand.into(), |a, b| a * b)
    }

    /// Divide per axis. Axes that are not given are left unchanged.
    pub fn subdivide(self, operand: impl Into<SizeOperand>) -> Self {
        self.combine(operand.into(), |a, b| a / b)
    }

    fn combine(self, operand: SizeOperand, op: impl Fn(f64, f64) -> f64) -> Self {
        let axes = match operand {
            SizeOperand::Size(s) => SizeAxes {
                width: Some(s.width),
                height: Some(s.height),
                depth: Some(s.depth),
            },
            SizeOperand::Axes(a) => a,
        };
        Self::new(
            apply_axis(self.width, axes.width, &op),
            apply_axis(self.height, axes.height, &op),
            apply_axis(self.depth, axes.depth, &op),
        )
    }

    /// The per-axis sum of `sizes`.
    pub fn sum<I: IntoIterator<Item = Size>>(sizes: I) -> Self {
        sizes.into_iter().fold(Self::ZERO, |acc, s| acc + s)
    }

    /// `self - other` per axis.
    #[inline]
    pub fn difference(&self, other: &Size) -> Size {
        *self - *other
    }

    /// `|self - other|` per axis.
    #[inline]
    pub fn abs_difference(&self, other: &Size) -> Size {
        let d = self.difference(other);
        Size::new(d.width.abs(), d.height.abs(), d.depth.abs())
    }

    /// Whether every axis is within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Size, epsilon: f64) -> bool {
        (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
            && (self.depth - other.depth).abs() <= epsilon
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new_2d(width, height)
    }
}

impl From<(f64, f64, f64)> for Size {
    fn from((width, height, depth): (f64, f64, f64)) -> Self {
        Self::new(width, height, depth)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new_2d(f64::from(width), f64::from(height))
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size::new(
            self.width + rhs.width,
            self.height + rhs.height,
            self.depth + rhs.depth,
        )
    }
}

impl AddAssign for Size {
    #[inline]
    fn add_assign(&mut self, rhs: Size) {
        *self = *self + rhs;
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size::new(
            self.width - rhs.width,
            self.height - rhs.height,
            self.depth - rhs.depth,
        )
    }
}

impl SubAssign for Size {
    #[inline]
    fn sub_assign(&mut self, rhs: Size) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Size {
    type Output = Size;
    #[inline]
    fn mul(self, rhs: f64) -> Size {
        Size::new(self.width * rhs, self.height * rhs, self.depth * rhs)
    }
}

impl Sum for Size {
    fn sum<I: Iterator<Item = Size>>(iter: I) -> Size {
        iter.fold(Size::ZERO, |acc, s| acc + s)
    }
}
