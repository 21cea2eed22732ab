//! Spheres (circles when `z` is zero).

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::point::Point;

/// A sphere defined by its center and radius.
///
/// The radius is expected to be non-negative but [`Sphere::new`] does not
/// enforce it; use [`Sphere::try_new`] to reject bad values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Point,
    pub radius: f64,
}

impl Sphere {
    /// Zero-radius sphere at the origin.
    pub const ZERO: Self = Self {
        center: Point::ZERO,
        radius: 0.0,
    };

    /// Create a new sphere. Any radius is accepted.
    #[inline]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Create a sphere, rejecting a negative or non-finite radius.
    pub fn try_new(center: Point, radius: f64) -> GeometryResult<Self> {
        let sphere = Self::new(center, radius);
        sphere.validate()?;
        Ok(sphere)
    }

    /// Check that the radius is finite and non-negative.
    pub fn validate(&self) -> GeometryResult<()> {
        if self.radius.is_finite() && self.radius >= 0.0 {
            Ok(())
        } else {
            Err(GeometryError::InvalidRadius {
                radius: self.radius,
            })
        }
    }

    #[inline]
    pub const fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn set_center(&mut self, center: Point) -> &mut Self {
        self.center = center;
        self
    }

    #[inline]
    pub fn set_radius(&mut self, radius: f64) -> &mut Self {
        self.radius = radius;
        self
    }

    pub fn approx_eq(&self, other: &Sphere, epsilon: f64) -> bool {
        self.center.approx_eq(&other.center, epsilon) && (self.radius - other.radius).abs() <= epsilon
    }
}
