//! Distance and collision queries.
//!
//! The free functions are pure and boundary-inclusive: touching shapes
//! collide and points on a surface are inside. They never fail; a negative
//! radius is used as given.
//!
//! A [`Collider`] runs the same queries under a [`CollisionConfig`], which
//! can widen every comparison by an epsilon and reject invalid spheres.
//!
//! # Example
//!
//! ```
//! use ely_geometry::{Point, Rect, Sphere, is_point_in_rect, is_spheres_collide};
//!
//! let a = Sphere::new(Point::ZERO, 5.0);
//! let d = Sphere::new(Point::new_2d(7.0, 0.0), 2.0);
//! assert!(is_spheres_collide(&a, &d)); // exactly touching
//!
//! let r = Rect::from_xywh(20.0, 20.0, 50.0, 50.0);
//! assert!(is_point_in_rect(&Point::new_2d(70.0, 70.0), &r));
//! ```

use crate::config::{CollisionConfig, RadiusPolicy};
use crate::error::GeometryResult;
use crate::point::Point;
use crate::rect::Rect;
use crate::sphere::Sphere;

/// Euclidean distance from `point` to the center of `sphere`.
#[inline]
pub fn distance_point_to_sphere_center(point: &Point, sphere: &Sphere) -> f64 {
    point.distance_to(&sphere.center)
}

/// Euclidean distance between the centers of `a` and `b`. Never negative.
#[inline]
pub fn distance_between_sphere_centers(a: &Sphere, b: &Sphere) -> f64 {
    a.center.distance_to(&b.center)
}

/// Gap between the surfaces of `a` and `b`.
///
/// Zero when touching, negative when overlapping.
#[inline]
pub fn distance_between_spheres(a: &Sphere, b: &Sphere) -> f64 {
    distance_between_sphere_centers(a, b) - (a.radius + b.radius)
}

/// Whether `point` lies inside or on `sphere`.
#[inline]
pub fn is_point_in_sphere(point: &Point, sphere: &Sphere) -> bool {
    point_in_sphere(point, sphere, 0.0)
}

/// Whether `point` lies inside or on the boundary of `rect`, on all three
/// axes.
#[inline]
pub fn is_point_in_rect(point: &Point, rect: &Rect) -> bool {
    point_in_rect(point, rect, 0.0)
}

/// Whether two boxes overlap or touch.
#[inline]
pub fn is_rects_collide(a: &Rect, b: &Rect) -> bool {
    rects_collide(a, b, 0.0)
}

/// Whether two spheres overlap or touch.
#[inline]
pub fn is_spheres_collide(a: &Sphere, b: &Sphere) -> bool {
    spheres_collide(a, b, 0.0)
}

/// Whether a box and a sphere overlap or touch.
///
/// A sphere whose center is inside the box always collides, even with a
/// zero radius.
#[inline]
pub fn is_rect_sphere_collide(rect: &Rect, sphere: &Sphere) -> bool {
    rect_sphere_collide(rect, sphere, 0.0)
}

/// The point of `rect` nearest to `point`: on each axis,
/// `max(min, min(point, max))`.
///
/// For a box with a negative extent the lower bound wins, so the result is
/// pulled to [`Rect::position`] on that axis.
pub fn closest_point_in_rect(rect: &Rect, point: &Point) -> Point {
    let min = rect.min();
    let max = rect.max();
    // not f64::clamp, which panics on inverted bounds
    Point::new(
        min.x.max(point.x.min(max.x)),
        min.y.max(point.y.min(max.y)),
        min.z.max(point.z.min(max.z)),
    )
}

fn point_in_sphere(point: &Point, sphere: &Sphere, epsilon: f64) -> bool {
    distance_point_to_sphere_center(point, sphere) <= sphere.radius + epsilon
}

fn point_in_rect(point: &Point, rect: &Rect, epsilon: f64) -> bool {
    let min = rect.min();
    let max = rect.max();
    let within = |v: f64, lo: f64, hi: f64| v >= lo - epsilon && v <= hi + epsilon;
    within(point.x, min.x, max.x) && within(point.y, min.y, max.y) && within(point.z, min.z, max.z)
}

fn rects_collide(a: &Rect, b: &Rect, epsilon: f64) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    let overlap = |a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64| {
        a_lo <= b_hi + epsilon && a_hi + epsilon >= b_lo
    };
    overlap(a_min.x, a_max.x, b_min.x, b_max.x)
        && overlap(a_min.y, a_max.y, b_min.y, b_max.y)
        && overlap(a_min.z, a_max.z, b_min.z, b_max.z)
}

fn spheres_collide(a: &Sphere, b: &Sphere, epsilon: f64) -> bool {
    distance_between_sphere_centers(a, b) <= a.radius + b.radius + epsilon
}

fn rect_sphere_collide(rect: &Rect, sphere: &Sphere, epsilon: f64) -> bool {
    let nearest = closest_point_in_rect(rect, &sphere.center);
    point_in_sphere(&nearest, sphere, epsilon)
}

/// Collision queries under a [`CollisionConfig`].
///
/// With the default configuration every method agrees with the matching
/// free function. Under [`RadiusPolicy::Strict`] the sphere queries return
/// [`GeometryError::InvalidRadius`](crate::GeometryError::InvalidRadius)
/// for a negative or non-finite radius.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Collider {
    config: CollisionConfig,
}

impl Collider {
    /// Create a collider after validating `config`.
    pub fn new(config: CollisionConfig) -> GeometryResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this collider was built with.
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Validate `sphere` according to the radius policy.
    pub fn check_sphere(&self, sphere: &Sphere) -> GeometryResult<()> {
        match self.config.radius_policy {
            RadiusPolicy::Lenient => Ok(()),
            RadiusPolicy::Strict => sphere.validate().inspect_err(|err| {
                tracing::debug!(target: "ely_geometry::collision", %err, "sphere rejected");
            }),
        }
    }

    /// Epsilon-widened [`is_point_in_sphere`](fn@is_point_in_sphere).
    ///
    /// Fails under [`RadiusPolicy::Strict`] when `sphere` has an invalid radius.
    pub fn is_point_in_sphere(&self, point: &Point, sphere: &Sphere) -> GeometryResult<bool> {
        self.check_sphere(sphere)?;
        Ok(point_in_sphere(point, sphere, self.config.epsilon))
    }

    /// Epsilon-widened [`is_point_in_rect`](fn@is_point_in_rect).
    pub fn is_point_in_rect(&self, point: &Point, rect: &Rect) -> bool {
        point_in_rect(point, rect, self.config.epsilon)
    }

    /// Epsilon-widened [`is_rects_collide`](fn@is_rects_collide).
    pub fn is_rects_collide(&self, a: &Rect, b: &Rect) -> bool {
        rects_collide(a, b, self.config.epsilon)
    }

    /// Epsilon-widened [`is_spheres_collide`](fn@is_spheres_collide).
    ///
    /// Fails under [`RadiusPolicy::Strict`] when either sphere has an invalid
    /// radius.
    pub fn is_spheres_collide(&self, a: &Sphere, b: &Sphere) -> GeometryResult<bool> {
        self.check_sphere(a)?;
        self.check_sphere(b)?;
        Ok(spheres_collide(a, b, self.config.epsilon))
    }

    /// Epsilon-widened [`is_rect_sphere_collide`](fn@is_rect_sphere_collide).
    ///
    /// Fails under [`RadiusPolicy::Strict`] when `sphere` has an invalid radius.
    pub fn is_rect_sphere_collide(&self, rect: &Rect, sphere: &Sphere) -> GeometryResult<bool> {
        self.check_sphere(sphere)?;
        Ok(rect_sphere_collide(rect, sphere, self.config.epsilon))
    }
}
