//! Geometry for ely.
//!
//! This crate provides the value types and stateless queries used for hit
//! testing and simple collision detection:
//!
//! - **Value types**: [`Point`], [`Size`], [`Rect`] and [`Sphere`], all
//!   `Copy` records in 3D with `f64` coordinates (2D callers leave `z` and
//!   `depth` at zero)
//! - **Queries**: distances and boundary-inclusive containment / overlap tests
//! - **Collider**: the same queries with a configurable epsilon and radius
//!   validation
//!
//! Copying a value is always a snapshot; a shared reference is the read-only
//! view and an owned or `&mut` value is the mutable one.
//!
//! # Example
//!
//! ```
//! use ely_geometry::{Point, Rect, Size, Sphere, is_rect_sphere_collide};
//!
//! let mut bounds = Rect::new(Point::new_2d(0.0, 0.0), Size::new_2d(100.0, 50.0));
//! bounds.set_position(Point::new_2d(10.0, 10.0));
//!
//! let cursor = Sphere::new(Point::new_2d(111.0, 30.0), 1.0);
//! assert!(is_rect_sphere_collide(&bounds, &cursor));
//! ```

mod collision;
mod config;
mod error;
mod point;
mod rect;
mod size;
mod sphere;

pub use collision::{
    Collider, closest_point_in_rect, distance_between_sphere_centers, distance_between_spheres,
    distance_point_to_sphere_center, is_point_in_rect, is_point_in_sphere, is_rect_sphere_collide,
    is_rects_collide, is_spheres_collide,
};
pub use config::{CollisionConfig, RadiusPolicy};
pub use error::{GeometryError, GeometryResult};
pub use point::{Point, PointAxes, PointOperand};
pub use rect::Rect;
pub use size::{Size, SizeAxes, SizeOperand};
pub use sphere::Sphere;
