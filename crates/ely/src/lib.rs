//! ely - observable state and collision geometry for interactive front-ends.
//!
//! This is the umbrella crate that re-exports all public APIs. Reactive
//! state lives at the crate root; geometry is under [`geometry`].
//!
//! # Example
//!
//! ```
//! use ely::prelude::*;
//!
//! let cursor = ObservableProperty::with_value(Point::ZERO);
//! let target = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
//! let hovering = std::sync::Arc::new(ObservableBoolean::new());
//!
//! let flag = hovering.clone();
//! cursor.on_change(move |new, _| {
//!     let inside = new.is_some_and(|p| is_point_in_rect(p, &target));
//!     if inside != flag.is_true() {
//!         flag.toggle();
//!     }
//! });
//!
//! cursor.set(Point::new_2d(15.0, 15.0));
//! assert!(hovering.is_true());
//! ```

pub use ely_core::*;

/// Geometric value types and collision queries.
pub mod geometry {
    pub use ely_geometry::*;
}

/// Commonly used types, for glob import.
pub mod prelude {
    pub use ely_core::{
        ArrayEvent, DictionaryEvent, EventKind, KeyValueStore, MemoryStore, NamespacedStore,
        ObservableArray, ObservableBoolean, ObservableDictionary, ObservableProperty,
        ObserverId, PropertyEvent,
    };
    pub use ely_geometry::{
        Collider, CollisionConfig, Point, PointAxes, Rect, Size, SizeAxes, Sphere,
        closest_point_in_rect, distance_between_sphere_centers, distance_between_spheres,
        distance_point_to_sphere_center, is_point_in_rect, is_point_in_sphere,
        is_rect_sphere_collide, is_rects_collide, is_spheres_collide,
    };
}
