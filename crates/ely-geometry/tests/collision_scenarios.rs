//! End-to-end collision scenarios.

use ely_geometry::{
    Collider, CollisionConfig, Point, RadiusPolicy, Rect, Size, Sphere,
    distance_between_spheres, is_point_in_rect, is_spheres_collide,
};

fn sphere(radius: f64, x: f64, y: f64) -> Sphere {
    Sphere::new(Point::new_2d(x, y), radius)
}

#[test]
fn concentric_spheres_collide() {
    let a = sphere(5.0, 0.0, 0.0);
    let b = sphere(2.0, 0.0, 0.0);
    assert!(is_spheres_collide(&a, &b));
    assert!(is_spheres_collide(&b, &a));
}

#[test]
fn separated_spheres_do_not_collide() {
    let a = sphere(5.0, 0.0, 0.0);
    let c = sphere(2.0, 8.0, 0.0);
    assert!(!is_spheres_collide(&a, &c));
    assert_eq!(distance_between_spheres(&a, &c), 1.0);
}

#[test]
fn touching_spheres_collide() {
    let a = sphere(5.0, 0.0, 0.0);
    let d = sphere(2.0, 7.0, 0.0);
    assert!(is_spheres_collide(&a, &d));
    assert_eq!(distance_between_spheres(&a, &d), 0.0);
}

#[test]
fn rect_corners_are_inclusive() {
    let r = Rect::new(Point::new_2d(20.0, 20.0), Size::new_2d(50.0, 50.0));
    assert!(is_point_in_rect(&Point::new_2d(20.0, 20.0), &r));
    assert!(is_point_in_rect(&r.second_position(), &r));
    assert!(is_point_in_rect(&Point::new_2d(70.0, 70.0), &r));
    assert!(!is_point_in_rect(&Point::new_2d(71.0, 70.0), &r));
}

#[test]
fn collider_loaded_from_toml() {
    let config = CollisionConfig::from_toml_str("epsilon = 1.5\nradius_policy = \"strict\"").unwrap();
    assert_eq!(config.radius_policy, RadiusPolicy::Strict);

    let collider = Collider::new(config).unwrap();
    let a = sphere(5.0, 0.0, 0.0);
    let c = sphere(2.0, 8.0, 0.0);
    assert!(collider.is_spheres_collide(&a, &c).unwrap());
    assert!(collider.is_spheres_collide(&a, &sphere(-2.0, 8.0, 0.0)).is_err());
}

#[test]
fn values_serialize_as_plain_records() {
    let r = Rect::from_xywh(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_value(r).unwrap();
    assert_eq!(json["position"]["x"], 1.0);
    assert_eq!(json["size"]["height"], 4.0);

    let back: Rect = serde_json::from_value(json).unwrap();
    assert_eq!(back, r);

    let s: Sphere = serde_json::from_str(r#"{"center":{"x":1,"y":2,"z":0},"radius":3}"#).unwrap();
    assert_eq!(s, sphere(3.0, 1.0, 2.0));
}
