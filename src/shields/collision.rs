//! Collision Geometry
//!
//! Circle and sphere tests used by bubble shields. Circle tests run on the
//! ground plane and ignore height for containment; entry points keep the
//! height interpolated along the segment.

use crate::core::vec3::Vec3;

/// Check if a point lies inside or on a ground-plane circle.
#[inline]
pub fn point_in_circle(point: Vec3, center: Vec3, radius: f32) -> bool {
    point.ground_distance_squared(center) <= radius * radius
}

/// Check if a point lies inside or on a sphere.
#[inline]
pub fn point_in_sphere(point: Vec3, center: Vec3, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Find where a segment enters a ground-plane circle.
///
/// Returns the first boundary crossing between `start` and `end`, or `None`
/// if the segment misses the circle or starts inside it.
pub fn segment_circle_entry(start: Vec3, end: Vec3, center: Vec3, radius: f32) -> Option<Vec3> {
    if point_in_circle(start, center, radius) {
        return None;
    }
    let direction = end.sub(start).flatten();
    let offset = start.sub(center).flatten();
    entry_parameter(direction, offset, radius).map(|t| start.lerp(end, t))
}

/// Find where a segment enters a sphere. Same rules as the circle test.
pub fn segment_sphere_entry(start: Vec3, end: Vec3, center: Vec3, radius: f32) -> Option<Vec3> {
    if point_in_sphere(start, center, radius) {
        return None;
    }
    entry_parameter(end.sub(start), start.sub(center), radius).map(|t| start.lerp(end, t))
}

/// Smallest `t` in `[0, 1]` where `offset + direction * t` reaches `radius`.
fn entry_parameter(direction: Vec3, offset: Vec3, radius: f32) -> Option<f32> {
    let a = direction.length_squared();
    if a == 0.0 {
        // Zero-length segment outside the boundary
        return None;
    }
    let b = 2.0 * offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec3 = Vec3::ground(0.0, 0.0);
    const RADIUS: f32 = 5.0;

    #[test]
    fn test_point_on_boundary() {
        assert!(point_in_circle(Vec3::ground(5.0, 0.0), CENTER, RADIUS));
        assert!(point_in_circle(Vec3::ground(3.0, 4.0), CENTER, RADIUS));
    }

    #[test]
    fn test_point_inside_and_outside() {
        assert!(point_in_circle(Vec3::ground(4.99, 0.0), CENTER, RADIUS));
        assert!(!point_in_circle(Vec3::ground(5.01, 0.0), CENTER, RADIUS));
    }

    #[test]
    fn test_point_height_ignored() {
        assert!(point_in_circle(Vec3::new(1.0, 100.0, 1.0), CENTER, RADIUS));
    }

    #[test]
    fn test_segment_entry_point() {
        let entry = segment_circle_entry(
            Vec3::ground(-10.0, 0.0),
            Vec3::ground(10.0, 0.0),
            CENTER,
            RADIUS,
        ).unwrap();
        assert_eq!(entry, Vec3::ground(-5.0, 0.0));
    }

    #[test]
    fn test_segment_entry_keeps_height() {
        let entry = segment_circle_entry(
            Vec3::new(-10.0, 2.0, 0.0),
            Vec3::new(10.0, 2.0, 0.0),
            CENTER,
            RADIUS,
        ).unwrap();
        assert_eq!(entry.y, 2.0);
    }

    #[test]
    fn test_segment_miss() {
        // Passes beside the circle
        assert!(segment_circle_entry(
            Vec3::ground(-10.0, 6.0),
            Vec3::ground(10.0, 6.0),
            CENTER,
            RADIUS,
        ).is_none());

        // Stops short of the circle
        assert!(segment_circle_entry(
            Vec3::ground(-10.0, 0.0),
            Vec3::ground(-6.0, 0.0),
            CENTER,
            RADIUS,
        ).is_none());

        // Points away from the circle
        assert!(segment_circle_entry(
            Vec3::ground(-10.0, 0.0),
            Vec3::ground(-20.0, 0.0),
            CENTER,
            RADIUS,
        ).is_none());
    }

    #[test]
    fn test_segment_from_inside_passes() {
        assert!(segment_circle_entry(
            Vec3::ground(0.0, 0.0),
            Vec3::ground(20.0, 0.0),
            CENTER,
            RADIUS,
        ).is_none());
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec3::ground(-8.0, 0.0);
        assert!(segment_circle_entry(p, p, CENTER, RADIUS).is_none());
    }

    #[test]
    fn test_point_in_sphere_uses_height() {
        let center = Vec3::new(0.0, 2.0, 0.0);
        assert!(point_in_sphere(Vec3::new(0.0, 6.0, 0.0), center, RADIUS));
        assert!(point_in_sphere(Vec3::new(3.0, 6.0, 0.0), center, RADIUS));
        assert!(!point_in_sphere(Vec3::new(0.0, 8.0, 0.0), center, RADIUS));
        assert!(!point_in_sphere(Vec3::new(4.0, 6.0, 0.0), center, RADIUS));
    }

    #[test]
    fn test_segment_sphere_entry() {
        let entry = segment_sphere_entry(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -10.0, 0.0),
            CENTER,
            RADIUS,
        ).unwrap();
        assert_eq!(entry, Vec3::new(0.0, 5.0, 0.0));

        // Passes over the top: a circle would catch it, the sphere does not
        let over_start = Vec3::new(-10.0, 6.0, 0.0);
        let over_end = Vec3::new(10.0, 6.0, 0.0);
        assert!(segment_circle_entry(over_start, over_end, CENTER, RADIUS).is_some());
        assert!(segment_sphere_entry(over_start, over_end, CENTER, RADIUS).is_none());

        // Starting inside passes out
        assert!(segment_sphere_entry(CENTER, Vec3::ground(20.0, 0.0), CENTER, RADIUS).is_none());
    }
}
