//! Ray intersection against the scene's planes and spheres.

use glam::Vec3;
use pixlab_core::{Handle, RayShape, RaySceneObject, Scene};
use pixlab_math::{Interval, Ray};

/// Below this |dot(direction, normal)| a ray counts as parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Nearest intersection found so far along one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub hit: bool,
    /// Ray parameter of the hit, +∞ until something is hit
    pub t: f32,
    pub position: Vec3,
    pub normal: Vec3,
    pub object: Option<Handle<RaySceneObject>>,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            hit: false,
            t: f32::INFINITY,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            object: None,
        }
    }
}

/// Ray parameter where `ray` meets the plane through `point` with `normal`.
///
/// Returns `None` when the ray is parallel to the plane or the hit lies
/// outside `ray_t`.
pub fn intersect_plane(ray: &Ray, point: Vec3, normal: Vec3, ray_t: Interval) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let d = -point.dot(normal);
    let t = -(d + ray.origin.dot(normal)) / denom;
    ray_t.surrounds(t).then_some(t)
}

/// Ray parameter of the nearest intersection with a sphere inside `ray_t`.
///
/// The near root is preferred; the far root is used when the near one is
/// out of range, which happens for rays starting inside the sphere.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32, ray_t: Interval) -> Option<f32> {
    if radius <= 0.0 {
        return None;
    }

    let a = ray.direction.length_squared();
    if a == 0.0 {
        return None;
    }

    let oc = ray.origin - center;
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    if ray_t.surrounds(near) {
        return Some(near);
    }

    let far = (-b + sqrtd) / (2.0 * a);
    ray_t.surrounds(far).then_some(far)
}

/// Intersect one object, returning `(t, normal)` for a hit inside `ray_t`.
///
/// Planes use their cached normal, so stale rotations must be refreshed first.
pub fn intersect_object(ray: &Ray, object: &RaySceneObject, ray_t: Interval) -> Option<(f32, Vec3)> {
    match object.shape {
        RayShape::Plane => {
            let normal = object.plane_normal();
            intersect_plane(ray, object.translation(), normal, ray_t).map(|t| (t, normal))
        }
        RayShape::Sphere { radius } => {
            let center = object.translation();
            intersect_sphere(ray, center, radius, ray_t)
                .map(|t| (t, (ray.at(t) - center).normalize_or_zero()))
        }
    }
}

/// Find the nearest hit in front of the ray over every enabled object.
pub fn trace_scene(ray: &Ray, scene: &Scene) -> HitRecord {
    let mut rec = HitRecord::default();

    for (handle, object) in scene.ray_objects.iter() {
        if !object.enabled {
            continue;
        }

        if let Some((t, normal)) = intersect_object(ray, object, Interval::closer_than(rec.t)) {
            rec = HitRecord {
                hit: true,
                t,
                position: ray.at(t),
                normal,
                object: Some(handle),
            };
        }
    }

    rec
}
