//! Scene container shared by the rasterizer and the ray tracer.
//!
//! Every kind of primitive lives in its own [`Arena`], so handles stay valid
//! across unrelated insertions and removals and iteration follows
//! insertion order of the surviving slots.

use glam::{Vec2, Vec3};
use log::debug;

use crate::arena::{Arena, Handle};
use crate::light::Light;
use crate::primitives::{Circle, Line, TransformIcosphere, TransformTriangle, Triangle, Vertex};
use crate::ray_object::{RayShape, RaySceneObject};

/// Default extent of planes added through [`Scene::add_plane`].
const DEFAULT_PLANE_SCALE: Vec2 = Vec2::new(10.0, 10.0);

/// Drawable primitives, ray-traced objects and the light.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub points: Arena<Vertex>,
    pub lines: Arena<Line>,
    pub circles: Arena<Circle>,
    pub triangles: Arena<Triangle>,
    pub transform_triangles: Arena<TransformTriangle>,
    pub icospheres: Arena<TransformIcosphere>,
    pub ray_objects: Arena<RaySceneObject>,
    pub light: Light,
    /// Counter behind the default "Object {n}" names
    next_object_id: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, point: Vertex) -> Handle<Vertex> {
        self.points.insert(point)
    }

    pub fn add_line(&mut self, line: Line) -> Handle<Line> {
        self.lines.insert(line)
    }

    pub fn add_circle(&mut self, circle: Circle) -> Handle<Circle> {
        self.circles.insert(circle)
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> Handle<Triangle> {
        self.triangles.insert(triangle)
    }

    pub fn add_transform_triangle(
        &mut self,
        triangle: TransformTriangle,
    ) -> Handle<TransformTriangle> {
        self.transform_triangles.insert(triangle)
    }

    pub fn add_icosphere(&mut self, icosphere: TransformIcosphere) -> Handle<TransformIcosphere> {
        self.icospheres.insert(icosphere)
    }

    /// Add a ray-traced object, naming it "Object {n}" if it has no name yet.
    pub fn add_ray_object(&mut self, mut object: RaySceneObject) -> Handle<RaySceneObject> {
        if object.name.is_empty() {
            object.name = format!("Object {}", self.next_object_id);
        }
        self.next_object_id += 1;
        self.ray_objects.insert(object)
    }

    /// Add a plane at `position` facing `normal`.
    pub fn add_plane(&mut self, position: Vec3, normal: Vec3) -> Handle<RaySceneObject> {
        self.add_ray_object(RaySceneObject::plane(position, normal, DEFAULT_PLANE_SCALE))
    }

    /// Add a sphere at `position` with `radius`.
    pub fn add_sphere(&mut self, position: Vec3, radius: f32) -> Handle<RaySceneObject> {
        self.add_ray_object(RaySceneObject::sphere(position, radius))
    }

    pub fn remove_ray_object(&mut self, handle: Handle<RaySceneObject>) -> Option<RaySceneObject> {
        self.ray_objects.remove(handle)
    }

    pub fn ray_object(&self, handle: Handle<RaySceneObject>) -> Option<&RaySceneObject> {
        self.ray_objects.get(handle)
    }

    pub fn ray_object_mut(
        &mut self,
        handle: Handle<RaySceneObject>,
    ) -> Option<&mut RaySceneObject> {
        self.ray_objects.get_mut(handle)
    }

    /// Rebuild the cached rotation of every stale plane.
    ///
    /// Returns the number of planes rebuilt.
    pub fn refresh_plane_rotations(&mut self) -> usize {
        let rebuilt = self
            .ray_objects
            .values_mut()
            .filter(|object| matches!(object.shape, RayShape::Plane))
            .map(|object| object.refresh_rotation())
            .filter(|&rebuilt| rebuilt)
            .count();

        if rebuilt > 0 {
            debug!("Rebuilt {} plane rotation(s)", rebuilt);
        }
        rebuilt
    }

    /// Advance animated icospheres by one frame.
    pub fn advance_icospheres(&mut self, delta_time: f32, wrap_height: f32) {
        for icosphere in self.icospheres.values_mut().filter(|ico| ico.enabled) {
            icosphere.advance(delta_time, wrap_height);
        }
    }

    /// Remove every raster primitive, keeping ray objects and the light.
    pub fn clear_raster(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.circles.clear();
        self.triangles.clear();
        self.transform_triangles.clear();
        self.icospheres.clear();
    }

    /// Total number of raster primitives.
    pub fn raster_len(&self) -> usize {
        self.points.len()
            + self.lines.len()
            + self.circles.len()
            + self.triangles.len()
            + self.transform_triangles.len()
            + self.icospheres.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_objects_get_sequential_names() {
        let mut scene = Scene::new();
        let a = scene.add_plane(Vec3::ZERO, Vec3::Y);
        let b = scene.add_sphere(Vec3::ZERO, 1.0);
        let c = scene.add_ray_object(RaySceneObject::sphere(Vec3::ONE, 2.0).with_name("Ball"));

        assert_eq!(scene.ray_object(a).unwrap().name, "Object 0");
        assert_eq!(scene.ray_object(b).unwrap().name, "Object 1");
        assert_eq!(scene.ray_object(c).unwrap().name, "Ball");
    }

    #[test]
    fn test_removed_object_handle_goes_stale() {
        let mut scene = Scene::new();
        let plane = scene.add_plane(Vec3::ZERO, Vec3::Y);
        assert!(scene.remove_ray_object(plane).is_some());
        assert!(scene.ray_object(plane).is_none());

        let sphere = scene.add_sphere(Vec3::ZERO, 1.0);
        assert_eq!(sphere.index(), plane.index());
        assert!(scene.ray_object(plane).is_none());
        assert!(scene.ray_object(sphere).is_some());
    }

    #[test]
    fn test_refresh_plane_rotations_counts_stale_planes() {
        let mut scene = Scene::new();
        let floor = scene.add_plane(Vec3::ZERO, Vec3::Y);
        scene.add_plane(Vec3::ZERO, Vec3::X);
        scene.add_sphere(Vec3::ZERO, 1.0);

        assert_eq!(scene.refresh_plane_rotations(), 2);
        assert_eq!(scene.refresh_plane_rotations(), 0);

        scene
            .ray_object_mut(floor)
            .unwrap()
            .set_rotation(Vec3::new(90.0, 0.0, 0.0));
        assert_eq!(scene.refresh_plane_rotations(), 1);
    }

    #[test]
    fn test_clear_raster_keeps_ray_objects() {
        let mut scene = Scene::new();
        scene.add_point(Vertex::default());
        scene.add_line(Line::default());
        scene.add_sphere(Vec3::ZERO, 1.0);
        assert_eq!(scene.raster_len(), 2);

        scene.clear_raster();
        assert_eq!(scene.raster_len(), 0);
        assert_eq!(scene.ray_objects.len(), 1);
    }
}
