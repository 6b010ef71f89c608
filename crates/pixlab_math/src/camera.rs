use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Camera for both the rasterizer and ray tracer labs.
///
/// The view and projection matrices are derived state: call
/// [`Camera::update`] once per frame before generating rays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub orthographic: bool,

    // Cached matrices (set by update())
    #[serde(skip)]
    view: Mat4,
    #[serde(skip)]
    projection: Mat4,
    #[serde(skip)]
    inverse_view: Mat4,
    #[serde(skip)]
    inverse_projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0,
            near: 0.01,
            far: 1000.0,
            orthographic: false,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    /// Create a perspective camera looking from `position` at `look_at`.
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            ..Default::default()
        }
    }

    /// Recompute the view and projection matrices for a target resolution.
    ///
    /// In orthographic mode the half-extents match the perspective frustum
    /// at the look-at distance, so toggling modes keeps the focal plane framed
    /// the same way. A camera sitting on its own look-at point keeps its
    /// previous matrices.
    pub fn update(&mut self, width: f32, height: f32) {
        let to_target = self.look_at - self.position;
        if to_target.length_squared() <= f32::EPSILON {
            log::warn!(
                "Camera position {:?} coincides with look-at; keeping previous matrices",
                self.position
            );
            return;
        }

        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let fov_y = self.fov_y.to_radians();

        self.view = Mat4::look_at_rh(self.position, self.look_at, self.up);
        self.projection = if self.orthographic {
            let distance = to_target.length();
            let half_height = (fov_y * 0.5).tan() * distance;
            let half_width = half_height * aspect;
            Mat4::orthographic_rh_gl(
                -half_width,
                half_width,
                -half_height,
                half_height,
                self.near,
                self.far,
            )
        } else {
            Mat4::perspective_rh_gl(fov_y, aspect, self.near, self.far)
        };

        self.inverse_view = self.view.inverse();
        self.inverse_projection = self.projection.inverse();
    }

    /// Get the view matrix (world → camera space)
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn inverse_view(&self) -> Mat4 {
        self.inverse_view
    }

    pub fn inverse_projection(&self) -> Mat4 {
        self.inverse_projection
    }

    /// Build the camera ray through a normalized screen coordinate in `[0, 1]²`.
    ///
    /// The coordinate is mapped to NDC, unprojected at z = 0 through the
    /// inverse projection and inverse view, and the ray leaves the camera
    /// position towards that world point.
    ///
    /// Orthographic cameras do not start at the camera position. They emit
    /// rays parallel to the view axis, each starting where the unprojected
    /// point meets the plane through the camera perpendicular to that axis.
    pub fn ray_through(&self, screen: Vec2) -> Ray {
        let ndc = screen * 2.0 - Vec2::ONE;
        let view_point = self
            .inverse_projection
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let world_point = self.inverse_view.transform_point3(view_point);

        if self.orthographic {
            // Parallel rays along the view axis, starting on the unprojected point
            let forward = (self.look_at - self.position).normalize_or_zero();
            let origin = world_point - forward * forward.dot(world_point - self.position);
            return Ray::new(origin, forward);
        }

        Ray::new(
            self.position,
            (world_point - self.position).normalize_or_zero(),
        )
    }

    /// Camera ray for the pixel at (x, y) of a `width` × `height` buffer.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        self.ray_through(screen_coordinate(x, y, width, height))
    }
}

/// Normalized screen coordinate of a pixel: `(x / (width - 1), y / (height - 1))`.
///
/// Row 0 maps to the bottom of NDC space.
pub fn screen_coordinate(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    let span_x = (width as f32 - 1.0).max(1.0);
    let span_y = (height as f32 - 1.0).max(1.0);
    Vec2::new(x as f32 / span_x, y as f32 / span_y)
}

/// Orbit-style camera control driven by raw input deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arcball {
    /// Rotation about the X axis, radians in [0, 2π)
    pub h_rot: f32,
    /// Rotation about the Y axis, radians in [0, 2π)
    pub v_rot: f32,
    pub distance: f32,
    pub rot_speed: f32,
    pub pan_speed: f32,
    pub dist_range: Vec2,
}

impl Default for Arcball {
    fn default() -> Self {
        Self {
            h_rot: 0.0,
            v_rot: 0.0,
            distance: 5.0,
            rot_speed: 0.01,
            pan_speed: 0.1,
            dist_range: Vec2::new(0.01, 1000.0),
        }
    }
}

impl Arcball {
    fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.v_rot) * Mat4::from_rotation_x(self.h_rot)
    }

    /// Rotate by a mouse drag of (dx, dy) pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.h_rot = (self.h_rot - dy * self.rot_speed).rem_euclid(TAU);
        self.v_rot = (self.v_rot - dx * self.rot_speed).rem_euclid(TAU);
    }

    /// Move towards or away from the look-at point.
    pub fn zoom(&mut self, dy: f32) {
        self.distance = (self.distance - dy).clamp(self.dist_range.x, self.dist_range.y);
    }

    /// Slide both the camera and its look-at point in the view plane.
    pub fn pan(&self, dx: f32, dy: f32, camera: &mut Camera) {
        let offset = self.rotation().transform_vector3(Vec3::new(-dx, dy, 0.0));
        if offset.length_squared() == 0.0 {
            return;
        }

        let amount = offset.normalize() * self.pan_speed;
        camera.position += amount;
        camera.look_at += amount;
    }

    /// Place the camera on the orbit around its look-at point.
    pub fn place(&self, camera: &mut Camera) {
        let offset = self.rotation().transform_vector3(Vec3::new(0.0, 0.0, self.distance));
        camera.position = camera.look_at + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.look_at, Vec3::ZERO);
        assert_eq!(camera.fov_y, 60.0);
        assert!(!camera.orthographic);
    }

    #[test]
    fn test_view_matrix() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        camera.update(100.0, 100.0);

        // The camera position lands on the view-space origin
        let origin = camera.view().transform_point3(camera.position);
        assert_vec_close(origin, Vec3::ZERO);
        assert!(camera.view().w_axis.z < 0.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        camera.update(64.0, 48.0);

        let ray = camera.ray_through(Vec2::splat(0.5));
        assert_eq!(ray.origin, camera.position);
        assert_vec_close(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_corner_rays_spread_with_fov() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        camera.update(100.0, 100.0);

        let top = camera.ray_through(Vec2::new(0.5, 1.0));
        let bottom = camera.ray_through(Vec2::new(0.5, 0.0));
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);

        // Vertical half-angle matches fov_y / 2
        let half_angle = top.direction.dot(Vec3::NEG_Z).acos();
        assert!((half_angle - 30.0_f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_framing_matches_perspective_at_focus() {
        let mut perspective = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        perspective.update(100.0, 50.0);

        let mut ortho = perspective;
        ortho.orthographic = true;
        ortho.update(100.0, 50.0);

        // A point on the focal plane at the top of the frustum projects to the
        // same NDC height in both modes.
        let half_height = 30.0_f32.to_radians().tan() * 5.0;
        let point = Vec3::new(0.0, half_height, 0.0);
        let vp_persp = perspective.projection() * perspective.view();
        let vp_ortho = ortho.projection() * ortho.view();
        let ndc_persp = vp_persp.project_point3(point);
        let ndc_ortho = vp_ortho.project_point3(point);
        assert!((ndc_persp.y - 1.0).abs() < 1e-3);
        assert!((ndc_ortho.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        camera.orthographic = true;
        camera.update(64.0, 64.0);

        let a = camera.ray_through(Vec2::new(0.0, 0.0));
        let b = camera.ray_through(Vec2::new(1.0, 1.0));
        assert!((a.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!((b.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(a.origin.x < 0.0 && b.origin.x > 0.0);
        assert!((a.origin.z - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_camera_keeps_matrices() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        camera.update(10.0, 10.0);
        let view = camera.view();

        camera.look_at = camera.position;
        camera.update(10.0, 10.0);
        assert_eq!(camera.view(), view);
    }

    #[test]
    fn test_screen_coordinate_corners() {
        assert_eq!(screen_coordinate(0, 0, 11, 21), Vec2::ZERO);
        assert_eq!(screen_coordinate(10, 20, 11, 21), Vec2::ONE);
        // Single-pixel buffers do not divide by zero
        assert_eq!(screen_coordinate(0, 0, 1, 1), Vec2::ZERO);
    }

    #[test]
    fn test_arcball_place() {
        let mut camera = Camera::default();
        let mut arcball = Arcball::default();
        arcball.place(&mut camera);
        assert_vec_close(camera.position, Vec3::new(0.0, 0.0, 5.0));

        arcball.v_rot = std::f32::consts::FRAC_PI_2;
        arcball.place(&mut camera);
        assert_vec_close(camera.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_arcball_rotation_wraps() {
        let mut arcball = Arcball::default();
        arcball.rotate(10.0, 0.0);
        assert!(arcball.v_rot >= 0.0 && arcball.v_rot < TAU);
        assert!((arcball.v_rot - (TAU - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_arcball_zoom_clamps() {
        let mut arcball = Arcball::default();
        arcball.zoom(100.0);
        assert_eq!(arcball.distance, 0.01);
        arcball.zoom(-5000.0);
        assert_eq!(arcball.distance, 1000.0);
    }

    #[test]
    fn test_arcball_pan_moves_both_points() {
        let mut camera = Camera::default();
        let arcball = Arcball::default();
        arcball.pan(-3.0, 0.0, &mut camera);

        assert_vec_close(camera.position, Vec3::new(0.1, 0.0, 5.0));
        assert_vec_close(camera.look_at, Vec3::new(0.1, 0.0, 0.0));
    }
}
