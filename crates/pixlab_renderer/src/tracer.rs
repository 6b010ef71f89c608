//! Full-frame ray tracing into a [`PixelBuffer`].
//!
//! Rows are independent slices of the buffer, so the parallel path hands
//! each row to rayon and the join at the end of `for_each` is the frame
//! barrier.

use log::debug;
use pixlab_core::{PixelBuffer, Scene};
use pixlab_math::Camera;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hit::trace_scene;
use crate::shading::{shade, ColorMode};
use crate::FrameTime;

/// Ray tracer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub color_mode: ColorMode,
    /// Trace rows on the rayon pool instead of the calling thread
    pub parallel: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Default,
            parallel: true,
        }
    }
}

/// Camera plus configuration; the scene is passed in per frame.
#[derive(Debug, Clone, Default)]
pub struct RayTracer {
    pub camera: Camera,
    pub config: TraceConfig,
}

impl RayTracer {
    pub fn new(camera: Camera, config: TraceConfig) -> Self {
        Self { camera, config }
    }

    /// Per-frame updates that must happen before any ray is cast.
    ///
    /// Rebuilds the camera matrices for the buffer size, orbits the light
    /// and refreshes stale plane rotations.
    pub fn prepare(&mut self, scene: &mut Scene, width: u32, height: u32, time: FrameTime) {
        self.camera.update(width as f32, height as f32);
        scene.light.orbit(time.time_since_start);
        scene.refresh_plane_rotations();
    }

    /// Trace every pixel of `buffer` against a prepared scene.
    ///
    /// Writes up to four channels per pixel (RGB and an opaque alpha).
    pub fn trace(&self, scene: &Scene, buffer: &mut PixelBuffer) {
        let width = buffer.width();
        let height = buffer.height();
        let row_len = buffer.row_len();
        let stride = buffer.stride();
        if row_len == 0 || height == 0 {
            return;
        }

        let trace_row = |(y, row): (usize, &mut [f32])| {
            for (x, pixel) in row.chunks_exact_mut(stride).enumerate() {
                let ray = self.camera.pixel_ray(x as u32, y as u32, width, height);
                let rec = trace_scene(&ray, scene);
                let material = rec
                    .object
                    .and_then(|handle| scene.ray_object(handle))
                    .map(|object| &object.material);

                let color = shade(&ray, &rec, material, &scene.light, self.config.color_mode);
                let channels = color.to_array();
                let count = stride.min(channels.len());
                pixel[..count].copy_from_slice(&channels[..count]);
            }
        };

        if self.config.parallel {
            buffer
                .as_mut_slice()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(trace_row);
        } else {
            buffer
                .as_mut_slice()
                .chunks_mut(row_len)
                .enumerate()
                .for_each(trace_row);
        }

        debug!(
            "Traced {}x{} pixels against {} object(s)",
            width,
            height,
            scene.ray_objects.len()
        );
    }

    /// [`Self::prepare`] then [`Self::trace`].
    pub fn render_frame(&mut self, scene: &mut Scene, buffer: &mut PixelBuffer, time: FrameTime) {
        self.prepare(scene, buffer.width(), buffer.height(), time);
        self.trace(scene, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pixlab_core::presets;

    fn room() -> (RayTracer, Scene) {
        let mut scene = Scene::new();
        presets::ray_tracer_room(&mut scene);
        let camera = Camera::new(Vec3::new(0.0, 0.0, 1.9), Vec3::new(0.0, -0.5, 0.0));
        (RayTracer::new(camera, TraceConfig::default()), scene)
    }

    #[test]
    fn test_parallel_and_sequential_match() {
        let (mut parallel, mut scene) = room();
        let mut sequential = parallel.clone();
        sequential.config.parallel = false;

        let mut a = PixelBuffer::rgba(48, 32).unwrap();
        let mut b = PixelBuffer::rgba(48, 32).unwrap();
        parallel.render_frame(&mut scene, &mut a, FrameTime::default());
        sequential.render_frame(&mut scene, &mut b, FrameTime::default());

        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_repeat_frames_are_identical() {
        let (mut tracer, mut scene) = room();
        let mut a = PixelBuffer::rgba(32, 32).unwrap();
        let mut b = PixelBuffer::rgba(32, 32).unwrap();

        tracer.render_frame(&mut scene, &mut a, FrameTime::default());
        tracer.render_frame(&mut scene, &mut b, FrameTime::default());
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_closed_room_has_no_misses() {
        let (mut tracer, mut scene) = room();
        tracer.config.color_mode = ColorMode::Normal;
        let mut buffer = PixelBuffer::rgba(16, 16).unwrap();
        tracer.render_frame(&mut scene, &mut buffer, FrameTime::default());

        // Normal-mode colors never go negative; miss colors (ray directions) would.
        assert!(buffer
            .as_slice()
            .chunks_exact(4)
            .all(|p| p[..3].iter().all(|c| (-1e-4..=1.0 + 1e-4).contains(c)) && p[3] == 1.0));
    }

    #[test]
    fn test_empty_scene_writes_directions() {
        let mut scene = Scene::new();
        let mut tracer = RayTracer::default();
        let mut buffer = PixelBuffer::rgba(9, 9).unwrap();
        tracer.render_frame(&mut scene, &mut buffer, FrameTime::default());

        // Center pixel looks straight down -Z
        let center = buffer.read(4, 4).unwrap();
        assert!(center[0].abs() < 1e-4 && center[1].abs() < 1e-4);
        assert!((center[2] + 1.0).abs() < 1e-4);
        assert_eq!(center[3], 1.0);
    }

    #[test]
    fn test_rgb_buffer_gets_three_channels() {
        let (mut tracer, mut scene) = room();
        let mut buffer = PixelBuffer::new(8, 8, 3).unwrap();
        tracer.render_frame(&mut scene, &mut buffer, FrameTime::default());
        assert!(buffer.as_slice().iter().any(|c| *c > 0.0));
    }

    #[test]
    fn test_prepare_orbits_light_and_refreshes_planes() {
        let (mut tracer, mut scene) = room();
        scene.light.auto_orbit = true;
        let time = FrameTime::new(0.016, std::f32::consts::FRAC_PI_2);
        tracer.prepare(&mut scene, 8, 8, time);

        assert!(scene.ray_objects.values().all(|obj| !obj.is_changed()));
        // Quarter turn of -Z around +Y lands on -X
        assert!((scene.light.direction - Vec3::NEG_X).length() < 1e-4);
    }
}
