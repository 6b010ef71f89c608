//! CPU renderers for the pixlab labs.
//!
//! Two independent paths write into a [`pixlab_core::PixelBuffer`]:
//! - `raster`: points, lines, circles, triangles and icospheres in screen space
//! - `tracer`: camera rays against planes and spheres with Blinn-Phong shading

pub mod hit;
pub mod raster;
pub mod raster_frame;
pub mod shading;
pub mod tracer;

pub use hit::{intersect_object, intersect_plane, intersect_sphere, trace_scene, HitRecord};
pub use raster_frame::{render_raster_frame, LineMode, RasterSettings, TriangleMode};
pub use shading::{blinn_phong, shade, ColorMode};
pub use tracer::{RayTracer, TraceConfig};

/// Timing handed to a frame by the caller; renderers never read a clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Seconds since the first frame
    pub time_since_start: f32,
}

impl FrameTime {
    pub fn new(delta_time: f32, time_since_start: f32) -> Self {
        Self {
            delta_time,
            time_since_start,
        }
    }
}
