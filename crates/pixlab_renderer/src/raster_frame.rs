//! One frame of the raster labs.

use glam::Vec3;
use log::trace;
use pixlab_core::{PixelBuffer, Scene};
use serde::{Deserialize, Serialize};

use crate::raster::{
    draw_circle, draw_icosphere, draw_line_implicit, draw_line_parametric, draw_point,
    draw_triangle_bounding_box, draw_triangle_outline, draw_triangle_parametric,
};
use crate::FrameTime;

/// How scene lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineMode {
    #[default]
    Implicit,
    Parametric,
}

/// How scene triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriangleMode {
    Outline,
    Parametric,
    #[default]
    BoundingBox,
}

/// Raster lab configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    pub line_mode: LineMode,
    pub triangle_mode: TriangleMode,
    /// Tint icosphere faces with the per-vertex palette
    pub use_icosphere_colors: bool,
    pub clear_color: Vec3,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            line_mode: LineMode::default(),
            triangle_mode: TriangleMode::default(),
            use_icosphere_colors: true,
            clear_color: Vec3::ZERO,
        }
    }
}

/// Clear the buffer and draw every enabled raster primitive of `scene`.
///
/// The clear writes 1.0 into the fourth channel so depth tests start from
/// the far plane. Icospheres are advanced by `time.delta_time` before they
/// are drawn, wrapping falling ones to the buffer height.
pub fn render_raster_frame(
    scene: &mut Scene,
    buffer: &mut PixelBuffer,
    settings: &RasterSettings,
    time: FrameTime,
) {
    let clear = settings.clear_color;
    buffer.clear(&[clear.x, clear.y, clear.z, 1.0]);

    for point in scene.points.values() {
        draw_point(point, buffer);
    }

    for line in scene.lines.values().filter(|line| line.enabled) {
        match settings.line_mode {
            LineMode::Implicit => draw_line_implicit(line, buffer),
            LineMode::Parametric => draw_line_parametric(line, buffer),
        }
    }

    for circle in scene.circles.values().filter(|circle| circle.enabled) {
        draw_circle(circle, buffer);
    }

    for triangle in scene.triangles.values().filter(|tri| tri.enabled) {
        match settings.triangle_mode {
            TriangleMode::Outline => draw_triangle_outline(triangle, buffer),
            TriangleMode::Parametric => draw_triangle_parametric(triangle, buffer),
            TriangleMode::BoundingBox => draw_triangle_bounding_box(triangle, buffer),
        }
    }

    for triangle in scene.transform_triangles.values() {
        if triangle.triangle.enabled {
            draw_triangle_bounding_box(&triangle.transformed(), buffer);
        }
    }

    scene.advance_icospheres(time.delta_time, buffer.height() as f32);
    for icosphere in scene.icospheres.values().filter(|ico| ico.enabled) {
        draw_icosphere(&icosphere.icosphere(), settings.use_icosphere_colors, buffer);
    }

    trace!("Rasterized {} primitive(s)", scene.raster_len());
}
