//! Scanline-free rasterization of the lab primitives.
//!
//! Every routine writes straight into a [`PixelBuffer`], skipping pixels
//! that fall outside it. Filled triangles test against the depth channel,
//! which the caller must have cleared to a far value.

use glam::{Vec2, Vec3};
use pixlab_core::{Circle, Icosphere, Line, PixelBuffer, Triangle, Vertex};
use pixlab_math::Interval;

/// Write a single point at its floored pixel.
pub fn draw_point(point: &Vertex, buffer: &mut PixelBuffer) {
    let x = point.position.x.floor() as i64;
    let y = point.position.y.floor() as i64;
    buffer.write_rgb(x, y, point.color);
}

/// Number of whole steps of size `1 / steps` in [0, 1], or `None` for a non-finite count.
fn step_count(steps: f32) -> Option<u64> {
    steps.is_finite().then(|| steps.floor() as u64)
}

/// Step along the segment in increments of `1 / max(1, length - 1)`.
///
/// Short steep segments are under-sampled and may leave gaps. Each `t` is
/// derived from the step index, so long segments still terminate.
pub fn draw_line_parametric(line: &Line, buffer: &mut PixelBuffer) {
    let start = line.p0.position.truncate();
    let ray = line.segment();
    let steps = (ray.length() - 1.0).max(1.0);
    let Some(count) = step_count(steps) else {
        return;
    };

    for i in 0..=count {
        let t = i as f32 / steps;
        let p = start + t * ray;
        let color = line.color * line.p0.color.lerp(line.p1.color, t);
        buffer.write_rgb(p.x.floor() as i64, p.y.floor() as i64, color);
    }
}

/// Distance-field line with a quadratic falloff towards its edge.
///
/// Every pixel center within `thickness / 2` of the segment is overwritten.
pub fn draw_line_implicit(line: &Line, buffer: &mut PixelBuffer) {
    let half_thickness = line.thickness * 0.5;
    if half_thickness <= 0.0 {
        return;
    }

    for y in 0..buffer.height() as i64 {
        for x in 0..buffer.width() as i64 {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let (dist, t) = line.dist(center);
            if dist > half_thickness {
                continue;
            }

            let ratio = dist / half_thickness;
            let falloff = Interval::UNIT.clamp(1.0 - ratio * ratio);
            let gradient = line.p0.color.lerp(line.p1.color, Interval::UNIT.clamp(t));
            buffer.write_rgb(x, y, line.color * falloff * gradient);
        }
    }
}

/// Flat-filled disc of the center's color.
pub fn draw_circle(circle: &Circle, buffer: &mut PixelBuffer) {
    if circle.radius < 0.0 {
        return;
    }

    // Pixels beyond the radius' bounding square can never pass the test.
    let center = circle.center.position.truncate();
    let min_x = (center.x - circle.radius).floor().max(0.0) as i64;
    let min_y = (center.y - circle.radius).floor().max(0.0) as i64;
    let max_x = ((center.x + circle.radius).ceil() as i64).min(buffer.width() as i64 - 1);
    let max_y = ((center.y + circle.radius).ceil() as i64).min(buffer.height() as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if circle.dist(Vec2::new(x as f32, y as f32)) <= circle.radius {
                buffer.write_rgb(x, y, circle.center.color);
            }
        }
    }
}

/// The three edges as parametric lines in the triangle's flat color.
pub fn draw_triangle_outline(triangle: &Triangle, buffer: &mut PixelBuffer) {
    for i in 0..3 {
        let edge = Line::new(triangle.vertices[i], triangle.vertices[(i + 1) % 3])
            .with_color(triangle.color);
        draw_line_parametric(&edge, buffer);
    }
}

/// Fill by stepping the two barycentric parameters along the edges from vertex 0.
pub fn draw_triangle_parametric(triangle: &Triangle, buffer: &mut PixelBuffer) {
    let origin = triangle.vertices[0].position;
    let steps1 = (1.25 * (triangle.vertices[1].position - origin).length()).max(1.0);
    let steps2 = (1.25 * (triangle.vertices[2].position - origin).length()).max(1.0);
    let (Some(count1), Some(count2)) = (step_count(steps1), step_count(steps2)) else {
        return;
    };

    for i in 0..=count1 {
        let t1 = i as f32 / steps1;
        for j in 0..=count2 {
            let t2 = j as f32 / steps2;
            if t1 + t2 >= 1.0 {
                break;
            }
            let bary = Vec3::new(1.0 - t1 - t2, t1, t2);
            plot_interpolated(triangle, bary, buffer);
        }
    }
}

/// Fill by testing every pixel of the clamped bounding box.
///
/// Degenerate triangles draw nothing.
pub fn draw_triangle_bounding_box(triangle: &Triangle, buffer: &mut PixelBuffer) {
    if buffer.width() == 0 || buffer.height() == 0 {
        return;
    }

    let limit = Vec2::new(buffer.width() as f32 - 1.0, buffer.height() as f32 - 1.0);
    let (min, max) = triangle.vertices.iter().fold(
        (Vec2::new(buffer.width() as f32, buffer.height() as f32), Vec2::ZERO),
        |(min, max), vertex| {
            let p = vertex.position.truncate();
            (min.min(p), max.max(p))
        },
    );
    let min = min.clamp(Vec2::ZERO, limit);
    let max = max.clamp(Vec2::ZERO, limit);

    for y in min.y as i64..=max.y as i64 {
        for x in min.x as i64..=max.x as i64 {
            let Some(bary) = triangle.barycentric(Vec2::new(x as f32, y as f32)) else {
                return;
            };

            if Triangle::contains_barycentric(bary) {
                let vertex = triangle.interpolate(bary);
                buffer.write_with_depth(x, y, triangle.color * vertex.color, vertex.position.z);
            }
        }
    }
}

/// Every face in index order, relying on the depth test for occlusion.
pub fn draw_icosphere(icosphere: &Icosphere, use_colors: bool, buffer: &mut PixelBuffer) {
    for face in icosphere.faces(use_colors) {
        draw_triangle_bounding_box(&face, buffer);
    }
}

fn plot_interpolated(triangle: &Triangle, bary: Vec3, buffer: &mut PixelBuffer) {
    let vertex = triangle.interpolate(bary);
    let x = vertex.position.x.floor() as i64;
    let y = vertex.position.y.floor() as i64;
    buffer.write_with_depth(x, y, triangle.color * vertex.color, vertex.position.z);
}
