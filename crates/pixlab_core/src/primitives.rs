//! Screen-space primitives drawn by the rasterizer.
//!
//! Positions are in pixel units with z carrying depth. Only x and y take
//! part in coverage tests.

use glam::{Mat2, Mat4, Vec2, Vec3, Vec4};
use pixlab_math::Interval;
use serde::{Deserialize, Serialize};

/// Determinants at or below this magnitude make a triangle's edge matrix singular.
const SINGULAR_EPSILON: f32 = 1e-8;

/// Accepted range for the sum of barycentric components.
const BARYCENTRIC_SUM: Interval = Interval {
    min: 0.99,
    max: 1.01,
};

/// A point with a color. Also used on its own as a single plotted pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
        }
    }
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }

    /// A white vertex at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// A segment between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub p0: Vertex,
    pub p1: Vertex,
    pub color: Vec3,
    /// Full width of the implicit line in pixels
    pub thickness: f32,
    pub enabled: bool,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            p0: Vertex::default(),
            p1: Vertex::default(),
            color: Vec3::ONE,
            thickness: 1.0,
            enabled: true,
        }
    }
}

impl Line {
    pub fn new(p0: Vertex, p1: Vertex) -> Self {
        Self {
            p0,
            p1,
            ..Default::default()
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// 2D segment vector p1 - p0.
    pub fn segment(&self) -> Vec2 {
        (self.p1.position - self.p0.position).truncate()
    }

    /// Distance from `p` to the segment, plus the unclamped projection parameter `t`.
    ///
    /// Past either end the distance is to the nearer endpoint. A zero-length
    /// segment behaves as the point p0 with `t = 0`.
    pub fn dist(&self, p: Vec2) -> (f32, f32) {
        let start = self.p0.position.truncate();
        let end = self.p1.position.truncate();
        let r = end - start;

        let length_squared = r.length_squared();
        if length_squared == 0.0 {
            return (p.distance(start), 0.0);
        }

        let t = (p - start).dot(r) / length_squared;
        let distance = if t < 0.0 {
            p.distance(start)
        } else if t > 1.0 {
            p.distance(end)
        } else {
            p.distance(start + t * r)
        };

        (distance, t)
    }
}

/// A filled disc. `tolerance` is carried for editors but not used when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circle {
    pub center: Vertex,
    pub radius: f32,
    pub tolerance: f32,
    pub enabled: bool,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            center: Vertex::default(),
            radius: 0.0,
            tolerance: 1.0,
            enabled: true,
        }
    }
}

impl Circle {
    pub fn new(center: Vertex, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            ..Default::default()
        }
    }

    /// Distance from `p` to the center.
    pub fn dist(&self, p: Vec2) -> f32 {
        p.distance(self.center.position.truncate())
    }
}

/// Three vertices with a flat color multiplied into the interpolated vertex color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub color: Vec3,
    pub enabled: bool,
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            vertices: [Vertex::default(); 3],
            color: Vec3::ONE,
            enabled: true,
        }
    }
}

impl Triangle {
    /// A triangle with white vertices and a flat `color`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: Vec3) -> Self {
        Self {
            vertices: [Vertex::at(v0), Vertex::at(v1), Vertex::at(v2)],
            color,
            enabled: true,
        }
    }

    pub fn from_vertices(vertices: [Vertex; 3]) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }

    /// Barycentric coordinates of `p` in the xy plane.
    ///
    /// Solves `p - v0 = [v1 - v0, v2 - v0] * (b1, b2)` and returns
    /// `(1 - b1 - b2, b1, b2)`. Returns `None` when the vertices are
    /// collinear and the edge matrix cannot be inverted.
    pub fn barycentric(&self, p: Vec2) -> Option<Vec3> {
        let v0 = self.vertices[0].position.truncate();
        let edges = Mat2::from_cols(
            self.vertices[1].position.truncate() - v0,
            self.vertices[2].position.truncate() - v0,
        );

        if edges.determinant().abs() <= SINGULAR_EPSILON {
            return None;
        }

        let l = edges.inverse() * (p - v0);
        Some(Vec3::new(1.0 - l.x - l.y, l.x, l.y))
    }

    /// Whether barycentric coordinates fall inside the triangle.
    ///
    /// Every component must lie in [0, 1] and their sum in [0.99, 1.01].
    pub fn contains_barycentric(bary: Vec3) -> bool {
        let components = bary.to_array();
        components.iter().all(|&b| Interval::UNIT.contains(b))
            && BARYCENTRIC_SUM.contains(bary.x + bary.y + bary.z)
    }

    /// Blend position and color of the vertices with barycentric weights.
    pub fn interpolate(&self, bary: Vec3) -> Vertex {
        let weights = bary.to_array();
        self.vertices
            .iter()
            .zip(weights)
            .fold(Vertex::new(Vec3::ZERO, Vec3::ZERO), |acc, (vertex, w)| {
                Vertex::new(acc.position + w * vertex.position, acc.color + w * vertex.color)
            })
    }

    /// Copy of this triangle with every position transformed by `matrix`.
    pub fn transformed(&self, matrix: Mat4) -> Triangle {
        let mut result = *self;
        for vertex in &mut result.vertices {
            vertex.position = matrix.transform_point3(vertex.position);
        }
        result
    }
}

/// Unit icosahedron vertex positions.
pub const ICOSPHERE_POSITIONS: [Vec3; 12] = [
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.723600, -0.447215, 0.525720),
    Vec3::new(-0.276385, -0.447215, 0.850640),
    Vec3::new(-0.894425, -0.447215, 0.000000),
    Vec3::new(-0.276385, -0.447215, -0.850640),
    Vec3::new(0.723600, -0.447215, -0.525720),
    Vec3::new(0.276385, 0.447215, 0.850640),
    Vec3::new(-0.723600, 0.447215, 0.525720),
    Vec3::new(-0.723600, 0.447215, -0.525720),
    Vec3::new(0.276385, 0.447215, -0.850640),
    Vec3::new(0.894425, 0.447215, 0.000000),
    Vec3::new(0.0, 1.0, 0.0),
];

/// Per-vertex palette, 8-bit RGB.
const ICOSPHERE_PALETTE: [[u8; 3]; 12] = [
    [47, 79, 79],
    [139, 69, 19],
    [34, 139, 34],
    [0, 0, 139],
    [255, 0, 0],
    [255, 215, 0],
    [127, 255, 0],
    [0, 255, 255],
    [255, 0, 255],
    [100, 149, 237],
    [255, 105, 180],
    [255, 228, 196],
];

/// Face list, drawn in this order.
pub const ICOSPHERE_INDICES: [[usize; 3]; 20] = [
    [0, 1, 2],
    [1, 0, 5],
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 5],
    [1, 5, 10],
    [2, 1, 6],
    [3, 2, 7],
    [4, 3, 8],
    [5, 4, 9],
    [1, 10, 6],
    [2, 6, 7],
    [3, 7, 8],
    [4, 8, 9],
    [5, 9, 10],
    [6, 10, 11],
    [7, 6, 11],
    [8, 7, 11],
    [9, 8, 11],
    [10, 9, 11],
];

/// A 12-vertex, 20-face polyhedron approximating a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icosphere {
    pub positions: [Vec3; 12],
}

impl Default for Icosphere {
    fn default() -> Self {
        Self {
            positions: ICOSPHERE_POSITIONS,
        }
    }
}

impl Icosphere {
    /// Palette color of vertex `index` in [0, 1].
    pub fn palette_color(index: usize) -> Vec3 {
        let [r, g, b] = ICOSPHERE_PALETTE[index];
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }

    /// Transform every position by `matrix`.
    pub fn transform(&mut self, matrix: Mat4) {
        for position in &mut self.positions {
            *position = matrix.transform_point3(*position);
        }
    }

    /// Remap z into (0, 1] so that the nearest vertex sits just above 0.
    ///
    /// The z range always includes 0. A flat range leaves depths untouched.
    pub fn normalize_depth(&mut self) {
        let (z_min, z_max) = self
            .positions
            .iter()
            .fold((0.0_f32, 0.0_f32), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)));

        let z_dist = z_max - z_min - 1e-4;
        if z_dist <= 0.0 {
            return;
        }

        for position in &mut self.positions {
            position.z = 1e-4 + (position.z - z_min) / z_dist;
        }
    }

    /// Triangle for face `face`, with vertex color `1 - z`, optionally tinted by the palette.
    pub fn face(&self, face: usize, use_colors: bool) -> Triangle {
        let indices = ICOSPHERE_INDICES[face];
        let mut vertices = [Vertex::default(); 3];

        for (vertex, &index) in vertices.iter_mut().zip(indices.iter()) {
            let position = self.positions[index];
            let mut color = Vec3::splat(1.0 - position.z);
            if use_colors {
                color *= Self::palette_color(index);
            }
            *vertex = Vertex::new(position, color);
        }

        Triangle::from_vertices(vertices)
    }

    /// All faces in index order.
    pub fn faces(&self, use_colors: bool) -> impl Iterator<Item = Triangle> + '_ {
        (0..ICOSPHERE_INDICES.len()).map(move |face| self.face(face, use_colors))
    }
}

/// Axis used by [`PlanarTransform`] rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationAxis {
    X,
    Y,
    #[default]
    Z,
}

impl RotationAxis {
    pub const ALL: [RotationAxis; 3] = [RotationAxis::X, RotationAxis::Y, RotationAxis::Z];
}

/// Translate, rotate about one axis around a pivot, and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanarTransform {
    pub translation: Vec3,
    /// Pivot (xyz) and angle in radians (w)
    pub rotation: Vec4,
    pub scale: Vec3,
    pub axis: RotationAxis,
    /// Advance the angle by the frame's delta time
    pub auto_spin: bool,
    /// Drop 30 pixels per second, wrapping back to the top
    pub auto_fall: bool,
}

impl Default for PlanarTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec4::ZERO,
            scale: Vec3::ONE,
            axis: RotationAxis::Z,
            auto_spin: false,
            auto_fall: false,
        }
    }
}

impl PlanarTransform {
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            scale,
            ..Default::default()
        }
    }

    /// `T * R * S`.
    ///
    /// R is the identity for a zero angle. A pivot whose xy part is non-zero
    /// moves the rotation center to `pivot * scale`.
    pub fn matrix(&self) -> Mat4 {
        let scale = Mat4::from_scale(self.scale);
        let translation = Mat4::from_translation(self.translation);

        let angle = self.rotation.w;
        let mut rotation = Mat4::IDENTITY;
        if angle != 0.0 {
            rotation = match self.axis {
                RotationAxis::X => Mat4::from_rotation_x(angle),
                RotationAxis::Y => Mat4::from_rotation_y(angle),
                RotationAxis::Z => Mat4::from_rotation_z(angle),
            };

            let pivot = self.rotation.truncate();
            if pivot.truncate().length() > 0.0 {
                let offset = pivot * self.scale;
                rotation = Mat4::from_translation(offset)
                    * rotation
                    * Mat4::from_translation(-offset);
            }
        }

        translation * rotation * scale
    }
}

/// A triangle placed by a [`PlanarTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformTriangle {
    pub transform: PlanarTransform,
    pub triangle: Triangle,
}

impl TransformTriangle {
    pub fn new(transform: PlanarTransform, triangle: Triangle) -> Self {
        Self {
            transform,
            triangle,
        }
    }

    /// Copy of the triangle with its vertices moved by the transform.
    pub fn transformed(&self) -> Triangle {
        self.triangle.transformed(self.transform.matrix())
    }
}

/// An icosphere placed (and optionally animated) by a [`PlanarTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformIcosphere {
    pub enabled: bool,
    pub transform: PlanarTransform,
}

impl Default for TransformIcosphere {
    fn default() -> Self {
        Self {
            enabled: true,
            transform: PlanarTransform::default(),
        }
    }
}

/// Fall speed of auto-falling icospheres in pixels per second.
const FALL_SPEED: f32 = 30.0;

impl TransformIcosphere {
    pub fn new(transform: PlanarTransform) -> Self {
        Self {
            enabled: true,
            transform,
        }
    }

    /// Apply auto-spin and auto-fall for one frame.
    ///
    /// Falling icospheres that pass below y = 0 reappear at `wrap_height`.
    pub fn advance(&mut self, delta_time: f32, wrap_height: f32) {
        if self.transform.auto_spin {
            self.transform.rotation.w += delta_time;
        }

        if self.transform.auto_fall {
            self.transform.translation.y -= delta_time * FALL_SPEED;
            if self.transform.translation.y < 0.0 {
                self.transform.translation.y = wrap_height;
            }
        }
    }

    /// The transformed icosphere with depth renormalized into (0, 1].
    pub fn icosphere(&self) -> Icosphere {
        let mut icosphere = Icosphere::default();
        icosphere.transform(self.transform.matrix());
        icosphere.normalize_depth();
        icosphere
    }
}
