//! Objects intersected by the ray tracer.

use glam::{Mat4, Vec2, Vec3, Vec4};
use pixlab_math::{euler_degrees_from_normal, euler_rotation};
use serde::{Deserialize, Serialize};

/// Shape of a ray-traced object.
///
/// Planes take their orientation from the transform's rotation; spheres are
/// centered on the transform's translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RayShape {
    Plane,
    Sphere { radius: f32 },
}

/// Surface response of a ray-traced object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub diffuse: Vec3,
    /// Specular exponent
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::ONE,
            reflectivity: 32.0,
        }
    }
}

impl Material {
    pub fn new(diffuse: Vec3) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }
}

/// Translation, Euler rotation in degrees, and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A plane or sphere with its transform, material and cached orientation.
///
/// The transform is only reachable through setters so that rotation
/// changes always mark the cached matrix stale.
#[derive(Debug, Clone, PartialEq)]
pub struct RaySceneObject {
    pub name: String,
    pub enabled: bool,
    pub shape: RayShape,
    pub material: Material,
    transform: ObjectTransform,
    changed: bool,
    rotation_matrix: Mat4,
    normal: Vec3,
}

impl RaySceneObject {
    /// Only planes read the cached rotation; spheres never go stale.
    fn caches_rotation(shape: RayShape) -> bool {
        matches!(shape, RayShape::Plane)
    }

    fn with_shape(shape: RayShape, transform: ObjectTransform) -> Self {
        Self {
            name: String::new(),
            enabled: true,
            shape,
            material: Material::default(),
            transform,
            changed: Self::caches_rotation(shape),
            rotation_matrix: Mat4::IDENTITY,
            normal: Vec3::Y,
        }
    }

    /// A plane through `position` facing `normal`.
    ///
    /// `scale` spans the plane's local X and Z extents; negative values collapse to 0.
    pub fn plane(position: Vec3, normal: Vec3, scale: Vec2) -> Self {
        let scale = scale.max(Vec2::ZERO);
        Self::with_shape(
            RayShape::Plane,
            ObjectTransform {
                translation: position,
                rotation: euler_degrees_from_normal(normal),
                scale: Vec3::new(scale.x, 0.0, scale.y),
            },
        )
    }

    /// A sphere centered at `position`.
    pub fn sphere(position: Vec3, radius: f32) -> Self {
        Self::with_shape(
            RayShape::Sphere { radius },
            ObjectTransform {
                translation: position,
                ..Default::default()
            },
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    /// Set the Euler rotation in degrees and mark the cached matrix stale.
    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.transform.rotation = degrees;
        self.changed = Self::caches_rotation(self.shape);
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Point the plane's up axis along `normal`.
    pub fn set_normal(&mut self, normal: Vec3) {
        self.set_rotation(euler_degrees_from_normal(normal));
    }

    /// Whether the cached rotation needs rebuilding.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Rebuild the cached rotation if stale. Returns whether it was rebuilt.
    pub fn refresh_rotation(&mut self) -> bool {
        if !self.changed {
            return false;
        }

        self.rotation_matrix = euler_rotation(self.transform.rotation);
        self.normal = (self.rotation_matrix * Vec4::Y)
            .truncate()
            .normalize_or_zero();
        self.changed = false;
        true
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        self.rotation_matrix
    }

    /// Cached up axis of the rotation, valid after [`Self::refresh_rotation`].
    pub fn plane_normal(&self) -> Vec3 {
        self.normal
    }

    /// Sphere radius, or `None` for planes.
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            RayShape::Sphere { radius } => Some(radius),
            RayShape::Plane => None,
        }
    }
}
