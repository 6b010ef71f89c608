//! Surface colors for traced rays.

use glam::{Vec3, Vec4};
use pixlab_core::{Light, Material};
use pixlab_math::Ray;
use serde::{Deserialize, Serialize};

use crate::hit::HitRecord;

/// What the ray tracer writes for a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Blinn-Phong lit material color
    #[default]
    Default,
    /// World position as RGB
    Position,
    /// Normal remapped from [-1, 1] to [0, 1]
    Normal,
}

/// Blinn-Phong color of `material` at a hit seen from `eye`.
///
/// `ambient + diffuse + specular`, where ambient and diffuse are tinted by
/// the material and specular is skipped for surfaces facing away from the light.
pub fn blinn_phong(
    position: Vec3,
    normal: Vec3,
    material: &Material,
    light: &Light,
    eye: Vec3,
) -> Vec3 {
    let (l, attenuation) = light.direction_to(position);
    let v = (eye - position).normalize_or_zero();
    let h = (l + v).normalize_or_zero();

    let n_dot_l = normal.dot(l);
    let diffuse = n_dot_l.max(0.0);
    let specular = if n_dot_l > 0.0 {
        normal.dot(h).max(0.0).powf(material.reflectivity.max(0.0))
    } else {
        0.0
    };

    let ambient = light.ambient_color * light.ambient_intensity;
    let diffuse_light = light.diffuse_color * light.diffuse_intensity * diffuse * attenuation;
    let specular_light = light.specular_color * specular * attenuation;

    material.diffuse * ambient + material.diffuse * diffuse_light + specular_light
}

/// RGBA written for one ray: the shaded hit, or the ray direction on a miss.
pub fn shade(
    ray: &Ray,
    rec: &HitRecord,
    material: Option<&Material>,
    light: &Light,
    mode: ColorMode,
) -> Vec4 {
    let material = match material {
        Some(material) if rec.hit => material,
        _ => return ray.direction.extend(1.0),
    };

    let rgb = match mode {
        ColorMode::Default => blinn_phong(rec.position, rec.normal, material, light, ray.origin),
        ColorMode::Position => rec.position,
        ColorMode::Normal => (rec.normal + Vec3::ONE) * 0.5,
    };
    rgb.extend(1.0)
}
