//! Scene light used by ray tracer shading.

use glam::Vec3;
use pixlab_math::orbit_direction;
use serde::{Deserialize, Serialize};

/// A directional or point light with an ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub ambient_intensity: f32,
    pub ambient_color: Vec3,
    pub diffuse_intensity: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    /// Direction towards the light, for directional lights
    pub direction: Vec3,
    pub auto_orbit: bool,
    pub orbit_axis: Vec3,
    /// Treat as a point light at `position`
    pub point: bool,
    pub position: Vec3,
    pub intensity: f32,
    pub radius: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.05,
            ambient_color: Vec3::ONE,
            diffuse_intensity: 1.0,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ONE,
            direction: Vec3::Y,
            auto_orbit: false,
            orbit_axis: Vec3::Y,
            point: false,
            position: Vec3::ZERO,
            intensity: 10.0,
            radius: 2.0,
        }
    }
}

impl Light {
    /// Swing the direction around the orbit axis when auto-orbit is on.
    ///
    /// `time` is the elapsed time since start, used directly as the angle in radians.
    pub fn orbit(&mut self, time: f32) {
        if !self.auto_orbit {
            return;
        }

        if let Some(direction) = orbit_direction(self.orbit_axis, time) {
            self.direction = direction;
        }
    }

    /// Normalized direction from `hit` towards the light and its attenuation.
    pub fn direction_to(&self, hit: Vec3) -> (Vec3, f32) {
        if !self.point {
            return (self.direction.normalize_or_zero(), 1.0);
        }

        let offset = self.position - hit;
        let distance = offset.length();
        let attenuation = if self.radius > 0.0 {
            self.intensity / (1.0 + (distance / self.radius).powi(2))
        } else {
            0.0
        };

        (offset.normalize_or_zero(), attenuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light() {
        let light = Light {
            direction: Vec3::new(0.0, 2.0, 0.0),
            ..Default::default()
        };
        let (l, attenuation) = light.direction_to(Vec3::new(5.0, 1.0, 3.0));
        assert!((l - Vec3::Y).length() < 1e-6);
        assert_eq!(attenuation, 1.0);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = Light {
            point: true,
            position: Vec3::new(0.0, 4.0, 0.0),
            ..Default::default()
        };
        let (l, attenuation) = light.direction_to(Vec3::ZERO);
        assert!((l - Vec3::Y).length() < 1e-6);
        // 10 / (1 + (4/2)^2)
        assert!((attenuation - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_only_when_enabled() {
        let mut light = Light::default();
        light.orbit(1.0);
        assert_eq!(light.direction, Vec3::Y);

        light.auto_orbit = true;
        light.orbit(0.0);
        assert!((light.direction - Vec3::NEG_Z).length() < 1e-6);

        light.orbit_axis = Vec3::ZERO;
        light.orbit(1.0);
        assert!((light.direction - Vec3::NEG_Z).length() < 1e-6);
    }
}
