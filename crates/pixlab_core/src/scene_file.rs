//! JSON scene descriptions.

use std::fs;
use std::path::Path;

use glam::{Vec2, Vec3};
use log::info;
use pixlab_math::Camera;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::light::Light;
use crate::primitives::{Circle, Line, TransformIcosphere, TransformTriangle, Triangle, Vertex};
use crate::ray_object::{Material, RaySceneObject};
use crate::scene::Scene;

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Shape-specific part of a [`RayObjectDesc`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RayObjectShape {
    Plane {
        #[serde(default = "default_plane_normal")]
        normal: Vec3,
        #[serde(default = "default_plane_scale")]
        scale: Vec2,
    },
    Sphere {
        #[serde(default = "default_sphere_radius")]
        radius: f32,
    },
}

fn default_plane_normal() -> Vec3 {
    Vec3::Y
}

fn default_plane_scale() -> Vec2 {
    Vec2::splat(10.0)
}

fn default_sphere_radius() -> f32 {
    1.0
}

fn default_enabled() -> bool {
    true
}

/// A plane or sphere as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayObjectDesc {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub position: Vec3,
    pub shape: RayObjectShape,
    #[serde(default)]
    pub material: Material,
}

impl RayObjectDesc {
    pub fn build(&self) -> RaySceneObject {
        let mut object = match self.shape {
            RayObjectShape::Plane { normal, scale } => {
                RaySceneObject::plane(self.position, normal, scale)
            }
            RayObjectShape::Sphere { radius } => RaySceneObject::sphere(self.position, radius),
        };
        object.name = self.name.clone();
        object.enabled = self.enabled;
        object.material = self.material;
        object
    }
}

/// Everything needed to reconstruct a [`Scene`] and its camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub camera: Camera,
    pub light: Light,
    pub points: Vec<Vertex>,
    pub lines: Vec<Line>,
    pub circles: Vec<Circle>,
    pub triangles: Vec<Triangle>,
    pub transform_triangles: Vec<TransformTriangle>,
    pub icospheres: Vec<TransformIcosphere>,
    pub ray_objects: Vec<RayObjectDesc>,
}

impl SceneFile {
    /// Read and parse a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneFileResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let file = Self::parse(&contents)?;

        info!(
            "Loaded scene {}: {} raster primitive(s), {} ray object(s)",
            path.display(),
            file.raster_len(),
            file.ray_objects.len()
        );
        Ok(file)
    }

    pub fn parse(json: &str) -> SceneFileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SceneFileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn raster_len(&self) -> usize {
        self.points.len()
            + self.lines.len()
            + self.circles.len()
            + self.triangles.len()
            + self.transform_triangles.len()
            + self.icospheres.len()
    }

    /// Build the scene, keeping the file's entry order.
    pub fn to_scene(&self) -> Scene {
        let mut scene = Scene::new();
        scene.light = self.light;

        for &point in &self.points {
            scene.add_point(point);
        }
        for &line in &self.lines {
            scene.add_line(line);
        }
        for &circle in &self.circles {
            scene.add_circle(circle);
        }
        for &triangle in &self.triangles {
            scene.add_triangle(triangle);
        }
        for &triangle in &self.transform_triangles {
            scene.add_transform_triangle(triangle);
        }
        for &icosphere in &self.icospheres {
            scene.add_icosphere(icosphere);
        }
        for desc in &self.ray_objects {
            scene.add_ray_object(desc.build());
        }

        scene
    }
}
