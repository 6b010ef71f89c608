//! Preset scenes and per-lab frame dispatch.

use pixlab_core::{presets, PixelBuffer, Scene};
use pixlab_renderer::{render_raster_frame, FrameTime, RasterSettings, RayTracer};
use rand::Rng;

use crate::cli::Lab;

/// The preset scene each lab starts from.
pub fn preset_scene(lab: Lab, rng: &mut impl Rng) -> Scene {
    let mut scene = Scene::new();
    match lab {
        Lab::PointsLines => presets::lab02_points(&mut scene, rng),
        Lab::Triangles => presets::lab03_triangles(&mut scene),
        Lab::Icospheres => {
            presets::lab04_icosphere(&mut scene);
            presets::lab04_random_icospheres(&mut scene, rng);
        }
        Lab::RayTracer => presets::ray_tracer_room(&mut scene),
    }
    scene
}

/// Everything one lab needs between frames.
pub struct LabRunner {
    pub lab: Lab,
    pub scene: Scene,
    pub tracer: RayTracer,
    pub raster: RasterSettings,
}

impl LabRunner {
    pub fn render(&mut self, buffer: &mut PixelBuffer, time: FrameTime) {
        match self.lab {
            Lab::RayTracer => self.tracer.render_frame(&mut self.scene, buffer, time),
            _ => render_raster_frame(&mut self.scene, buffer, &self.raster, time),
        }
    }
}
