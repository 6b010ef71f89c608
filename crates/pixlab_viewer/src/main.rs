//! Headless pixlab viewer: render a lab for a number of frames and save the result.

mod cli;
mod export;
mod lab;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use pixlab_core::{PixelBuffer, SceneFile};
use pixlab_math::Camera;
use pixlab_renderer::{FrameTime, RasterSettings, RayTracer, TraceConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Args;
use crate::lab::{preset_scene, LabRunner};

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!(
        "Starting pixlab viewer: {:?} lab at {}x{}",
        args.lab, args.width, args.height
    );

    let mut buffer = PixelBuffer::new(args.width, args.height, args.stride)
        .context("Failed to allocate pixel buffer")?;

    let (scene, camera) = match &args.scene {
        Some(path) => {
            let file = SceneFile::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            (file.to_scene(), file.camera)
        }
        None => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            (preset_scene(args.lab, &mut rng), Camera::default())
        }
    };

    let mut runner = LabRunner {
        lab: args.lab,
        scene,
        tracer: RayTracer::new(
            camera,
            TraceConfig {
                color_mode: args.color_mode.into(),
                parallel: !args.sequential,
            },
        ),
        raster: RasterSettings {
            line_mode: args.line_mode.into(),
            triangle_mode: args.triangle_mode.into(),
            ..Default::default()
        },
    };

    let start = Instant::now();
    let mut elapsed = 0.0;
    for frame in 0..args.frames {
        let frame_start = Instant::now();
        runner.render(&mut buffer, FrameTime::new(args.delta_time, elapsed));
        elapsed += args.delta_time;
        debug!("Frame {} rendered in {:.2?}", frame, frame_start.elapsed());
    }
    info!(
        "Rendered {} frame(s) in {:.2?}",
        args.frames,
        start.elapsed()
    );

    export::save_png(&buffer, &args.output)?;
    info!("Saved {}", args.output.display());

    Ok(())
}
