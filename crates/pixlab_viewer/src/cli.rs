use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pixlab_renderer::{ColorMode, LineMode, TriangleMode};

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Which lab to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lab {
    /// Random points
    PointsLines,
    /// The ten-triangle gem
    Triangles,
    /// Static and falling icospheres
    Icospheres,
    /// A lit room with a sphere
    RayTracer,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorModeArg {
    Default,
    Position,
    Normal,
}

impl From<ColorModeArg> for ColorMode {
    fn from(mode: ColorModeArg) -> Self {
        match mode {
            ColorModeArg::Default => ColorMode::Default,
            ColorModeArg::Position => ColorMode::Position,
            ColorModeArg::Normal => ColorMode::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LineModeArg {
    Implicit,
    Parametric,
}

impl From<LineModeArg> for LineMode {
    fn from(mode: LineModeArg) -> Self {
        match mode {
            LineModeArg::Implicit => LineMode::Implicit,
            LineModeArg::Parametric => LineMode::Parametric,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TriangleModeArg {
    Outline,
    Parametric,
    BoundingBox,
}

impl From<TriangleModeArg> for TriangleMode {
    fn from(mode: TriangleModeArg) -> Self {
        match mode {
            TriangleModeArg::Outline => TriangleMode::Outline,
            TriangleModeArg::Parametric => TriangleMode::Parametric,
            TriangleModeArg::BoundingBox => TriangleMode::BoundingBox,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "pixlab-viewer")]
#[command(about = "Render a pixlab lab headlessly and save it as a PNG")]
pub struct Args {
    /// Lab to render
    #[arg(long, value_enum, default_value = "ray-tracer")]
    pub lab: Lab,

    /// Buffer width in pixels
    #[arg(long, default_value = "256")]
    pub width: u32,

    /// Buffer height in pixels
    #[arg(long, default_value = "128")]
    pub height: u32,

    /// Floats per pixel; raster depth tests need at least 4
    #[arg(long, default_value = "4")]
    pub stride: usize,

    /// Number of frames to run; only the last one is saved
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Seconds per frame handed to the animation
    #[arg(long, default_value = "0.016")]
    pub delta_time: f32,

    /// JSON scene file replacing the lab's preset scene
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "pixlab.png")]
    pub output: PathBuf,

    /// Ray tracer color mode
    #[arg(long, value_enum, default_value = "default")]
    pub color_mode: ColorModeArg,

    /// How raster lines are drawn
    #[arg(long, value_enum, default_value = "implicit")]
    pub line_mode: LineModeArg,

    /// How raster triangles are drawn
    #[arg(long, value_enum, default_value = "bounding-box")]
    pub triangle_mode: TriangleModeArg,

    /// Seed for presets that scatter random primitives
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Trace on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
