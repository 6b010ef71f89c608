//! Scene data for the pixlab raster and ray tracing labs.
//!
//! Holds the pixel buffer both renderers write into, the primitives they
//! consume, and the scene container that owns them.

pub mod arena;
pub mod light;
pub mod pixel_buffer;
pub mod presets;
pub mod primitives;
pub mod ray_object;
pub mod scene;
pub mod scene_file;

pub use arena::{Arena, Handle};
pub use light::Light;
pub use pixel_buffer::{PixelBuffer, PixelBufferError, PixelBufferResult, DEPTH_CHANNEL};
pub use primitives::{
    Circle, Icosphere, Line, PlanarTransform, RotationAxis, TransformIcosphere,
    TransformTriangle, Triangle, Vertex,
};
pub use ray_object::{Material, ObjectTransform, RayShape, RaySceneObject};
pub use scene::Scene;
pub use scene_file::{RayObjectDesc, RayObjectShape, SceneFile, SceneFileError, SceneFileResult};
