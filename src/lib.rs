//! tint-ngin
//!
//! A small wgpu toolkit built around one render pass: vertices are transformed
//! by projection, view and model matrices, and fragments are coloured by an
//! optional texture multiplied with a tint, optionally flattened to the tint's
//! RGB, and discarded when fully transparent.
//!
//! High-level modules
//! - `camera`: look-at camera, projections and the camera uniform
//! - `config`: construction-time settings of the context
//! - `context`: GPU device/queue, render target and the standard pipeline
//! - `data_structures`: colors, meshes, models, sprites, textures, tilesets
//! - `logging`: one-time logger setup
//! - `math`: angle and interpolation helpers
//! - `pipelines`: the standard pipeline and its shader
//! - `render`: what to draw in a frame
//! - `resources`: bind group layouts and asset loading
//! - `shading`: CPU reference of the standard pass
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod logging;
pub mod math;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod shading;

// Re-exports commonly used types for convenience in downstream code.
pub use camera::{Camera, ProjectionKind};
pub use config::ContextConfig;
pub use context::Context;
pub use data_structures::{
    color::{Color, ColorHsl},
    mesh::{MeshData, Primitive, Vertex},
    model::{DrawState, Model},
    polygon::Polygon,
    ray::Ray,
    sprite::Sprite,
    texture::Texture,
    tileset::Tileset,
};
pub use error::TintError;
pub use render::Render;

pub use cgmath;
pub use wgpu;
pub use winit::window::Window;
