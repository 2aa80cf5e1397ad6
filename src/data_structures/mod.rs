//! Engine data structures: colors, geometry, textures and drawables.
//!
//! - `color` holds RGBA and HSL colors
//! - `mesh` contains the vertex layout, primitives and GPU mesh buffers
//! - `model` pairs a mesh with its draw state (transform, tint, texture)
//! - `polygon` and `ray` are 2D/3D helpers for collision and picking
//! - `sprite` is a quad placed by position, rotation and scale
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `tileset` selects a cell of a texture atlas

pub mod color;
pub mod mesh;
pub mod model;
pub mod polygon;
pub mod ray;
pub mod sprite;
pub mod texture;
pub mod tileset;
