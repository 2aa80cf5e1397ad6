//! Typed errors for conditions callers may want to match on.
//!
//! Everything else (device creation, image decoding, readback) is reported
//! through `anyhow::Result` with context attached at the call site.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TintError {
    #[error("mesh has no drawable triangles")]
    EmptyMesh,

    #[error("mesh has {0} vertices but u16 indices can address at most 65536")]
    TooManyVertices(usize),

    #[error("index {index} is out of range for a mesh with {vertices} vertices")]
    IndexOutOfRange { index: u16, vertices: usize },

    #[error("texture data is {actual} bytes, expected {expected}")]
    TextureSize { expected: usize, actual: usize },

    #[error("pixels can only be read back from an offscreen target")]
    NotOffscreen,

    #[error("render target must be at least 1x1")]
    ZeroSize,
}
