//! Render pipelines.
//!
//! The crate ships a single pipeline, `standard`, which every model and sprite
//! is drawn with.

pub mod standard;
