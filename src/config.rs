//! Construction-time settings of a [`Context`](crate::context::Context).

use crate::{camera::Camera, data_structures::color::Color};

#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Colour the target is cleared to at the start of every frame.
    pub clear_colour: Color,
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    /// Ignored for offscreen targets. Falls back to `Fifo` when the surface
    /// does not support it.
    pub present_mode: wgpu::PresentMode,
    pub camera: Camera,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            clear_colour: Color::BLACK,
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            power_preference: wgpu::PowerPreference::default(),
            present_mode: wgpu::PresentMode::Fifo,
            camera: Camera::default(),
        }
    }
}

impl ContextConfig {
    pub fn with_clear_colour(mut self, colour: Color) -> Self {
        self.clear_colour = colour;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }
}
