#![allow(dead_code)]

use tint_ngin::{
    Color, Context, ContextConfig, Render, Texture,
    logging::{LoggingConfig, init_logging},
    shading::{FragmentInput, shade_fragment},
};

pub const SIZE: u32 = 64;
pub const CENTER: (u32, u32) = (SIZE / 2, SIZE / 2);

/// Headless context plus the runtime its async calls are blocked on.
pub struct Harness {
    pub rt: tokio::runtime::Runtime,
    pub ctx: Context,
}

impl Harness {
    pub fn new(clear: Color) -> Self {
        Self::with_config(ContextConfig::default().with_clear_colour(clear))
    }

    pub fn with_config(config: ContextConfig) -> Self {
        let _ = init_logging(&LoggingConfig::default());
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let ctx = rt
            .block_on(Context::headless(SIZE, SIZE, config))
            .expect("headless context");
        Self { rt, ctx }
    }

    pub fn texture(&self, width: u32, height: u32, rgba: &[u8]) -> Texture {
        Texture::from_rgba(&self.ctx.device, &self.ctx.queue, width, height, rgba, Some("test texture"))
            .expect("valid texture data")
    }

    pub fn draw(&mut self, renders: &[Render<'_>]) -> image::RgbaImage {
        self.ctx.render(renders).expect("render");
        self.rt.block_on(self.ctx.read_pixels()).expect("read pixels")
    }
}

/// What the standard pass should leave in the target for `input` drawn over `background`.
pub fn expected(input: FragmentInput, background: Color) -> image::Rgba<u8> {
    shade_fragment(&input).over(background).to_rgba8()
}

pub fn assert_pixel(img: &image::RgbaImage, at: (u32, u32), expected: image::Rgba<u8>) {
    let actual = img.get_pixel(at.0, at.1);
    let close = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 1);
    assert!(close, "pixel {at:?}: got {actual:?}, expected {expected:?}");
}
