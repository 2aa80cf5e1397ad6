//! RGBA and HSL colors.
//!
//! Every component of a [`Color`] is kept in `[0, 1]`: constructors, setters and
//! arithmetic all clamp. The tint uniform of the standard pass is built from a
//! `Color`, so values outside that range never reach the shader.

use std::ops::{Add, Mul, Sub};

use crate::math::wrap;

#[inline]
fn unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// A straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::opaque(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
    pub const AQUA: Color = Color::opaque(0.0, 1.0, 1.0);
    pub const TEAL: Color = Color::opaque(0.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const PINK: Color = Color::opaque(1.0, 0.0, 1.0);
    pub const PURPLE: Color = Color::opaque(128.0 / 255.0, 0.0, 128.0 / 255.0);
    pub const ORANGE: Color = Color::opaque(1.0, 165.0 / 255.0, 0.0);
    pub const VIOLET: Color = Color::opaque(238.0 / 255.0, 130.0 / 255.0, 238.0 / 255.0);
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    // Only for in-range literals.
    const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Decodes a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0), channel(24))
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn r(&self) -> f32 {
        self.r
    }
    pub fn g(&self) -> f32 {
        self.g
    }
    pub fn b(&self) -> f32 {
        self.b
    }
    pub fn a(&self) -> f32 {
        self.a
    }

    pub fn set_r(&mut self, v: f32) {
        self.r = unit(v);
    }
    pub fn set_g(&mut self, v: f32) {
        self.g = unit(v);
    }
    pub fn set_b(&mut self, v: f32) {
        self.b = unit(v);
    }
    pub fn set_a(&mut self, v: f32) {
        self.a = unit(v);
    }

    /// Copy of `self` with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation from `from` (`t = 0`) to `to` (`t = 1`). `t` is clamped.
    pub fn blend(from: Color, to: Color, t: f32) -> Color {
        let t = unit(t);
        Color::new(
            from.r + (to.r - from.r) * t,
            from.g + (to.g - from.g) * t,
            from.b + (to.b - from.b) * t,
            from.a + (to.a - from.a) * t,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 8-bit quantisation, as an `Rgba8Unorm` target would store it.
    pub fn to_rgba8(self) -> image::Rgba<u8> {
        let q = |v: f32| (v * 255.0).round() as u8;
        image::Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        c.to_rgba8()
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

/// Component-wise modulation; this is how a texel is tinted.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, f: f32) -> Color {
        Color::new(self.r * f, self.g * f, self.b * f, self.a * f)
    }
}

/// Hue/saturation/lightness color. Hue is in degrees and wraps into `[0, 360)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorHsl {
    h: f32,
    s: f32,
    l: f32,
}

impl ColorHsl {
    pub const WHITE: ColorHsl = ColorHsl::lit(0.0, 0.0, 1.0);
    pub const BLACK: ColorHsl = ColorHsl::lit(0.0, 0.0, 0.0);
    pub const GRAY: ColorHsl = ColorHsl::lit(0.0, 0.0, 0.5);
    pub const RED: ColorHsl = ColorHsl::lit(0.0, 1.0, 0.5);
    pub const GREEN: ColorHsl = ColorHsl::lit(120.0, 1.0, 0.5);
    pub const BLUE: ColorHsl = ColorHsl::lit(240.0, 1.0, 0.5);
    pub const YELLOW: ColorHsl = ColorHsl::lit(60.0, 1.0, 0.5);
    pub const AQUA: ColorHsl = ColorHsl::lit(210.0, 1.0, 0.5);
    pub const TEAL: ColorHsl = ColorHsl::lit(160.0, 1.0, 0.5);
    pub const PINK: ColorHsl = ColorHsl::lit(300.0, 1.0, 0.5);
    pub const PURPLE: ColorHsl = ColorHsl::lit(270.0, 1.0, 0.5);
    pub const ORANGE: ColorHsl = ColorHsl::lit(30.0, 1.0, 0.5);

    const fn lit(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: wrap(h, 0.0, 360.0),
            s: unit(s),
            l: unit(l),
        }
    }

    pub fn h(&self) -> f32 {
        self.h
    }
    pub fn s(&self) -> f32 {
        self.s
    }
    pub fn l(&self) -> f32 {
        self.l
    }

    pub fn set_h(&mut self, v: f32) {
        self.h = wrap(v, 0.0, 360.0);
    }
    pub fn set_s(&mut self, v: f32) {
        self.s = unit(v);
    }
    pub fn set_l(&mut self, v: f32) {
        self.l = unit(v);
    }

    /// Opaque RGB equivalent.
    pub fn to_rgb(self) -> Color {
        let c = self.s * (1.0 - (self.l * 2.0 - 1.0).abs());
        let h = self.h / 60.0;
        let x = c * (1.0 - (wrap(h, 0.0, 2.0) - 1.0).abs());

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = self.l - c * 0.5;
        Color::rgb(r + m, g + m, b + m)
    }

    /// Per-component interpolation. The hue does not take the short way round.
    pub fn blend(from: ColorHsl, to: ColorHsl, t: f32) -> ColorHsl {
        let t = unit(t);
        ColorHsl::new(
            from.h + (to.h - from.h) * t,
            from.s + (to.s - from.s) * t,
            from.l + (to.l - from.l) * t,
        )
    }
}

impl From<ColorHsl> for Color {
    fn from(c: ColorHsl) -> Self {
        c.to_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn constructors_clamp() {
        let c = Color::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.5, 1.0]);

        let mut c = Color::WHITE;
        c.set_a(-1.0);
        assert_eq!(c.a(), 0.0);
    }

    #[test]
    fn argb_is_decoded_with_alpha_in_the_high_byte() {
        let c = Color::from_argb(0x80FF0000);
        assert_eq!(c.r(), 1.0);
        assert_eq!(c.g(), 0.0);
        assert_eq!(c.b(), 0.0);
        assert!((c.a() - 128.0 / 255.0).abs() < 1e-6);

        assert_eq!(Color::from_argb(0xFFFFA500), Color::ORANGE);
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Color::RED + Color::RED, Color::RED);
        assert_eq!(Color::BLACK - Color::WHITE, Color::TRANSPARENT);
        assert_eq!(Color::YELLOW * Color::AQUA, Color::GREEN);
        assert_eq!((Color::WHITE * 0.5).to_array(), [0.5; 4]);
    }

    #[test]
    fn blend_clamps_its_factor() {
        assert_eq!(Color::blend(Color::BLACK, Color::WHITE, 2.0), Color::WHITE);
        assert!(close(
            Color::blend(Color::BLACK, Color::WHITE, 0.25),
            Color::rgb(0.25, 0.25, 0.25)
        ));
    }

    #[test]
    fn quantises_to_rgba8() {
        assert_eq!(Color::GRAY.to_rgba8(), image::Rgba([128, 128, 128, 255]));
        assert_eq!(
            Color::from_rgba8(10, 20, 30, 40).to_rgba8(),
            image::Rgba([10, 20, 30, 40])
        );
    }

    #[test]
    fn hsl_primaries_convert() {
        assert!(close(ColorHsl::RED.to_rgb(), Color::RED));
        assert!(close(ColorHsl::GREEN.to_rgb(), Color::GREEN));
        assert!(close(ColorHsl::BLUE.to_rgb(), Color::BLUE));
        assert!(close(ColorHsl::YELLOW.to_rgb(), Color::YELLOW));
        assert!(close(ColorHsl::WHITE.to_rgb(), Color::WHITE));
        assert!(close(ColorHsl::GRAY.to_rgb(), Color::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn hsl_hue_wraps() {
        let c = ColorHsl::new(-120.0, 1.0, 0.5);
        assert!((c.h() - 240.0).abs() < 1e-3);
        assert!(close(c.to_rgb(), Color::BLUE));
        assert!(close(ColorHsl::new(360.0, 1.0, 0.5).to_rgb(), Color::RED));
    }

    #[test]
    fn hsl_blend_interpolates_lightness() {
        let mid = ColorHsl::blend(ColorHsl::BLACK, ColorHsl::WHITE, 0.5);
        assert!((mid.l() - 0.5).abs() < 1e-6);
    }
}
