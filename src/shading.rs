//! Host-side reference of the standard pass.
//!
//! `pipelines/standard.wgsl` runs this exact logic on the GPU. Keeping a plain
//! Rust copy lets the behaviour be checked without an adapter and gives the
//! golden image tests their expected pixels.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::data_structures::color::Color;

/// Clip-space position of a vertex: `projection * view * model * (position, 1)`.
pub fn transform_vertex(
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
    position: Vector3<f32>,
) -> Vector4<f32> {
    *projection * *view * *model * position.extend(1.0)
}

/// Remaps a mesh UV into the active tile of a tileset.
///
/// `tile_size` is the size of one tile in UV units and `tile_position` its
/// column/row in the sheet.
pub fn tile_uv(uv: Vector2<f32>, tile_size: Vector2<f32>, tile_position: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(
        tile_size.x * tile_position.x + tile_size.x * uv.x,
        tile_size.y * tile_position.y + tile_size.y * uv.y,
    )
}

/// Per-fragment inputs of the standard pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FragmentInput {
    /// The sampled texel, or `None` when no texture is in use.
    pub texel: Option<Color>,
    /// The tint uniform.
    pub color: Color,
    pub fill_color: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fragment {
    Emit(Color),
    Discard,
}

impl Fragment {
    pub fn is_discarded(&self) -> bool {
        matches!(self, Fragment::Discard)
    }

    /// The color the target ends up with under alpha blending. A discarded
    /// fragment leaves `background` untouched.
    pub fn over(self, background: Color) -> Color {
        match self {
            Fragment::Emit(c) => {
                let a = c.a();
                let keep = 1.0 - a;
                Color::new(
                    c.r() * a + background.r() * keep,
                    c.g() * a + background.g() * keep,
                    c.b() * a + background.b() * keep,
                    a + background.a() * keep,
                )
            }
            Fragment::Discard => background,
        }
    }
}

pub fn shade_fragment(input: &FragmentInput) -> Fragment {
    let mut color = match input.texel {
        Some(texel) => texel * input.color,
        None => input.color,
    };

    if input.fill_color {
        color = Color::new(input.color.r(), input.color.g(), input.color.b(), color.a());
    }

    if color.a() <= 0.0 {
        Fragment::Discard
    } else {
        Fragment::Emit(color)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

    use super::*;

    #[test]
    fn identity_transform_keeps_position() {
        let id = Matrix4::identity();
        let p = transform_vertex(&id, &id, &id, Vector3::new(0.25, -0.5, 0.75));
        assert_eq!(p, Vector4::new(0.25, -0.5, 0.75, 1.0));
    }

    #[test]
    fn model_is_applied_before_view_and_projection() {
        let model = Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let view = Matrix4::from_angle_z(Deg(90.0));
        let projection = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let p = transform_vertex(&projection, &view, &model, Vector3::new(0.0, 0.0, 0.0));
        // translate to (1,0,0), rotate to (0,1,0), scale x leaves it alone
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);

        let swapped = transform_vertex(&view, &projection, &model, Vector3::new(0.0, 0.0, 0.0));
        assert!((swapped.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn untextured_fragment_uses_tint() {
        let f = shade_fragment(&FragmentInput {
            texel: None,
            color: Color::new(0.2, 0.4, 0.6, 0.8),
            fill_color: false,
        });
        assert_eq!(f, Fragment::Emit(Color::new(0.2, 0.4, 0.6, 0.8)));
    }

    #[test]
    fn textured_fragment_is_modulated_by_tint() {
        let f = shade_fragment(&FragmentInput {
            texel: Some(Color::YELLOW),
            color: Color::AQUA,
            fill_color: false,
        });
        assert_eq!(f, Fragment::Emit(Color::GREEN));
    }

    #[test]
    fn fill_overrides_rgb_and_keeps_alpha() {
        let texel = Color::new(0.1, 0.2, 0.3, 0.5);
        let tint = Color::new(1.0, 0.0, 0.0, 0.5);
        let f = shade_fragment(&FragmentInput {
            texel: Some(texel),
            color: tint,
            fill_color: true,
        });
        assert_eq!(f, Fragment::Emit(Color::new(1.0, 0.0, 0.0, 0.25)));

        let plain = shade_fragment(&FragmentInput {
            texel: Some(texel),
            color: tint,
            fill_color: false,
        });
        match (f, plain) {
            (Fragment::Emit(a), Fragment::Emit(b)) => assert_eq!(a.a(), b.a()),
            _ => panic!("both fragments should be emitted"),
        }
    }

    #[test]
    fn zero_alpha_is_discarded_in_every_mode() {
        for texel in [None, Some(Color::WHITE)] {
            for fill_color in [false, true] {
                let f = shade_fragment(&FragmentInput {
                    texel,
                    color: Color::RED.with_alpha(0.0),
                    fill_color,
                });
                assert!(f.is_discarded(), "texel {:?} fill {}", texel, fill_color);
            }
        }
    }

    #[test]
    fn transparent_texel_is_discarded_even_with_fill() {
        let f = shade_fragment(&FragmentInput {
            texel: Some(Color::TRANSPARENT),
            color: Color::RED,
            fill_color: true,
        });
        assert!(f.is_discarded());
        assert_eq!(f.over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn translucent_fragments_blend_with_the_background() {
        let f = Fragment::Emit(Color::RED.with_alpha(0.5));
        let c = f.over(Color::WHITE);
        assert!((c.r() - 1.0).abs() < 1e-6);
        assert!((c.g() - 0.5).abs() < 1e-6);
        assert!((c.b() - 0.5).abs() < 1e-6);
        assert!((c.a() - 1.0).abs() < 1e-6);

        assert_eq!(Fragment::Emit(Color::BLUE).over(Color::WHITE), Color::BLUE);
    }

    #[test]
    fn tile_uv_maps_into_the_selected_cell() {
        let size = Vector2::new(0.25, 0.5);
        let uv = tile_uv(Vector2::new(0.5, 0.5), size, Vector2::new(2.0, 1.0));
        assert_eq!(uv, Vector2::new(0.625, 0.75));
        assert_eq!(
            tile_uv(Vector2::new(0.0, 0.0), size, Vector2::new(0.0, 0.0)),
            Vector2::new(0.0, 0.0)
        );
    }
}
