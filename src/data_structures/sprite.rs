use cgmath::{Deg, Matrix4, Vector2, Vector3};

use crate::{
    context::Context,
    data_structures::{
        color::Color,
        mesh::Primitive,
        model::Model,
        polygon::Polygon,
        texture::Texture,
        tileset::Tileset,
    },
    error::TintError,
};

/// `T(position) * Rz(rotation) * S(scale.x, scale.y, 1)`.
pub fn sprite_matrix(position: Vector3<f32>, rotation: f32, scale: Vector2<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(rotation))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, 1.0)
}

/// A unit quad placed by position, rotation (degrees) and 2D scale.
///
/// The model matrix is rebuilt on every transform change.
#[derive(Debug)]
pub struct Sprite {
    model: Model,
    position: Vector3<f32>,
    rotation: f32,
    scale: Vector2<f32>,
}

impl Sprite {
    pub fn new(ctx: &Context) -> Result<Self, TintError> {
        Ok(Self::from_model(Model::from_primitive(ctx, Primitive::Quad)?))
    }

    pub fn from_texture(ctx: &Context, texture: Texture) -> Result<Self, TintError> {
        Ok(Self::from_model(Model::from_texture(ctx, texture)?))
    }

    /// A sprite showing one tile of `texture`.
    pub fn from_tileset(ctx: &Context, texture: Texture, tileset: Tileset) -> Result<Self, TintError> {
        let mut sprite = Self::from_texture(ctx, texture)?;
        sprite.set_tileset(Some(tileset));
        Ok(sprite)
    }

    fn from_model(mut model: Model) -> Self {
        let position = Vector3::new(0.0, 0.0, 0.0);
        let scale = Vector2::new(1.0, 1.0);
        model.set_matrix(sprite_matrix(position, 0.0, scale));
        Self {
            model,
            position,
            rotation: 0.0,
            scale,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.update_matrix();
    }

    /// Rotation around Z in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.update_matrix();
    }

    pub fn scale(&self) -> Vector2<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector2<f32>) {
        self.scale = scale;
        self.update_matrix();
    }

    pub fn set_scale_uniform(&mut self, scale: f32) {
        self.set_scale(Vector2::new(scale, scale));
    }

    pub fn set_transform(&mut self, position: Vector3<f32>, scale: Vector2<f32>, rotation: f32) {
        self.position = position;
        self.scale = scale;
        self.rotation = rotation;
        self.update_matrix();
    }

    fn update_matrix(&mut self) {
        self.model
            .set_matrix(sprite_matrix(self.position, self.rotation, self.scale));
    }

    pub fn color(&self) -> Color {
        self.model.color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.model.set_color(color);
    }

    pub fn fill_color(&self) -> bool {
        self.model.fill_color()
    }

    pub fn set_fill_color(&mut self, fill: bool) {
        self.model.set_fill_color(fill);
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.model.texture()
    }

    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.model.set_texture(texture);
    }

    pub fn texture_enabled(&self) -> bool {
        self.model.texture_enabled()
    }

    pub fn set_texture_enabled(&mut self, enabled: bool) {
        self.model.set_texture_enabled(enabled);
    }

    pub fn tileset(&self) -> Option<&Tileset> {
        self.model.tileset()
    }

    pub fn tileset_mut(&mut self) -> Option<&mut Tileset> {
        self.model.tileset_mut()
    }

    pub fn set_tileset(&mut self, tileset: Option<Tileset>) {
        self.model.set_tileset(tileset);
    }

    pub fn polygon(&self) -> Polygon {
        self.model.polygon()
    }

    pub fn write_to_buffer(&self, ctx: &Context) {
        self.model.write_to_buffer(ctx);
    }
}
