//! Drawable models: geometry plus the per-draw state of the standard pass.
//!
//! [`DrawState`] is the CPU side (transform, tint, fill, texture flags, tileset)
//! and can be used without a GPU. [`Model`] pairs it with a [`Mesh`], an
//! optional [`Texture`] and the uniform buffer of bind group 1.

use std::ops::{Deref, DerefMut};

use cgmath::{Deg, Matrix4, SquareMatrix, Vector2, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        color::Color,
        mesh::{Mesh, MeshData, Primitive},
        polygon::Polygon,
        texture::Texture,
        tileset::Tileset,
    },
    error::TintError,
    pipelines::standard::DrawUniform,
};

/// Transform, tint and flags for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    matrix: Matrix4<f32>,
    color: Color,
    fill_color: bool,
    texture_enabled: bool,
    pub(crate) has_texture: bool,
    tileset: Option<Tileset>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            matrix: Matrix4::identity(),
            color: Color::WHITE,
            fill_color: false,
            texture_enabled: true,
            has_texture: false,
            tileset: None,
        }
    }
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Matrix4<f32>) {
        self.matrix = matrix;
    }

    pub fn reset(&mut self) {
        self.matrix = Matrix4::identity();
    }

    // Every op below is applied in the model's own space.

    pub fn translate(&mut self, d: Vector3<f32>) {
        self.matrix = self.matrix * Matrix4::from_translation(d);
    }

    pub fn translate_2d(&mut self, d: Vector2<f32>) {
        self.translate(d.extend(0.0));
    }

    pub fn scale(&mut self, s: Vector3<f32>) {
        self.matrix = self.matrix * Matrix4::from_nonuniform_scale(s.x, s.y, s.z);
    }

    pub fn scale_uniform(&mut self, s: f32) {
        self.matrix = self.matrix * Matrix4::from_scale(s);
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.matrix = self.matrix * Matrix4::from_angle_x(Deg(degrees));
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.matrix = self.matrix * Matrix4::from_angle_y(Deg(degrees));
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.matrix = self.matrix * Matrix4::from_angle_z(Deg(degrees));
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn fill_color(&self) -> bool {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, fill: bool) {
        self.fill_color = fill;
    }

    /// True only when a texture is attached and sampling is enabled.
    pub fn texture_enabled(&self) -> bool {
        self.has_texture && self.texture_enabled
    }

    pub fn set_texture_enabled(&mut self, enabled: bool) {
        self.texture_enabled = enabled;
    }

    pub fn tileset(&self) -> Option<&Tileset> {
        self.tileset.as_ref()
    }

    pub fn tileset_mut(&mut self) -> Option<&mut Tileset> {
        self.tileset.as_mut()
    }

    pub fn set_tileset(&mut self, tileset: Option<Tileset>) {
        self.tileset = tileset;
    }

    /// Packs the state into the uniform of bind group 1.
    pub fn uniform(&self) -> DrawUniform {
        let textured = self.texture_enabled();
        let tile = self.tileset.filter(|_| textured);
        let (tile_size, tile_position) = match tile {
            Some(t) => (t.uv_size().into(), t.position().into()),
            None => ([1.0, 1.0], [0.0, 0.0]),
        };

        DrawUniform {
            model: self.matrix.into(),
            color: self.color.to_array(),
            tile_size,
            tile_position,
            using_texture: textured as u32,
            fill_color: self.fill_color as u32,
            tiled: tile.is_some() as u32,
            _padding: 0,
        }
    }
}

/// A mesh with its draw state and GPU resources.
///
/// Derefs to [`DrawState`] for the transform and color operations.
#[derive(Debug)]
pub struct Model {
    state: DrawState,
    mesh: Mesh,
    texture: Option<Texture>,
    texture_bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    device: wgpu::Device,
    texture_layout: wgpu::BindGroupLayout,
}

impl Model {
    pub fn new(ctx: &Context, data: MeshData) -> Result<Self, TintError> {
        Self::with_label(ctx, "Model", data)
    }

    pub fn with_label(ctx: &Context, label: &str, data: MeshData) -> Result<Self, TintError> {
        let mesh = Mesh::new(&ctx.device, label, data)?;
        let state = DrawState::default();

        let uniform_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Draw Buffer")),
                contents: bytemuck::cast_slice(&[state.uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &ctx.layouts.draw,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("draw_bind_group"),
        });

        Ok(Self {
            state,
            mesh,
            texture: None,
            texture_bind_group: None,
            uniform_buffer,
            uniform_bind_group,
            device: ctx.device.clone(),
            texture_layout: ctx.layouts.texture.clone(),
        })
    }

    pub fn from_primitive(ctx: &Context, primitive: Primitive) -> Result<Self, TintError> {
        Self::with_label(ctx, &format!("{primitive:?}"), primitive.mesh_data())
    }

    /// A textured unit quad.
    pub fn from_texture(ctx: &Context, texture: Texture) -> Result<Self, TintError> {
        let mut model = Self::from_primitive(ctx, Primitive::Quad)?;
        model.set_texture(Some(texture));
        Ok(model)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replaces the geometry. On error the current mesh is kept.
    pub fn set_mesh_data(&mut self, ctx: &Context, data: MeshData) -> Result<(), TintError> {
        self.mesh = Mesh::new(&ctx.device, &self.mesh.name, data)?;
        Ok(())
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.texture_bind_group = texture
            .as_ref()
            .map(|t| t.bind_group(&self.device, &self.texture_layout));
        self.state.has_texture = texture.is_some();
        self.texture = texture;
    }

    pub fn draw_uniform(&self) -> DrawUniform {
        self.state.uniform()
    }

    /// The XY outline of the mesh in world space.
    pub fn polygon(&self) -> Polygon {
        let positions: Vec<Vector3<f32>> = self
            .mesh
            .data()
            .vertices
            .iter()
            .map(|v| v.position.into())
            .collect();
        Polygon::from_transformed(&positions, &self.state.matrix())
    }

    pub fn write_to_buffer(&self, ctx: &Context) {
        ctx.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.draw_uniform()]),
        );
    }

    /// Records the draw. `fallback` is bound as group 2 when no texture is attached.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, fallback: &wgpu::BindGroup) {
        render_pass.set_bind_group(1, &self.uniform_bind_group, &[]);
        render_pass.set_bind_group(2, self.texture_bind_group.as_ref().unwrap_or(fallback), &[]);
        self.mesh.draw(render_pass);
    }
}

impl Deref for Model {
    type Target = DrawState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for Model {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Transform, Vector4};

    use super::*;

    const EPS: f32 = 1e-5;

    fn apply(state: &DrawState, p: Vector3<f32>) -> Vector3<f32> {
        let v = state.matrix() * Vector4::new(p.x, p.y, p.z, 1.0);
        Vector3::new(v.x, v.y, v.z)
    }

    #[test]
    fn ops_compose_in_local_space() {
        let mut state = DrawState::new();
        state.translate(Vector3::new(2.0, 0.0, 0.0));
        state.scale_uniform(3.0);
        // the scale acts before the translation
        let p = apply(&state, Vector3::new(1.0, 0.0, 0.0));
        assert!((p.x - 5.0).abs() < EPS && p.y.abs() < EPS);

        state.reset();
        state.rotate_z(90.0);
        state.translate_2d(Vector2::new(1.0, 0.0));
        let p = apply(&state, Vector3::new(0.0, 0.0, 0.0));
        assert!(p.x.abs() < EPS && (p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn nonuniform_scale_and_reset() {
        let mut state = DrawState::new();
        state.scale(Vector3::new(2.0, 0.5, 1.0));
        let p = state.matrix().transform_point(cgmath::Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, cgmath::Point3::new(2.0, 0.5, 1.0));
        state.reset();
        assert_eq!(state.matrix(), Matrix4::identity());
    }

    #[test]
    fn defaults_are_white_and_unfilled() {
        let state = DrawState::new();
        assert_eq!(state.color(), Color::WHITE);
        assert!(!state.fill_color());
        assert!(!state.texture_enabled());
        assert_eq!(state.uniform(), DrawUniform::default());
    }

    #[test]
    fn texture_flag_needs_a_texture() {
        let mut state = DrawState::new();
        state.set_texture_enabled(true);
        assert!(!state.texture_enabled());
        state.has_texture = true;
        assert!(state.texture_enabled());
        state.set_texture_enabled(false);
        assert!(!state.texture_enabled());
        assert_eq!(state.uniform().using_texture, 0);
    }

    #[test]
    fn tileset_only_applies_while_textured() {
        let mut tiles = Tileset::new((32, 32), 16.0, 16.0);
        tiles.set_tile(1, 0);
        let mut state = DrawState::new();
        state.set_tileset(Some(tiles));
        assert_eq!(state.uniform().tiled, 0);
        assert_eq!(state.uniform().tile_size, [1.0, 1.0]);

        state.has_texture = true;
        let uniform = state.uniform();
        assert_eq!(uniform.tiled, 1);
        assert_eq!(uniform.tile_size, [0.5, 0.5]);
        assert_eq!(uniform.tile_position, [1.0, 0.0]);
    }

    #[test]
    fn uniform_carries_color_and_fill() {
        let mut state = DrawState::new();
        state.set_color(Color::RED.with_alpha(0.5));
        state.set_fill_color(true);
        state.translate(Vector3::new(0.0, 0.0, -1.0));
        let uniform = state.uniform();
        assert_eq!(uniform.color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(uniform.fill_color, 1);
        assert_eq!(uniform.model[3], [0.0, 0.0, -1.0, 1.0]);
    }

    #[test]
    fn baked_polygon_follows_the_transform() {
        let mut state = DrawState::new();
        state.translate(Vector3::new(1.0, 0.0, 0.0));
        state.scale_uniform(2.0);
        let positions: Vec<Vector3<f32>> = Primitive::Quad
            .mesh_data()
            .vertices
            .iter()
            .map(|v| v.position.into())
            .collect();
        let poly = Polygon::from_transformed(&positions, &state.matrix());
        let (min, max) = poly.bounds().unwrap();
        assert_eq!(min, Vector2::new(0.0, -1.0));
        assert_eq!(max, Vector2::new(2.0, 1.0));
    }
}
