use cgmath::Vector2;

use crate::{data_structures::texture::Texture, shading};

/// Selects one cell of a texture laid out as a grid of equally sized tiles.
///
/// Tile sizes are stored in UV units, so a 16 px tile on a 64 px texture has a
/// width of `0.25`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tileset {
    tile_size: Vector2<f32>,
    x: u32,
    y: u32,
}

impl Tileset {
    /// `texture_size` and the tile size are in pixels. A zero texture side
    /// yields a full-width tile on that axis.
    pub fn new(texture_size: (u32, u32), tile_width: f32, tile_height: f32) -> Self {
        let per_axis = |tile: f32, texture: u32| {
            if texture == 0 {
                1.0
            } else {
                tile / texture as f32
            }
        };
        Self {
            tile_size: Vector2::new(
                per_axis(tile_width, texture_size.0),
                per_axis(tile_height, texture_size.1),
            ),
            x: 0,
            y: 0,
        }
    }

    pub fn for_texture(texture: &Texture, tile_width: f32, tile_height: f32) -> Self {
        Self::new(texture.size, tile_width, tile_height)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn set_tile(&mut self, x: u32, y: u32) {
        self.x = x;
        self.y = y;
    }

    /// Size of one tile in UV units.
    pub fn uv_size(&self) -> Vector2<f32> {
        self.tile_size
    }

    pub fn set_uv_size(&mut self, size: Vector2<f32>) {
        self.tile_size = size;
    }

    /// The tile position as the shader's `tile_position` uniform.
    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x as f32, self.y as f32)
    }

    /// UV of the current tile's top-left corner.
    pub fn uv_offset(&self) -> Vector2<f32> {
        Vector2::new(self.tile_size.x * self.x as f32, self.tile_size.y * self.y as f32)
    }

    /// Maps a mesh UV into the current tile.
    pub fn map_uv(&self, uv: Vector2<f32>) -> Vector2<f32> {
        shading::tile_uv(uv, self.tile_size, self.position())
    }
}
