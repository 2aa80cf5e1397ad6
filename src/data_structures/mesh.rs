//! Vertex layout, CPU-side geometry and the GPU buffers built from it.

use cgmath::Vector2;
use wgpu::util::DeviceExt;

use crate::error::TintError;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Unit-size shapes centred on the origin in the XY plane.
///
/// The V coordinate is flipped so image row 0 lands on the top edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangle,
    Quad,
}

impl Primitive {
    pub fn mesh_data(self) -> MeshData {
        match self {
            Primitive::Triangle => MeshData::fan(vec![
                Vertex::new([-0.5, -0.5, 0.0], [0.0, 1.0]),
                Vertex::new([0.0, 0.5, 0.0], [0.5, 0.0]),
                Vertex::new([0.5, -0.5, 0.0], [1.0, 1.0]),
            ]),
            Primitive::Quad => MeshData::fan(vec![
                Vertex::new([-0.5, -0.5, 0.0], [0.0, 1.0]),
                Vertex::new([-0.5, 0.5, 0.0], [0.0, 0.0]),
                Vertex::new([0.5, 0.5, 0.0], [1.0, 0.0]),
                Vertex::new([0.5, -0.5, 0.0], [1.0, 1.0]),
            ]),
        }
    }
}

/// Geometry before upload: a vertex list and a triangle list over it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// Triangulates a convex outline as a fan around its first vertex.
    pub fn fan(vertices: Vec<Vertex>) -> Self {
        let n = vertices.len().min(u16::MAX as usize + 1);
        let indices = (1..n.saturating_sub(1))
            .flat_map(|i| [0, i as u16, i as u16 + 1])
            .collect();
        Self { vertices, indices }
    }

    /// A fan over 2D points at z = 0, with UVs taken from the points'
    /// bounding box (V flipped).
    pub fn from_polygon(points: &[Vector2<f32>]) -> Self {
        let (min, max) = points.iter().fold(
            (
                Vector2::new(f32::INFINITY, f32::INFINITY),
                Vector2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            ),
            |(lo, hi), p| {
                (
                    Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );
        let extent = max - min;
        let unit = |v: f32, lo: f32, size: f32| if size > 0.0 { (v - lo) / size } else { 0.0 };

        let vertices = points
            .iter()
            .map(|p| {
                Vertex::new(
                    [p.x, p.y, 0.0],
                    [unit(p.x, min.x, extent.x), 1.0 - unit(p.y, min.y, extent.y)],
                )
            })
            .collect();
        Self::fan(vertices)
    }

    pub fn validate(&self) -> Result<(), TintError> {
        if self.vertices.is_empty() || self.indices.len() < 3 {
            return Err(TintError::EmptyMesh);
        }
        if self.vertices.len() > u16::MAX as usize + 1 {
            return Err(TintError::TooManyVertices(self.vertices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(TintError::IndexOutOfRange {
                index,
                vertices: self.vertices.len(),
            });
        }
        Ok(())
    }
}

impl From<Primitive> for MeshData {
    fn from(primitive: Primitive) -> Self {
        primitive.mesh_data()
    }
}

/// Uploaded geometry. The CPU copy is kept for collision outlines.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    data: MeshData,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, label: &str, data: MeshData) -> Result<Self, TintError> {
        data.validate()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!(
            "mesh {label}: {} vertices, {} indices",
            data.vertices.len(),
            data.indices.len()
        );

        Ok(Self {
            name: label.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
            data,
        })
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
    }
}
