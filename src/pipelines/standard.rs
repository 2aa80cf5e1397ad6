use crate::{
    data_structures::{mesh::Vertex, texture::Texture},
    resources::texture::texture_layout,
};

pub const STANDARD_SHADER: &str = include_str!("standard.wgsl");

/// Per-draw uniform of the standard pass (bind group 1).
///
/// Flags are `0`/`1` as WGSL has no host-shareable `bool`. The layout matches the
/// `DrawUniform` struct in `standard.wgsl` (112 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub tile_size: [f32; 2],
    pub tile_position: [f32; 2],
    pub using_texture: u32,
    pub fill_color: u32,
    pub tiled: u32,
    pub _padding: u32,
}

impl Default for DrawUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        Self {
            model: cgmath::Matrix4::<f32>::identity().into(),
            color: [1.0; 4],
            tile_size: [1.0, 1.0],
            tile_position: [0.0, 0.0],
            using_texture: 0,
            fill_color: 0,
            tiled: 0,
            _padding: 0,
        }
    }
}

/// The three bind group layouts of the standard pass, in group order.
#[derive(Debug)]
pub struct StandardLayouts {
    pub camera: wgpu::BindGroupLayout,
    pub draw: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

impl StandardLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let camera = uniform_layout(device, wgpu::ShaderStages::VERTEX, "camera_bind_group_layout");
        let draw = uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            "draw_bind_group_layout",
        );
        let texture = texture_layout(device);
        Self {
            camera,
            draw,
            texture,
        }
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    visibility: wgpu::ShaderStages,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_standard_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &StandardLayouts,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Standard Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.draw, &layouts.texture],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Standard Shader"),
        source: wgpu::ShaderSource::Wgsl(STANDARD_SHADER.into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        &[Vertex::desc()],
        shader,
    )
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Standard Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // sprites are mirrored with negative scales
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            // equal depth lets later draws on the same plane win
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_uniform_matches_the_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DrawUniform>(), 112);
        assert_eq!(std::mem::size_of::<DrawUniform>() % 16, 0);
    }

    #[test]
    fn shader_declares_both_entry_points() {
        assert!(STANDARD_SHADER.contains("fn vs_main"));
        assert!(STANDARD_SHADER.contains("fn fs_main"));
        assert!(STANDARD_SHADER.contains("discard"));
    }

    #[test]
    fn default_draw_is_untextured_white() {
        let d = DrawUniform::default();
        assert_eq!(d.color, [1.0; 4]);
        assert_eq!((d.using_texture, d.fill_color, d.tiled), (0, 0, 0));
        assert_eq!(d.model[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
