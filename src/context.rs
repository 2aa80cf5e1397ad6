//! The GPU context: device, queue, render target and the standard pipeline.
//!
//! A context either drives a window surface ([`Context::new`]) or renders into
//! an offscreen texture that can be read back ([`Context::headless`]).

use std::{iter, sync::Arc, time::Duration};

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraResources},
    config::ContextConfig,
    data_structures::{color::Color, model::Model, texture::Texture},
    error::TintError,
    pipelines::standard::{StandardLayouts, mk_standard_pipeline},
    render::Render,
};

/// Format of offscreen targets. Not sRGB, so read-back bytes are the shader output.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

#[derive(Debug)]
pub struct SurfaceTarget {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
}

#[derive(Debug)]
pub enum Target {
    Surface(SurfaceTarget),
    Offscreen(wgpu::Texture),
}

#[derive(Debug)]
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub layouts: StandardLayouts,
    pub camera: CameraResources,
    pub clear_colour: Color,
    pub(crate) depth_texture: Texture,
    target: Target,
    format: wgpu::TextureFormat,
    size: (u32, u32),
    pipeline: wgpu::RenderPipeline,
    white: wgpu::BindGroup,
}

impl Context {
    /// Creates a context that presents to `window`.
    pub async fn new(window: Arc<Window>, config: ContextConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        let (device, queue) = request_device(&adapter).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format =
            surface_format(&surface_caps.formats).context("surface reports no supported formats")?;
        let present_mode = if surface_caps.present_modes.contains(&config.present_mode) {
            config.present_mode
        } else {
            log::warn!(
                "present mode {:?} not supported, falling back to Fifo",
                config.present_mode
            );
            wgpu::PresentMode::Fifo
        };
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let target = Target::Surface(SurfaceTarget {
            window,
            surface,
            config: surface_config,
        });
        Ok(Self::assemble(device, queue, target, format, (width, height), config))
    }

    /// Creates a context that renders into an offscreen texture of the given size.
    pub async fn headless(width: u32, height: u32, config: ContextConfig) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            return Err(TintError::ZeroSize.into());
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        let (device, queue) = request_device(&adapter).await?;

        let texture = offscreen_texture(&device, width, height);
        Ok(Self::assemble(
            device,
            queue,
            Target::Offscreen(texture),
            OFFSCREEN_FORMAT,
            (width, height),
            config,
        ))
    }

    fn assemble(
        device: wgpu::Device,
        queue: wgpu::Queue,
        target: Target,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        config: ContextConfig,
    ) -> Self {
        let layouts = StandardLayouts::new(&device);
        let pipeline = mk_standard_pipeline(&device, format, &layouts);

        let mut camera = config.camera;
        camera.resize(size.0, size.1);
        let camera = CameraResources::new(&device, &layouts.camera, camera);

        let white = Texture::white(&device, &queue).bind_group(&device, &layouts.texture);
        let depth_texture = Texture::create_depth_texture(&device, [size.0, size.1], "depth_texture");
        log::info!("context ready: {}x{} {:?}", size.0, size.1, format);

        Self {
            device,
            queue,
            layouts,
            camera,
            clear_colour: config.clear_colour,
            depth_texture,
            target,
            format,
            size,
            pipeline,
            white,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn window(&self) -> Option<&Arc<Window>> {
        match &self.target {
            Target::Surface(s) => Some(&s.window),
            Target::Offscreen(_) => None,
        }
    }

    pub fn is_offscreen(&self) -> bool {
        matches!(self.target, Target::Offscreen(_))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera.camera
    }

    /// The camera is uploaded at the start of every [`Context::render`].
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera.camera
    }

    /// Resizes the target, the depth buffer and the camera aspect. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        self.size = (width, height);
        match &mut self.target {
            Target::Surface(s) => {
                s.config.width = width;
                s.config.height = height;
                s.surface.configure(&self.device, &s.config);
            }
            Target::Offscreen(texture) => {
                *texture = offscreen_texture(&self.device, width, height);
            }
        }
        self.depth_texture =
            Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        self.camera.camera.resize(width, height);
    }

    /// Draws every model of `renders` in order and presents when targeting a surface.
    ///
    /// A lost or outdated surface is reconfigured and a timed-out one skips the
    /// frame; both return `Ok` without drawing.
    pub fn render(&mut self, renders: &[Render<'_>]) -> anyhow::Result<()> {
        self.camera.write(&self.queue);
        let models: Vec<&Model> = renders.iter().flat_map(|r| r.flatten()).collect();
        for model in &models {
            model.write_to_buffer(self);
        }

        let (frame, view) = match &self.target {
            Target::Surface(s) => match s.surface.get_current_texture() {
                Ok(frame) => {
                    let view = frame
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());
                    (Some(frame), view)
                }
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost or outdated, reconfiguring");
                    s.surface.configure(&self.device, &s.config);
                    return Ok(());
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("surface timed out, skipping frame");
                    return Ok(());
                }
                Err(e) => return Err(anyhow::anyhow!("unable to acquire a surface texture: {e}")),
            },
            Target::Offscreen(texture) => (
                None,
                texture.create_view(&wgpu::TextureViewDescriptor::default()),
            ),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera.bind_group, &[]);
            for model in &models {
                model.draw(&mut render_pass, &self.white);
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        if let Some(frame) = frame {
            frame.present();
        }
        log::trace!("rendered {} models", models.len());
        Ok(())
    }

    /// Copies the offscreen target into an image. Fails with
    /// [`TintError::NotOffscreen`] for window targets.
    pub async fn read_pixels(&self) -> anyhow::Result<image::RgbaImage> {
        let Target::Offscreen(texture) = &self.target else {
            return Err(TintError::NotOffscreen.into());
        };
        let (width, height) = self.size;
        let unpadded = 4 * width;
        let padded = padded_bytes_per_row(width);

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: padded as wgpu::BufferAddress * height as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(iter::once(encoder.finish()));

        let pixels = {
            let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
            let buffer_slice = output_buffer.slice(..);
            buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
                let _ = tx.send(result);
            });
            self.device
                .poll(wgpu::PollType::Wait {
                    submission_index: None,
                    timeout: Some(Duration::from_secs(3)),
                })
                .context("device poll failed during readback")?;
            rx.receive()
                .await
                .context("readback channel closed")?
                .context("failed to map the readback buffer")?;

            let data = buffer_slice.get_mapped_range();
            strip_row_padding(&data, unpadded as usize, padded as usize)
        };
        output_buffer.unmap();

        image::RgbaImage::from_raw(width, height, pixels).context("readback has the wrong size")
    }
}

/// Surfaces store the shader output unencoded, the same as offscreen targets.
fn surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().map(|f| f.remove_srgb_suffix()))
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
    let info = adapter.get_info();
    log::info!("using adapter {} ({:?})", info.name, info.backend);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("tint-ngin device"),
            required_features: wgpu::Features::empty(),
            // WebGL doesn't support all of wgpu's features
            required_limits: if cfg!(target_arch = "wasm32") {
                wgpu::Limits::downlevel_webgl2_defaults()
            } else {
                wgpu::Limits::default()
            },
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

fn offscreen_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OFFSCREEN_FORMAT,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

/// Rows copied out of a texture must be a multiple of 256 bytes.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (4 * width).div_ceil(align) * align
}

pub(crate) fn strip_row_padding(data: &[u8], unpadded: usize, padded: usize) -> Vec<u8> {
    data.chunks(padded)
        .flat_map(|row| &row[..unpadded.min(row.len())])
        .copied()
        .collect()
}
