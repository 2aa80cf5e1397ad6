//! Camera, projection and the camera uniform (bind group 0 of the standard pass).
//!
//! Matrices are built the OpenGL way (clip-space depth in `[-1, 1]`) and
//! corrected for wgpu when they are packed into a [`CameraUniform`].

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector2, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::ray::Ray;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const PERSPECTIVE_NEAR: f32 = 1.0;
pub const PERSPECTIVE_FAR: f32 = 50.0;
pub const ORTHO_NEAR: f32 = 1.0;
pub const ORTHO_FAR: f32 = 10.0;
/// Half the height of the orthographic view volume, in world units.
pub const ORTHO_HALF_HEIGHT: f32 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

/// A look-at camera.
///
/// The view always uses +Y as up. `aspect` is width / height of the target and is
/// kept current by [`Camera::resize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub projection: ProjectionKind,
    pub fov: Deg<f32>,
    aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, 0.0))
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            position,
            target,
            projection: ProjectionKind::Perspective,
            fov: Deg(45.0),
            aspect: 1.0,
        }
    }

    pub fn orthographic(mut self) -> Self {
        self.projection = ProjectionKind::Orthographic;
        self
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio from a target size. A zero height is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }

    pub fn projection(&self) -> Matrix4<f32> {
        match self.projection {
            ProjectionKind::Perspective => {
                cgmath::perspective(self.fov, self.aspect, PERSPECTIVE_NEAR, PERSPECTIVE_FAR)
            }
            ProjectionKind::Orthographic => cgmath::ortho(
                -ORTHO_HALF_HEIGHT * self.aspect,
                ORTHO_HALF_HEIGHT * self.aspect,
                -ORTHO_HALF_HEIGHT,
                ORTHO_HALF_HEIGHT,
                ORTHO_NEAR,
                ORTHO_FAR,
            ),
        }
    }

    /// Builds a picking ray from a position in normalised device coordinates.
    ///
    /// The ray is built as if the camera looked down -Z; the target is ignored.
    /// Returns `None` outside `[-1, 1]` on either axis.
    pub fn ray_from_screen(&self, ndc: Vector2<f32>) -> Option<Ray> {
        if !(-1.0..=1.0).contains(&ndc.x) || !(-1.0..=1.0).contains(&ndc.y) {
            return None;
        }

        match self.projection {
            ProjectionKind::Orthographic => {
                let offset = Vector3::new(
                    ndc.x * ORTHO_HALF_HEIGHT * self.aspect,
                    ndc.y * ORTHO_HALF_HEIGHT,
                    0.0,
                );
                Ray::new(self.position + offset, -Vector3::unit_z())
            }
            ProjectionKind::Perspective => {
                let half: Rad<f32> = (self.fov / 2.0).into();
                let z_plane = 1.0 / half.0.tan();
                let r = Vector3::new(ndc.x * self.aspect, ndc.y, -z_plane);
                Ray::new(self.position + r, r.normalize())
            }
        }
    }
}

/// Camera matrices as the shader sees them.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            projection: (OPENGL_TO_WGPU_MATRIX * camera.projection()).into(),
            view: camera.view().into(),
        }
    }
}

/// GPU side of the camera: the uniform buffer and its bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, camera: Camera) -> Self {
        let uniform = CameraUniform::from_camera(&camera);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            uniform,
            buffer,
            bind_group,
        }
    }

    /// Repacks the uniform from `camera` and uploads it.
    pub fn write(&mut self, queue: &wgpu::Queue) {
        self.uniform = CameraUniform::from_camera(&self.camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
