use glam::{Mat4, Vec3};
use palette::Srgb;
use wgpu::Queue;

use crate::{
    render::{
        program::Program,
        resource::{GpuCamera, GpuLight},
    },
    util::ext::SrgbExt,
};

#[derive(Debug, Clone, Copy)]
pub struct PerspectiveProjection {
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 1.,
            near: 0.1,
            far: 1000.,
        }
    }
}

impl PerspectiveProjection {
    #[inline]
    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }
}

/// Camera looking from `eye` at `target`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: PerspectiveProjection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: PerspectiveProjection::default(),
        }
    }
}

impl Camera {
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.projection.aspect_ratio
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Writes view, projection and eye into the program's camera uniform.
    pub fn upload(&self, queue: &Queue, program: &Program) {
        program.camera_uniform().write(queue, &GpuCamera::from(self));
    }
}

impl From<&Camera> for GpuCamera {
    fn from(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix(),
            proj: camera.projection.compute_matrix(),
            eye: camera.eye.extend(1.),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: Srgb,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Srgb::new(1., 1., 1.),
        }
    }
}

impl Light {
    pub fn upload(&self, queue: &Queue, program: &Program) {
        program.light_uniform().write(queue, &GpuLight::from(self));
    }
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        Self {
            position: light.position.extend(1.),
            color: light.color.to_linear_vec4(),
        }
    }
}
