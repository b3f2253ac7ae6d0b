use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use teapot_derive::ShaderData;
use wgpu::{
    BindingResource, Buffer, BufferDescriptor, BufferUsages, Device, Queue, TextureView,
};

use crate::render::ShaderData;

pub struct RenderTarget<'a> {
    pub color: &'a TextureView,
    pub depth: &'a TextureView,
}

/// A fixed-size uniform buffer holding exactly one `T`.
pub struct UniformBuffer<T> {
    buffer: Buffer,
    _marker: PhantomData<T>,
}

impl<T: ShaderData> UniformBuffer<T> {
    pub fn new(device: &Device, label: &str) -> Self {
        Self {
            buffer: device.create_buffer(&BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<T>() as u64,
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn write(&self, queue: &Queue, data: &T) {
        queue.write_buffer(&self.buffer, 0, data.as_bytes());
    }

    #[inline]
    pub fn binding(&self) -> BindingResource {
        self.buffer.as_entire_binding()
    }
}

#[derive(ShaderData, Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

#[derive(ShaderData, Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct GpuCamera {
    pub view: Mat4,
    pub proj: Mat4,
    pub eye: Vec4,
}

#[derive(ShaderData, Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct GpuLight {
    pub position: Vec4,
    pub color: Vec4,
}

#[derive(ShaderData, Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct GpuObject {
    pub world: Mat4,
    /// Inverse transpose of `world`, the world matrix is not rigid.
    pub normal: Mat4,
}

impl GpuObject {
    /// A singular `world` (e.g. a zero scale component) has no inverse; its
    /// normals fall back to the identity instead of NaN.
    pub fn new(world: Mat4) -> Self {
        let normal = if world.determinant() != 0. {
            world.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self { world, normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_wgsl() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<GpuCamera>(), 144);
        assert_eq!(std::mem::size_of::<GpuLight>(), 32);
        assert_eq!(std::mem::size_of::<GpuObject>(), 128);
        assert_eq!(GpuLight::min_binding_size().map(|s| s.get()), Some(32));
    }

    #[test]
    fn normal_matrix_undoes_stretch() {
        let object = GpuObject::new(Mat4::from_scale(Vec3::new(1., 2., 1.)));
        let n = object.normal * Vec4::Y;
        assert!(n.abs_diff_eq(Vec4::new(0., 0.5, 0., 0.), 1e-6));
    }

    #[test]
    fn flattened_world_keeps_finite_normals() {
        let object = GpuObject::new(Mat4::from_scale(Vec3::new(1., 0., 1.)));
        assert!(object.normal.is_finite());
        assert_eq!(object.normal, Mat4::IDENTITY);
    }
}
