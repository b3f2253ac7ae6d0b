use glam::Mat4;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, Buffer, IndexFormat, Queue, RenderPass,
};

use crate::{
    render::{
        mesh::Mesh,
        program::{Program, OBJECT_GROUP},
        resource::{GpuObject, UniformBuffer},
    },
    scene::material::Material,
    WgpuRenderer,
};

/// The drawable: an indexed mesh, its material and its world matrix.
pub struct Object {
    pub world_matrix: Mat4,
    material: Material,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    uniform: UniformBuffer<GpuObject>,
    bind_group: BindGroup,
}

impl Object {
    pub fn new(
        renderer: &WgpuRenderer,
        program: &Program,
        material: Material,
        mesh: &Mesh,
        world_matrix: Mat4,
    ) -> Self {
        let (vertex_buffer, index_buffer) = mesh.to_buffers(renderer);
        let uniform = UniformBuffer::<GpuObject>::new(&renderer.device, "object_uniform");
        let bind_group = renderer.device.create_bind_group(&BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: program.object_layout(),
            entries: &[BindGroupEntry {
                binding: 0,
                resource: uniform.binding(),
            }],
        });

        Self {
            world_matrix,
            material,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            uniform,
            bind_group,
        }
    }

    #[inline]
    pub fn upload(&self, queue: &Queue) {
        self.uniform.write(queue, &GpuObject::new(self.world_matrix));
    }

    /// Binds material and world matrix and issues the indexed draw. Expects
    /// the program to be bound already.
    pub fn draw(&self, pass: &mut RenderPass<'_>) {
        pass.set_bind_group(OBJECT_GROUP, &self.bind_group, &[]);
        self.material.bind(pass);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
