use wgpu::{
    AddressMode, BindGroup, BindGroupDescriptor, BindGroupEntry, BindingResource, FilterMode,
    RenderPass, Sampler, SamplerDescriptor, Texture, TextureView, TextureViewDescriptor,
};

use crate::{
    render::{
        mesh::Image,
        program::{Program, MATERIAL_GROUP},
    },
    WgpuRenderer,
};

/// A texture sampled by the program during the draw.
pub struct Material {
    _texture: Texture,
    _view: TextureView,
    _sampler: Sampler,
    bind_group: BindGroup,
}

impl Material {
    pub fn new(renderer: &WgpuRenderer, program: &Program, image: &Image) -> Self {
        let texture = image.to_texture(renderer);
        let view = texture.create_view(&TextureViewDescriptor::default());
        let sampler = renderer.device.create_sampler(&SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = renderer.device.create_bind_group(&BindGroupDescriptor {
            label: Some("material_bind_group"),
            layout: program.material_layout(),
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(&view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::debug!("Material created ({}x{}).", image.width(), image.height());

        Self {
            _texture: texture,
            _view: view,
            _sampler: sampler,
            bind_group,
        }
    }

    #[inline]
    pub fn bind(&self, pass: &mut RenderPass<'_>) {
        pass.set_bind_group(MATERIAL_GROUP, &self.bind_group, &[]);
    }
}
