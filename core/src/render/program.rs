use std::borrow::Cow;

use wgpu::{
    vertex_attr_array, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType, BufferBindingType,
    ColorTargetState, ColorWrites, CompareFunction, DepthStencilState, ErrorFilter, FragmentState,
    MultisampleState, PipelineCompilationOptions, PipelineLayoutDescriptor, PrimitiveState,
    RenderPass, RenderPipeline, RenderPipelineDescriptor, SamplerBindingType,
    ShaderModuleDescriptor, ShaderSource, ShaderStages, TextureFormat, TextureSampleType,
    TextureViewDimension, VertexBufferLayout, VertexState, VertexStepMode,
};

use crate::{
    render::{
        resource::{GpuCamera, GpuLight, GpuObject, UniformBuffer, Vertex},
        shader::{Shader, ShaderStage},
        ShaderData,
    },
    util::DEPTH_FORMAT,
    SceneError, SceneResult, WgpuRenderer,
};

pub const FRAME_GROUP: u32 = 0;
pub const OBJECT_GROUP: u32 = 1;
pub const MATERIAL_GROUP: u32 = 2;

/// Vertex and fragment stage linked into one render pipeline, together with
/// the per-frame camera and light uniforms every draw reads.
pub struct Program {
    pipeline: RenderPipeline,
    object_layout: BindGroupLayout,
    material_layout: BindGroupLayout,
    camera: UniformBuffer<GpuCamera>,
    light: UniformBuffer<GpuLight>,
    frame_bind_group: BindGroup,
}

fn uniform_entry<T: ShaderData>(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: T::min_binding_size(),
        },
        count: None,
    }
}

impl Program {
    pub fn link(
        renderer: &WgpuRenderer,
        vertex: &Shader,
        fragment: &Shader,
        color_format: TextureFormat,
    ) -> SceneResult<Self> {
        for (shader, expected) in [
            (vertex, ShaderStage::Vertex),
            (fragment, ShaderStage::Fragment),
        ] {
            if shader.stage() != expected {
                return Err(SceneError::ProgramLinkFailed(format!(
                    "`{}` is a {:?} shader, expected {expected:?}",
                    shader.name(),
                    shader.stage()
                )));
            }
        }

        let device = &renderer.device;

        let frame_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("frame_layout"),
            entries: &[
                uniform_entry::<GpuCamera>(0, ShaderStages::VERTEX_FRAGMENT),
                uniform_entry::<GpuLight>(1, ShaderStages::FRAGMENT),
            ],
        });
        let object_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("object_layout"),
            entries: &[uniform_entry::<GpuObject>(0, ShaderStages::VERTEX)],
        });
        let material_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("material_layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: TextureSampleType::Float { filterable: true },
                        view_dimension: TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("program_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &material_layout],
            push_constant_ranges: &[],
        });

        // Interface mismatches between the stages only surface as validation
        // errors of the pipeline.
        device.push_error_scope(ErrorFilter::Validation);

        let vert_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some(vertex.name()),
            source: ShaderSource::Naga(Cow::Owned(vertex.module().clone())),
        });
        let frag_module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some(fragment.name()),
            source: ShaderSource::Naga(Cow::Owned(fragment.module().clone())),
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("program"),
            layout: Some(&layout),
            vertex: VertexState {
                module: &vert_module,
                entry_point: vertex.entry_point(),
                compilation_options: PipelineCompilationOptions::default(),
                buffers: &[VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: VertexStepMode::Vertex,
                    attributes: &vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2
                    ],
                }],
            },
            fragment: Some(FragmentState {
                module: &frag_module,
                entry_point: fragment.entry_point(),
                compilation_options: PipelineCompilationOptions::default(),
                targets: &[Some(ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: ColorWrites::ALL,
                })],
            }),
            primitive: PrimitiveState::default(),
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(SceneError::ProgramLinkFailed(err.to_string()));
        }

        let camera = UniformBuffer::<GpuCamera>::new(device, "camera_uniform");
        let light = UniformBuffer::<GpuLight>::new(device, "light_uniform");
        let frame_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: camera.binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: light.binding(),
                },
            ],
        });

        log::info!(
            "Linked program `{}` + `{}`.",
            vertex.name(),
            fragment.name()
        );

        Ok(Self {
            pipeline,
            object_layout,
            material_layout,
            camera,
            light,
            frame_bind_group,
        })
    }

    /// Makes this program the active pipeline of `pass`.
    pub fn bind(&self, pass: &mut RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(FRAME_GROUP, &self.frame_bind_group, &[]);
    }

    #[inline]
    pub fn object_layout(&self) -> &BindGroupLayout {
        &self.object_layout
    }

    #[inline]
    pub fn material_layout(&self) -> &BindGroupLayout {
        &self.material_layout
    }

    #[inline]
    pub fn camera_uniform(&self) -> &UniformBuffer<GpuCamera> {
        &self.camera
    }

    #[inline]
    pub fn light_uniform(&self) -> &UniformBuffer<GpuLight> {
        &self.light
    }
}
