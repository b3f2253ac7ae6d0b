//! The scene: one program, one camera, one light, one textured object.
//!
//! A [`Scene`] is owned by the host and driven from a single thread:
//! [`Scene::setup`] once, [`Scene::screen`] on every viewport change and
//! [`Scene::update`] once per frame. Both mutating entry points take
//! `&mut self`, so concurrent calls cannot compile.

use wgpu::{
    Color, CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment,
    RenderPassDepthStencilAttachment, RenderPassDescriptor, StoreOp, TextureFormat,
};

use crate::{
    asset::AssetSource,
    config::SceneConfig,
    render::{
        mesh::{Image, Mesh},
        program::Program,
        resource::RenderTarget,
        shader::{Shader, ShaderStage},
    },
    util::ext::SrgbExt,
    SceneResult, WgpuRenderer,
};

pub mod entity;
pub mod material;
pub mod object;
pub mod state;

pub use state::SceneState;

use self::{material::Material, object::Object};

pub struct Scene {
    pub state: SceneState,
    program: Program,
    object: Object,
    clear_color: Color,
}

impl Scene {
    /// Builds every resource of the scene. Any failure aborts the whole
    /// setup; nothing partially built is returned.
    pub fn setup(
        renderer: &WgpuRenderer,
        assets: &dyn AssetSource,
        config: &SceneConfig,
        color_format: TextureFormat,
    ) -> SceneResult<Self> {
        let vertex = Shader::load(assets, &config.vertex_shader, ShaderStage::Vertex)?;
        let fragment = Shader::load(assets, &config.fragment_shader, ShaderStage::Fragment)?;
        let program = Program::link(renderer, &vertex, &fragment, color_format)?;

        let state = SceneState::new(config);

        let image = Image::from_bytes(&config.texture, &assets.load(&config.texture)?)?;
        let material = Material::new(renderer, &program, &image);

        let mesh = Mesh::from_obj(&config.mesh, &assets.load(&config.mesh)?)?;
        let object = Object::new(
            renderer,
            &program,
            material,
            &mesh,
            config.world.compute_matrix(),
        );

        log::info!(
            "Scene set up: mesh `{}` ({} triangles), texture `{}`, world transform {}.",
            config.mesh,
            mesh.indices().len() / 3,
            config.texture,
            if config.world.enabled { "on" } else { "off" },
        );

        Ok(Self {
            state,
            program,
            object,
            clear_color: config.clear_color.to_wgpu_color(),
        })
    }

    /// Reacts to a surface resize. Invalid sizes are rejected and leave the
    /// scene untouched.
    pub fn screen(&mut self, width: i32, height: i32) -> SceneResult<()> {
        self.state.screen(width, height)?;
        log::debug!(
            "Viewport {width}x{height}, aspect {:.3}.",
            self.state.camera.aspect()
        );
        Ok(())
    }

    /// Advances the animation by `delta` seconds and draws one frame into
    /// `target`.
    pub fn update(&mut self, renderer: &WgpuRenderer, target: &RenderTarget, delta: f32) {
        self.state.advance(delta);

        self.state.camera.upload(&renderer.queue, &self.program);
        self.state.light.upload(&renderer.queue, &self.program);
        self.object.upload(&renderer.queue);

        let mut encoder = renderer
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: target.color,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: target.depth,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.),
                        store: StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.program.bind(&mut pass);
            self.object.draw(&mut pass);
        }

        renderer.queue.submit(Some(encoder.finish()));
    }
}
