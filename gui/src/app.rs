use std::{sync::Arc, time::Instant};

use glam::UVec2;
use teapot_core::{
    asset::DirAssetSource,
    config::SceneConfig,
    render::resource::RenderTarget,
    scene::Scene,
    util::create_depth_target,
    wgpu::{
        Instance, PresentMode, Surface, SurfaceConfiguration, SurfaceError, Texture, TextureView,
        TextureViewDescriptor,
    },
    SceneError, SceneResult, WgpuRenderer,
};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes, WindowId},
};

const INITIAL_SIZE: UVec2 = UVec2::new(1280, 720);

/// Logs the average frame time about once per second.
struct FrameCounter {
    last_printed_instant: Instant,
    frame_count: u32,
}

impl FrameCounter {
    fn new() -> Self {
        Self {
            last_printed_instant: Instant::now(),
            frame_count: 0,
        }
    }

    fn tick(&mut self) {
        self.frame_count += 1;
        let new_instant = Instant::now();
        let elapsed_secs = (new_instant - self.last_printed_instant).as_secs_f32();
        if elapsed_secs > 1.0 {
            let elapsed_ms = elapsed_secs * 1000.0;
            let frame_time = elapsed_ms / self.frame_count as f32;
            let fps = self.frame_count as f32 / elapsed_secs;
            log::info!("Frame time {:.2}ms ({:.1} FPS)", frame_time, fps);

            self.last_printed_instant = new_instant;
            self.frame_count = 0;
        }
    }
}

/// Everything that only exists while the window does.
struct Graphics {
    window: Arc<Window>,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    renderer: WgpuRenderer,
    depth: (Texture, TextureView),
    scene: Scene,
    last_frame: Instant,
    frame_counter: FrameCounter,
}

pub struct Application {
    assets: DirAssetSource,
    config: SceneConfig,
    graphics: Option<Graphics>,
    failure: Option<SceneError>,
}

fn viewport(size: PhysicalSize<u32>) -> (i32, i32) {
    (
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

impl Application {
    pub fn new(assets: DirAssetSource, config: SceneConfig) -> Self {
        Self {
            assets,
            config,
            graphics: None,
            failure: None,
        }
    }

    pub fn failure(&self) -> Option<&SceneError> {
        self.failure.as_ref()
    }

    fn init(&self, window: Arc<Window>) -> SceneResult<Graphics> {
        let size = window.inner_size();

        let instance = Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let renderer = pollster::block_on(WgpuRenderer::new(instance, Some(&surface)))?;

        let surface_config = SurfaceConfiguration {
            present_mode: PresentMode::AutoVsync,
            ..surface
                .get_default_config(&renderer.adapter, size.width.max(1), size.height.max(1))
                .ok_or(SceneError::AdapterUnavailable)?
        };
        surface.configure(&renderer.device, &surface_config);
        let depth = create_depth_target(
            &renderer.device,
            surface_config.width,
            surface_config.height,
        );

        let mut scene = Scene::setup(
            &renderer,
            &self.assets,
            &self.config,
            surface_config.format,
        )?;
        let (width, height) = viewport(size);
        if let Err(err) = scene.screen(width, height) {
            log::warn!("{err}");
        }

        Ok(Graphics {
            window,
            surface,
            surface_config,
            renderer,
            depth,
            scene,
            last_frame: Instant::now(),
            frame_counter: FrameCounter::new(),
        })
    }
}

impl Graphics {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (width, height) = viewport(size);
        // Minimized windows report zero sizes, keep the old configuration.
        if let Err(err) = self.scene.screen(width, height) {
            log::warn!("Ignoring resize: {err}");
            return;
        }

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface
            .configure(&self.renderer.device, &self.surface_config);
        self.depth = create_depth_target(&self.renderer.device, size.width, size.height);
    }

    fn redraw(&mut self) -> Result<(), SurfaceError> {
        let now = Instant::now();
        let delta = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface
                    .configure(&self.renderer.device, &self.surface_config);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        let view = frame.texture.create_view(&TextureViewDescriptor::default());

        self.scene.update(
            &self.renderer,
            &RenderTarget {
                color: &view,
                depth: &self.depth.1,
            },
            delta,
        );

        self.window.pre_present_notify();
        frame.present();
        self.frame_counter.tick();
        Ok(())
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("Teapot")
                .with_inner_size(PhysicalSize::new(INITIAL_SIZE.x, INITIAL_SIZE.y)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match self.init(window) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => {
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => graphics.resize(size),
            WindowEvent::RedrawRequested => {
                match graphics.redraw() {
                    Ok(()) => {}
                    Err(SurfaceError::OutOfMemory) => {
                        log::error!("Surface out of memory.");
                        event_loop.exit();
                        return;
                    }
                    Err(err) => log::warn!("Skipping frame: {err}"),
                }
                graphics.window.request_redraw();
            }
            _ => {}
        }
    }
}
