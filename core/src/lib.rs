//! A single textured object lit by one light and watched by an orbiting
//! camera, rendered with wgpu.

use wgpu::{
    Adapter, Device, DeviceDescriptor, Instance, Limits, PowerPreference, Queue,
    RequestAdapterOptions, Surface,
};

pub use log;
pub use wgpu;

pub mod asset;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod scene;
pub mod transform;
pub mod util;

pub use error::{SceneError, SceneResult};

pub struct WgpuRenderer {
    pub instance: Instance,
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

impl WgpuRenderer {
    /// Picks an adapter able to present to `compatible_surface`, if given,
    /// and opens a device on it.
    pub async fn new(
        instance: Instance,
        compatible_surface: Option<&Surface<'_>>,
    ) -> SceneResult<Self> {
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface,
            })
            .await
            .ok_or(SceneError::AdapterUnavailable)?;

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    label: None,
                    required_limits: Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let info = adapter.get_info();
        log::info!("Wgpu context set up on {} ({:?}).", info.name, info.backend);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}
