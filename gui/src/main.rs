use std::process::ExitCode;

use teapot_core::{
    asset::DirAssetSource,
    config::SceneConfig,
    logging::{init_logging, LoggingConfig},
};
use winit::event_loop::EventLoop;

mod app;

const ASSET_DIR_VAR: &str = "TEAPOT_ASSET_DIR";
const DEFAULT_ASSET_DIR: &str = "gui/assets";

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let assets = DirAssetSource::new(
        std::env::var(ASSET_DIR_VAR).unwrap_or_else(|_| DEFAULT_ASSET_DIR.into()),
    );
    log::info!("Loading assets from {}.", assets.root().display());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = app::Application::new(assets, SceneConfig::default());
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated: {err}");
        return ExitCode::FAILURE;
    }

    match app.failure() {
        Some(err) => {
            log::error!("Scene setup failed: {err}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
