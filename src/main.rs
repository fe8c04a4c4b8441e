mod shader;
mod window;

use particle_sphere::FieldConfig;
use winit::event_loop::{ControlFlow, EventLoop};

/// Interactive viewer. An optional first argument names a JSON field config.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let field = match std::env::args().nth(1) {
        Some(path) => match FieldConfig::load(&path) {
            Ok(config) => {
                log::info!("loaded field config from {}", path);
                config
            }
            Err(e) => {
                log::error!("could not load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => FieldConfig::default(),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(field);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {}", e);
    }
}
