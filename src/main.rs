mod app;
mod camera;
mod components;
mod engine;
mod renderer;
mod scene;
mod systems;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use app::{AppConfig, DemoApp};
use clap::Parser;

#[derive(Parser)]
#[command(name = "basic-lighting", about = "Directional, point and spot lighting demo")]
struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Directory holding basic_lighting.vert and basic_lighting.frag
    #[arg(long, default_value = "shaders")]
    shader_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig {
        width: args.width,
        height: args.height,
        fov: args.fov,
        shader_dir: args.shader_dir,
    };

    let result = DemoApp::new(&config).and_then(|mut app| app.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
