use clap::Parser;
use log::{error, info, warn};
use nalgebra::{Matrix4, Vector3};
use std::path::PathBuf;
use torus_viewer::io::config::Config;
use torus_viewer::io::image::save_buffer_to_image;
use torus_viewer::pipeline::mode::ShadingMode;
use torus_viewer::pipeline::passes::render_main_pass;
use torus_viewer::pipeline::renderer::Renderer;
use torus_viewer::pipeline::shaders::lighting::ShadingUniforms;

/// Software-rasterized torus with switchable per-vertex / per-pixel Phong
/// shading.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML scene configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render a single frame to a PNG instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Shading strategy for headless rendering.
    #[arg(long, value_enum, default_value_t = ModeArg::PerPixel)]
    mode: ModeArg,

    /// Output path override for headless rendering.
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    PerVertex,
    PerPixel,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeArg::PerVertex => write!(f, "per-vertex"),
            ModeArg::PerPixel => write!(f, "per-pixel"),
        }
    }
}

impl From<ModeArg> for ShadingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::PerVertex => ShadingMode::PerVertex,
            ModeArg::PerPixel => ShadingMode::PerPixel,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; falling back to the default scene", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    if args.headless {
        render_still(&config, args.mode.into(), args.output.as_deref());
    } else {
        torus_viewer::app::run_gui(config);
    }
}

/// Renders one frame of the configured scene and writes it out as a PNG.
fn render_still(config: &Config, mode: ShadingMode, output: Option<&str>) {
    let width = config.render.width;
    let height = config.render.height;

    let mesh = config.torus.build();
    let camera = config.camera.build(width as f32 / height as f32);
    let uniforms = ShadingUniforms::new(
        Matrix4::identity(),
        camera.view_matrix(),
        camera.projection_matrix(),
        config.light.build(),
        config.material.build(),
    );

    let mut renderer = Renderer::new(width, height, config.render.samples);
    info!(
        "Rendering {}x{} frame with {} shading...",
        width,
        height,
        mode.label()
    );
    render_main_pass(
        &mut renderer,
        &mesh,
        &uniforms,
        mode,
        Vector3::from(config.render.background),
    );

    let path = output.unwrap_or(&config.render.output);
    match save_buffer_to_image(&renderer.framebuffer, path) {
        Ok(()) => info!("Render saved to {}", path),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
