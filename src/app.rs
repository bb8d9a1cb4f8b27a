use crate::core::math::transform::TransformFactory;
use crate::io::config::Config;
use crate::pipeline::mode::ModeController;
use crate::pipeline::passes::{post_process_to_buffer, render_main_pass};
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::lighting::ShadingUniforms;
use crate::ui::input::OrbitController;
use log::{debug, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use nalgebra::Vector3;
use std::time::Instant;

/// Slow spin of the torus so the highlight sweep makes the active shading
/// strategy visible.
const SPIN_RADS_PER_SEC: f32 = 0.4;

/// Runs the interactive viewer: real-time rendering with orbit controls and
/// the shading-mode toggle on `P`.
pub fn run_gui(config: Config) {
    let width = config.render.width;
    let height = config.render.height;

    info!("Starting viewer ({}x{})...", width, height);
    info!("Controls: P = toggle shading mode, LeftDrag = orbit, Scroll = zoom, Esc = quit");

    let mut window = Window::new(
        "Torus Viewer",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .unwrap_or_else(|e| panic!("{}", e));

    window.set_target_fps(60);

    let mesh = config.torus.build();
    let light = config.light.build();
    let material = config.material.build();
    let mut camera = config.camera.build(width as f32 / height as f32);
    let background = Vector3::from(config.render.background);

    let mut renderer = Renderer::new(width, height, config.render.samples);
    let mut controller = ModeController::default();
    info!("{} shading active", controller.active().label());

    let mut orbit = OrbitController::new(&camera, 0.01, 2.0);
    let mut buffer = vec![0u32; width * height];

    let mut spin_angle = 0.0f32;
    let mut last_frame_time = Instant::now();
    let mut frame_count = 0u32;
    let mut last_fps_update = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        // Toggle events are processed here, strictly between frames.
        if window.is_key_pressed(Key::P, KeyRepeat::No) {
            controller.toggle();
        }
        orbit.update(&window, &mut camera);

        spin_angle += SPIN_RADS_PER_SEC * dt;
        let model = TransformFactory::rotation_y(spin_angle);

        let uniforms = ShadingUniforms::new(
            model,
            camera.view_matrix(),
            camera.projection_matrix(),
            light.clone(),
            material.clone(),
        );

        // One frame-local copy of the mode; the whole draw call runs with it.
        let mode = controller.active();
        render_main_pass(&mut renderer, &mesh, &uniforms, mode, background);
        post_process_to_buffer(&renderer.framebuffer, &mut buffer);

        window
            .update_with_buffer(&buffer, width, height)
            .unwrap_or_else(|e| panic!("{}", e));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 1.0 {
            debug!("{} fps, {} shading", frame_count, mode.label());
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }
}
