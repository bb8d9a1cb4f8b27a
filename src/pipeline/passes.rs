use crate::core::color::linear_to_srgb;
use crate::core::framebuffer::FrameBuffer;
use crate::pipeline::mode::ShadingMode;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::gouraud::GouraudShader;
use crate::pipeline::shaders::lighting::ShadingUniforms;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::mesh::Mesh;
use nalgebra::{Vector3, Vector4};
use rayon::prelude::*;

/// Renders one frame of the scene.
///
/// `mode` is the caller's frame-local copy of the controller state: the
/// whole draw call runs with one strategy, whichever stage it binds the
/// illumination evaluator to.
pub fn render_main_pass(
    renderer: &mut Renderer,
    mesh: &Mesh,
    uniforms: &ShadingUniforms,
    mode: ShadingMode,
    background: Vector3<f32>,
) {
    renderer.clear(Vector4::new(background.x, background.y, background.z, 1.0));

    match mode {
        ShadingMode::PerVertex => {
            renderer.draw_mesh(mesh, &GouraudShader::new(uniforms.clone()));
        }
        ShadingMode::PerPixel => {
            renderer.draw_mesh(mesh, &PhongShader::new(uniforms.clone()));
        }
    }
}

/// Post-processing: resolve supersampling, gamma-correct, and pack into the
/// 0RGB u32 layout the window expects. The clamp to [0, 1] happens here, not
/// in the shaders.
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    buffer
        .par_chunks_mut(framebuffer.width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                if let Some(color) = framebuffer.get_pixel(x, y) {
                    let srgb = linear_to_srgb(color);

                    let r = (srgb.x.clamp(0.0, 1.0) * 255.0) as u32;
                    let g = (srgb.y.clamp(0.0, 1.0) * 255.0) as u32;
                    let b = (srgb.z.clamp(0.0, 1.0) * 255.0) as u32;

                    *pixel = (255 << 24) | (r << 16) | (g << 8) | b;
                } else {
                    *pixel = 0;
                }
            }
        });
}
