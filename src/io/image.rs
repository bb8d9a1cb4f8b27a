use crate::core::color::linear_to_srgb;
use crate::core::framebuffer::FrameBuffer;
use std::path::Path;

/// Writes the framebuffer to a PNG, resolving supersampling and applying
/// gamma correction. Channels are clamped to [0, 1] at this boundary only.
pub fn save_buffer_to_image<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> Result<(), String> {
    let mut img_buf = image::ImageBuffer::new(fb.width as u32, fb.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        if let Some(linear) = fb.get_pixel(x as usize, y as usize) {
            let srgb = linear_to_srgb(linear);
            let r = (srgb.x.clamp(0.0, 1.0) * 255.0) as u8;
            let g = (srgb.y.clamp(0.0, 1.0) * 255.0) as u8;
            let b = (srgb.z.clamp(0.0, 1.0) * 255.0) as u8;
            *pixel = image::Rgb([r, g, b]);
        }
    }

    img_buf
        .save(path.as_ref())
        .map_err(|e| format!("Failed to save image: {}", e))
}
