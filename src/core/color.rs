use nalgebra::Vector4;

/// Converts a linear RGBA color to sRGB (gamma correction).
/// Alpha is carried through unchanged.
pub fn linear_to_srgb(color: Vector4<f32>) -> Vector4<f32> {
    let gamma = 1.0 / 2.2;
    Vector4::new(
        color.x.powf(gamma),
        color.y.powf(gamma),
        color.z.powf(gamma),
        color.w,
    )
}
