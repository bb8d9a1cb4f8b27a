use nalgebra::Vector3;

/// Phong reflectance of the shaded object.
///
/// Coefficients are non-negative, component-wise multipliers against the
/// light's colors. A higher shininess exponent gives a tighter highlight.
#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.25, 0.25, 0.85),
            diffuse: Vector3::new(0.25, 0.25, 0.85),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 16.0,
        }
    }
}
