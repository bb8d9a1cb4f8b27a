use nalgebra::{Point3, Vector3};

/// The scene's single point light.
///
/// Position is given in world space; the transform stage carries it into eye
/// space alongside the geometry. Colors are linear RGB with components in
/// [0, 1], fixed for the session once constructed.
#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: Point3<f32>,
    /// Color of the ambient contribution.
    pub ambient: Vector3<f32>,
    /// Color of the diffuse contribution; also drives the specular term.
    pub diffuse: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Point3<f32>, ambient: Vector3<f32>, diffuse: Vector3<f32>) -> Self {
        Self {
            position,
            ambient,
            diffuse,
        }
    }
}
