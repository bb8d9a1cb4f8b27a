use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::pipeline::shaders::lighting::{EyeVectors, ShadingUniforms, shade};
use nalgebra::Vector4;

/// Per-vertex shading ("Gouraud"): the illumination model is evaluated once
/// at each vertex and the finished color is what the rasterizer
/// interpolates. The fragment stage is a pass-through.
///
/// Cheaper than per-pixel shading, at the price of highlights that smear or
/// vanish between vertices on coarse meshes.
pub struct GouraudShader {
    uniforms: ShadingUniforms,
}

impl GouraudShader {
    pub fn new(uniforms: ShadingUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for GouraudShader {
    type Varying = Vector4<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let eye = EyeVectors::transform(vertex, &self.uniforms);
        let color = shade(&eye, &self.uniforms.light, &self.uniforms.material);
        (eye.clip_position(&self.uniforms), color)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector4<f32> {
        varying
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::light::PointLight;
    use crate::scene::material::Material;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Point3, Vector3};

    fn uniforms() -> ShadingUniforms {
        ShadingUniforms::new(
            Matrix4::identity(),
            Matrix4::identity(),
            Matrix4::identity(),
            PointLight::new(
                Point3::new(0.0, 0.0, 10.0),
                Vector3::new(0.3, 0.3, 0.3),
                Vector3::new(0.7, 0.7, 0.7),
            ),
            Material::default(),
        )
    }

    #[test]
    fn vertex_stage_emits_a_finished_color() {
        let shader = GouraudShader::new(uniforms());
        let vertex = Vertex::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));

        let (_, color) = shader.vertex(&vertex);
        let eye = EyeVectors::transform(&vertex, &shader.uniforms);
        let expected = shade(&eye, &shader.uniforms.light, &shader.uniforms.material);
        assert_relative_eq!(color, expected);
        assert_relative_eq!(color.w, 1.0);
    }

    #[test]
    fn fragment_stage_passes_the_interpolated_color_through() {
        let shader = GouraudShader::new(uniforms());
        let interpolated = Vector4::new(0.4, 0.5, 0.6, 1.0);
        assert_relative_eq!(shader.fragment(interpolated), interpolated);
    }
}
