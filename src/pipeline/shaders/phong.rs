use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::pipeline::shaders::lighting::{EyeVectors, ShadingUniforms, shade};
use nalgebra::Vector4;

/// Per-pixel shading ("Phong"): the vertex stage only derives the eye-space
/// vectors, the rasterizer interpolates those across the primitive, and the
/// illumination model runs once per covered pixel. Interpolation does not
/// preserve unit length, so the evaluator renormalizes its inputs.
pub struct PhongShader {
    uniforms: ShadingUniforms,
}

impl PhongShader {
    pub fn new(uniforms: ShadingUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for PhongShader {
    type Varying = EyeVectors;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let eye = EyeVectors::transform(vertex, &self.uniforms);
        (eye.clip_position(&self.uniforms), eye)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector4<f32> {
        shade(&varying, &self.uniforms.light, &self.uniforms.material)
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
    fn vertex_stage_hands_raw_vectors_downstream() {
        let shader = PhongShader::new(uniforms());
        let vertex = Vertex::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));

        let (_, varying) = shader.vertex(&vertex);
        assert_relative_eq!(varying.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(
            varying.light_dir,
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn both_adapters_agree_at_a_vertex() {
        // At a vertex nothing has been interpolated yet, so evaluating per
        // vertex and per pixel must give the same color.
        let vertex = Vertex::new(Point3::new(0.5, -0.5, 0.0), Vector3::new(0.0, 0.0, 1.0));

        let phong = PhongShader::new(uniforms());
        let (_, varying) = phong.vertex(&vertex);
        let per_pixel = phong.fragment(varying);

        let gouraud = crate::pipeline::shaders::gouraud::GouraudShader::new(uniforms());
        let (_, per_vertex) = gouraud.vertex(&vertex);

        assert_relative_eq!(per_pixel, per_vertex, epsilon = 1e-6);
    }
}
