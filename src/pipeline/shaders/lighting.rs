use crate::core::geometry::Vertex;
use crate::core::math::transform::normal_matrix;
use crate::core::pipeline::Interpolatable;
use crate::scene::light::PointLight;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Read-only per-frame parameter block shared by both shading strategies:
/// the transform chain plus the light and material photometry.
///
/// Built once at frame setup and handed into the shaders; nothing in here
/// mutates during a draw call.
#[derive(Clone)]
pub struct ShadingUniforms {
    /// Model-view transform: object space -> eye space.
    pub model_view: Matrix4<f32>,
    /// Inverse-transpose of the model-view's upper 3x3, for normals.
    pub normal_matrix: Matrix3<f32>,
    /// Eye space -> clip space.
    pub projection: Matrix4<f32>,
    pub light: PointLight,
    pub material: Material,
}

impl ShadingUniforms {
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        light: PointLight,
        material: Material,
    ) -> Self {
        let model_view = view * model;
        Self {
            normal_matrix: normal_matrix(&model_view),
            model_view,
            projection,
            light,
            material,
        }
    }
}

/// Geometric vectors derived per vertex in eye space.
///
/// Either consumed immediately by the illumination evaluator (per-vertex
/// shading) or carried across the rasterizer's interpolation and consumed
/// per pixel. `light_dir` and `reflect_dir` are derived quantities, never
/// set independently; `reflect_dir` is left un-normalized after computation.
#[derive(Clone, Copy, Debug)]
pub struct EyeVectors {
    /// Vertex position in homogeneous eye space.
    pub position: Vector4<f32>,
    /// Surface normal in eye space, unit at the vertex.
    pub normal: Vector3<f32>,
    /// Direction from the vertex towards the light, unit at the vertex.
    pub light_dir: Vector3<f32>,
    /// `light_dir` reflected about the normal (GLSL `reflect` convention).
    pub reflect_dir: Vector3<f32>,
}

impl EyeVectors {
    /// The space transform stage: carries a vertex and the light into eye
    /// space and derives the direction vectors the evaluator needs.
    pub fn transform(vertex: &Vertex, uniforms: &ShadingUniforms) -> Self {
        let light_eye = uniforms.model_view * uniforms.light.position.to_homogeneous();
        let position = uniforms.model_view * vertex.position.to_homogeneous();
        let normal = (uniforms.normal_matrix * vertex.normal).normalize();
        let light_dir = (light_eye.xyz() - position.xyz()).normalize();
        // reflect(L, N) = L - 2 (N . L) N
        let reflect_dir = light_dir - normal * (2.0 * normal.dot(&light_dir));

        Self {
            position,
            normal,
            light_dir,
            reflect_dir,
        }
    }

    /// Clip-space position of this vertex; computed in every mode.
    pub fn clip_position(&self, uniforms: &ShadingUniforms) -> Vector4<f32> {
        uniforms.projection * self.position
    }
}

// Component-wise linear combination, required for barycentric interpolation
// of the vectors in per-pixel mode.
impl Add for EyeVectors {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            position: self.position + other.position,
            normal: self.normal + other.normal,
            light_dir: self.light_dir + other.light_dir,
            reflect_dir: self.reflect_dir + other.reflect_dir,
        }
    }
}

impl Mul<f32> for EyeVectors {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            position: self.position * scalar,
            normal: self.normal * scalar,
            light_dir: self.light_dir * scalar,
            reflect_dir: self.reflect_dir * scalar,
        }
    }
}

impl Interpolatable for EyeVectors {}

/// The Phong illumination evaluator: ambient + diffuse + specular.
///
/// A pure function of the eye-space vectors and the parameter block, called
/// identically from the per-vertex and per-pixel adapters. Normal and light
/// direction are normalized here, which also corrects the shrinkage that
/// linear interpolation inflicts on unit vectors in per-pixel mode. The dot
/// products are clamped at zero so surfaces facing away from the light or
/// the viewer contribute nothing, never negative energy. The resulting
/// channels are unclamped above and may exceed 1.0; alpha is fixed at 1.0.
pub fn shade(eye: &EyeVectors, light: &PointLight, material: &Material) -> Vector4<f32> {
    let normal = eye.normal.normalize();
    let light_dir = eye.light_dir.normalize();

    let ambient = light.ambient.component_mul(&material.ambient);

    let diffuse_scale = light_dir.dot(&normal).max(0.0);
    let diffuse = light.diffuse.component_mul(&material.diffuse) * diffuse_scale;

    let view_dir = (-eye.position.xyz()).normalize();
    let specular_scale = (-eye.reflect_dir.normalize())
        .dot(&view_dir)
        .max(0.0)
        .powf(material.shininess);
    let specular = light.diffuse.component_mul(&material.specular) * specular_scale;

    let rgb = ambient + diffuse + specular;
    Vector4::new(rgb.x, rgb.y, rgb.z, 1.0)
}
