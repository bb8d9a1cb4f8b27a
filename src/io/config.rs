use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default)]
    pub torus: TorusConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Supersampling grid per axis: 1 = off, 2 = 2x2 SSAA.
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            samples: default_samples(),
            output: default_output(),
            background: default_background(),
        }
    }
}

fn default_width() -> usize {
    1024
}
fn default_height() -> usize {
    768
}
fn default_samples() -> usize {
    2
}
fn default_output() -> String {
    "torus.png".to_string()
}
fn default_background() -> [f32; 3] {
    [0.02, 0.02, 0.03]
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 25.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
    #[serde(default = "default_light_ambient")]
    pub ambient_color: [f32; 3],
    #[serde(default = "default_light_diffuse")]
    pub diffuse_color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
            ambient_color: default_light_ambient(),
            diffuse_color: default_light_diffuse(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [-20.0, 10.0, 10.0]
}
fn default_light_ambient() -> [f32; 3] {
    [0.3, 0.3, 0.3]
}
fn default_light_diffuse() -> [f32; 3] {
    [0.7, 0.7, 0.7]
}

#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_material_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_material_diffuse")]
    pub diffuse: [f32; 3],
    #[serde(default = "default_material_specular")]
    pub specular: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ambient: default_material_ambient(),
            diffuse: default_material_diffuse(),
            specular: default_material_specular(),
            shininess: default_shininess(),
        }
    }
}

fn default_material_ambient() -> [f32; 3] {
    [0.25, 0.25, 0.85]
}
fn default_material_diffuse() -> [f32; 3] {
    [0.25, 0.25, 0.85]
}
fn default_material_specular() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_shininess() -> f32 {
    16.0
}

#[derive(Debug, Deserialize)]
pub struct TorusConfig {
    #[serde(default = "default_major_radius")]
    pub major_radius: f32,
    #[serde(default = "default_tube_radius")]
    pub tube_radius: f32,
    #[serde(default = "default_radial_segments")]
    pub radial_segments: u32,
    #[serde(default = "default_tubular_segments")]
    pub tubular_segments: u32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            major_radius: default_major_radius(),
            tube_radius: default_tube_radius(),
            radial_segments: default_radial_segments(),
            tubular_segments: default_tubular_segments(),
        }
    }
}

fn default_major_radius() -> f32 {
    10.0
}
fn default_tube_radius() -> f32 {
    3.0
}
fn default_radial_segments() -> u32 {
    16
}
fn default_tubular_segments() -> u32 {
    25
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl CameraConfig {
    pub fn build(&self, aspect_ratio: f32) -> Camera {
        Camera::new_perspective(
            Point3::from(self.position),
            Point3::from(self.target),
            Vector3::from(self.up),
            self.fov.to_radians(),
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

impl LightConfig {
    pub fn build(&self) -> PointLight {
        PointLight::new(
            Point3::from(self.position),
            Vector3::from(self.ambient_color),
            Vector3::from(self.diffuse_color),
        )
    }
}

impl MaterialConfig {
    pub fn build(&self) -> Material {
        Material {
            ambient: Vector3::from(self.ambient),
            diffuse: Vector3::from(self.diffuse),
            specular: Vector3::from(self.specular),
            shininess: self.shininess,
        }
    }
}

impl TorusConfig {
    pub fn build(&self) -> Mesh {
        Mesh::torus(
            self.major_radius,
            self.tube_radius,
            self.radial_segments,
            self.tubular_segments,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_toml_yields_the_default_scene() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.width, 1024);
        assert_relative_eq!(config.light.position[0], -20.0);
        assert_relative_eq!(config.material.shininess, 16.0);
        assert_relative_eq!(config.torus.major_radius, 10.0);
    }

    #[test]
    fn partial_sections_keep_unmentioned_defaults() {
        let config: Config = toml::from_str(
            r#"
            [material]
            shininess = 64.0

            [torus]
            radial_segments = 32
            "#,
        )
        .unwrap();
        assert_relative_eq!(config.material.shininess, 64.0);
        assert_relative_eq!(config.material.specular[0], 1.0);
        assert_eq!(config.torus.radial_segments, 32);
        assert_relative_eq!(config.torus.tube_radius, 3.0);
    }

    #[test]
    fn build_helpers_mirror_the_config_values() {
        let config = Config::default();
        let light = config.light.build();
        assert_relative_eq!(light.ambient, Vector3::new(0.3, 0.3, 0.3));
        let material = config.material.build();
        assert_relative_eq!(material.diffuse, Vector3::new(0.25, 0.25, 0.85));
        let mesh = config.torus.build();
        assert_eq!(mesh.vertices.len(), 17 * 26);
    }
}
