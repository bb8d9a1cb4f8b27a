use crate::core::geometry::Vertex;
use nalgebra::Vector4;
use std::ops::{Add, Mul};

/// Trait for values the rasterizer can linearly interpolate across a
/// triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheap per-vertex storage and combination.
/// - Add + Mul<f32>: linear combination (a + b * t) used by barycentric
///   interpolation and clipping.
/// - Send + Sync: shading runs concurrently across fragments.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

/// A finished color interpolates channel-wise (per-vertex shading).
impl Interpolatable for Vector4<f32> {}

/// Shader represents the programmable stages of the pipeline.
///
/// Implementations must be Send + Sync because the fragment stage may be
/// invoked concurrently across pixels.
pub trait Shader: Send + Sync {
    /// Per-vertex output, interpolated by the rasterizer and handed to the
    /// fragment stage once per covered pixel.
    type Varying: Interpolatable;

    /// Vertex stage.
    ///
    /// Transforms the vertex into homogeneous clip space (consumed by
    /// clipping and the perspective divide) and produces the varying data
    /// associated with that vertex.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Fragment stage.
    ///
    /// Computes the RGBA color (linear space, alpha fixed at 1.0) for the
    /// current pixel from the interpolated varying. Channel values are not
    /// clamped here; clamping happens only when the image is quantized for
    /// output.
    fn fragment(&self, varying: Self::Varying) -> Vector4<f32>;
}
