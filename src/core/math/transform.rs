use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
/// Manually implemented to keep full control over the coordinate system
/// (Right-Handed, camera looking down -Z).
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// View matrix (Look-At, Right-Handed): world space -> eye space.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        // In RHS the camera looks down -Z.
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection matrix (Right-Handed), frustum -> NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Derives the normal matrix from a model-view matrix: the inverse-transpose
/// of its upper-left 3x3 block. Falls back to the plain 3x3 block when the
/// matrix is singular (degenerate model transform).
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = model_view.fixed_view::<3, 3>(0, 0).into_owned();
    linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or(linear)
}

/// Perspective division: Clip Space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// NDC -> screen coordinates (viewport transform).
/// Y is flipped: NDC +Y is up, screen +Y is down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_matrix_of_rigid_transform_is_its_rotation() {
        let mv = TransformFactory::rotation_y(0.7) * TransformFactory::translation(&Vector3::new(1.0, 2.0, 3.0));
        let n = normal_matrix(&mv);
        let expected = TransformFactory::rotation_y(0.7)
            .fixed_view::<3, 3>(0, 0)
            .into_owned();
        assert_relative_eq!(n, expected, epsilon = 1e-5);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let mut mv = Matrix4::identity();
        mv[(0, 0)] = 2.0;
        mv[(1, 1)] = 1.0;
        mv[(2, 2)] = 1.0;
        // A normal on a surface tilted in XZ must stay perpendicular after
        // transforming with the normal matrix.
        let n = normal_matrix(&mv);
        let tangent = Vector3::new(2.0, 0.0, -1.0); // image of (1, 0, -1) under the scale
        let transformed = (n * Vector3::new(1.0, 0.0, 1.0).normalize()).normalize();
        assert_relative_eq!(transformed.dot(&tangent), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let eye = Point3::new(0.0, 0.0, 25.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let mapped = view * eye.to_homogeneous();
        assert_relative_eq!(mapped.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let eye = Point3::new(0.0, 0.0, 25.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let mapped = view * Point3::origin().to_homogeneous();
        assert!(mapped.z < 0.0);
    }

    #[test]
    fn perspective_division_recovers_ndc() {
        let clip = Vector4::new(2.0, -4.0, 1.0, 2.0);
        let ndc = apply_perspective_division(&clip);
        assert_relative_eq!(ndc.x, 1.0);
        assert_relative_eq!(ndc.y, -2.0);
        assert_relative_eq!(ndc.z, 0.5);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let top_left = ndc_to_screen(-1.0, 1.0, 800.0, 600.0);
        assert_relative_eq!(top_left.x, 0.0);
        assert_relative_eq!(top_left.y, 0.0);

        let bottom_right = ndc_to_screen(1.0, -1.0, 800.0, 600.0);
        assert_relative_eq!(bottom_right.x, 800.0);
        assert_relative_eq!(bottom_right.y, 600.0);
    }
}
