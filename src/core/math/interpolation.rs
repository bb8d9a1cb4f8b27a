use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Barycentric coordinates (alpha, beta, gamma) of point `p` with respect to
/// the screen-space triangle (v0, v1, v2).
///
/// Returns `None` for a degenerate triangle (area near zero).
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p_v0 = p - v0;

    // 2x the signed triangle area.
    let total_area_x2 = e1.x * e2.y - e1.y * e2.x;
    if total_area_x2.abs() < EPSILON {
        return None;
    }
    let inv_total_area_x2 = 1.0 / total_area_x2;

    let beta = (p_v0.x * e2.y - p_v0.y * e2.x) * inv_total_area_x2;
    let gamma = (e1.x * p_v0.y - e1.y * p_v0.x) * inv_total_area_x2;
    let alpha = 1.0 - beta - gamma;

    Some(Vector3::new(alpha, beta, gamma))
}

/// True when the barycentric weights describe a point inside the triangle.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}

/// Perspective-correct barycentric weights.
///
/// Screen-space weights are biased towards the nearer vertices; dividing each
/// weight by its vertex w and renormalizing yields weights that interpolate
/// attributes linearly in eye space:
///   wa = alpha / w0, wb = beta / w1, wc = gamma / w2
///   alpha' = wa / (wa + wb + wc), ...
///
/// Returns `None` when the weight sum collapses (numerical instability).
pub fn perspective_correct_barycentric(
    bary: Vector3<f32>,
    w0: f32,
    w1: f32,
    w2: f32,
) -> Option<Vector3<f32>> {
    let inv_w0 = if w0.abs() > EPSILON { 1.0 / w0 } else { 1.0 };
    let inv_w1 = if w1.abs() > EPSILON { 1.0 / w1 } else { 1.0 };
    let inv_w2 = if w2.abs() > EPSILON { 1.0 / w2 } else { 1.0 };

    let wa = bary.x * inv_w0;
    let wb = bary.y * inv_w1;
    let wc = bary.z * inv_w2;

    let sum = wa + wb + wc;
    if sum.abs() < EPSILON {
        return None;
    }
    let inv_sum = 1.0 / sum;
    Some(Vector3::new(wa * inv_sum, wb * inv_sum, wc * inv_sum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> (Point2<f32>, Point2<f32>, Point2<f32>) {
        (
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        )
    }

    #[test]
    fn vertices_have_unit_weights() {
        let (v0, v1, v2) = triangle();
        let bary = barycentric_coordinates(v1, v0, v1, v2).unwrap();
        assert_relative_eq!(bary.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bary.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bary.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn centroid_has_equal_weights() {
        let (v0, v1, v2) = triangle();
        let centroid = Point2::new(10.0 / 3.0, 10.0 / 3.0);
        let bary = barycentric_coordinates(centroid, v0, v1, v2).unwrap();
        assert_relative_eq!(bary.x, 1.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(bary.y, 1.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(bary.z, 1.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn outside_point_is_detected() {
        let (v0, v1, v2) = triangle();
        let bary = barycentric_coordinates(Point2::new(20.0, 20.0), v0, v1, v2).unwrap();
        assert!(!is_inside_triangle(bary));
    }

    #[test]
    fn degenerate_triangle_yields_none() {
        let v = Point2::new(1.0, 1.0);
        assert!(barycentric_coordinates(Point2::new(0.0, 0.0), v, v, v).is_none());
    }

    #[test]
    fn equal_w_reduces_to_plain_barycentric() {
        let bary = Vector3::new(0.2, 0.3, 0.5);
        let corrected = perspective_correct_barycentric(bary, 4.0, 4.0, 4.0).unwrap();
        assert_relative_eq!(corrected, bary, epsilon = 1e-6);
    }

    #[test]
    fn correction_biases_towards_nearer_vertex() {
        // Screen-space midpoint between a near (w=1) and a far (w=10) vertex
        // lies closer to the near vertex in eye space.
        let bary = Vector3::new(0.5, 0.5, 0.0);
        let corrected = perspective_correct_barycentric(bary, 1.0, 10.0, 1.0).unwrap();
        assert!(corrected.x > corrected.y);
    }
}
