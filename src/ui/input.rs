use crate::scene::camera::Camera;
use minifb::{MouseButton, MouseMode, Window};
use nalgebra::Vector3;
use std::f32::consts::PI;

/// Orbit-style camera controller: dragging with the left mouse button
/// revolves the camera around its target, the scroll wheel dollies in and
/// out. The target itself never moves.
pub struct OrbitController {
    pub sensitivity: f32,
    pub zoom_speed: f32,

    yaw: f32,
    pitch: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,

    last_mouse_pos: Option<(f32, f32)>,
}

impl OrbitController {
    /// Derives the initial orbit state from the camera's placement.
    pub fn new(camera: &Camera, sensitivity: f32, zoom_speed: f32) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.norm();
        let dir = offset / distance;

        Self {
            sensitivity,
            zoom_speed,
            yaw: dir.z.atan2(dir.x),
            pitch: dir.y.asin(),
            distance,
            min_distance: 2.0,
            max_distance: 200.0,
            last_mouse_pos: None,
        }
    }

    /// Applies this frame's mouse input. Returns true when the camera moved
    /// (matrices are already recalculated in that case).
    pub fn update(&mut self, window: &Window, camera: &mut Camera) -> bool {
        let mut changed = false;

        // --- Scroll to dolly ---
        if let Some((_, scroll_y)) = window.get_scroll_wheel() {
            if scroll_y != 0.0 {
                self.distance = (self.distance - scroll_y * self.zoom_speed)
                    .clamp(self.min_distance, self.max_distance);
                changed = true;
            }
        }

        // --- Drag to orbit ---
        if window.get_mouse_down(MouseButton::Left) {
            if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Pass) {
                if let Some((lx, ly)) = self.last_mouse_pos {
                    let dx = mx - lx;
                    let dy = my - ly;
                    if dx != 0.0 || dy != 0.0 {
                        self.yaw -= dx * self.sensitivity;
                        // Keep away from the poles so the up vector stays valid.
                        self.pitch = (self.pitch + dy * self.sensitivity)
                            .clamp(-PI / 2.0 + 0.01, PI / 2.0 - 0.01);
                        changed = true;
                    }
                }
                self.last_mouse_pos = Some((mx, my));
            }
        } else {
            self.last_mouse_pos = None;
        }

        if changed {
            camera.position = camera.target + self.offset();
            camera.update_matrices();
        }
        changed
    }

    fn offset(&self) -> Vector3<f32> {
        Vector3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        ) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn initial_state_reconstructs_the_camera_offset() {
        let camera = Camera::new_perspective(
            Point3::new(0.0, 0.0, 25.0),
            Point3::origin(),
            Vector3::y(),
            75.0_f32.to_radians(),
            4.0 / 3.0,
            0.1,
            1000.0,
        );
        let controller = OrbitController::new(&camera, 0.01, 2.0);
        assert_relative_eq!(controller.distance, 25.0, epsilon = 1e-5);
        assert_relative_eq!(
            controller.offset(),
            Vector3::new(0.0, 0.0, 25.0),
            epsilon = 1e-4
        );
    }
}
