//! Camera capability consumed by the snapshot renderer, and a look-at probe camera.
//!
//! Camera space is +X right, +Y up, +Z forward. A direction with
//! non-positive Z is behind the camera; the renderer rejects those before
//! asking for a projection.

use glam::{DMat3, DQuat, DVec2, DVec3};

/// What the snapshot renderer needs from a camera.
pub trait StarCamera: Send + Sync {
    /// World-to-camera rotation.
    fn view_transform(&self) -> DMat3;

    /// Map a camera-space direction with positive depth to pixel coordinates.
    ///
    /// The image center is `(width / 2, height / 2)` and screen Y grows downward.
    fn project_to_screen(&self, camera_dir: DVec3, width: u32, height: u32) -> DVec2;
}

/// Direction rotation derived from [`StarCamera::view_transform`].
///
/// Blanket-implemented for every camera and not overridable, so the
/// renderer's cached view matrix and per-call rotation always agree.
pub trait RotateDirection {
    /// Rotate a world-space direction into camera space.
    fn rotate_direction(&self, direction: DVec3) -> DVec3;
}

impl<C: StarCamera + ?Sized> RotateDirection for C {
    fn rotate_direction(&self, direction: DVec3) -> DVec3 {
        self.view_transform() * direction
    }
}

/// A perspective camera carried by a probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeCamera {
    /// Position in the probe's local tier, in millimeters.
    pub position: DVec3,
    /// Camera-to-world rotation.
    pub rotation: DQuat,
    /// Vertical field of view in radians.
    pub fov_y: f64,
}

impl ProbeCamera {
    /// A camera at `position` looking down world +Z.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_fov_y(mut self, fov_y: f64) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Orient the camera toward `target`, keeping `up` as close to screen-up as possible.
    ///
    /// Leaves the rotation unchanged if `target` coincides with the camera position.
    pub fn look_at(&mut self, target: DVec3, up: DVec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == DVec3::ZERO {
            return;
        }

        let mut right = up.cross(forward).normalize_or_zero();
        if right == DVec3::ZERO {
            // Looking straight along `up`: any perpendicular will do.
            right = forward.any_orthonormal_vector();
        }
        let true_up = forward.cross(right);

        self.rotation = DQuat::from_mat3(&DMat3::from_cols(right, true_up, forward));
    }

    /// The forward direction vector (+Z in camera space).
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// Focal length in pixels for an image of the given height.
    pub fn focal_length(&self, height: u32) -> f64 {
        (height as f64 / 2.0) / (self.fov_y / 2.0).tan()
    }
}

impl Default for ProbeCamera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            fov_y: std::f64::consts::FRAC_PI_2, // 90 degrees
        }
    }
}

impl StarCamera for ProbeCamera {
    fn view_transform(&self) -> DMat3 {
        DMat3::from_quat(self.rotation.inverse())
    }

    fn project_to_screen(&self, camera_dir: DVec3, width: u32, height: u32) -> DVec2 {
        let focal = self.focal_length(height);
        DVec2::new(
            width as f64 / 2.0 + camera_dir.x / camera_dir.z * focal,
            height as f64 / 2.0 - camera_dir.y / camera_dir.z * focal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_default_camera_looks_down_pos_z() {
        let camera = ProbeCamera::default();
        assert_vec_eq(camera.forward(), DVec3::Z);
        assert_vec_eq(camera.up(), DVec3::Y);
        assert_vec_eq(camera.right(), DVec3::X);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut camera = ProbeCamera::new(DVec3::new(0.0, -200.0, -400.0));
        camera.look_at(DVec3::new(0.0, -200.0, 0.0), DVec3::Y);
        assert_vec_eq(camera.forward(), DVec3::Z);

        camera.look_at(DVec3::new(100.0, -200.0, -400.0), DVec3::Y);
        assert_vec_eq(camera.forward(), DVec3::X);
        assert_vec_eq(camera.up(), DVec3::Y);
    }

    #[test]
    fn test_look_at_target_maps_to_positive_depth() {
        let mut camera = ProbeCamera::new(DVec3::new(5.0, 5.0, 5.0));
        let target = DVec3::new(-3.0, 8.0, 1.0);
        camera.look_at(target, DVec3::Y);
        let dir = (target - camera.position).normalize();
        let cam = camera.rotate_direction(dir);
        assert_vec_eq(cam, DVec3::Z);
    }

    #[test]
    fn test_look_at_straight_up_stays_orthonormal() {
        let mut camera = ProbeCamera::default();
        camera.look_at(DVec3::new(0.0, 10.0, 0.0), DVec3::Y);
        assert_vec_eq(camera.forward(), DVec3::Y);
        assert!(camera.right().dot(camera.forward()).abs() < 1e-9);
        assert!(camera.up().dot(camera.forward()).abs() < 1e-9);
    }

    #[test]
    fn test_look_at_own_position_is_noop() {
        let mut camera = ProbeCamera::new(DVec3::ONE);
        let before = camera.rotation;
        camera.look_at(DVec3::ONE, DVec3::Y);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_view_transform_inverts_rotation() {
        let mut camera = ProbeCamera::default();
        camera.look_at(DVec3::new(1.0, 2.0, 3.0), DVec3::Y);
        let world = camera.right();
        assert_vec_eq(camera.view_transform() * world, DVec3::X);
    }

    #[test]
    fn test_forward_projects_to_image_center() {
        let camera = ProbeCamera::default();
        let screen = camera.project_to_screen(DVec3::Z, 128, 96);
        assert_eq!(screen, DVec2::new(64.0, 48.0));
    }

    #[test]
    fn test_projection_orientation() {
        let camera = ProbeCamera::default();
        let right = camera.project_to_screen(DVec3::new(0.1, 0.0, 1.0), 128, 128);
        let up = camera.project_to_screen(DVec3::new(0.0, 0.1, 1.0), 128, 128);
        assert!(right.x > 64.0);
        assert!(up.y < 64.0, "screen Y grows downward");
    }

    #[test]
    fn test_ninety_degree_fov_edge() {
        // With a 90 degree vertical FOV, a 45 degree ray lands on the top edge.
        let camera = ProbeCamera::default();
        let screen = camera.project_to_screen(DVec3::new(0.0, 1.0, 1.0), 128, 128);
        assert!(screen.y.abs() < 1e-9);
    }

    #[test]
    fn test_narrow_fov_magnifies() {
        let wide = ProbeCamera::default();
        let narrow = ProbeCamera::default().with_fov_y(0.5);
        assert!(narrow.focal_length(128) > wide.focal_length(128));
    }
}
