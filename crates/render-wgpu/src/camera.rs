use glam::{Mat4, Vec3};

const MAX_PITCH: f32 = 1.553; // just under 89 degrees
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 100.0;

/// Orbit camera around a fixed target with damped user input.
///
/// Mouse deltas accumulate into velocities; `update` applies and decays
/// them each frame, so motion eases out over several frames after the
/// input stops.
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// Fraction of remaining velocity shed per frame.
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: 5.0,
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            damping: 0.05,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }
}

impl OrbitCamera {
    /// Camera position derived from yaw/pitch/radius around the target.
    pub fn position(&self) -> Vec3 {
        self.target
            + self.radius
                * Vec3::new(
                    self.pitch.cos() * self.yaw.cos(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.sin(),
                )
    }

    /// Feed a mouse drag delta (pixels).
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += dx * self.sensitivity;
        self.pitch_velocity += dy * self.sensitivity;
    }

    /// Feed a scroll delta (lines; positive zooms in).
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_velocity -= delta * self.zoom_speed;
    }

    /// Advance the damped state by one frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        self.radius = (self.radius * (1.0 + self.zoom_velocity)).clamp(MIN_RADIUS, MAX_RADIUS);

        let retain = 1.0 - self.damping;
        self.yaw_velocity *= retain;
        self.pitch_velocity *= retain;
        self.zoom_velocity *= retain;
    }

    /// Track the output surface size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_on_positive_z() {
        let cam = OrbitCamera::default();
        let pos = cam.position();
        assert!(pos.x.abs() < 1e-5);
        assert!(pos.y.abs() < 1e-5);
        assert!((pos.z - 5.0).abs() < 1e-5);
        let vp = cam.view_projection();
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rotate_moves_over_following_frames() {
        let mut cam = OrbitCamera::default();
        let start_yaw = cam.yaw;
        cam.rotate(100.0, 0.0);
        cam.update();
        assert!(cam.yaw != start_yaw);
    }

    #[test]
    fn damping_decays_velocity_toward_rest() {
        let mut cam = OrbitCamera::default();
        cam.rotate(100.0, 40.0);
        for _ in 0..2000 {
            cam.update();
        }
        let settled_yaw = cam.yaw;
        cam.update();
        assert!((cam.yaw - settled_yaw).abs() < 1e-6);
        assert!(cam.yaw_velocity.abs() < 1e-6);
        assert!(cam.pitch_velocity.abs() < 1e-6);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 1e6);
        for _ in 0..100 {
            cam.update();
        }
        assert!(cam.pitch <= MAX_PITCH);
        assert!(cam.position().is_finite());
    }

    #[test]
    fn zoom_respects_radius_bounds() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1e6);
        for _ in 0..100 {
            cam.update();
        }
        assert!(cam.radius >= MIN_RADIUS);

        cam.zoom(-1e9);
        for _ in 0..100 {
            cam.update();
        }
        assert!(cam.radius <= MAX_RADIUS);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = OrbitCamera::default();
        cam.set_viewport(1920, 1080);
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
        cam.set_viewport(640, 0); // degenerate height guards divide-by-zero
        assert_eq!(cam.aspect, 640.0);
    }
}
