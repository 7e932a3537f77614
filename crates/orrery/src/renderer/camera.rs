use glam::{Mat4, Vec2, Vec3};

use crate::api::config::CameraConfig;
use crate::api::types::PointerButton;
use crate::renderer::traits::Projection;
use crate::systems::picking::Ray;

/// Persisted spherical camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub yaw: f32,
    /// Elevation above the target's horizontal plane, clamped to the pitch limit.
    pub pitch: f32,
    /// Eye-to-target distance in scene units.
    pub distance: f32,
    pub target: Vec3,
}

/// Eye position and look-at point for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// What an active pointer drag does to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Orbit,
    Pan,
}

impl DragMode {
    /// Primary button orbits; any other button pans.
    pub fn from_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => DragMode::Orbit,
            _ => DragMode::Pan,
        }
    }
}

/// Orbit camera driven by drag, pan and wheel gestures.
///
/// Between gestures only [`CameraState`] persists. The eye sits at
/// `target + distance * (cos p cos y, sin p, cos p sin y)` and always looks at
/// the target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    state: CameraState,
    config: CameraConfig,
    drag: Option<DragMode>,
    /// Viewport size in pixels.
    viewport: Vec2,
}

impl OrbitCamera {
    const NEAR: f32 = 0.1;

    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            state: Self::initial_state(config),
            config: config.clone(),
            drag: None,
            viewport: Vec2::new(1280.0, 720.0),
        };
        camera.clamp();
        camera
    }

    fn initial_state(config: &CameraConfig) -> CameraState {
        CameraState {
            yaw: config.yaw,
            pitch: config.pitch,
            distance: config.distance,
            target: Vec3::from_array(config.target),
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Start a drag gesture; the button decides orbit vs pan.
    pub fn begin_drag(&mut self, button: PointerButton) {
        self.drag = Some(DragMode::from_button(button));
    }

    /// Apply a pointer delta (pixels) to the active drag, if any.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        match self.drag {
            Some(DragMode::Orbit) => self.orbit(dx, dy),
            Some(DragMode::Pan) => self.pan(dx, dy),
            None => {}
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Rotate around the target by a pointer delta.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.state.yaw -= dx * self.config.orbit_sensitivity;
        self.state.pitch -= dy * self.config.orbit_sensitivity;
        self.clamp();
    }

    /// Move the target in the view plane. Speed scales with distance so a
    /// pixel of drag covers a similar fraction of the screen at any zoom.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let speed = self.state.distance / self.config.pan_divisor;
        self.state.target += (self.up() * dy - self.right() * dx) * speed;
    }

    /// Multiplicative zoom; positive `direction` moves closer.
    pub fn zoom(&mut self, direction: f32) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        self.state.distance *= 1.0 - direction.signum() * self.config.zoom_step;
        self.clamp();
    }

    /// Wheel notch with DOM `deltaY` sign: positive scrolls away (zoom out).
    pub fn wheel(&mut self, delta_sign: f32) {
        self.zoom(-delta_sign);
    }

    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
        self.drag = None;
        self.clamp();
    }

    fn clamp(&mut self) {
        let limit = self.config.pitch_limit;
        self.state.pitch = self.state.pitch.clamp(-limit, limit);
        self.state.distance = self
            .state
            .distance
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Eye offset from the target.
    fn offset(&self) -> Vec3 {
        let CameraState { yaw, pitch, distance, .. } = self.state;
        distance * Vec3::new(pitch.cos() * yaw.cos(), pitch.sin(), pitch.cos() * yaw.sin())
    }

    /// Pure derivation of this frame's eye and look-at point.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.state.target + self.offset(),
            look_at: self.state.target,
        }
    }

    /// Unit view direction (eye towards target).
    pub fn forward(&self) -> Vec3 {
        (-self.offset()).normalize()
    }

    /// Unit screen-right vector; horizontal because pitch never reaches +-pi/2.
    pub fn right(&self) -> Vec3 {
        let yaw = self.state.yaw;
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Unit screen-up vector.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Update the viewport (pixels). Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn fov_y(&self) -> f32 {
        self.config.fov_y_degrees.to_radians()
    }

    pub fn view_matrix(&self) -> Mat4 {
        let pose = self.pose();
        Mat4::look_at_rh(pose.eye, pose.look_at, Vec3::Y)
    }

    pub fn projection(&self) -> Projection {
        Projection {
            fov_y: self.fov_y(),
            aspect: self.aspect(),
            near: Self::NEAR,
            far: self.config.max_distance * 4.0,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let p = self.projection();
        Mat4::perspective_rh(p.fov_y, p.aspect, p.near, p.far)
    }

    /// World-space ray through pixel (x, y), origin at the eye.
    pub fn screen_ray(&self, x: f32, y: f32) -> Ray {
        let ndc_x = 2.0 * x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.viewport.y;
        let half_h = (self.fov_y() / 2.0).tan();
        let half_w = half_h * self.aspect();
        let direction = self.forward() + self.right() * (ndc_x * half_w) + self.up() * (ndc_y * half_h);
        Ray::new(self.pose().eye, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default())
    }

    fn at_yaw(yaw: f32) -> OrbitCamera {
        let config = CameraConfig {
            yaw,
            pitch: 0.3,
            ..CameraConfig::default()
        };
        OrbitCamera::new(&config)
    }

    #[test]
    fn pose_follows_spherical_formula() {
        let config = CameraConfig {
            yaw: 0.0,
            pitch: 0.0,
            distance: 100.0,
            target: [1.0, 2.0, 3.0],
            ..CameraConfig::default()
        };
        let cam = OrbitCamera::new(&config);
        let pose = cam.pose();
        assert!(pose.eye.distance(Vec3::new(101.0, 2.0, 3.0)) < 1e-4);
        assert_eq!(pose.look_at, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn zoom_in_converges_to_min_distance() {
        let mut cam = camera();
        let mut last = cam.state().distance;
        for _ in 0..200 {
            cam.zoom(1.0);
            let d = cam.state().distance;
            assert!(d <= last);
            assert!(d >= 50.0);
            last = d;
        }
        assert_eq!(cam.state().distance, 50.0);
    }

    #[test]
    fn zoom_out_never_exceeds_max_distance() {
        let mut cam = camera();
        for _ in 0..500 {
            cam.zoom(-1.0);
            assert!(cam.state().distance <= 12_000.0);
        }
        assert_eq!(cam.state().distance, 12_000.0);
    }

    #[test]
    fn zoom_is_multiplicative() {
        let mut cam = camera();
        cam.zoom(1.0);
        assert!((cam.state().distance - 900.0 * 0.92).abs() < 1e-3);
        cam.wheel(1.0);
        assert!((cam.state().distance - 900.0 * 0.92 * 1.08).abs() < 1e-2);
        cam.wheel(0.0);
        assert!((cam.state().distance - 900.0 * 0.92 * 1.08).abs() < 1e-2);
    }

    #[test]
    fn orbit_drag_clamps_pitch_exactly() {
        let mut cam = camera();
        cam.begin_drag(PointerButton::Primary);
        cam.drag(0.0, -100_000.0);
        assert_eq!(cam.state().pitch, 1.25);
        cam.drag(0.0, 100_000.0);
        assert_eq!(cam.state().pitch, -1.25);
    }

    #[test]
    fn orbit_drag_moves_yaw_against_pointer() {
        let mut cam = camera();
        let yaw0 = cam.state().yaw;
        cam.begin_drag(PointerButton::Primary);
        cam.drag(100.0, 0.0);
        assert!((cam.state().yaw - (yaw0 - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn drag_without_gesture_is_ignored() {
        let mut cam = camera();
        let before = cam.state();
        cam.drag(50.0, 50.0);
        assert_eq!(cam.state(), before);

        cam.begin_drag(PointerButton::Primary);
        cam.end_drag();
        cam.drag(50.0, 50.0);
        assert_eq!(cam.state(), before);
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        for yaw in [0.0, FRAC_PI_2, PI] {
            let cam = at_yaw(yaw);
            assert!(cam.right().dot(cam.forward()).abs() < 1e-6, "yaw {}", yaw);
            assert!((cam.right().length() - 1.0).abs() < 1e-6);
            assert!(cam.up().dot(cam.forward()).abs() < 1e-6);
            assert!(cam.up().y > 0.0);
        }
    }

    #[test]
    fn pan_stays_in_view_plane_and_scales_with_distance() {
        for yaw in [0.0, FRAC_PI_2, PI] {
            let mut cam = at_yaw(yaw);
            let forward = cam.forward();
            let t0 = cam.state().target;
            cam.begin_drag(PointerButton::Secondary);
            cam.drag(30.0, -20.0);
            let moved = cam.state().target - t0;
            assert!(moved.dot(forward).abs() < 1e-4, "yaw {}", yaw);
            // 900 / 1200 scene units per pixel.
            let expected = (30.0f32.powi(2) + 20.0f32.powi(2)).sqrt() * 0.75;
            assert!((moved.length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn pan_does_not_change_orientation() {
        let mut cam = camera();
        let before = cam.state();
        cam.begin_drag(PointerButton::Middle);
        cam.drag(10.0, 10.0);
        let after = cam.state();
        assert_eq!((after.yaw, after.pitch, after.distance), (before.yaw, before.pitch, before.distance));
        assert_ne!(after.target, before.target);
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = camera();
        cam.resize(800.0, 600.0);
        let ray = cam.screen_ray(400.0, 300.0);
        assert!(ray.direction.distance(cam.forward()) < 1e-5);
        assert_eq!(ray.origin, cam.pose().eye);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.projection_matrix() * cam.view_matrix() * cam.state().target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut cam = camera();
        cam.resize(1920.0, 1080.0);
        cam.resize(0.0, 500.0);
        assert_eq!(cam.viewport(), Vec2::new(1920.0, 1080.0));
        assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_configured_view() {
        let mut cam = camera();
        cam.zoom(1.0);
        cam.orbit(40.0, 40.0);
        cam.reset();
        assert_eq!(cam.state().distance, 900.0);
        assert_eq!(cam.state().yaw, 0.6);
    }
}
