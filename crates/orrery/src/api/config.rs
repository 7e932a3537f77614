use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted per-body trail ring.
pub const MAX_TRAIL_CAPACITY: usize = 100_000;
/// Largest accepted orbit preview sample count.
pub const MAX_ORBIT_SAMPLES: usize = 100_000;

/// Failure to load or validate configuration / catalog data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Orbit camera limits, sensitivities and initial pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial yaw (radians).
    pub yaw: f32,
    /// Initial pitch (radians).
    pub pitch: f32,
    /// Initial distance from target (scene units).
    pub distance: f32,
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pitch is clamped to [-pitch_limit, pitch_limit] to avoid gimbal lock.
    pub pitch_limit: f32,
    /// Radians of yaw/pitch per pixel of orbit drag.
    pub orbit_sensitivity: f32,
    /// Relative distance change per wheel notch.
    pub zoom_step: f32,
    /// Pan moves `distance / pan_divisor` scene units per pixel.
    pub pan_divisor: f32,
    pub fov_y_degrees: f32,
    /// Pointer travel (pixels) after which a press counts as a drag, not a click.
    pub drag_threshold: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.5,
            distance: 900.0,
            target: [0.0, 0.0, 0.0],
            min_distance: 50.0,
            max_distance: 12_000.0,
            pitch_limit: 1.25,
            orbit_sensitivity: 0.005,
            zoom_step: 0.08,
            pan_divisor: 1200.0,
            fov_y_degrees: 45.0,
            drag_threshold: 4.0,
        }
    }
}

/// Engine configuration, analogous to a game config: capacities, scales and
/// clock behaviour. Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Ring capacity of each body's trail.
    pub trail_capacity: usize,
    /// Keep recording trails while they are hidden.
    pub record_hidden_trails: bool,
    /// Samples per orbit preview polyline.
    pub orbit_samples: usize,
    /// Length of the orbit preview window in days.
    pub orbit_window_days: f64,
    /// Fixed linear AU -> scene unit factor.
    pub scene_units_per_au: f64,
    /// Largest real-time delta (seconds) a single frame may consume.
    pub max_frame_dt: f64,
    /// Simulated seconds per real second at startup.
    pub initial_time_scale: f64,
    /// Magnitude substituted when a zero time scale is requested.
    pub min_time_scale: f64,
    pub start_paused: bool,
    pub show_trails: bool,
    pub camera: CameraConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            trail_capacity: 220,
            record_hidden_trails: true,
            orbit_samples: 360,
            orbit_window_days: 365.25,
            scene_units_per_au: 60.0,
            max_frame_dt: 0.05,
            initial_time_scale: 86_400.0,
            min_time_scale: 1.0,
            start_paused: false,
            show_trails: true,
            camera: CameraConfig::default(),
        }
    }
}

impl OrreryConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if !(1..=MAX_TRAIL_CAPACITY).contains(&self.trail_capacity) {
            return invalid("trail_capacity must lie in [1, 100000]");
        }
        if !(1..=MAX_ORBIT_SAMPLES).contains(&self.orbit_samples) {
            return invalid("orbit_samples must lie in [1, 100000]");
        }
        if !(self.orbit_window_days > 0.0) {
            return invalid("orbit_window_days must be positive");
        }
        if !(self.scene_units_per_au > 0.0) {
            return invalid("scene_units_per_au must be positive");
        }
        if !(self.max_frame_dt > 0.0) {
            return invalid("max_frame_dt must be positive");
        }
        if !(self.min_time_scale > 0.0) || !self.min_time_scale.is_finite() {
            return invalid("min_time_scale must be a positive finite number");
        }
        if !self.initial_time_scale.is_finite() {
            return invalid("initial_time_scale must be finite");
        }

        let cam = &self.camera;
        if !(cam.min_distance > 0.0) || !(cam.min_distance <= cam.max_distance) {
            return invalid("camera distances must satisfy 0 < min_distance <= max_distance");
        }
        if !(cam.pitch_limit > 0.0 && cam.pitch_limit < std::f32::consts::FRAC_PI_2) {
            return invalid("camera pitch_limit must lie in (0, pi/2)");
        }
        if !(cam.pan_divisor > 0.0) {
            return invalid("camera pan_divisor must be positive");
        }
        if !(cam.zoom_step > 0.0 && cam.zoom_step < 1.0) {
            return invalid("camera zoom_step must lie in (0, 1)");
        }
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return invalid("camera fov_y_degrees must lie in (0, 180)");
        }
        Ok(())
    }
}
