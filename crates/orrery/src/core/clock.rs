use crate::api::config::OrreryConfig;
use crate::core::time::SimulationTime;

/// Virtual clock driving the simulation.
///
/// Runs forward or backward at a signed scale (simulated seconds per real
/// second). A single `advance` never consumes more than `max_frame_dt` of real
/// time, so a stalled host does not produce one huge leap.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    time: SimulationTime,
    scale: f64,
    paused: bool,
    max_frame_dt: f64,
    min_scale: f64,
}

impl SimulationClock {
    pub fn new(start: SimulationTime, scale: f64, max_frame_dt: f64, min_scale: f64) -> Self {
        let mut clock = Self {
            time: start,
            scale: min_scale,
            paused: false,
            max_frame_dt,
            min_scale,
        };
        clock.set_scale(scale);
        clock
    }

    pub fn from_config(config: &OrreryConfig, start: SimulationTime) -> Self {
        let mut clock = Self::new(start, config.initial_time_scale, config.max_frame_dt, config.min_time_scale);
        clock.paused = config.start_paused;
        clock
    }

    /// Advance by one frame of real time. Returns the simulated seconds applied.
    pub fn advance(&mut self, real_dt: f64) -> f64 {
        if self.paused || !(real_dt > 0.0) {
            return 0.0;
        }
        let step = real_dt.min(self.max_frame_dt) * self.scale;
        self.time += step;
        step
    }

    /// Set the signed time scale and return the scale actually applied.
    ///
    /// Zero is replaced by the minimum magnitude with the same sign bit; pausing
    /// is a separate flag. Non-finite requests are ignored.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        if !scale.is_finite() {
            log::warn!("ignoring non-finite time scale {}", scale);
            return self.scale;
        }
        self.scale = if scale == 0.0 {
            let normalized = self.min_scale.copysign(scale);
            log::debug!("time scale 0 normalised to {}", normalized);
            normalized
        } else {
            scale
        };
        self.scale
    }

    /// Reset the clock to `time`. Callers own invalidation of anything
    /// anchored to the previous time origin.
    pub fn jump_to(&mut self, time: SimulationTime) {
        self.time = time;
    }

    /// Flip the paused flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn time(&self) -> SimulationTime {
        self.time
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(scale: f64) -> SimulationClock {
        SimulationClock::new(SimulationTime::J2000, scale, 0.05, 1.0)
    }

    #[test]
    fn advance_applies_scale_exactly() {
        for &s in &[600.0, -600.0, 0.25, -3.5e7, 86_400.0] {
            let mut c = clock(s);
            let t0 = c.time();
            c.advance(0.016);
            assert_eq!(c.time(), t0 + 0.016 * s, "scale {}", s);
        }
    }

    #[test]
    fn large_frame_delta_is_clamped() {
        let mut c = clock(600.0);
        let applied = c.advance(10.0);
        assert!((applied - 30.0).abs() < 1e-9);
        assert!((c.time().seconds_since_j2000() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn negative_and_nan_deltas_do_nothing() {
        let mut c = clock(600.0);
        assert_eq!(c.advance(-1.0), 0.0);
        assert_eq!(c.advance(f64::NAN), 0.0);
        assert_eq!(c.time(), SimulationTime::J2000);
    }

    #[test]
    fn twenty_frames_of_one_second_at_600x() {
        let mut c = clock(600.0);
        for _ in 0..20 {
            c.advance(0.05);
        }
        assert!((c.time().seconds_since_j2000() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn zero_scale_never_freezes_time() {
        let mut c = clock(10.0);
        assert_eq!(c.set_scale(0.0), 1.0);
        assert_eq!(c.set_scale(-0.0), -1.0);
        let t0 = c.time();
        c.advance(0.05);
        assert_ne!(c.time(), t0);
    }

    #[test]
    fn non_finite_scale_is_rejected() {
        let mut c = clock(42.0);
        assert_eq!(c.set_scale(f64::NAN), 42.0);
        assert_eq!(c.set_scale(f64::INFINITY), 42.0);
        assert_eq!(c.scale(), 42.0);
    }

    #[test]
    fn pause_toggle_round_trips_and_freezes() {
        let mut c = clock(600.0);
        assert!(c.toggle_pause());
        let t0 = c.time();
        for _ in 0..5 {
            assert_eq!(c.advance(0.05), 0.0);
        }
        assert_eq!(c.time(), t0);
        assert!(!c.toggle_pause());
        c.advance(0.05);
        assert!(c.time() > t0);
    }

    #[test]
    fn huge_scale_keeps_the_time_label_printable() {
        let mut c = clock(1.0);
        c.set_scale(1.0e30);
        c.advance(0.05);
        assert_eq!(c.time().to_string(), "beyond calendar range (future)");
    }

    #[test]
    fn jump_to_resets_time_only() {
        let mut c = clock(-5.0);
        c.toggle_pause();
        let target = SimulationTime::from_days_since_j2000(9000.0);
        c.jump_to(target);
        assert_eq!(c.time(), target);
        assert!(c.is_paused());
        assert_eq!(c.scale(), -5.0);
    }
}
