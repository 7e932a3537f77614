//! Contract for the external position source.
//!
//! An [`Ephemeris`] maps (body, instant) to a heliocentric ecliptic position in
//! AU. Implementations must be pure: the orbit sampler queries arbitrary
//! instants, past and future, and expects no side effects.

use glam::{DVec3, Vec3};
use thiserror::Error;

use crate::api::types::EphemerisId;
use crate::core::time::SimulationTime;

/// Why a position could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("unknown body (ephemeris id {0})")]
    UnknownBody(EphemerisId),
    #[error("{time} is outside the supported time range")]
    TimeOutOfRange { time: SimulationTime },
}

pub trait Ephemeris {
    /// Heliocentric ecliptic position of `body` at `time`, in AU.
    fn helio_position(&self, body: EphemerisId, time: SimulationTime) -> Result<DVec3, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn helio_position(&self, body: EphemerisId, time: SimulationTime) -> Result<DVec3, EphemerisError> {
        (**self).helio_position(body, time)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn helio_position(&self, body: EphemerisId, time: SimulationTime) -> Result<DVec3, EphemerisError> {
        (**self).helio_position(body, time)
    }
}

/// Ecliptic AU -> scene units. The scene is Y-up and right-handed, so the
/// ecliptic north pole (z) becomes +Y and ecliptic y becomes -Z.
pub fn au_to_scene(au: DVec3, scene_units_per_au: f64) -> Vec3 {
    let s = au * scene_units_per_au;
    Vec3::new(s.x as f32, s.z as f32, (-s.y) as f32)
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::f64::consts::TAU;

    /// Deterministic circular orbits in the ecliptic plane.
    pub(crate) struct StubEphemeris {
        /// (id, radius in AU, period in days); a zero period means fixed.
        pub orbits: Vec<(EphemerisId, f64, f64)>,
        pub failing: Option<EphemerisId>,
        /// Reject instants further than this from J2000.
        pub max_abs_days: f64,
    }

    impl StubEphemeris {
        pub(crate) fn new() -> Self {
            Self {
                orbits: vec![
                    (EphemerisId(10), 0.0, 0.0),
                    (EphemerisId(299), 0.72, 224.7),
                    (EphemerisId(399), 1.0, 365.25),
                    (EphemerisId(499), 1.52, 687.0),
                ],
                failing: None,
                max_abs_days: 1.0e6,
            }
        }

        pub(crate) fn failing(mut self, id: EphemerisId) -> Self {
            self.failing = Some(id);
            self
        }
    }

    impl Ephemeris for StubEphemeris {
        fn helio_position(&self, body: EphemerisId, time: SimulationTime) -> Result<DVec3, EphemerisError> {
            if self.failing == Some(body) {
                return Err(EphemerisError::UnknownBody(body));
            }
            if time.days_since_j2000().abs() > self.max_abs_days {
                return Err(EphemerisError::TimeOutOfRange { time });
            }
            let &(_, radius, period) = self
                .orbits
                .iter()
                .find(|(id, _, _)| *id == body)
                .ok_or(EphemerisError::UnknownBody(body))?;
            if period == 0.0 {
                return Ok(DVec3::ZERO);
            }
            let angle = TAU * time.days_since_j2000() / period;
            Ok(DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0))
        }
    }
}
