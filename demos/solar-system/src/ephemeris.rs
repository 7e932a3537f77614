use glam::DVec3;
use orrery::{Ephemeris, EphemerisError, EphemerisId, SimulationTime};

use crate::bodies::{self, SUN};
use crate::orbit::{heliocentric_position, OrbitalElements};

/// Approximate element sets are fitted for 3000 BC – 3000 AD.
pub const MAX_CENTURIES: f64 = 50.0;

/// Two-body Keplerian ephemeris with secular element rates.
#[derive(Debug, Clone)]
pub struct KeplerEphemeris {
    orbits: Vec<(EphemerisId, OrbitalElements)>,
}

impl KeplerEphemeris {
    pub fn new(orbits: Vec<(EphemerisId, OrbitalElements)>) -> Self {
        Self { orbits }
    }

    /// The eight planets and Pluto.
    pub fn solar_system() -> Self {
        Self::new(bodies::planet_elements().collect())
    }

    fn elements(&self, body: EphemerisId) -> Option<&OrbitalElements> {
        self.orbits.iter().find(|(id, _)| *id == body).map(|(_, el)| el)
    }
}

impl Ephemeris for KeplerEphemeris {
    fn helio_position(&self, body: EphemerisId, time: SimulationTime) -> Result<DVec3, EphemerisError> {
        let t = time.centuries_since_j2000();
        if !(t.abs() <= MAX_CENTURIES) {
            return Err(EphemerisError::TimeOutOfRange { time });
        }
        if body == SUN {
            return Ok(DVec3::ZERO);
        }
        let elements = self.elements(body).ok_or(EphemerisError::UnknownBody(body))?;
        Ok(heliocentric_position(elements, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_days(days: f64) -> SimulationTime {
        SimulationTime::from_days_since_j2000(days)
    }

    #[test]
    fn sun_sits_at_origin() {
        let eph = KeplerEphemeris::solar_system();
        assert_eq!(eph.helio_position(SUN, at_days(12_345.0)).unwrap(), DVec3::ZERO);
    }

    #[test]
    fn earth_returns_after_one_year() {
        let eph = KeplerEphemeris::solar_system();
        let earth = EphemerisId(399);
        let start = eph.helio_position(earth, at_days(0.0)).unwrap();
        let later = eph.helio_position(earth, at_days(365.2564)).unwrap();
        assert!(start.distance(later) < 0.01, "drift = {}", start.distance(later));
    }

    #[test]
    fn mars_distance_between_apsides() {
        let eph = KeplerEphemeris::solar_system();
        for k in 0..50 {
            let r = eph.helio_position(EphemerisId(499), at_days(k as f64 * 40.0)).unwrap().length();
            assert!(r > 1.38 && r < 1.67, "r = {r}");
        }
    }

    #[test]
    fn pluto_rises_well_out_of_the_ecliptic() {
        let eph = KeplerEphemeris::solar_system();
        let max_z = (0..250)
            .map(|year| eph.helio_position(EphemerisId(999), at_days(year as f64 * 365.25)).unwrap().z.abs())
            .fold(0.0, f64::max);
        assert!(max_z > 5.0, "max |z| = {max_z}");
    }

    #[test]
    fn unknown_body_is_reported() {
        let eph = KeplerEphemeris::solar_system();
        assert_eq!(
            eph.helio_position(EphemerisId(42), at_days(0.0)),
            Err(EphemerisError::UnknownBody(EphemerisId(42)))
        );
    }

    #[test]
    fn range_is_fifty_centuries() {
        let eph = KeplerEphemeris::solar_system();
        let edge = SimulationTime::from_days_since_j2000(49.9 * 36_525.0);
        assert!(eph.helio_position(EphemerisId(399), edge).is_ok());

        let beyond = SimulationTime::from_days_since_j2000(-50.1 * 36_525.0);
        assert!(matches!(
            eph.helio_position(EphemerisId(399), beyond),
            Err(EphemerisError::TimeOutOfRange { .. })
        ));
        // Range applies to the Sun as well.
        assert!(eph.helio_position(SUN, beyond).is_err());
        let nan = SimulationTime::from_seconds_since_j2000(f64::NAN);
        assert!(eph.helio_position(EphemerisId(399), nan).is_err());
    }
}
