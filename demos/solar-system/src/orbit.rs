/// Keplerian orbital mechanics: pure math, no engine dependencies.
///
/// Uses f64 throughout for precision (centuries × deg/century = large numbers).
/// Positions are heliocentric ecliptic J2000 coordinates in AU.

use glam::DVec3;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Keplerian elements at J2000 with secular rates per Julian century.
/// Source: Standish (1992) / JPL approximate planetary positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination to the ecliptic (degrees)
    pub i: f64,
    /// Mean longitude (degrees) at J2000
    pub l0: f64,
    /// Mean longitude rate (degrees per Julian century)
    pub l_dot: f64,
    /// Longitude of perihelion (degrees) at J2000
    pub w0: f64,
    /// Longitude of perihelion rate (degrees per Julian century)
    pub w_dot: f64,
    /// Longitude of the ascending node (degrees)
    pub node: f64,
}

/// Solve Kepler's equation: E - e·sin(E) = M
/// Using Newton-Raphson iteration.
/// `mean_anomaly` in radians, returns eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..15 {
        let delta = ea - eccentricity * ea.sin() - mean_anomaly;
        let derivative = 1.0 - eccentricity * ea.cos();
        ea -= delta / derivative;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Wrap an angle in degrees into [-180, 180).
fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Heliocentric ecliptic position (AU) at `t_centuries` Julian centuries
/// from J2000.
pub fn heliocentric_position(elements: &OrbitalElements, t_centuries: f64) -> DVec3 {
    let a = elements.a;
    let e = elements.e;

    let l = elements.l0 + elements.l_dot * t_centuries;
    let w = elements.w0 + elements.w_dot * t_centuries;

    // Argument of perihelion and mean anomaly
    let arg_peri = (w - elements.node) * DEG_TO_RAD;
    let m = wrap_degrees(l - w) * DEG_TO_RAD;

    let ea = solve_kepler(m, e);

    // Position in the orbital plane, x towards perihelion
    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let (so, co) = arg_peri.sin_cos();
    let (sn, cn) = (elements.node * DEG_TO_RAD).sin_cos();
    let (si, ci) = (elements.i * DEG_TO_RAD).sin_cos();

    DVec3::new(
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        (so * si) * xp + (co * si) * yp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH: OrbitalElements = OrbitalElements {
        a: 1.00000261,
        e: 0.01671123,
        i: -0.00001531,
        l0: 100.46457166,
        l_dot: 35999.37244981,
        w0: 102.93768193,
        w_dot: 0.32327364,
        node: 0.0,
    };

    #[test]
    fn kepler_circular_orbit() {
        // For e=0, eccentric anomaly = mean anomaly
        let ea = solve_kepler(1.0, 0.0);
        assert!((ea - 1.0).abs() < 1e-10);
    }

    #[test]
    fn kepler_pluto_eccentricity() {
        for m in [-3.0, -1.0, 0.1, 1.5, 3.1] {
            let ea = solve_kepler(m, 0.2488);
            let residual = ea - 0.2488 * ea.sin() - m;
            assert!(residual.abs() < 1e-12, "m = {m}, residual = {residual}");
        }
    }

    #[test]
    fn wrap_keeps_range() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert!((wrap_degrees(36_000.0 + 10.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn earth_near_perihelion_at_j2000() {
        // Perihelion is early January, so r is slightly below 1 AU.
        let p = heliocentric_position(&EARTH, 0.0);
        let r = p.length();
        assert!(r > 0.98 && r < 0.99, "Earth distance = {r} AU");
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn radius_stays_between_apsides() {
        let (q, big_q) = (EARTH.a * (1.0 - EARTH.e), EARTH.a * (1.0 + EARTH.e));
        for k in 0..100 {
            let r = heliocentric_position(&EARTH, k as f64 * 0.0137).length();
            assert!(r >= q - 1e-9 && r <= big_q + 1e-9, "r = {r}");
        }
    }

    #[test]
    fn inclined_orbit_leaves_the_ecliptic() {
        let tilted = OrbitalElements {
            i: 30.0,
            node: 45.0,
            ..EARTH
        };
        let max_z = (0..365)
            .map(|d| heliocentric_position(&tilted, d as f64 / 36525.0).z.abs())
            .fold(0.0, f64::max);
        // a·sin(30°) up to eccentricity.
        assert!(max_z > 0.48 && max_z < 0.52, "max z = {max_z}");
    }
}
