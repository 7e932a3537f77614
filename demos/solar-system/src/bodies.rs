/// Solar System catalog: J2000 orbital elements and visual properties.
///
/// Orbital elements from Standish (1992) / JPL approximate planetary positions,
/// valid 3000 BC – 3000 AD. Visual radii are exaggerated for readability (real
/// planets would be sub-pixel at 60 scene units per AU).

use orrery::{Body, BodyId, Catalog, ConfigError, EphemerisId};

use crate::orbit::OrbitalElements;

/// NAIF-style ephemeris id of the Sun.
pub const SUN: EphemerisId = EphemerisId(10);

/// One catalog entry: identity, visuals and (for planets) orbit.
pub struct BodyDesc {
    pub id: BodyId,
    pub ephemeris: EphemerisId,
    pub name: &'static str,
    pub radius: f32,
    pub color: (f32, f32, f32),
    pub description: &'static str,
    /// `None` for the Sun, which sits at the origin.
    pub elements: Option<OrbitalElements>,
}

const fn elements(a: f64, e: f64, i: f64, l0: f64, w0: f64, node: f64, l_dot: f64, w_dot: f64) -> Option<OrbitalElements> {
    Some(OrbitalElements { a, e, i, l0, l_dot, w0, w_dot, node })
}

pub static BODIES: [BodyDesc; 10] = [
    BodyDesc {
        id: BodyId(0), ephemeris: SUN, name: "Sun",
        radius: 8.0, color: (1.0, 0.9, 0.5),
        description: "G-type main-sequence star holding 99.86% of the system's mass.",
        elements: None,
    },
    BodyDesc {
        id: BodyId(1), ephemeris: EphemerisId(199), name: "Mercury",
        radius: 1.2, color: (0.60, 0.55, 0.50),
        description: "Smallest planet, with the most eccentric orbit of the eight.",
        elements: elements(0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593, 149472.67411175, 0.16047689),
    },
    BodyDesc {
        id: BodyId(2), ephemeris: EphemerisId(299), name: "Venus",
        radius: 1.8, color: (0.90, 0.75, 0.40),
        description: "Cloud-covered rocky planet with a runaway greenhouse atmosphere.",
        elements: elements(0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255, 58517.81538729, 0.00268329),
    },
    BodyDesc {
        id: BodyId(3), ephemeris: EphemerisId(399), name: "Earth",
        radius: 2.0, color: (0.20, 0.40, 0.80),
        description: "Home. Elements are for the Earth-Moon barycenter.",
        elements: elements(1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0, 35999.37244981, 0.32327364),
    },
    BodyDesc {
        id: BodyId(4), ephemeris: EphemerisId(499), name: "Mars",
        radius: 1.5, color: (0.80, 0.30, 0.15),
        description: "Cold desert planet with the tallest volcano in the Solar System.",
        elements: elements(1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891, 19140.30268499, 0.44441088),
    },
    BodyDesc {
        id: BodyId(5), ephemeris: EphemerisId(599), name: "Jupiter",
        radius: 5.0, color: (0.80, 0.70, 0.50),
        description: "Gas giant more than twice as massive as all other planets combined.",
        elements: elements(5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909, 3034.74612775, 0.21252668),
    },
    BodyDesc {
        id: BodyId(6), ephemeris: EphemerisId(699), name: "Saturn",
        radius: 4.5, color: (0.85, 0.75, 0.50),
        description: "Ringed gas giant, less dense than water.",
        elements: elements(9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448, 1222.49362201, -0.41897216),
    },
    BodyDesc {
        id: BodyId(7), ephemeris: EphemerisId(799), name: "Uranus",
        radius: 3.0, color: (0.50, 0.75, 0.85),
        description: "Ice giant rotating on its side.",
        elements: elements(19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503, 428.48202785, 0.40805281),
    },
    BodyDesc {
        id: BodyId(8), ephemeris: EphemerisId(899), name: "Neptune",
        radius: 3.0, color: (0.25, 0.35, 0.80),
        description: "Outermost planet, found by prediction before observation.",
        elements: elements(30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574, 218.45945325, -0.32241464),
    },
    BodyDesc {
        id: BodyId(9), ephemeris: EphemerisId(999), name: "Pluto",
        radius: 1.0, color: (0.70, 0.60, 0.50),
        description: "Dwarf planet on an inclined orbit that crosses Neptune's.",
        elements: elements(39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684, 145.20780515, -0.04062942),
    },
];

/// Catalog of the Sun, the eight planets and Pluto.
pub fn catalog() -> Result<Catalog, ConfigError> {
    Catalog::new(
        BODIES
            .iter()
            .map(|b| {
                Body::new(b.id, b.name, b.ephemeris)
                    .with_radius(b.radius)
                    .with_color(b.color.0, b.color.1, b.color.2)
                    .with_description(b.description)
            })
            .collect(),
    )
}

/// Orbital elements keyed by ephemeris id, for every body that has them.
pub fn planet_elements() -> impl Iterator<Item = (EphemerisId, OrbitalElements)> {
    BODIES.iter().filter_map(|b| b.elements.map(|el| (b.ephemeris, el)))
}
