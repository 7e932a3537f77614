//! Orbit preview polylines.
//!
//! A path is sampled from the ephemeris over a fixed window starting at an
//! anchor instant and never edited afterwards; a new anchor means a new path.

use glam::Vec3;

use crate::api::config::OrreryConfig;
use crate::api::types::BodyId;
use crate::core::catalog::{Body, Catalog};
use crate::core::time::{SimulationTime, SECONDS_PER_DAY};
use crate::ephemeris::{au_to_scene, Ephemeris, EphemerisError};

/// Closed loop of scene-space samples. The last sample is not a repeat of the
/// first; renderers connect them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    anchor: SimulationTime,
    points: Box<[Vec3]>,
}

impl OrbitPath {
    pub fn anchor(&self) -> SimulationTime {
        self.anchor
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with the first one repeated at the end, for line-strip renderers.
    pub fn closed_loop(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().chain(self.points.first()).copied()
    }
}

/// Every body's path for one anchor.
#[derive(Debug, Clone, Default)]
pub struct OrbitPaths {
    anchor: SimulationTime,
    paths: Vec<(BodyId, OrbitPath)>,
}

impl OrbitPaths {
    pub fn anchor(&self) -> SimulationTime {
        self.anchor
    }

    pub fn get(&self, body: BodyId) -> Option<&OrbitPath> {
        self.paths.iter().find(|(id, _)| *id == body).map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &OrbitPath)> {
        self.paths.iter().map(|(id, p)| (*id, p))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPathSampler {
    samples: usize,
    window_days: f64,
    scene_units_per_au: f64,
}

impl OrbitPathSampler {
    pub fn new(samples: usize, window_days: f64, scene_units_per_au: f64) -> Self {
        Self {
            samples: samples.max(1),
            window_days,
            scene_units_per_au,
        }
    }

    pub fn from_config(config: &OrreryConfig) -> Self {
        Self::new(config.orbit_samples, config.orbit_window_days, config.scene_units_per_au)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sample instants: `samples` evenly spaced offsets in `[anchor, anchor + window)`.
    pub fn sample_times(&self, anchor: SimulationTime) -> impl Iterator<Item = SimulationTime> {
        let step = self.window_days * SECONDS_PER_DAY / self.samples as f64;
        (0..self.samples).map(move |i| anchor + step * i as f64)
    }

    /// Sample one body. Any failing sample fails the whole path.
    pub fn build_path<E: Ephemeris + ?Sized>(
        &self,
        ephemeris: &E,
        body: &Body,
        anchor: SimulationTime,
    ) -> Result<OrbitPath, EphemerisError> {
        let points = self
            .sample_times(anchor)
            .map(|t| {
                ephemeris
                    .helio_position(body.ephemeris, t)
                    .map(|au| au_to_scene(au, self.scene_units_per_au))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrbitPath {
            anchor,
            points: points.into_boxed_slice(),
        })
    }

    /// Sample every catalog body. Bodies whose window cannot be sampled are
    /// left without a path.
    pub fn build<E: Ephemeris + ?Sized>(&self, catalog: &Catalog, ephemeris: &E, anchor: SimulationTime) -> OrbitPaths {
        let mut paths = Vec::with_capacity(catalog.len());
        for body in catalog.iter() {
            match self.build_path(ephemeris, body, anchor) {
                Ok(path) => paths.push((body.id, path)),
                Err(err) => log::warn!("no orbit path for {}: {}", body.name, err),
            }
        }
        log::info!("built {} orbit paths anchored at {}", paths.len(), anchor);
        OrbitPaths { anchor, paths }
    }
}
