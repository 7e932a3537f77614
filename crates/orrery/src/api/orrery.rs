//! The per-frame update pipeline and its command surface.
//!
//! [`Orrery`] owns every piece of mutable state (clock, trails, orbit paths,
//! camera, selection). Hosts drive it with [`Orrery::tick`] from their frame
//! callback and forward UI events to the `on_*` commands between ticks.

use std::sync::Arc;

use glam::Vec2;

use crate::api::config::{ConfigError, OrreryConfig};
use crate::api::types::{BodyId, PointerButton};
use crate::core::catalog::Catalog;
use crate::core::clock::SimulationClock;
use crate::core::time::SimulationTime;
use crate::ephemeris::{au_to_scene, Ephemeris};
use crate::renderer::camera::OrbitCamera;
use crate::renderer::traits::{BodyPlacement, FrameData, InfoDisplay, Renderer, TrailView};
use crate::systems::orbit_path::{OrbitPathSampler, OrbitPaths};
use crate::systems::picking::{pick, BoundingSphere};
use crate::systems::selection::{InfoView, SelectionState};
use crate::systems::trail::TrailRecorder;

/// Source of the real current instant, used by [`Orrery::jump_to_now`].
pub type WallClock = fn() -> SimulationTime;

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Clock time after advancing.
    pub time: SimulationTime,
    /// Simulated seconds applied this frame.
    pub step: f64,
    /// Bodies placed this frame.
    pub placed: usize,
    /// Bodies whose position could not be resolved this frame.
    pub skipped: Vec<BodyId>,
}

/// Pointer state between down and up.
#[derive(Debug, Clone, Copy)]
struct PointerGesture {
    last: Vec2,
    travelled: f32,
}

pub struct Orrery<E: Ephemeris> {
    catalog: Arc<Catalog>,
    ephemeris: E,
    config: OrreryConfig,
    clock: SimulationClock,
    sampler: OrbitPathSampler,
    orbits: OrbitPaths,
    orbit_generation: u32,
    trails: TrailRecorder,
    show_trails: bool,
    camera: OrbitCamera,
    selection: SelectionState,
    placements: Vec<BodyPlacement>,
    skipped: Vec<BodyId>,
    pointer: Option<PointerGesture>,
    /// Set when the last pointer gesture was a drag; swallows the click that follows it.
    suppress_click: bool,
    wall_clock: WallClock,
}

impl<E: Ephemeris> Orrery<E> {
    /// Build the pipeline with the clock at `start` and orbit paths anchored there.
    pub fn new(catalog: Arc<Catalog>, ephemeris: E, config: OrreryConfig, start: SimulationTime) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = OrbitPathSampler::from_config(&config);
        let orbits = sampler.build(&catalog, &ephemeris, start);
        let trails = TrailRecorder::new(catalog.iter().map(|b| b.id), config.trail_capacity);
        log::info!(
            "orrery ready: {} bodies, start {}, scale {}",
            catalog.len(),
            start,
            config.initial_time_scale
        );
        Ok(Self {
            clock: SimulationClock::from_config(&config, start),
            camera: OrbitCamera::new(&config.camera),
            show_trails: config.show_trails,
            placements: Vec::with_capacity(catalog.len()),
            skipped: Vec::new(),
            catalog,
            ephemeris,
            config,
            sampler,
            orbits,
            orbit_generation: 0,
            trails,
            selection: SelectionState::new(),
            pointer: None,
            suppress_click: false,
            wall_clock: SimulationTime::now,
        })
    }

    /// Replace the wall clock used by `jump_to_now`.
    pub fn with_wall_clock(mut self, wall_clock: WallClock) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    /// Run one frame: advance the clock, place bodies, record trails, derive
    /// camera and info, then hand everything to the backends.
    pub fn tick(&mut self, real_dt: f64, renderer: &mut dyn Renderer, info: &mut dyn InfoDisplay) -> FrameReport {
        let step = self.clock.advance(real_dt);
        let time = self.clock.time();

        self.place_bodies(time);

        let view = match self.selection.live_info(&self.catalog, &self.ephemeris, time) {
            Ok(view) => view,
            Err(err) => {
                log::warn!("info for {:?} unavailable: {}", self.selection.selected(), err);
                InfoView::Unselected
            }
        };
        info.show(&view);

        let trails: Vec<TrailView<'_>> = if self.show_trails {
            self.trails
                .iter()
                .map(|(body, buffer)| {
                    let (older, newer) = buffer.as_slices();
                    TrailView { body, older, newer }
                })
                .collect()
        } else {
            Vec::new()
        };

        renderer.draw(&FrameData {
            time,
            bodies: &self.placements,
            trails: &trails,
            orbits: &self.orbits,
            orbit_generation: self.orbit_generation,
            camera: self.camera.pose(),
            projection: self.camera.projection(),
            show_trails: self.show_trails,
        });

        FrameReport {
            time,
            step,
            placed: self.placements.len(),
            skipped: self.skipped.clone(),
        }
    }

    /// Resolve every body at `time`. A failing body is skipped for this frame
    /// only; the rest are placed as usual.
    fn place_bodies(&mut self, time: SimulationTime) {
        let record = self.show_trails || self.config.record_hidden_trails;
        let previously_skipped = std::mem::take(&mut self.skipped);
        self.placements.clear();

        for body in self.catalog.iter() {
            match self.ephemeris.helio_position(body.ephemeris, time) {
                Ok(au) => {
                    let position = au_to_scene(au, self.config.scene_units_per_au);
                    self.placements.push(BodyPlacement {
                        body: body.id,
                        position,
                        radius: body.radius,
                        color: body.color,
                        selected: self.selection.is_selected(body.id),
                    });
                    if record {
                        self.trails.push(body.id, position);
                    }
                }
                Err(err) => {
                    if previously_skipped.contains(&body.id) {
                        log::trace!("{} still skipped: {}", body.name, err);
                    } else {
                        log::warn!("skipping {} this frame: {}", body.name, err);
                    }
                    self.skipped.push(body.id);
                }
            }
        }
    }

    /// Set the signed time scale; returns the scale actually applied.
    pub fn set_time_scale(&mut self, scale: f64) -> f64 {
        self.clock.set_scale(scale)
    }

    /// Move the clock to the wall-clock instant. Orbit paths are resampled at
    /// the new anchor and every trail is cleared.
    pub fn jump_to_now(&mut self) -> SimulationTime {
        let now = (self.wall_clock)();
        self.clock.jump_to(now);
        self.orbits = self.sampler.build(&self.catalog, &self.ephemeris, now);
        self.orbit_generation = self.orbit_generation.wrapping_add(1);
        self.trails.clear_all();
        log::info!("jumped to {}", now);
        now
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        log::debug!("paused: {}", paused);
        paused
    }

    /// Flip trail visibility. Recorded history is kept either way.
    pub fn toggle_trails(&mut self) -> bool {
        self.show_trails = !self.show_trails;
        log::debug!("trails visible: {}", self.show_trails);
        self.show_trails
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, x: f32, y: f32) {
        self.camera.begin_drag(button);
        self.pointer = Some(PointerGesture {
            last: Vec2::new(x, y),
            travelled: 0.0,
        });
        self.suppress_click = false;
    }

    /// Absolute pointer position; converted to a drag delta while a button is held.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let Some(gesture) = self.pointer.as_mut() else {
            return;
        };
        let position = Vec2::new(x, y);
        let delta = position - gesture.last;
        gesture.last = position;
        gesture.travelled += delta.length();
        self.camera.drag(delta.x, delta.y);
    }

    pub fn on_pointer_up(&mut self, _button: PointerButton, x: f32, y: f32) {
        self.on_pointer_move(x, y);
        if let Some(gesture) = self.pointer.take() {
            self.suppress_click = gesture.travelled > self.config.camera.drag_threshold;
        }
        self.camera.end_drag();
    }

    /// Wheel notch; positive `delta_sign` zooms out.
    pub fn on_wheel(&mut self, delta_sign: f32) {
        self.camera.wheel(delta_sign);
    }

    /// Pick the nearest body under pixel (x, y) against this frame's
    /// placements. A miss clears the selection. A click ending a drag leaves
    /// the selection unchanged. The `selected` flag on placements catches up
    /// on the next tick.
    pub fn on_click(&mut self, x: f32, y: f32) -> Option<BodyId> {
        if std::mem::take(&mut self.suppress_click) {
            return self.selection.selected();
        }
        let ray = self.camera.screen_ray(x, y);
        let hit = pick(
            &ray,
            self.placements
                .iter()
                .map(|p| (p.body, BoundingSphere::new(p.position, p.radius))),
        );
        self.selection.apply_pick(hit)
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -- Accessors --

    pub fn time(&self) -> SimulationTime {
        self.clock.time()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selection.selected()
    }

    pub fn trails(&self) -> &TrailRecorder {
        &self.trails
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn orbits(&self) -> &OrbitPaths {
        &self.orbits
    }

    pub fn orbit_generation(&self) -> u32 {
        self.orbit_generation
    }
}
