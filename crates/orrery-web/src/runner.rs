use std::sync::Arc;

use glam::Vec3;
use orrery::{
    BodyInstance, Catalog, ConfigError, Ephemeris, FrameData, InfoDisplay, InfoView, Orrery, OrreryConfig,
    PointerButton, Renderer, WallClock,
};

/// Floats in the packed camera block: eye xyz, look-at xyz, fov_y, aspect, near, far.
pub const CAMERA_FLOATS: usize = 10;

/// Flat per-frame buffers read by the TypeScript renderer.
///
/// Spans are `(body id, first vertex, vertex count)` triples of u32.
pub struct FrameBuffer {
    instances: Vec<BodyInstance>,
    trail_vertices: Vec<f32>,
    trail_spans: Vec<u32>,
    orbit_vertices: Vec<f32>,
    orbit_spans: Vec<u32>,
    /// Generation of the orbit paths currently packed.
    orbit_generation: Option<u32>,
    camera: [f32; CAMERA_FLOATS],
    show_trails: bool,
    viewport: (u32, u32),
}

impl FrameBuffer {
    pub fn with_capacity(bodies: usize, trail_capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(bodies),
            trail_vertices: Vec::with_capacity(bodies * trail_capacity * 3),
            trail_spans: Vec::with_capacity(bodies * 3),
            orbit_vertices: Vec::new(),
            orbit_spans: Vec::with_capacity(bodies * 3),
            orbit_generation: None,
            camera: [0.0; CAMERA_FLOATS],
            show_trails: true,
            viewport: (0, 0),
        }
    }

    fn pack_orbits(&mut self, frame: &FrameData) {
        self.orbit_vertices.clear();
        self.orbit_spans.clear();
        for (body, path) in frame.orbits.iter() {
            self.orbit_spans
                .extend_from_slice(&[body.0, (self.orbit_vertices.len() / 3) as u32, path.len() as u32]);
            self.orbit_vertices.extend_from_slice(bytemuck::cast_slice::<Vec3, f32>(path.points()));
        }
        self.orbit_generation = Some(frame.orbit_generation);
        log::debug!("uploaded orbit generation {}", frame.orbit_generation);
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn trail_vertices_ptr(&self) -> *const f32 {
        self.trail_vertices.as_ptr()
    }

    pub fn trail_vertex_count(&self) -> u32 {
        (self.trail_vertices.len() / 3) as u32
    }

    pub fn trail_vertices(&self) -> &[f32] {
        &self.trail_vertices
    }

    pub fn trail_spans(&self) -> &[u32] {
        &self.trail_spans
    }

    pub fn trail_spans_ptr(&self) -> *const u32 {
        self.trail_spans.as_ptr()
    }

    pub fn trail_span_count(&self) -> u32 {
        (self.trail_spans.len() / 3) as u32
    }

    pub fn orbit_vertices_ptr(&self) -> *const f32 {
        self.orbit_vertices.as_ptr()
    }

    pub fn orbit_vertex_count(&self) -> u32 {
        (self.orbit_vertices.len() / 3) as u32
    }

    pub fn orbit_spans_ptr(&self) -> *const u32 {
        self.orbit_spans.as_ptr()
    }

    pub fn orbit_span_count(&self) -> u32 {
        (self.orbit_spans.len() / 3) as u32
    }

    /// Generation of the packed orbit paths; 0 until the first frame.
    pub fn orbit_generation(&self) -> u32 {
        self.orbit_generation.unwrap_or(0)
    }

    pub fn camera(&self) -> &[f32; CAMERA_FLOATS] {
        &self.camera
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl Renderer for FrameBuffer {
    fn draw(&mut self, frame: &FrameData) {
        self.instances.clear();
        self.instances.extend(frame.bodies.iter().map(BodyInstance::from));

        self.trail_vertices.clear();
        self.trail_spans.clear();
        for trail in frame.trails {
            self.trail_spans
                .extend_from_slice(&[trail.body.0, (self.trail_vertices.len() / 3) as u32, trail.len() as u32]);
            self.trail_vertices.extend_from_slice(bytemuck::cast_slice::<Vec3, f32>(trail.older));
            self.trail_vertices.extend_from_slice(bytemuck::cast_slice::<Vec3, f32>(trail.newer));
        }

        if self.orbit_generation != Some(frame.orbit_generation) {
            self.pack_orbits(frame);
        }

        let (eye, look_at, p) = (frame.camera.eye, frame.camera.look_at, frame.projection);
        self.camera = [eye.x, eye.y, eye.z, look_at.x, look_at.y, look_at.z, p.fov_y, p.aspect, p.near, p.far];
        self.show_trails = frame.show_trails;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

/// Info panel contents as JSON for the DOM overlay.
#[derive(Debug, Clone)]
pub struct InfoPanel {
    json: String,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self {
            json: InfoView::Unselected.to_json(),
        }
    }

    pub fn json(&self) -> &str {
        &self.json
    }
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoDisplay for InfoPanel {
    fn show(&mut self, info: &InfoView) {
        self.json = info.to_json();
    }
}

/// Owns the pipeline and its browser-facing buffers.
///
/// Each demo keeps one runner in a `thread_local!` and exports free functions
/// via [`export_orrery!`](crate::export_orrery), because wasm-bindgen cannot
/// export generic structs directly.
pub struct OrreryRunner<E: Ephemeris> {
    orrery: Orrery<E>,
    frame: FrameBuffer,
    info: InfoPanel,
}

impl<E: Ephemeris> OrreryRunner<E> {
    /// Start at `wall_clock()` and use it for later jumps to now.
    pub fn new(catalog: Catalog, ephemeris: E, config: OrreryConfig, wall_clock: WallClock) -> Result<Self, ConfigError> {
        let orrery = Orrery::new(Arc::new(catalog), ephemeris, config, wall_clock())?.with_wall_clock(wall_clock);
        // Sized only after validation has bounded trail_capacity.
        let frame = FrameBuffer::with_capacity(orrery.catalog().len(), orrery.config().trail_capacity);
        Ok(Self {
            orrery,
            frame,
            info: InfoPanel::new(),
        })
    }

    pub fn tick(&mut self, dt: f32) {
        self.orrery.tick(f64::from(dt), &mut self.frame, &mut self.info);
    }

    pub fn set_time_scale(&mut self, scale: f64) -> f64 {
        self.orrery.set_time_scale(scale)
    }

    pub fn jump_to_now(&mut self) {
        self.orrery.jump_to_now();
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.orrery.toggle_pause()
    }

    pub fn toggle_trails(&mut self) -> bool {
        self.orrery.toggle_trails()
    }

    /// `button` is the DOM `MouseEvent.button` index.
    pub fn pointer_down(&mut self, button: u16, x: f32, y: f32) {
        self.orrery.on_pointer_down(PointerButton::from_index(button), x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.orrery.on_pointer_move(x, y);
    }

    pub fn pointer_up(&mut self, button: u16, x: f32, y: f32) {
        self.orrery.on_pointer_up(PointerButton::from_index(button), x, y);
    }

    pub fn wheel(&mut self, delta_sign: f32) {
        self.orrery.on_wheel(delta_sign);
    }

    /// Selected body id after the click, or -1 for none.
    pub fn click(&mut self, x: f32, y: f32) -> i32 {
        self.orrery.on_click(x, y).map_or(-1, |id| id.0 as i32)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.orrery.on_resize(width as f32, height as f32);
        self.frame.resize(width, height);
    }

    pub fn reset_view(&mut self) {
        self.orrery.reset_view();
    }

    pub fn clear_selection(&mut self) {
        self.orrery.clear_selection();
    }

    pub fn info_json(&self) -> &str {
        self.info.json()
    }

    pub fn time_label(&self) -> String {
        self.orrery.time().to_string()
    }

    pub fn time_scale(&self) -> f64 {
        self.orrery.clock().scale()
    }

    pub fn is_paused(&self) -> bool {
        self.orrery.clock().is_paused()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn orrery(&self) -> &Orrery<E> {
        &self.orrery
    }
}
