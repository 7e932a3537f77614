//! Contract between the orrery core and a render backend.
//!
//! The core never draws. Each frame it assembles a [`FrameData`] snapshot and
//! hands it to a [`Renderer`]; the info panel record goes to an
//! [`InfoDisplay`]. The WASM bridge implements both by packing flat float
//! buffers for the TypeScript side.

use glam::Vec3;

use crate::api::types::BodyId;
use crate::core::time::SimulationTime;
use crate::renderer::camera::CameraPose;
use crate::systems::orbit_path::OrbitPaths;
use crate::systems::selection::InfoView;

/// Where to put one body's mesh this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPlacement {
    pub body: BodyId,
    /// Scene-space position.
    pub position: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    pub selected: bool,
}

/// Visible trail of one body, oldest to newest across `older` then `newer`.
#[derive(Debug, Clone, Copy)]
pub struct TrailView<'a> {
    pub body: BodyId,
    pub older: &'a [Vec3],
    pub newer: &'a [Vec3],
}

impl<'a> TrailView<'a> {
    pub fn len(&self) -> usize {
        self.older.len() + self.newer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Vec3> {
        self.older.iter().chain(self.newer.iter())
    }
}

/// Perspective parameters matching the camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Everything a backend needs to draw one frame.
pub struct FrameData<'a> {
    pub time: SimulationTime,
    /// Bodies whose position resolved this frame, in catalog order.
    pub bodies: &'a [BodyPlacement],
    /// Empty while trails are hidden.
    pub trails: &'a [TrailView<'a>],
    /// Closed-loop orbit polylines.
    pub orbits: &'a OrbitPaths,
    /// Bumped each time the orbit paths are rebuilt.
    pub orbit_generation: u32,
    pub camera: CameraPose,
    pub projection: Projection,
    pub show_trails: bool,
}

/// Render backend.
///
/// ```ignore
/// struct CanvasRenderer { /* ... */ }
///
/// impl Renderer for CanvasRenderer {
///     fn draw(&mut self, frame: &FrameData) {
///         for body in frame.bodies { /* place mesh */ }
///     }
/// }
/// ```
pub trait Renderer {
    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Viewport changed (pixels).
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Sink for the selected-body info panel.
pub trait InfoDisplay {
    fn show(&mut self, info: &InfoView);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw(&mut self, frame: &FrameData) {
        (**self).draw(frame)
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }
}

impl<D: InfoDisplay + ?Sized> InfoDisplay for &mut D {
    fn show(&mut self, info: &InfoView) {
        (**self).show(info)
    }
}
