pub mod api;
pub mod core;
pub mod ephemeris;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, ConfigError, OrreryConfig};
pub use api::orrery::{FrameReport, Orrery, WallClock};
pub use api::types::{BodyId, EphemerisId, PointerButton};
pub use core::catalog::{Body, Catalog};
pub use core::clock::SimulationClock;
pub use core::time::{CalendarTime, SimulationTime};
pub use ephemeris::{au_to_scene, Ephemeris, EphemerisError};
pub use renderer::camera::{CameraPose, CameraState, DragMode, OrbitCamera};
pub use renderer::instance::BodyInstance;
pub use renderer::traits::{BodyPlacement, FrameData, InfoDisplay, Projection, Renderer, TrailView};
pub use systems::orbit_path::{OrbitPath, OrbitPathSampler, OrbitPaths};
pub use systems::picking::{pick, BoundingSphere, BoundingVolume, PickHit, Ray};
pub use systems::selection::{BodyInfo, InfoView, SelectionState};
pub use systems::trail::{TrailBuffer, TrailRecorder};
