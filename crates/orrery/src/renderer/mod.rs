pub mod camera;
pub mod instance;
pub mod traits;

pub use camera::{CameraPose, CameraState, DragMode, OrbitCamera};
pub use instance::BodyInstance;
pub use traits::{BodyPlacement, FrameData, InfoDisplay, Projection, Renderer, TrailView};
