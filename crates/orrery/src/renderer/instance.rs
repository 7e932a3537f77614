use bytemuck::{Pod, Zeroable};

use super::traits::BodyPlacement;

/// Per-body instance written to linear memory for the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Scene-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Visual radius in scene units.
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 when this body is the current selection, else 0.0.
    pub selected: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&BodyPlacement> for BodyInstance {
    fn from(p: &BodyPlacement) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            radius: p.radius,
            r: p.color[0],
            g: p.color[1],
            b: p.color[2],
            selected: if p.selected { 1.0 } else { 0.0 },
        }
    }
}
