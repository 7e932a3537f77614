use serde::{Deserialize, Serialize};

use crate::api::config::ConfigError;
use crate::api::types::{BodyId, EphemerisId};

/// Static description of one body. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    /// Identity to query the ephemeris provider with.
    pub ephemeris: EphemerisId,
    /// Visual radius in scene units (exaggerated, not to scale).
    pub radius: f32,
    /// Linear RGB, 0.0 - 1.0.
    pub color: [f32; 3],
    #[serde(default)]
    pub description: String,
}

impl Body {
    pub fn new(id: BodyId, name: impl Into<String>, ephemeris: EphemerisId) -> Self {
        Self {
            id,
            name: name.into(),
            ephemeris,
            radius: 1.0,
            color: [1.0, 1.0, 1.0],
            description: String::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b];
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Ordered, read-only set of bodies. Order is the per-frame update order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    bodies: Vec<Body>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-positive radii.
    pub fn new(bodies: Vec<Body>) -> Result<Self, ConfigError> {
        for (i, body) in bodies.iter().enumerate() {
            if bodies[..i].iter().any(|b| b.id == body.id) {
                return Err(ConfigError::Invalid(format!("duplicate body id {}", body.id.0)));
            }
            if !(body.radius > 0.0) {
                return Err(ConfigError::Invalid(format!("body {} has non-positive radius", body.name)));
            }
        }
        Ok(Self { bodies })
    }

    /// Parse a catalog from a JSON array of bodies.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let bodies: Vec<Body> = serde_json::from_str(json)?;
        Self::new(bodies)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Position of `id` in update order.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
