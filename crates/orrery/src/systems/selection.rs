//! Selected body and the live info record derived from it.
//!
//! Only the body id is stored. Position, distance and timestamp are
//! recomputed from the clock every frame.

use serde::Serialize;

use crate::api::types::BodyId;
use crate::core::catalog::Catalog;
use crate::core::time::SimulationTime;
use crate::ephemeris::{Ephemeris, EphemerisError};
use crate::systems::picking::PickHit;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<BodyId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn is_selected(&self, body: BodyId) -> bool {
        self.selected == Some(body)
    }

    /// Apply a pick result: a hit selects, a miss clears.
    pub fn apply_pick(&mut self, hit: Option<PickHit>) -> Option<BodyId> {
        let next = hit.map(|h| h.body);
        if next != self.selected {
            log::debug!("selection {:?} -> {:?}", self.selected, next);
        }
        self.selected = next;
        next
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Live info for the current selection at `time`.
    pub fn live_info<E: Ephemeris + ?Sized>(
        &self,
        catalog: &Catalog,
        ephemeris: &E,
        time: SimulationTime,
    ) -> Result<InfoView, EphemerisError> {
        let Some(body) = self.selected.and_then(|id| catalog.get(id)) else {
            return Ok(InfoView::Unselected);
        };
        let au = ephemeris.helio_position(body.ephemeris, time)?;
        Ok(InfoView::Selected(BodyInfo {
            body: body.id,
            body_label: body.name.clone(),
            description: body.description.clone(),
            distance_au: au.length(),
            x: au.x,
            y: au.y,
            z: au.z,
            calendar_timestamp: time.to_string(),
        }))
    }
}

/// Display record for the info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfoView {
    Unselected,
    Selected(BodyInfo),
}

impl InfoView {
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialisation cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{\"kind\":\"unselected\"}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInfo {
    pub body: BodyId,
    pub body_label: String,
    pub description: String,
    /// Heliocentric distance in AU.
    #[serde(rename = "distanceAU")]
    pub distance_au: f64,
    /// Heliocentric ecliptic coordinates in AU.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub calendar_timestamp: String,
}
