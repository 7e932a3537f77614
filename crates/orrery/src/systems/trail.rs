//! Fixed-capacity motion trails.
//!
//! Each body owns a ring over preallocated storage. Writes land at
//! `count % capacity`; `count` only grows until an explicit clear. Consumers
//! never see raw storage order: [`TrailBuffer::as_slices`] yields the visible
//! points oldest-to-newest as two contiguous runs.

use std::ops::Range;

use glam::Vec3;

use crate::api::types::BodyId;

#[derive(Debug, Clone)]
pub struct TrailBuffer {
    storage: Vec<Vec3>,
    count: u64,
}

impl TrailBuffer {
    /// Create a ring holding `capacity` points (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![Vec3::ZERO; capacity.max(1)],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Total pushes since creation or the last clear.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn push(&mut self, position: Vec3) {
        let slot = (self.count % self.storage.len() as u64) as usize;
        self.storage[slot] = position;
        self.count += 1;
    }

    /// Number of visible points: `min(count, capacity)`.
    pub fn len(&self) -> usize {
        self.count.min(self.storage.len() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Logical range of valid points, `[0, min(count, capacity))`.
    pub fn visible_range(&self) -> Range<usize> {
        0..self.len()
    }

    /// Forget all points. Storage contents become don't-care.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Visible points oldest-to-newest, as (older run, newer run).
    pub fn as_slices(&self) -> (&[Vec3], &[Vec3]) {
        let cap = self.storage.len();
        if self.count <= cap as u64 {
            (&self.storage[..self.count as usize], &[])
        } else {
            let head = (self.count % cap as u64) as usize;
            (&self.storage[head..], &self.storage[..head])
        }
    }

    /// Visible points oldest-to-newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter())
    }

    /// Point at logical index `i` within [`Self::visible_range`].
    pub fn get(&self, i: usize) -> Option<Vec3> {
        let (older, newer) = self.as_slices();
        older.get(i).or_else(|| newer.get(i.checked_sub(older.len())?)).copied()
    }

    /// Most recently pushed point.
    pub fn latest(&self) -> Option<Vec3> {
        if self.count == 0 {
            return None;
        }
        let slot = ((self.count - 1) % self.storage.len() as u64) as usize;
        Some(self.storage[slot])
    }
}

/// One trail per body, in catalog order.
#[derive(Debug, Clone)]
pub struct TrailRecorder {
    trails: Vec<(BodyId, TrailBuffer)>,
}

impl TrailRecorder {
    pub fn new(bodies: impl IntoIterator<Item = BodyId>, capacity: usize) -> Self {
        Self {
            trails: bodies.into_iter().map(|id| (id, TrailBuffer::new(capacity))).collect(),
        }
    }

    /// Append a point to `body`'s trail. Returns false for an unknown body.
    pub fn push(&mut self, body: BodyId, position: Vec3) -> bool {
        match self.get_mut(body) {
            Some(trail) => {
                trail.push(position);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, body: BodyId) -> Option<&TrailBuffer> {
        self.trails.iter().find(|(id, _)| *id == body).map(|(_, t)| t)
    }

    fn get_mut(&mut self, body: BodyId) -> Option<&mut TrailBuffer> {
        self.trails.iter_mut().find(|(id, _)| *id == body).map(|(_, t)| t)
    }

    pub fn clear_all(&mut self) {
        for (_, trail) in &mut self.trails {
            trail.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &TrailBuffer)> {
        self.trails.iter().map(|(id, t)| (*id, t))
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u32) -> Vec3 {
        Vec3::new(i as f32, 0.0, 0.0)
    }

    #[test]
    fn partial_fill_is_in_push_order() {
        let mut trail = TrailBuffer::new(5);
        for i in 0..3 {
            trail.push(p(i));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.visible_range(), 0..3);
        let points: Vec<Vec3> = trail.iter().copied().collect();
        assert_eq!(points, vec![p(0), p(1), p(2)]);
    }

    #[test]
    fn overflow_keeps_last_capacity_points_in_order() {
        let mut trail = TrailBuffer::new(220);
        for i in 0..1000 {
            trail.push(p(i));
        }
        assert_eq!(trail.len(), 220);
        assert_eq!(trail.count(), 1000);
        let points: Vec<Vec3> = trail.iter().copied().collect();
        let expected: Vec<Vec3> = (780..1000).map(p).collect();
        assert_eq!(points, expected);
        assert_eq!(trail.latest(), Some(p(999)));
    }

    #[test]
    fn slices_split_at_the_write_cursor() {
        let mut trail = TrailBuffer::new(4);
        for i in 0..6 {
            trail.push(p(i));
        }
        let (older, newer) = trail.as_slices();
        assert_eq!(older, &[p(2), p(3)]);
        assert_eq!(newer, &[p(4), p(5)]);
        assert_eq!(trail.get(0), Some(p(2)));
        assert_eq!(trail.get(3), Some(p(5)));
        assert_eq!(trail.get(4), None);
    }

    #[test]
    fn exact_capacity_is_not_wrapped() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..3 {
            trail.push(p(i));
        }
        let (older, newer) = trail.as_slices();
        assert_eq!(older.len(), 3);
        assert!(newer.is_empty());
    }

    #[test]
    fn clear_then_push_shows_single_point() {
        let mut trail = TrailBuffer::new(8);
        for i in 0..20 {
            trail.push(p(i));
        }
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.visible_range(), 0..0);
        assert_eq!(trail.iter().count(), 0);

        trail.push(p(77));
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.iter().copied().collect::<Vec<_>>(), vec![p(77)]);
    }

    #[test]
    fn recorder_routes_by_body() {
        let mut rec = TrailRecorder::new([BodyId(1), BodyId(2)], 4);
        assert!(rec.push(BodyId(2), p(1)));
        assert!(!rec.push(BodyId(9), p(1)));
        assert_eq!(rec.get(BodyId(1)).unwrap().len(), 0);
        assert_eq!(rec.get(BodyId(2)).unwrap().len(), 1);

        rec.push(BodyId(1), p(5));
        rec.clear_all();
        assert!(rec.iter().all(|(_, t)| t.count() == 0));
    }
}
