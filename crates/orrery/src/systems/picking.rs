//! Ray picking against per-body bounding volumes.

use glam::Vec3;

use crate::api::types::BodyId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalised.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Anything a pick ray can be tested against.
pub trait BoundingVolume {
    /// Distance along `ray` to the first intersection in front of its origin.
    fn ray_hit(&self, ray: &Ray) -> Option<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl BoundingVolume for BoundingSphere {
    fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(0.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    pub distance: f32,
}

/// Nearest hit among `candidates`; ties keep the earlier candidate.
pub fn pick<V: BoundingVolume>(ray: &Ray, candidates: impl IntoIterator<Item = (BodyId, V)>) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for (body, volume) in candidates {
        if let Some(distance) = volume.ray_hit(ray) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit { body, distance });
            }
        }
    }
    best
}
