use glam::Vec3;

use super::collider::{BoxCollider, CapsuleCollider, Collider, SphereCollider};

/// Sphere-overlap query supplied by the host's physics scene.
pub trait CollisionQuery {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<&dyn Collider>;
}

/// Flat list of colliders answering overlap queries by brute force.
#[derive(Default, Clone)]
pub struct ColliderWorld {
    colliders: Vec<Box<dyn Collider>>,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    pub fn add<T: Collider + 'static>(&mut self, collider: T) {
        self.colliders.push(Box::new(collider));
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32) {
        self.colliders
            .push(Box::new(SphereCollider::new(center, radius)));
    }

    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) {
        self.colliders
            .push(Box::new(BoxCollider::from_center_half_extents(
                center,
                half_extents,
            )));
    }

    pub fn add_capsule(&mut self, start: Vec3, end: Vec3, radius: f32) {
        self.colliders
            .push(Box::new(CapsuleCollider::new(start, end, radius)));
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn colliders(&self) -> &[Box<dyn Collider>] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl CollisionQuery for ColliderWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<&dyn Collider> {
        self.colliders
            .iter()
            .filter(|c| c.signed_distance(center) <= radius)
            .map(|c| c.as_ref())
            .collect()
    }
}

impl std::fmt::Debug for ColliderWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColliderWorld")
            .field("collider_count", &self.colliders.len())
            .finish()
    }
}
