use glam::Vec3;
use log::trace;
use serde::{Deserialize, Serialize};

use super::collider::{Aabb, Collider};
use super::world::CollisionQuery;
use crate::config::{MAX_COLLISION_ACCURACY, MIN_COLLISION_ACCURACY};

/// Which way a bone is pushed out of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Away from the collider's bounds center.
    #[default]
    Center,
    /// Toward the nearest point on the collider's bounds. Unfinished: bones
    /// outside the bounds are pulled inward.
    #[cfg(feature = "experimental")]
    Piled,
}

/// Outcome of resolving one bone against every collider it overlaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushoutResult {
    pub position: Vec3,
    /// Total pushout steps taken across all colliders.
    pub steps: u32,
    /// Colliders considered, excluding skipped mesh colliders.
    pub colliders: u32,
}

pub struct CollisionResolver;

impl CollisionResolver {
    /// Accuracy below 1 would make the step longer than the radius, and 0 or
    /// NaN would never step at all.
    pub fn clamp_accuracy(accuracy: f32) -> f32 {
        if accuracy.is_nan() {
            return MIN_COLLISION_ACCURACY;
        }
        accuracy.clamp(MIN_COLLISION_ACCURACY, MAX_COLLISION_ACCURACY)
    }

    pub fn resolve_point(
        position: Vec3,
        radius: f32,
        query: &dyn CollisionQuery,
        accuracy: f32,
        mode: CollisionMode,
    ) -> PushoutResult {
        let mut result = PushoutResult {
            position,
            steps: 0,
            colliders: 0,
        };

        if !(radius > 0.0 && radius.is_finite()) {
            return result;
        }

        let accuracy = Self::clamp_accuracy(accuracy);
        for collider in query.overlap_sphere(position, radius) {
            if collider.is_mesh() {
                continue;
            }
            let (pushed, steps) = Self::push_out(result.position, radius, collider, accuracy, mode);
            result.position = pushed;
            result.steps += steps;
            result.colliders += 1;
        }

        if result.steps > 0 {
            trace!(
                "pushed out of {} colliders in {} steps",
                result.colliders,
                result.steps
            );
        }
        result
    }

    /// Steps `position` by `radius / accuracy` along the outward direction until
    /// it is at least `radius` away from the collider's closest point, as
    /// measured before the first step.
    pub fn push_out(
        position: Vec3,
        radius: f32,
        collider: &dyn Collider,
        accuracy: f32,
        mode: CollisionMode,
    ) -> (Vec3, u32) {
        let accuracy = Self::clamp_accuracy(accuracy);
        let point = collider.closest_point(position);
        let direction = Self::outward_direction(position, point, collider.bounds(), mode);
        let step = direction * (radius / accuracy);

        let mut position = position;
        let mut steps = 0;
        while position.distance(point) < radius {
            let next = position + step;
            // step too small to register at this magnitude
            if next == position {
                break;
            }
            position = next;
            steps += 1;
        }
        (position, steps)
    }

    fn outward_direction(position: Vec3, point: Vec3, bounds: Aabb, mode: CollisionMode) -> Vec3 {
        let preferred = match mode {
            CollisionMode::Center => position - bounds.center(),
            #[cfg(feature = "experimental")]
            CollisionMode::Piled => bounds.closest_surface_point(position) - position,
        };
        preferred
            .try_normalize()
            .or_else(|| (position - point).try_normalize())
            .unwrap_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{ColliderWorld, MeshCollider, SphereCollider};

    #[test]
    fn pushes_bone_clear_of_sphere() {
        let sphere = SphereCollider::new(Vec3::ZERO, 1.0);
        let radius = 0.2;
        let accuracy = 50.0;
        let start = Vec3::new(0.0, 0.9, 0.0);

        let (pushed, steps) = CollisionResolver::push_out(start, radius, &sphere, accuracy, CollisionMode::Center);
        let point = sphere.closest_point(start);
        assert!(pushed.distance(point) >= radius - 1e-5);
        assert!(pushed.distance(point) < radius + radius / accuracy + 1e-5);
        assert!(steps as f32 <= 2.0 * accuracy);
        assert!(pushed.y > 1.0);
    }

    #[test]
    fn shallow_overlap_finishes_within_accuracy_steps() {
        let sphere = SphereCollider::new(Vec3::ZERO, 1.0);
        let radius = 0.25;
        let accuracy = 40.0;
        // surface gap of 0.05, overlap depth 0.2 <= radius
        let start = Vec3::new(1.05, 0.0, 0.0);

        let (pushed, steps) = CollisionResolver::push_out(start, radius, &sphere, accuracy, CollisionMode::Center);
        assert!(steps as f32 <= accuracy);
        assert!(pushed.x >= 1.25 - 1e-5);
    }

    #[test]
    fn zero_accuracy_is_clamped_and_terminates() {
        assert_eq!(CollisionResolver::clamp_accuracy(0.0), 1.0);
        assert_eq!(CollisionResolver::clamp_accuracy(f32::NAN), 1.0);
        assert_eq!(CollisionResolver::clamp_accuracy(1e9), 1000.0);

        let sphere = SphereCollider::new(Vec3::ZERO, 1.0);
        let (pushed, steps) =
            CollisionResolver::push_out(Vec3::new(0.0, 1.1, 0.0), 0.5, &sphere, 0.0, CollisionMode::Center);
        assert_eq!(steps, 1);
        assert!(pushed.y >= 1.5 - 1e-5);
    }

    #[test]
    fn bone_at_bounds_center_still_escapes() {
        let sphere = SphereCollider::new(Vec3::ZERO, 0.05);
        let (pushed, steps) = CollisionResolver::push_out(Vec3::ZERO, 0.1, &sphere, 10.0, CollisionMode::Center);
        assert!(steps > 0);
        assert!(pushed.distance(Vec3::new(0.0, 0.05, 0.0)) >= 0.1 - 1e-5);
    }

    #[test]
    fn mesh_colliders_are_skipped() {
        let mut world = ColliderWorld::new();
        world.add(MeshCollider::new(vec![Vec3::splat(-1.0), Vec3::splat(1.0)]));

        let result = CollisionResolver::resolve_point(Vec3::ZERO, 0.3, &world, 100.0, CollisionMode::Center);
        assert_eq!(result.position, Vec3::ZERO);
        assert_eq!(result.steps, 0);
        assert_eq!(result.colliders, 0);
    }

    #[test]
    fn non_positive_radius_does_nothing() {
        let mut world = ColliderWorld::new();
        world.add_sphere(Vec3::ZERO, 1.0);
        let result = CollisionResolver::resolve_point(Vec3::ZERO, 0.0, &world, 10.0, CollisionMode::Center);
        assert_eq!(result.steps, 0);
    }

    #[cfg(feature = "experimental")]
    #[test]
    fn piled_mode_moves_toward_bounds_surface() {
        let sphere = SphereCollider::new(Vec3::ZERO, 1.0);
        let start = Vec3::new(0.0, 0.95, 0.0);
        let (pushed, _) = CollisionResolver::push_out(start, 0.1, &sphere, 10.0, CollisionMode::Piled);
        assert!(pushed.y > start.y);
    }
}
