use glam::{Quat, Vec3};

use super::snapshot::ChainSnapshot;
use crate::hierarchy::TransformTree;
use crate::math::{with_yaw, yaw_of};

/// Stateless per-frame steps of the jiggle simulation.
pub struct JiggleSolver;

impl JiggleSolver {
    /// Scales the per-second blend toward the rest pose.
    pub const BLEND_SPEED: f32 = 10.0;
    /// Damping above this no longer slows the gravity pull.
    pub const GRAVITY_DAMPING_CAP: f32 = 4.0;

    /// Fraction of the way bone `index` moves back toward its rest pose this
    /// frame, before clamping. Decreases as damping rises.
    pub fn blend_rate(falloff: f32, damping: f32, delta_time: f32) -> f32 {
        (1.0 - falloff) * delta_time * Self::BLEND_SPEED * (5.0 - damping)
    }

    /// Slerp factor for the root's gravity pull, in `[0, 1]`.
    pub fn gravity_rate(gravity_scale: f32, damping: f32, delta_time: f32) -> f32 {
        let rate = gravity_scale / damping.clamp(0.0, Self::GRAVITY_DAMPING_CAP) * delta_time;
        if rate.is_nan() {
            return 0.0;
        }
        rate.clamp(0.0, 1.0)
    }

    /// The captured gravity bias with its yaw replaced by the root's current
    /// world yaw, so the pull only ever tilts the chain.
    pub fn gravity_target(gravity_root_rotation: Quat, root_rotation: Quat) -> Quat {
        with_yaw(gravity_root_rotation, yaw_of(root_rotation))
    }

    pub fn apply_gravity<T: TransformTree>(
        tree: &mut T,
        snapshot: &ChainSnapshot<T::Node>,
        gravity_scale: f32,
        damping: f32,
        delta_time: f32,
    ) {
        let rate = Self::gravity_rate(gravity_scale, damping, delta_time);
        if rate <= 0.0 {
            return;
        }
        let root = snapshot.root().node;
        let current = tree.world_rotation(root);
        let target = Self::gravity_target(snapshot.gravity_root_rotation(), current);
        tree.set_world_rotation(root, current.slerp(target, rate).normalize());
    }

    /// Moves bone `index`'s local pose toward its rest pose.
    pub fn blend_toward_rest<T: TransformTree>(
        tree: &mut T,
        snapshot: &ChainSnapshot<T::Node>,
        index: usize,
        rate: f32,
    ) {
        let rate = rate.clamp(0.0, 1.0);
        if rate.is_nan() || rate <= 0.0 {
            return;
        }
        let bone = &snapshot.bones()[index];
        let mut local = tree.local_transform(bone.node);
        local.position = local.position.lerp(bone.rest_local_position, rate);
        local.rotation = local.rotation.slerp(bone.rest_local_rotation, rate).normalize();
        tree.set_local_transform(bone.node, local);
    }

    /// Places bone `index` exactly its rest distance from its parent bone.
    pub fn enforce_rest_length<T: TransformTree>(tree: &mut T, snapshot: &ChainSnapshot<T::Node>, index: usize) {
        let bone = &snapshot.bones()[index];
        let Some(parent_index) = bone.parent else {
            return;
        };
        let parent = tree.world_transform(snapshot.bones()[parent_index].node);
        let rest_direction = parent.rotation * bone.rest_local_position;
        let position = Self::constrain_position(
            tree.world_position(bone.node),
            parent.position,
            bone.rest_parent_distance,
            rest_direction,
        );
        tree.set_world_position(bone.node, position);
    }

    /// Point at `distance` from `parent` along `parent -> position`, or along
    /// `fallback` when the two coincide.
    pub fn constrain_position(position: Vec3, parent: Vec3, distance: f32, fallback: Vec3) -> Vec3 {
        let direction = (position - parent)
            .try_normalize()
            .or_else(|| fallback.try_normalize())
            .unwrap_or(Vec3::NEG_Y);
        parent + direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::math::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn blend_rate_slows_with_damping() {
        let rates: Vec<f32> = [0.0, 1.0, 2.5, 4.0, 5.0]
            .iter()
            .map(|&d| JiggleSolver::blend_rate(0.25, d, 0.016))
            .collect();
        for pair in rates.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert_relative_eq!(rates[4], 0.0);
    }

    #[test]
    fn gravity_rate_is_clamped_and_never_nan() {
        assert_eq!(JiggleSolver::gravity_rate(0.0, 0.0, 0.016), 0.0);
        assert_eq!(JiggleSolver::gravity_rate(9.81, 0.0, 0.016), 1.0);
        assert_eq!(JiggleSolver::gravity_rate(9.81, 1.0, 0.0), 0.0);
        assert_relative_eq!(JiggleSolver::gravity_rate(1.0, 4.0, 0.5), 0.125);
        // capped at 4
        assert_relative_eq!(JiggleSolver::gravity_rate(1.0, 5.0, 0.5), 0.125);
    }

    #[test]
    fn gravity_target_keeps_heading() {
        let bias = Quat::from_rotation_x(0.3);
        let turned = Quat::from_rotation_y(0.6) * Quat::from_rotation_z(0.4);
        let target = JiggleSolver::gravity_target(bias, turned);
        assert_relative_eq!(yaw_of(target), 0.6, epsilon = 1e-5);

        let target = JiggleSolver::gravity_target(bias, Quat::from_rotation_z(0.4));
        assert!(target.angle_between(bias) < 1e-4);
    }

    #[test]
    fn constrain_handles_stretch_compression_and_coincidence() {
        let parent = Vec3::ZERO;
        let stretched = JiggleSolver::constrain_position(Vec3::new(0.0, -3.0, 0.0), parent, 1.0, Vec3::X);
        assert_relative_eq!(stretched.y, -1.0, epsilon = 1e-6);

        let compressed = JiggleSolver::constrain_position(Vec3::new(0.2, 0.0, 0.0), parent, 1.0, Vec3::NEG_Y);
        assert_relative_eq!(compressed.x, 1.0, epsilon = 1e-6);

        let coincident = JiggleSolver::constrain_position(parent, parent, 2.0, Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(coincident.z, 2.0, epsilon = 1e-6);

        let degenerate = JiggleSolver::constrain_position(parent, parent, 1.0, Vec3::ZERO);
        assert_relative_eq!(degenerate.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn blend_moves_local_pose_toward_rest() {
        let (mut tree, root) = Hierarchy::chain(Transform::IDENTITY, &[Vec3::NEG_Y]);
        let snapshot = ChainSnapshot::capture(&tree, root);
        let child = snapshot.bones()[1].node;
        tree.set_local_transform(child, Transform::from_position(Vec3::new(1.0, -1.0, 0.0)));

        JiggleSolver::blend_toward_rest(&mut tree, &snapshot, 1, 0.5);
        assert_relative_eq!(tree.local_transform(child).position.x, 0.5, epsilon = 1e-6);

        JiggleSolver::blend_toward_rest(&mut tree, &snapshot, 1, 7.0);
        assert_relative_eq!(tree.local_transform(child).position.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn gravity_pulls_root_back_to_bias() {
        let (mut tree, root) = Hierarchy::chain(Transform::IDENTITY, &[Vec3::NEG_Y]);
        let snapshot = ChainSnapshot::capture(&tree, root);
        tree.set_world_rotation(root, Quat::from_rotation_z(0.8));

        JiggleSolver::apply_gravity(&mut tree, &snapshot, 9.81, 1.0, 0.05);
        let angle = tree.world_rotation(root).angle_between(Quat::IDENTITY);
        assert!(angle < 0.8 && angle > 0.0);

        JiggleSolver::apply_gravity(&mut tree, &snapshot, 9.81, 1.0, 1.0);
        assert!(tree.world_rotation(root).angle_between(Quat::IDENTITY) < 1e-3);
    }

    #[test]
    fn gravity_keeps_host_applied_yaw() {
        let (mut tree, root) = Hierarchy::chain(Transform::IDENTITY, &[Vec3::NEG_Y]);
        let snapshot = ChainSnapshot::capture(&tree, root);
        tree.set_world_rotation(root, Quat::from_rotation_y(1.0) * Quat::from_rotation_x(0.5));

        JiggleSolver::apply_gravity(&mut tree, &snapshot, 9.81, 1.0, 1.0);
        let rotation = tree.world_rotation(root);
        assert_relative_eq!(yaw_of(rotation), 1.0, epsilon = 1e-4);
        assert!(rotation.angle_between(Quat::from_rotation_y(1.0)) < 1e-3);
    }
}
