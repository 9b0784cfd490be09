use glam::{Quat, Vec3};

use super::bone::Bone;
use crate::hierarchy::TransformTree;

/// Rest pose of a chain, captured once when the chain is built.
#[derive(Debug, Clone)]
pub struct ChainSnapshot<N> {
    bones: Vec<Bone<N>>,
    gravity_root_rotation: Quat,
    root_local_yaw: f32,
}

impl<N: Copy + Eq> ChainSnapshot<N> {
    /// Collects `root` and its descendants depth-first. Parent links are
    /// resolved to chain indices; the root's own parent is outside the chain.
    pub fn capture<T: TransformTree<Node = N>>(tree: &T, root: N) -> Self {
        let nodes = tree.descendants(root);
        let mut bones: Vec<Bone<N>> = Vec::with_capacity(nodes.len());
        let mut world_positions: Vec<Vec3> = Vec::with_capacity(nodes.len());

        for (i, &node) in nodes.iter().enumerate() {
            let local = tree.local_transform(node);
            let world_position = tree.world_position(node);
            let parent = if i == 0 {
                None
            } else {
                tree.parent(node)
                    .and_then(|p| nodes[..i].iter().position(|&n| n == p))
            };
            let rest_parent_distance = parent
                .map(|p| world_position.distance(world_positions[p]))
                .unwrap_or(0.0);

            bones.push(Bone {
                node,
                parent,
                rest_local_position: local.position,
                rest_local_rotation: local.rotation,
                rest_parent_distance,
            });
            world_positions.push(world_position);
        }

        Self {
            bones,
            gravity_root_rotation: tree.world_rotation(root),
            root_local_yaw: tree.local_transform(root).yaw(),
        }
    }

    pub fn root(&self) -> &Bone<N> {
        &self.bones[0]
    }
}

impl<N> ChainSnapshot<N> {
    pub fn bones(&self) -> &[Bone<N>] {
        &self.bones
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Never true for a captured chain, which always holds its root.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn gravity_root_rotation(&self) -> Quat {
        self.gravity_root_rotation
    }

    pub fn root_local_yaw(&self) -> f32 {
        self.root_local_yaw
    }

    /// Direction from the root to its first child in the root's local space.
    pub fn chain_axis(&self) -> Vec3 {
        self.bones
            .get(1)
            .and_then(|b| b.rest_local_position.try_normalize())
            .unwrap_or(Vec3::NEG_Y)
    }
}
