use glam::{Quat, Vec3};
use std::fmt::Debug;

use crate::math::Transform;

/// Host transform hierarchy.
///
/// Implementors only provide parent/child links and local transforms; the
/// world-space accessors are derived from those. Engines that cache world
/// matrices can override the provided methods.
pub trait TransformTree {
    type Node: Copy + Eq + Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn children(&self, node: Self::Node) -> &[Self::Node];
    fn local_transform(&self, node: Self::Node) -> Transform;
    fn set_local_transform(&mut self, node: Self::Node, transform: Transform);

    fn world_transform(&self, node: Self::Node) -> Transform {
        let local = self.local_transform(node);
        match self.parent(node) {
            Some(parent) => self.world_transform(parent).mul_transform(&local),
            None => local,
        }
    }

    fn world_position(&self, node: Self::Node) -> Vec3 {
        self.world_transform(node).position
    }

    fn world_rotation(&self, node: Self::Node) -> Quat {
        self.world_transform(node).rotation
    }

    fn set_world_position(&mut self, node: Self::Node, position: Vec3) {
        let mut local = self.local_transform(node);
        local.position = match self.parent(node) {
            Some(parent) => self.world_transform(parent).inverse_transform_point(position),
            None => position,
        };
        self.set_local_transform(node, local);
    }

    fn set_world_rotation(&mut self, node: Self::Node, rotation: Quat) {
        let mut local = self.local_transform(node);
        local.rotation = match self.parent(node) {
            Some(parent) => (self.world_rotation(parent).inverse() * rotation).normalize(),
            None => rotation,
        };
        self.set_local_transform(node, local);
    }

    /// `root` followed by all of its descendants, depth-first pre-order.
    fn descendants(&self, root: Self::Node) -> Vec<Self::Node> {
        let mut nodes = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        nodes
    }
}
