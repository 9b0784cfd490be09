use glam::{Quat, Vec3};

/// Rest data for one simulated bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone<N> {
    pub node: N,
    /// Index of the parent bone within the chain; `None` for the root.
    pub parent: Option<usize>,
    pub rest_local_position: Vec3,
    pub rest_local_rotation: Quat,
    /// World distance to the parent bone at capture time, 0 for the root.
    pub rest_parent_distance: f32,
}

impl<N> Bone<N> {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
