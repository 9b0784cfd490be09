use glam::Vec3;

use super::tree::TransformTree;
use crate::math::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Transform,
}

/// Arena-backed transform tree for hosts without a scene graph of their own.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds a single straight chain: a root at `root` followed by one node per
    /// entry of `offsets`, each offset local to the previous node.
    pub fn chain(root: Transform, offsets: &[Vec3]) -> (Self, NodeId) {
        let mut hierarchy = Self::new();
        let root_id = hierarchy.add_root("bone_0", root);
        let mut parent = root_id;
        for (i, offset) in offsets.iter().enumerate() {
            parent = hierarchy.add_child(parent, format!("bone_{}", i + 1), Transform::from_position(*offset));
        }
        (hierarchy, root_id)
    }

    pub fn add_root(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        self.push(name.into(), None, local)
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, local: Transform) -> NodeId {
        let id = self.push(name.into(), Some(parent), local);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, name: String, parent: Option<NodeId>, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent,
            children: Vec::new(),
            local,
        });
        id
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl TransformTree for Hierarchy {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn local_transform(&self, node: NodeId) -> Transform {
        self.nodes[node.0].local
    }

    fn set_local_transform(&mut self, node: NodeId, transform: Transform) {
        self.nodes[node.0].local = transform;
    }
}
