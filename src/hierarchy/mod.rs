//! Transform hierarchy module
//!
//! The simulator reads and writes bone poses through [`TransformTree`]. A host
//! engine implements it over its own scene graph; [`Hierarchy`] is a small
//! standalone implementation.

mod arena;
mod tree;

pub use arena::{Hierarchy, NodeId};
pub use tree::TransformTree;
