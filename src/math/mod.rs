//! Math utilities module
//!
//! Provides convenient re-exports from glam and the transform type shared by the
//! hierarchy and the solver.

mod transform;

pub use transform::{with_yaw, yaw_of, Transform};

// Re-export commonly used glam types
pub use glam::{Quat, Vec3};
