//! # jiggle-bone
//!
//! Per-frame secondary motion for chains of skeletal transforms: hair, tails,
//! cloth strips and other hanging segments that should sway, settle under
//! gravity, react to wind and stay out of colliders.
//!
//! ## Features
//! - Engine-agnostic: bones are read and written through [`TransformTree`]
//! - Rest-pose blend with a falloff curve and damping
//! - Fixed bone lengths
//! - Sphere-overlap collision pushout against host colliders
//! - Directional and spherical wind with seeded turbulence
//! - Distance gate that parks far-away chains at rest
//! - Serde/TOML configuration
//!
//! ## Example
//! ```rust
//! use glam::Vec3;
//! use jiggle_bone::{FrameContext, Hierarchy, JiggleChain, JiggleConfig, Transform};
//!
//! // Root with two hanging bones
//! let (mut tree, root) = Hierarchy::chain(Transform::IDENTITY, &[Vec3::NEG_Y, Vec3::NEG_Y]);
//! let mut chain = JiggleChain::new(&tree, root, JiggleConfig::default());
//!
//! // Once per frame, after animation
//! let frame = FrameContext::new(1.0 / 60.0, 0.0);
//! chain.update(&mut tree, &frame);
//! ```

pub mod collision;
pub mod config;
pub mod curve;
pub mod debug;
pub mod hierarchy;
pub mod jiggle;
pub mod math;
pub mod wind;

pub use collision::{
    Aabb, BoxCollider, CapsuleCollider, Collider, ColliderShape, ColliderWorld, CollisionMode,
    CollisionQuery, CollisionResolver, MeshCollider, SphereCollider,
};
pub use config::{ConfigError, JiggleConfig};
pub use curve::{Curve, Keyframe};
pub use debug::{DebugDraw, GizmoLines, LineVertex};
pub use hierarchy::{Hierarchy, NodeId, TransformTree};
pub use jiggle::{FrameContext, GateState, JiggleChain, JiggleChainBuilder, JiggleSolver, StepOutcome};
pub use math::Transform;
pub use wind::{WindContributor, WindMode, WindSource, WindZone};
