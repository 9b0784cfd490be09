//! Collision module
//!
//! Discrete sphere-overlap collision for bones: the [`Collider`] shapes, the
//! [`CollisionQuery`] seam a physics scene implements, and the iterative
//! pushout in [`CollisionResolver`].

mod collider;
mod response;
mod world;

pub use collider::{
    Aabb, BoxCollider, CapsuleCollider, Collider, ColliderShape, MeshCollider, SphereCollider,
};
pub use response::{CollisionMode, CollisionResolver, PushoutResult};
pub use world::{ColliderWorld, CollisionQuery};
