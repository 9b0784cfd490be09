//! Jiggle module
//!
//! Per-frame secondary motion for a bone chain: distance gate, wind, gravity
//! bias on the root, then a rest-pose blend, length constraint and collision
//! pushout for every other bone.

mod bone;
mod chain;
mod gate;
mod snapshot;
mod solver;

pub use bone::Bone;
pub use chain::{FrameContext, JiggleChain, JiggleChainBuilder, StepOutcome};
pub use gate::{DistanceGate, GateDecision, GateState};
pub use snapshot::ChainSnapshot;
pub use solver::JiggleSolver;
