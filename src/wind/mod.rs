//! Wind module
//!
//! Wind sources are host objects; the contributor turns them into a rotation
//! of the chain root once per frame.

mod contributor;
mod source;

pub use contributor::WindContributor;
pub use source::{WindMode, WindSource, WindZone};
