//! CLI command implementations.

pub mod analyze;
pub mod normalize;
pub mod transform;
