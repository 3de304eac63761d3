//! Transform configs and their deterministic replay on new data.

mod config;
mod replay;

pub use config::{TableDefinition, TransformConfig};
pub use replay::{ReplayOptions, ReplayReport, Replayer};
