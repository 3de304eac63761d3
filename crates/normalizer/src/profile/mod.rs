//! Column profiling for the attributes of a source table.

mod column;
mod profiler;
mod types;

pub use column::ColumnProfile;
pub use profiler::ColumnProfiler;
pub use types::{ColumnType, SemanticCategory};
