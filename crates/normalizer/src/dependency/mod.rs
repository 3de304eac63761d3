//! Functional dependency model, discovery and reasoning.
//!
//! - [`set`]: ordered attribute sets
//! - [`fd`]: dependency records and their evidence
//! - [`closure`]: attribute closure and derivability
//! - [`discovery`]: statistical discovery from table data
//! - [`keys`]: candidate key search
//! - [`cover`]: minimal cover reduction

pub mod closure;
pub mod cover;
pub mod discovery;
pub mod fd;
pub mod keys;
pub mod set;

pub use closure::{closure, is_derivable, is_superkey};
pub use cover::minimal_cover;
pub use discovery::{DiscoveryConfig, FdDiscovery, GroupEvidence};
pub use fd::{Dependency, FdStatus, FunctionalDependency, confirmed_dependencies};
pub use keys::{CandidateKey, find_candidate_keys};
pub use set::AttributeSet;
