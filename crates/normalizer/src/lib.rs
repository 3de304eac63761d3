//! Normalizer: functional dependency discovery and schema normalization for
//! flat tabular files.
//!
//! Given one wide table, the normalizer infers functional dependencies from
//! the data, derives candidate keys, assesses the current normal form, and
//! decomposes the table into 3NF or BCNF tables with primary and foreign
//! keys. The decomposition is recorded as a transform config that can be
//! replayed deterministically on new data with the same columns.
//!
//! # Pipeline
//!
//! - **Analyze**: profile columns, discover dependencies, find keys, assess
//! - **Review**: confirm or reject uncertain dependencies in the JSON report
//! - **Normalize**: decompose and write tables, DDL, ERD and a transform config
//! - **Transform**: replay the transform config on new files
//!
//! # Example
//!
//! ```no_run
//! use normalizer::{NormalizationConfig, Normalizer, TargetForm};
//!
//! let normalizer = Normalizer::new();
//! let report = normalizer.analyze("employees.csv").unwrap();
//! println!("Current normal form: {}", report.current_normal_form);
//!
//! let config = NormalizationConfig::from(&report);
//! let result = normalizer
//!     .normalize("employees.csv", &config, TargetForm::ThirdNormalForm, "normalized")
//!     .unwrap();
//! println!("Tables: {}", result.tables.len());
//! ```

pub mod analysis;
pub mod assessment;
pub mod dependency;
pub mod error;
pub mod input;
pub mod output;
pub mod profile;
pub mod synthesis;
pub mod transform;
pub mod warning;

mod normalizer;

pub use crate::normalizer::{NormalizeResult, Normalizer, NormalizerConfig};
pub use analysis::{AnalysisReport, NormalizationConfig};
pub use assessment::{NormalForm, NormalFormAssessment, Question};
pub use dependency::{AttributeSet, CandidateKey, Dependency, DiscoveryConfig, FdStatus, FunctionalDependency};
pub use error::{NormalizerError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use profile::{ColumnProfile, ColumnType, SemanticCategory};
pub use synthesis::{Decomposition, ForeignKey, Table, TargetForm};
pub use transform::{ReplayOptions, ReplayReport, Replayer, TableDefinition, TransformConfig};
pub use warning::{Warning, WarningKind};
