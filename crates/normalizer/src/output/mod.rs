//! Rendering and writing normalized output.

mod ddl;
mod erd;
mod readme;
mod tables;

pub use ddl::{render_ddl, sql_type};
pub use erd::render_erd;
pub use readme::render_readme;
pub use tables::{TABLES_DIR, WrittenTable, compare_values, missing_columns, project, write_csv, write_table};

/// File names inside a normalized output directory.
pub const SCHEMA_FILE: &str = "schema.sql";
pub const ERD_FILE: &str = "erd.md";
pub const TRANSFORM_CONFIG_FILE: &str = "transform_config.json";
pub const README_FILE: &str = "README.md";
