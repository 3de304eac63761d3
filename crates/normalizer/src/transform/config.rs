//! Reusable transform configuration.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NormalizerError, Result};
use crate::synthesis::{Decomposition, ForeignKey, Table, sanitize_name};

/// Top-level keys a transform config must carry.
const REQUIRED_KEYS: &[&str] = &["version", "original_columns", "tables"];

/// One output table of a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Vec<String>,
}

impl From<&Table> for TableDefinition {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            columns: table.columns.clone(),
            primary_key: table.primary_key.clone(),
        }
    }
}

/// A decomposition recorded so it can be replayed on new data with the
/// same column structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    pub version: String,
    pub original_columns: Vec<String>,
    pub tables: Vec<TableDefinition>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TransformConfig {
    pub const VERSION: &'static str = "1.0";

    pub fn from_decomposition(decomposition: &Decomposition, original_columns: &[String]) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            original_columns: original_columns.to_vec(),
            tables: decomposition.tables.iter().map(TableDefinition::from).collect(),
            foreign_keys: decomposition.foreign_keys.clone(),
        }
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| NormalizerError::io(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| NormalizerError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a config, reporting the first missing required key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NormalizerError::io(path, e))?;
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;

        let object = value.as_object().ok_or_else(|| {
            NormalizerError::Config(format!("'{}' is not a JSON object", path.display()))
        })?;
        if let Some(key) = REQUIRED_KEYS.iter().find(|k| !object.contains_key(**k)) {
            return Err(NormalizerError::MissingConfigKey {
                path: path.to_path_buf(),
                key: key.to_string(),
            });
        }

        let config: TransformConfig = serde_json::from_value(value)?;
        if let Some(table) = config.tables.iter().find(|t| sanitize_name(&t.name) != t.name) {
            return Err(NormalizerError::Config(format!(
                "table name '{}' may only contain letters, digits and '_'",
                table.name
            )));
        }
        tracing::debug!(path = %path.display(), tables = config.tables.len(), "loaded transform config");
        Ok(config)
    }
}
