//! Output table and relationship definitions.

use serde::{Deserialize, Serialize};

/// The dependency group a 3NF table was synthesized from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFd {
    pub determinant: Vec<String>,
    pub dependents: Vec<String>,
}

/// A table of the normalized schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_fd: Option<SourceFd>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>, primary_key: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            primary_key,
            source_fd: None,
        }
    }

    pub fn is_key_column(&self, column: &str) -> bool {
        self.primary_key.iter().any(|k| k == column)
    }

    /// Columns outside the primary key, in table order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &String> {
        self.columns.iter().filter(|c| !self.is_key_column(c))
    }
}

/// A reference from a child table column to a parent table key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub child_table: String,
    pub column: String,
    pub parent_table: String,
    pub parent_column: String,
}
