//! Per-column profile.

use serde::{Deserialize, Serialize};

use super::types::{ColumnType, SemanticCategory};

/// Profile of a single attribute of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred storage type.
    pub dtype: ColumnType,
    /// Semantic category.
    pub semantic_type: SemanticCategory,
    /// Total number of values (including nulls).
    pub count: usize,
    /// Number of null/missing values.
    pub null_count: usize,
    /// Fraction of values that are null.
    pub null_ratio: f64,
    /// Distinct non-null values divided by non-null values.
    pub unique_ratio: f64,
    /// Number of distinct non-null values.
    pub unique_count: usize,
    /// First few non-null values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
    /// Longest non-null value, in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Largest numeric value, for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_max: Option<f64>,
}

impl ColumnProfile {
    /// Create an empty profile for a column.
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            dtype: ColumnType::Unknown,
            semantic_type: SemanticCategory::Empty,
            count: 0,
            null_count: 0,
            null_ratio: 0.0,
            unique_ratio: 0.0,
            unique_count: 0,
            sample_values: Vec::new(),
            max_length: None,
            numeric_max: None,
        }
    }

    /// Whether null values are present.
    pub fn nullable(&self) -> bool {
        self.null_count > 0
    }

    /// Distinct non-null values relative to the total row count.
    pub fn cardinality(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.unique_count as f64 / self.count as f64
        }
    }

    /// Every row holds a distinct, non-null value.
    pub fn is_unique_key(&self) -> bool {
        self.count > 0 && self.null_count == 0 && self.unique_count == self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_key_requires_no_nulls() {
        let mut profile = ColumnProfile::new("id", 0);
        profile.count = 3;
        profile.unique_count = 3;
        assert!(profile.is_unique_key());

        profile.null_count = 1;
        profile.unique_count = 2;
        assert!(!profile.is_unique_key());
    }

    #[test]
    fn test_cardinality_uses_total_rows() {
        let mut profile = ColumnProfile::new("c", 0);
        profile.count = 10;
        profile.null_count = 4;
        profile.unique_count = 5;
        assert_eq!(profile.cardinality(), 0.5);
    }
}
