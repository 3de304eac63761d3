//! Column profiling: storage type, cardinality and semantic category.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::column::ColumnProfile;
use super::types::{ColumnType, SemanticCategory};
use crate::input::DataTable;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap(), // US date
        Regex::new(r"^\d{2}-\d{2}-\d{4}").unwrap(), // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(), // Alt ISO
    ]
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());
static ZIP_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap());

/// Number of leading non-null values inspected for pattern categories.
const PATTERN_SAMPLE: usize = 100;

/// Number of sample values kept in a profile.
const SAMPLE_VALUES: usize = 5;

/// Profiles table columns.
pub struct ColumnProfiler {
    sample_values: usize,
}

impl ColumnProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self {
            sample_values: SAMPLE_VALUES,
        }
    }

    /// Profile every column of a table, in column order.
    pub fn profile_table(&self, table: &DataTable) -> Vec<ColumnProfile> {
        (0..table.column_count())
            .map(|idx| self.profile_column(table, idx))
            .collect()
    }

    /// Profile a single column.
    pub fn profile_column(&self, table: &DataTable, col_index: usize) -> ColumnProfile {
        let name = table.headers.get(col_index).cloned().unwrap_or_default();
        let mut profile = ColumnProfile::new(name, col_index);

        let values: Vec<&str> = table.column_values(col_index).collect();
        let non_null: Vec<&str> = values
            .iter()
            .copied()
            .filter(|v| !DataTable::is_null_value(v))
            .collect();

        profile.count = values.len();
        profile.null_count = values.len() - non_null.len();
        profile.null_ratio = ratio(profile.null_count, profile.count);

        if non_null.is_empty() {
            return profile;
        }

        let distinct: HashSet<&str> = non_null.iter().copied().collect();
        profile.unique_count = distinct.len();
        profile.unique_ratio = ratio(distinct.len(), non_null.len());
        profile.sample_values = non_null
            .iter()
            .take(self.sample_values)
            .map(|v| v.to_string())
            .collect();
        profile.max_length = non_null.iter().map(|v| v.chars().count()).max();

        profile.dtype = self.infer_type(&non_null);
        if profile.dtype.is_numeric() {
            profile.numeric_max = non_null
                .iter()
                .filter_map(|v| v.trim().parse::<f64>().ok())
                .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))));
        }

        profile.semantic_type = self.infer_semantic(&profile, &non_null);
        profile
    }

    /// Infer the storage type. A type wins only when every non-null value
    /// agrees with it; integers mixed with floats promote to float.
    fn infer_type(&self, values: &[&str]) -> ColumnType {
        let mut seen = HashSet::new();
        for value in values {
            seen.insert(self.detect_value_type(value));
        }

        if seen.len() == 1 {
            return seen.into_iter().next().unwrap_or(ColumnType::String);
        }

        let numeric_only = seen
            .iter()
            .all(|t| matches!(t, ColumnType::Integer | ColumnType::Float));
        if numeric_only {
            return ColumnType::Float;
        }

        let temporal_only = seen.iter().all(|t| t.is_temporal());
        if temporal_only {
            return ColumnType::DateTime;
        }

        ColumnType::String
    }

    /// Detect the type of a single value.
    fn detect_value_type(&self, value: &str) -> ColumnType {
        let trimmed = value.trim();

        if matches!(
            trimmed.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no"
        ) {
            return ColumnType::Boolean;
        }

        if trimmed.parse::<i64>().is_ok() {
            return ColumnType::Integer;
        }

        if trimmed.parse::<f64>().is_ok() {
            return ColumnType::Float;
        }

        if DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
            if trimmed.contains(':') || trimmed.contains('T') {
                return ColumnType::DateTime;
            }
            return ColumnType::Date;
        }

        ColumnType::String
    }

    fn infer_semantic(&self, profile: &ColumnProfile, non_null: &[&str]) -> SemanticCategory {
        if profile.unique_ratio == 1.0 {
            return SemanticCategory::UniqueIdentifier;
        }

        match profile.dtype {
            ColumnType::Integer | ColumnType::Float => SemanticCategory::Numeric,
            ColumnType::Boolean => SemanticCategory::Boolean,
            _ => {
                let sample: Vec<&str> = non_null.iter().take(PATTERN_SAMPLE).copied().collect();
                if sample.iter().all(|v| ZIP_CODE.is_match(v)) {
                    SemanticCategory::ZipCode
                } else if sample.iter().all(|v| EMAIL.is_match(v)) {
                    SemanticCategory::Email
                } else if sample.iter().any(|v| ISO_DATE.is_match(v)) {
                    SemanticCategory::Date
                } else {
                    SemanticCategory::Text
                }
            }
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
