//! Data source abstraction and metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows read (after sampling).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Parsed tabular data, row-major, every cell kept as its raw string.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Distinct non-null values of a column.
    pub fn distinct_values(&self, index: usize) -> HashSet<&str> {
        self.column_values(index)
            .filter(|v| !Self::is_null_value(v))
            .collect()
    }

    /// Keep a deterministic random subset of `n` rows, preserving their
    /// original relative order. Tables with at most `n` rows are unchanged.
    pub fn sample(&mut self, n: usize, seed: u64) {
        if self.rows.len() <= n {
            return;
        }

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        rng.shuffle(&mut indices);
        indices.truncate(n);
        indices.sort_unstable();

        let mut rows = std::mem::take(&mut self.rows);
        self.rows = indices
            .into_iter()
            .map(|i| std::mem::take(&mut rows[i]))
            .collect();
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> DataTable {
        DataTable::new(
            vec!["id".to_string()],
            (0..rows).map(|i| vec![i.to_string()]).collect(),
            b',',
        )
    }

    #[test]
    fn test_sample_is_deterministic_and_ordered() {
        let mut a = table(100);
        let mut b = table(100);
        a.sample(10, 42);
        b.sample(10, 42);

        assert_eq!(a.row_count(), 10);
        assert_eq!(a, b);

        let ids: Vec<usize> = a.column_values(0).map(|v| v.parse().unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_sample_smaller_table_untouched() {
        let mut t = table(5);
        t.sample(10, 42);
        assert_eq!(t, table(5));
    }

    #[test]
    fn test_distinct_values_skip_nulls() {
        let t = DataTable::new(
            vec!["c".to_string()],
            vec![
                vec!["a".to_string()],
                vec!["NA".to_string()],
                vec!["a".to_string()],
                vec!["b".to_string()],
            ],
            b',',
        );
        assert_eq!(t.distinct_values(0).len(), 2);
    }
}
