//! Projecting the source table onto output tables and writing them as CSV.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NormalizerError, Result};
use crate::input::DataTable;

/// Subdirectory of an output directory holding table files.
pub const TABLES_DIR: &str = "tables";

/// A table file that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenTable {
    pub name: String,
    pub rows: usize,
    pub path: PathBuf,
}

/// Project `data` onto `columns`, drop duplicate rows (keeping the first
/// occurrence) and sort by `primary_key`.
pub fn project(data: &DataTable, columns: &[String], primary_key: &[String]) -> Result<Vec<Vec<String>>> {
    let indices = column_indices(data, columns)?;
    let key_positions: Vec<usize> = primary_key
        .iter()
        .filter_map(|k| columns.iter().position(|c| c == k))
        .collect();

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut rows = Vec::new();
    for row in &data.rows {
        let projected: Vec<String> = indices
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or_default())
            .collect();
        if seen.insert(projected.clone()) {
            rows.push(projected);
        }
    }

    rows.sort_by(|a, b| {
        key_positions
            .iter()
            .map(|&k| compare_values(&a[k], &b[k]))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    Ok(rows)
}

/// Order two cell values: nulls last, numbers before text, numbers by
/// value and everything else by bytes.
///
/// This is a total order, so sorting rows by it does not depend on their
/// input order.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Number(TotalF64, &'a str),
    Text(&'a str),
    Null(&'a str),
}

#[derive(Debug, Clone, Copy)]
struct TotalF64(f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn sort_key(value: &str) -> SortKey<'_> {
    if DataTable::is_null_value(value) {
        return SortKey::Null(value);
    }
    match value.trim().parse::<f64>() {
        Ok(n) => SortKey::Number(TotalF64(n), value),
        Err(_) => SortKey::Text(value),
    }
}

/// Project `data` and write the result to `<dir>/tables/<name>.csv`.
pub fn write_table(
    data: &DataTable,
    name: &str,
    columns: &[String],
    primary_key: &[String],
    dir: &Path,
) -> Result<WrittenTable> {
    let rows = project(data, columns, primary_key)?;
    let tables_dir = dir.join(TABLES_DIR);
    fs::create_dir_all(&tables_dir).map_err(|e| NormalizerError::io(&tables_dir, e))?;

    let path = tables_dir.join(format!("{}.csv", name));
    write_csv(&path, columns, &rows)?;
    tracing::debug!(table = name, rows = rows.len(), path = %path.display(), "wrote table");

    Ok(WrittenTable {
        name: name.to_string(),
        rows: rows.len(),
        path,
    })
}

/// Write a header and rows as comma-separated values.
pub fn write_csv(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let file = File::create(path).map_err(|e| NormalizerError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| NormalizerError::io(path, e))?;
    Ok(())
}

/// Columns of `columns` that `data` lacks, in the given order.
pub fn missing_columns(data: &DataTable, columns: &[String]) -> Vec<String> {
    columns.iter().filter(|c| !data.has_column(c)).cloned().collect()
}

fn column_indices(data: &DataTable, columns: &[String]) -> Result<Vec<usize>> {
    let missing = missing_columns(data, columns);
    if !missing.is_empty() {
        return Err(NormalizerError::MissingColumns { columns: missing });
    }
    Ok(columns.iter().filter_map(|c| data.column_index(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;
    use tempfile::TempDir;

    fn make_table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            b',',
        )
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_project_dedups_and_sorts_numerically() {
        let data = make_table(
            &["id", "name", "extra"],
            &[&["10", "b", "x"], &["2", "a", "y"], &["10", "b", "z"], &["", "c", "w"]],
        );
        let rows = project(&data, &strings(&["id", "name"]), &strings(&["id"])).unwrap();

        assert_eq!(
            rows,
            vec![strings(&["2", "a"]), strings(&["10", "b"]), strings(&["", "c"])]
        );
    }

    #[test]
    fn test_compare_values_mixed() {
        assert_eq!(compare_values("9", "10"), Ordering::Less);
        assert_eq!(compare_values("b", "a"), Ordering::Greater);
        assert_eq!(compare_values("NA", "a"), Ordering::Greater);
        assert_eq!(compare_values("", "NA"), Ordering::Less);
        assert_eq!(compare_values("NA", "NA"), Ordering::Equal);
        // Numbers sort before text, even text that starts with a digit.
        assert_eq!(compare_values("10", "1a"), Ordering::Less);
        assert_eq!(compare_values("1a", "9"), Ordering::Greater);
    }

    #[test]
    fn test_project_order_ignores_input_order() {
        let forward = make_table(&["id"], &[&["9"], &["10"], &["1a"]]);
        let backward = make_table(&["id"], &[&["1a"], &["10"], &["9"]]);
        let key = strings(&["id"]);

        let expected = vec![strings(&["9"]), strings(&["10"]), strings(&["1a"])];
        assert_eq!(project(&forward, &key, &key).unwrap(), expected);
        assert_eq!(project(&backward, &key, &key).unwrap(), expected);
    }

    #[test]
    fn test_project_missing_column() {
        let data = make_table(&["a"], &[&["1"]]);
        let err = project(&data, &strings(&["a", "b"]), &strings(&["a"])).unwrap_err();
        assert!(matches!(err, NormalizerError::MissingColumns { columns } if columns == ["b"]));
    }

    #[test]
    fn test_write_table_round_trips_through_parser() {
        let dir = TempDir::new().unwrap();
        let data = make_table(&["id", "note"], &[&["1", "has, comma"], &["2", "plain"]]);

        let written = write_table(&data, "notes", &strings(&["id", "note"]), &strings(&["id"]), dir.path()).unwrap();
        assert_eq!(written.rows, 2);
        assert_eq!(written.path, dir.path().join("tables").join("notes.csv"));

        let (reread, _) = Parser::new().parse_file(&written.path).unwrap();
        assert_eq!(reread.headers, data.headers);
        assert_eq!(reread.rows, data.rows);
    }
}
