//! 3NF synthesis from a minimal cover.

use indexmap::IndexMap;

use super::naming::{NameAllocator, table_name};
use super::table::{SourceFd, Table};
use crate::dependency::{AttributeSet, CandidateKey, Dependency, minimal_cover};
use crate::warning::{Warning, WarningKind};

/// Name of the key-only table added when no dependency table holds a key.
pub const KEY_TABLE: &str = "main_keys";
/// Name of the catch-all table for uncovered columns.
pub const MAIN_TABLE: &str = "main";

/// Synthesize 3NF tables: one per determinant group of the minimal cover,
/// plus a key table and a home for columns no group covers.
pub fn decompose_3nf(
    columns: &[String],
    fds: &[Dependency],
    keys: &[CandidateKey],
    names: &mut NameAllocator,
    warnings: &mut Vec<Warning>,
) -> Vec<Table> {
    let cover = minimal_cover(fds);

    let mut groups: IndexMap<AttributeSet, Vec<String>> = IndexMap::new();
    for fd in &cover {
        groups
            .entry(fd.determinant.clone())
            .or_default()
            .push(fd.dependent.clone());
    }

    let mut tables: Vec<Table> = groups
        .into_iter()
        .map(|(determinant, dependents)| {
            let key = determinant.to_vec();
            let mut table_columns = key.clone();
            table_columns.extend(dependents.iter().cloned());
            Table {
                name: names.allocate(&table_name(&key, &dependents)),
                columns: table_columns,
                primary_key: key.clone(),
                source_fd: Some(SourceFd {
                    determinant: key,
                    dependents,
                }),
            }
        })
        .collect();

    let holds_key = tables.iter().any(|table| {
        let table_attrs: AttributeSet = table.columns.iter().map(String::as_str).collect();
        keys.iter().any(|k| k.attributes().is_subset(&table_attrs))
    });
    if !holds_key {
        if let Some(key) = keys.first() {
            tables.push(Table::new(
                names.allocate(KEY_TABLE),
                key.columns.clone(),
                key.columns.clone(),
            ));
        }
    }

    let uncovered: Vec<String> = columns
        .iter()
        .filter(|c| !tables.iter().any(|t| t.columns.contains(c)))
        .cloned()
        .collect();
    if uncovered.is_empty() {
        return tables;
    }

    for column in &uncovered {
        warnings.push(Warning::new(
            WarningKind::UncoveredAttribute,
            format!("Column '{}' is not covered by any dependency", column),
        ));
    }

    if let Some(home) = tables.iter_mut().find(|t| t.source_fd.is_none()) {
        home.columns.extend(uncovered);
    } else if let Some(key) = keys.first() {
        let mut main_columns = key.columns.clone();
        main_columns.extend(uncovered);
        tables.push(Table::new(names.allocate(MAIN_TABLE), main_columns, key.columns.clone()));
    } else {
        warnings.push(Warning::new(
            WarningKind::NoCandidateKey,
            format!(
                "No candidate key; table '{}' is keyed by all of its columns",
                MAIN_TABLE
            ),
        ));
        tables.push(Table::new(names.allocate(MAIN_TABLE), uncovered.clone(), uncovered));
    }

    tables
}
