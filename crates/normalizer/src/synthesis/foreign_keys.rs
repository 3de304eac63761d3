//! Name-based foreign key inference.

use super::table::{ForeignKey, Table};

/// Link each non-key column to every other table whose single-column
/// primary key has the same name.
///
/// Matching is by name only. Join columns named differently are missed, and
/// unrelated columns that happen to share a key's name are linked.
pub fn infer_foreign_keys(tables: &[Table]) -> Vec<ForeignKey> {
    let mut foreign_keys = Vec::new();

    for (i, child) in tables.iter().enumerate() {
        for (j, parent) in tables.iter().enumerate() {
            if i == j {
                continue;
            }
            let [parent_key] = parent.primary_key.as_slice() else {
                continue;
            };
            for column in child.non_key_columns().filter(|c| *c == parent_key) {
                foreign_keys.push(ForeignKey {
                    child_table: child.name.clone(),
                    column: column.clone(),
                    parent_table: parent.name.clone(),
                    parent_column: parent_key.clone(),
                });
            }
        }
    }

    foreign_keys
}
