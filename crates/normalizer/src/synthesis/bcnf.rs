//! BCNF decomposition by repeated splitting on violating dependencies.

use super::naming::{NameAllocator, table_name};
use super::table::Table;
use crate::dependency::{AttributeSet, CandidateKey, Dependency, closure, is_superkey};

/// Name used when decomposition leaves the table whole.
const SINGLE_TABLE: &str = "main";

/// Split `columns` until every table is in BCNF.
///
/// A set is split on the first dependency inside it whose determinant is
/// not a superkey of the set, into (determinant ∪ dependent) and
/// (set − dependent). Pending sets are kept on a stack and the left part is
/// always processed first, so tables come out in depth-first order. Sets
/// keep the original column order and exact duplicates are emitted once.
pub fn decompose_bcnf(
    columns: &[String],
    fds: &[Dependency],
    keys: &[CandidateKey],
    names: &mut NameAllocator,
) -> Vec<Table> {
    let mut pending: Vec<Vec<String>> = vec![columns.to_vec()];
    let mut terminal: Vec<(Vec<String>, Vec<String>)> = Vec::new();
    let mut seen: Vec<AttributeSet> = Vec::new();

    while let Some(set) = pending.pop() {
        let attrs: AttributeSet = set.iter().map(String::as_str).collect();
        let relevant: Vec<Dependency> = fds.iter().filter(|fd| fd.is_within(&attrs)).cloned().collect();

        let violation = relevant
            .iter()
            .find(|fd| !is_superkey(&fd.determinant, &attrs, &relevant));

        match violation {
            Some(fd) => {
                tracing::trace!(fd = %fd, "splitting on BCNF violation");
                let left: Vec<String> = set
                    .iter()
                    .filter(|c| fd.determinant.contains(c) || **c == fd.dependent)
                    .cloned()
                    .collect();
                let right: Vec<String> = set.iter().filter(|c| **c != fd.dependent).cloned().collect();
                pending.push(right);
                pending.push(left);
            }
            None => {
                if seen.contains(&attrs) {
                    continue;
                }
                let key = terminal_key(&set, &attrs, &relevant, keys);
                seen.push(attrs);
                terminal.push((set, key));
            }
        }
    }

    if terminal.len() == 1 {
        return terminal
            .into_iter()
            .map(|(columns, key)| Table::new(names.allocate(SINGLE_TABLE), columns, key))
            .collect();
    }

    terminal
        .into_iter()
        .map(|(columns, key)| {
            let dependents: Vec<String> = columns.iter().filter(|c| !key.contains(c)).cloned().collect();
            Table::new(names.allocate(&table_name(&key, &dependents)), columns, key)
        })
        .collect()
}

/// Primary key of a terminal set: the first candidate key inside it, else
/// the first dependency determinant whose closure covers it, else every
/// column.
fn terminal_key(set: &[String], attrs: &AttributeSet, relevant: &[Dependency], keys: &[CandidateKey]) -> Vec<String> {
    if let Some(key) = keys.iter().find(|k| k.attributes().is_subset(attrs)) {
        return key.columns.clone();
    }
    relevant
        .iter()
        .find(|fd| attrs.is_subset(&closure(&fd.determinant, relevant)))
        .map(|fd| fd.determinant.to_vec())
        .unwrap_or_else(|| set.to_vec())
}
