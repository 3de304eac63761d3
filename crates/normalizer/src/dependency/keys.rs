//! Candidate key search.

use serde::{Deserialize, Serialize};

use super::closure::closure;
use super::fd::{FunctionalDependency, confirmed_dependencies};
use super::set::AttributeSet;
use crate::profile::ColumnProfile;

/// A set of columns that determines every column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateKey {
    pub columns: Vec<String>,
    #[serde(default = "default_minimal")]
    pub is_minimal: bool,
}

fn default_minimal() -> bool {
    true
}

impl CandidateKey {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            is_minimal: true,
        }
    }

    pub fn attributes(&self) -> AttributeSet {
        self.columns.iter().map(String::as_str).collect()
    }

    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

/// Find candidate keys from confirmed dependencies and column uniqueness.
///
/// The columns that never appear as a confirmed dependent must belong to
/// every key; when their closure covers the table they form a key. Every
/// fully unique, null-free column is also a key. The search is sound but
/// not exhaustive.
pub fn find_candidate_keys(
    columns: &[String],
    fds: &[FunctionalDependency],
    profiles: &[ColumnProfile],
) -> Vec<CandidateKey> {
    let confirmed = confirmed_dependencies(fds);
    let universe: AttributeSet = columns.iter().map(String::as_str).collect();
    let dependents: AttributeSet = confirmed.iter().map(|fd| fd.dependent.as_str()).collect();
    let must_be_in_key = universe.difference(&dependents);

    let mut keys = Vec::new();
    if !must_be_in_key.is_empty() && universe.is_subset(&closure(&must_be_in_key, &confirmed)) {
        keys.push(CandidateKey::new(must_be_in_key.to_vec()));
    }

    for column in columns {
        let unique = profiles
            .iter()
            .find(|p| &p.name == column)
            .is_some_and(ColumnProfile::is_unique_key);
        if !unique {
            continue;
        }
        let already = keys
            .iter()
            .any(|k| k.columns.len() == 1 && &k.columns[0] == column);
        if !already {
            keys.push(CandidateKey::new(vec![column.clone()]));
        }
    }

    tracing::debug!(count = keys.len(), "found candidate keys");
    keys
}
