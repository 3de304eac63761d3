//! Statistical discovery of functional dependencies in a table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::fd::{Dependency, FunctionalDependency};
use super::set::AttributeSet;
use crate::input::DataTable;
use crate::profile::ColumnProfile;

/// Settings for dependency discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Minimum confidence for a candidate to be reported.
    pub confidence_threshold: f64,
    /// Columns whose distinct-value ratio exceeds this are paired up as
    /// composite determinants.
    pub high_cardinality_ratio: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.8,
            high_cardinality_ratio: 0.5,
        }
    }
}

/// Group counts from testing one candidate dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEvidence {
    /// Groups in which the dependent took more than one value.
    pub violations: usize,
    /// Non-null determinant groups.
    pub total_groups: usize,
}

/// Tests candidate single- and two-column determinants against a table.
pub struct FdDiscovery {
    config: DiscoveryConfig,
}

impl FdDiscovery {
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover dependencies whose confidence reaches the threshold.
    ///
    /// Single-column determinants come first, in (determinant, dependent)
    /// column order, followed by two-column determinants built from the
    /// high-cardinality columns.
    pub fn discover(&self, table: &DataTable, profiles: &[ColumnProfile]) -> Vec<FunctionalDependency> {
        let headers = &table.headers;
        let mut fds = Vec::new();

        for det in 0..headers.len() {
            for dep in 0..headers.len() {
                if det == dep {
                    continue;
                }
                if let Some(fd) = self.test_candidate(table, &[det], dep) {
                    fds.push(fd);
                }
            }
        }
        let singles = fds.len();

        let high_cardinality: Vec<usize> = profiles
            .iter()
            .filter(|p| p.cardinality() > self.config.high_cardinality_ratio)
            .filter_map(|p| table.column_index(&p.name))
            .collect();
        tracing::debug!(
            columns = high_cardinality.len(),
            "testing composite determinants over high-cardinality columns"
        );

        for (i, &first) in high_cardinality.iter().enumerate() {
            for &second in &high_cardinality[i + 1..] {
                for dep in 0..headers.len() {
                    if dep == first || dep == second {
                        continue;
                    }
                    let dependent = &headers[dep];
                    let singly_determined = fds[..singles].iter().any(|fd| {
                        fd.is_confirmed()
                            && fd.dependent() == dependent
                            && fd.determinant().len() == 1
                            && (fd.determinant().contains(&headers[first])
                                || fd.determinant().contains(&headers[second]))
                    });
                    if singly_determined {
                        continue;
                    }
                    if let Some(fd) = self.test_candidate(table, &[first, second], dep) {
                        fds.push(fd);
                    }
                }
            }
        }

        tracing::info!(
            single = singles,
            composite = fds.len() - singles,
            "discovered functional dependencies"
        );
        fds
    }

    /// Test one candidate and keep it if it reaches the threshold.
    fn test_candidate(&self, table: &DataTable, det: &[usize], dep: usize) -> Option<FunctionalDependency> {
        let evidence = group_evidence(table, det, dep);
        let determinant: AttributeSet = det.iter().map(|&i| table.headers[i].as_str()).collect();
        let dependency = Dependency::new_unchecked(determinant, table.headers[dep].as_str());
        let fd = FunctionalDependency::from_evidence(dependency, evidence.violations, evidence.total_groups);

        tracing::trace!(fd = %fd.dependency, confidence = fd.confidence, "tested candidate");
        (fd.confidence >= self.config.confidence_threshold).then_some(fd)
    }
}

impl Default for FdDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition rows by the determinant columns and count groups whose
/// dependent takes more than one value. Rows with a null in any involved
/// column are ignored.
pub fn group_evidence(table: &DataTable, det: &[usize], dep: usize) -> GroupEvidence {
    // group key → (first dependent value seen, conflicting value seen)
    let mut groups: HashMap<Vec<&str>, (&str, bool)> = HashMap::new();

    'rows: for row in &table.rows {
        let dependent = cell(row, dep);
        if DataTable::is_null_value(dependent) {
            continue;
        }

        let mut key = Vec::with_capacity(det.len());
        for &col in det {
            let value = cell(row, col);
            if DataTable::is_null_value(value) {
                continue 'rows;
            }
            key.push(value);
        }

        match groups.entry(key) {
            Entry::Occupied(mut entry) => {
                let (first, conflict) = entry.get_mut();
                if *first != dependent {
                    *conflict = true;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((dependent, false));
            }
        }
    }

    GroupEvidence {
        violations: groups.values().filter(|(_, conflict)| *conflict).count(),
        total_groups: groups.len(),
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
