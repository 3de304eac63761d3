//! Normal form assessment of the source table.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dependency::{AttributeSet, CandidateKey, Dependency, FunctionalDependency, confirmed_dependencies};
use crate::input::DataTable;

/// Leading non-null values inspected per column for the atomicity check.
const ATOMICITY_SAMPLE: usize = 100;

/// Fraction of sampled values that must contain a list delimiter before a
/// column is reported as non-atomic.
const ATOMICITY_THRESHOLD: f64 = 0.3;

/// Normal forms, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NormalForm {
    #[serde(rename = "UNF")]
    Unf,
    #[serde(rename = "1NF")]
    First,
    #[serde(rename = "2NF")]
    Second,
    #[serde(rename = "3NF")]
    Third,
    #[serde(rename = "BCNF")]
    Bcnf,
}

impl NormalForm {
    pub fn label(&self) -> &'static str {
        match self {
            NormalForm::Unf => "UNF",
            NormalForm::First => "1NF",
            NormalForm::Second => "2NF",
            NormalForm::Third => "3NF",
            NormalForm::Bcnf => "BCNF",
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest normal form the table satisfies, with the violations of each
/// form that blocked a higher rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalFormAssessment {
    pub current_normal_form: NormalForm,
    /// Violations keyed by the form they break. Forms without violations
    /// are absent.
    #[serde(default)]
    pub violations: IndexMap<NormalForm, Vec<String>>,
}

impl NormalFormAssessment {
    pub fn violations_of(&self, form: NormalForm) -> &[String] {
        self.violations.get(&form).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Assess the current normal form of `table` from its confirmed
/// dependencies and candidate keys.
pub fn assess(table: &DataTable, fds: &[FunctionalDependency], keys: &[CandidateKey]) -> NormalFormAssessment {
    let confirmed = confirmed_dependencies(fds);
    let key_sets: Vec<AttributeSet> = keys.iter().map(CandidateKey::attributes).collect();
    let key_attributes = key_sets
        .iter()
        .fold(AttributeSet::new(), |acc, key| acc.union(key));

    let first = non_atomic_columns(table)
        .into_iter()
        .map(|c| format!("Column '{}' may contain non-atomic values", c))
        .collect();

    let mut second = Vec::new();
    for key in key_sets.iter().filter(|k| k.len() > 1) {
        for fd in &confirmed {
            if fd.determinant.is_proper_subset(key) && !key.contains(&fd.dependent) {
                second.push(describe("Partial dependency", fd));
            }
        }
    }

    let third = confirmed
        .iter()
        .filter(|fd| fd.determinant.is_disjoint(&key_attributes) && !key_attributes.contains(&fd.dependent))
        .map(|fd| describe("Transitive dependency", fd))
        .collect();

    let bcnf = confirmed
        .iter()
        .filter(|fd| !key_sets.iter().any(|key| key.is_subset(&fd.determinant)))
        .map(|fd| describe("Non-superkey determinant", fd))
        .collect();

    let mut violations = IndexMap::new();
    for (form, found) in [
        (NormalForm::First, first),
        (NormalForm::Second, second),
        (NormalForm::Third, third),
        (NormalForm::Bcnf, bcnf),
    ] {
        if !found.is_empty() {
            violations.insert(form, found);
        }
    }

    let current_normal_form = match violations.keys().next() {
        Some(NormalForm::First) => NormalForm::Unf,
        Some(NormalForm::Second) => NormalForm::First,
        Some(NormalForm::Third) => NormalForm::Second,
        Some(_) => NormalForm::Third,
        None => NormalForm::Bcnf,
    };
    tracing::info!(normal_form = %current_normal_form, "assessed normal form");

    NormalFormAssessment {
        current_normal_form,
        violations,
    }
}

fn describe(label: &str, fd: &Dependency) -> String {
    format!("{}: {}", label, fd)
}

/// Columns whose leading values look like delimited lists.
fn non_atomic_columns(table: &DataTable) -> Vec<String> {
    let mut columns = Vec::new();
    for (idx, name) in table.headers.iter().enumerate() {
        let sample: Vec<&str> = table
            .column_values(idx)
            .filter(|v| !DataTable::is_null_value(v))
            .take(ATOMICITY_SAMPLE)
            .collect();
        if sample.is_empty() {
            continue;
        }
        let listy = sample
            .iter()
            .filter(|v| v.contains([',', ';', '|']))
            .count();
        if listy as f64 / sample.len() as f64 > ATOMICITY_THRESHOLD {
            columns.push(name.clone());
        }
    }
    columns
}
