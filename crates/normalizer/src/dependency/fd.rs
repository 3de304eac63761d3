//! Functional dependency records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::set::AttributeSet;
use crate::error::{NormalizerError, Result};

/// A functional dependency `determinant → dependent`.
///
/// Invariants: the determinant is non-empty and does not contain the
/// dependent. Equality, ordering and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDependency")]
pub struct Dependency {
    pub determinant: AttributeSet,
    pub dependent: String,
}

#[derive(Deserialize)]
struct RawDependency {
    determinant: AttributeSet,
    dependent: String,
}

impl TryFrom<RawDependency> for Dependency {
    type Error = NormalizerError;

    fn try_from(raw: RawDependency) -> Result<Self> {
        Dependency::new(&raw.determinant, raw.dependent)
    }
}

impl Dependency {
    /// Build a dependency, checking its invariants.
    pub fn new<I, S>(determinant: I, dependent: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let determinant: AttributeSet = determinant.into_iter().collect();
        let dependent = dependent.into();

        if determinant.is_empty() {
            return Err(NormalizerError::InvalidDependency(format!(
                "empty determinant for '{}'",
                dependent
            )));
        }
        if determinant.contains(&dependent) {
            return Err(NormalizerError::InvalidDependency(format!(
                "'{}' appears on both sides of {} → {}",
                dependent, determinant, dependent
            )));
        }

        Ok(Self {
            determinant,
            dependent,
        })
    }

    /// Build a dependency whose invariants the caller already guarantees.
    pub(crate) fn new_unchecked(determinant: AttributeSet, dependent: impl Into<String>) -> Self {
        let dependent = dependent.into();
        debug_assert!(!determinant.is_empty() && !determinant.contains(&dependent));
        Self {
            determinant,
            dependent,
        }
    }

    /// Both sides lie within `attrs`.
    pub fn is_within(&self, attrs: &AttributeSet) -> bool {
        self.determinant.is_subset(attrs) && attrs.contains(&self.dependent)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.determinant, self.dependent)
    }
}

/// Review status of a discovered dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FdStatus {
    /// Held in every determinant group.
    Confirmed,
    /// Held in at least the threshold fraction of groups, but not all.
    NeedsReview,
}

/// A dependency together with the evidence gathered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalDependency {
    #[serde(flatten)]
    pub dependency: Dependency,
    /// Fraction of determinant groups with a single dependent value.
    #[serde(default)]
    pub confidence: f64,
    /// Groups where the dependent took more than one value.
    #[serde(default)]
    pub violations: usize,
    /// Number of determinant groups examined.
    #[serde(default)]
    pub total_groups: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FdStatus>,
}

impl FunctionalDependency {
    /// Record the outcome of testing `dependency` against a table.
    pub fn from_evidence(dependency: Dependency, violations: usize, total_groups: usize) -> Self {
        let confidence = if total_groups == 0 {
            0.0
        } else {
            1.0 - violations as f64 / total_groups as f64
        };
        let status = if total_groups > 0 && violations == 0 {
            FdStatus::Confirmed
        } else {
            FdStatus::NeedsReview
        };

        Self {
            dependency,
            confidence,
            violations,
            total_groups,
            status: Some(status),
        }
    }

    pub fn determinant(&self) -> &AttributeSet {
        &self.dependency.determinant
    }

    pub fn dependent(&self) -> &str {
        &self.dependency.dependent
    }

    /// Confirmed by status, or by holding in every group.
    pub fn is_confirmed(&self) -> bool {
        self.status == Some(FdStatus::Confirmed) || self.confidence == 1.0
    }

    pub fn needs_review(&self) -> bool {
        self.status == Some(FdStatus::NeedsReview)
    }
}

/// The bare dependencies of the confirmed records, in input order.
pub fn confirmed_dependencies(fds: &[FunctionalDependency]) -> Vec<Dependency> {
    fds.iter()
        .filter(|fd| fd.is_confirmed())
        .map(|fd| fd.dependency.clone())
        .collect()
}
