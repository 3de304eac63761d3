//! Structured non-fatal conditions surfaced alongside results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a non-fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No functional dependency reached the confidence threshold.
    NoDependencies,
    /// No candidate key could be justified.
    NoCandidateKey,
    /// An attribute was not covered by any synthesized table and was folded
    /// into a catch-all table.
    UncoveredAttribute,
    /// Input data lacks columns the transform expects.
    MissingColumns,
    /// Input data has columns the transform does not use.
    ExtraColumns,
    /// A table could not be projected and was not written.
    TableSkipped,
    /// Child values of a foreign key are absent from the parent key column.
    OrphanValues,
}

/// A non-fatal condition reported in a result instead of being raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        let warning = Self {
            kind,
            message: message.into(),
        };
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
