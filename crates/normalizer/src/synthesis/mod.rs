//! Schema synthesis: decomposing one table into 3NF or BCNF tables.
//!
//! [`synthesize`] is the entry point. It drops dependencies and keys that
//! name columns outside the table, runs the requested decomposition, and
//! infers foreign keys between the resulting tables.

mod bcnf;
mod foreign_keys;
mod naming;
mod table;
mod third;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dependency::{AttributeSet, CandidateKey, Dependency};
use crate::error::NormalizerError;
use crate::warning::{Warning, WarningKind};

pub use bcnf::decompose_bcnf;
pub use foreign_keys::infer_foreign_keys;
pub use naming::{NameAllocator, pluralize, sanitize_name, table_name};
pub use table::{ForeignKey, SourceFd, Table};
pub use third::{KEY_TABLE, MAIN_TABLE, decompose_3nf};

/// Normal form to decompose into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetForm {
    #[serde(rename = "3NF")]
    ThirdNormalForm,
    #[serde(rename = "BCNF")]
    BoyceCodd,
}

impl FromStr for TargetForm {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "3NF" | "3" => Ok(TargetForm::ThirdNormalForm),
            "BCNF" | "BC" => Ok(TargetForm::BoyceCodd),
            _ => Err(NormalizerError::UnsupportedTarget(s.to_string())),
        }
    }
}

impl fmt::Display for TargetForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetForm::ThirdNormalForm => f.write_str("3NF"),
            TargetForm::BoyceCodd => f.write_str("BCNF"),
        }
    }
}

/// Tables and relationships produced by a decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub target: TargetForm,
    pub tables: Vec<Table>,
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Decomposition {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Decompose `columns` into `target` using confirmed dependencies and
/// candidate keys.
pub fn synthesize(
    target: TargetForm,
    columns: &[String],
    fds: &[Dependency],
    keys: &[CandidateKey],
) -> Decomposition {
    let universe: AttributeSet = columns.iter().map(String::as_str).collect();
    let mut warnings = Vec::new();

    let mut usable = Vec::with_capacity(fds.len());
    for fd in fds {
        if fd.is_within(&universe) {
            usable.push(fd.clone());
        } else {
            warnings.push(Warning::new(
                WarningKind::MissingColumns,
                format!("Dependency {} names columns not in the data; ignored", fd),
            ));
        }
    }

    let usable_keys: Vec<CandidateKey> = keys
        .iter()
        .filter(|k| !k.columns.is_empty() && k.attributes().is_subset(&universe))
        .cloned()
        .collect();
    if usable_keys.len() < keys.len() {
        warnings.push(Warning::new(
            WarningKind::MissingColumns,
            format!(
                "{} candidate key(s) name columns not in the data; ignored",
                keys.len() - usable_keys.len()
            ),
        ));
    }
    if usable.is_empty() {
        warnings.push(Warning::new(
            WarningKind::NoDependencies,
            "No confirmed functional dependencies to decompose on",
        ));
    }

    let mut names = NameAllocator::new();
    let tables = match target {
        TargetForm::ThirdNormalForm => decompose_3nf(columns, &usable, &usable_keys, &mut names, &mut warnings),
        TargetForm::BoyceCodd => decompose_bcnf(columns, &usable, &usable_keys, &mut names),
    };
    let foreign_keys = infer_foreign_keys(&tables);

    tracing::info!(
        target = %target,
        tables = tables.len(),
        foreign_keys = foreign_keys.len(),
        "decomposed schema"
    );

    Decomposition {
        target,
        tables,
        foreign_keys,
        warnings,
    }
}
