//! Analysis report and normalization config artifacts.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::assessment::{NormalForm, NormalFormAssessment, Question};
use crate::dependency::{CandidateKey, Dependency, FunctionalDependency, confirmed_dependencies};
use crate::error::{NormalizerError, Result};
use crate::input::SourceMetadata;
use crate::profile::ColumnProfile;
use crate::warning::Warning;

/// Everything learned about a source table.
///
/// The JSON form doubles as a [`NormalizationConfig`]: after reviewing it,
/// users can pass it straight to `normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source path as given.
    pub file: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub source: SourceMetadata,
    /// Column profiles keyed by name, in column order.
    pub column_types: IndexMap<String, ColumnProfile>,
    pub functional_dependencies: Vec<FunctionalDependency>,
    pub candidate_keys: Vec<CandidateKey>,
    pub current_normal_form: NormalForm,
    #[serde(default)]
    pub violations: IndexMap<NormalForm, Vec<String>>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl AnalysisReport {
    pub fn profiles(&self) -> Vec<ColumnProfile> {
        self.column_types.values().cloned().collect()
    }

    pub fn assessment(&self) -> NormalFormAssessment {
        NormalFormAssessment {
            current_normal_form: self.current_normal_form,
            violations: self.violations.clone(),
        }
    }

    pub fn confirmed_count(&self) -> usize {
        self.functional_dependencies.iter().filter(|fd| fd.is_confirmed()).count()
    }

    pub fn review_count(&self) -> usize {
        self.functional_dependencies.iter().filter(|fd| fd.needs_review()).count()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    NormalizerError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            NormalizerError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            NormalizerError::Persistence(format!("Failed to serialize analysis report: {}", e))
        })?;

        Ok(())
    }

    /// Load a report saved with [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            NormalizerError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            NormalizerError::Persistence(format!(
                "Failed to parse analysis report '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Reviewed dependencies and keys that drive a decomposition.
///
/// Only `functional_dependencies` and `candidate_keys` are read; any other
/// keys, such as the rest of an analysis report, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub functional_dependencies: Vec<FunctionalDependency>,
    #[serde(default)]
    pub candidate_keys: Vec<CandidateKey>,
}

impl NormalizationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NormalizerError::io(path, e))?;

        let config: NormalizationConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| NormalizerError::Config(format!("Invalid config '{}': {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            dependencies = config.functional_dependencies.len(),
            keys = config.candidate_keys.len(),
            "loaded normalization config"
        );
        Ok(config)
    }

    /// Dependencies confirmed by status or by full confidence, in order.
    pub fn confirmed(&self) -> Vec<Dependency> {
        confirmed_dependencies(&self.functional_dependencies)
    }
}

impl From<&AnalysisReport> for NormalizationConfig {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            functional_dependencies: report.functional_dependencies.clone(),
            candidate_keys: report.candidate_keys.clone(),
        }
    }
}
