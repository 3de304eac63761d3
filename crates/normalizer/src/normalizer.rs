//! Main Normalizer struct and public API.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::analysis::{AnalysisReport, NormalizationConfig};
use crate::assessment::{assess, generate_questions};
use crate::dependency::{DiscoveryConfig, FdDiscovery, find_candidate_keys};
use crate::error::{NormalizerError, Result};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::output::{
    ERD_FILE, README_FILE, SCHEMA_FILE, TRANSFORM_CONFIG_FILE, WrittenTable, render_ddl, render_erd, render_readme,
    write_table,
};
use crate::profile::ColumnProfiler;
use crate::synthesis::{Decomposition, TargetForm, synthesize};
use crate::transform::TransformConfig;
use crate::warning::{Warning, WarningKind};

/// Configuration for analysis and normalization.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Dependency discovery configuration.
    pub discovery: DiscoveryConfig,
    /// Analyze a random subset of this many rows (None = all).
    pub sample_rows: Option<usize>,
    /// Seed for row sampling.
    pub sample_seed: u64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            discovery: DiscoveryConfig::default(),
            sample_rows: None,
            sample_seed: 42,
        }
    }
}

/// Result of normalizing a file into an output directory.
#[derive(Debug, Clone)]
pub struct NormalizeResult {
    pub decomposition: Decomposition,
    pub transform: TransformConfig,
    pub tables: Vec<WrittenTable>,
    pub output_dir: PathBuf,
}

impl NormalizeResult {
    pub fn warnings(&self) -> &[Warning] {
        &self.decomposition.warnings
    }
}

/// The analysis and normalization engine.
pub struct Normalizer {
    config: NormalizerConfig,
    parser: Parser,
    profiler: ColumnProfiler,
    discovery: FdDiscovery,
}

impl Normalizer {
    /// Create a new Normalizer with default configuration.
    pub fn new() -> Self {
        Self::with_config(NormalizerConfig::default())
    }

    /// Create a Normalizer with custom configuration.
    pub fn with_config(config: NormalizerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let discovery = FdDiscovery::with_config(config.discovery.clone());

        Self {
            config,
            parser,
            profiler: ColumnProfiler::new(),
            discovery,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Analyze a data file: profile columns, discover dependencies, find
    /// candidate keys and assess the current normal form.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let path = path.as_ref();
        let (mut table, mut source) = self.parser.parse_file(path)?;

        if let Some(n) = self.config.sample_rows {
            table.sample(n, self.config.sample_seed);
            source.row_count = table.row_count();
            tracing::debug!(rows = table.row_count(), seed = self.config.sample_seed, "sampled rows");
        }

        Ok(self.analyze_table(&table, source))
    }

    /// Analyze an already parsed table.
    pub fn analyze_table(&self, table: &DataTable, source: SourceMetadata) -> AnalysisReport {
        tracing::info!(rows = table.row_count(), columns = table.column_count(), "analyzing table");

        let profiles = self.profiler.profile_table(table);
        let fds = self.discovery.discover(table, &profiles);
        let keys = find_candidate_keys(&table.headers, &fds, &profiles);
        let assessment = assess(table, &fds, &keys);
        let questions = generate_questions(&fds, &profiles);

        let mut warnings = Vec::new();
        if fds.is_empty() {
            warnings.push(Warning::new(
                WarningKind::NoDependencies,
                format!(
                    "No functional dependency reached confidence {}",
                    self.config.discovery.confidence_threshold
                ),
            ));
        }
        if keys.is_empty() {
            warnings.push(Warning::new(WarningKind::NoCandidateKey, "No candidate key found"));
        }

        AnalysisReport {
            file: source.path.display().to_string(),
            rows: table.row_count(),
            columns: table.headers.clone(),
            source,
            column_types: profiles.into_iter().map(|p| (p.name.clone(), p)).collect::<IndexMap<_, _>>(),
            functional_dependencies: fds,
            candidate_keys: keys,
            current_normal_form: assessment.current_normal_form,
            violations: assessment.violations,
            questions,
            warnings,
        }
    }

    /// Decompose `columns` using the confirmed dependencies of `config`.
    pub fn decompose(&self, columns: &[String], config: &NormalizationConfig, target: TargetForm) -> Decomposition {
        synthesize(target, columns, &config.confirmed(), &config.candidate_keys)
    }

    /// Normalize a data file and write tables, DDL, ERD, transform config
    /// and README under `output_dir`.
    pub fn normalize(
        &self,
        path: impl AsRef<Path>,
        config: &NormalizationConfig,
        target: TargetForm,
        output_dir: impl AsRef<Path>,
    ) -> Result<NormalizeResult> {
        let path = path.as_ref();
        let output_dir = output_dir.as_ref();
        let (table, _) = self.parser.parse_file(path)?;

        let decomposition = self.decompose(&table.headers, config, target);
        let profiles = self.profiler.profile_table(&table);

        fs::create_dir_all(output_dir).map_err(|e| NormalizerError::io(output_dir, e))?;

        let mut tables = Vec::with_capacity(decomposition.tables.len());
        for t in &decomposition.tables {
            tables.push(write_table(&table, &t.name, &t.columns, &t.primary_key, output_dir)?);
        }

        write_text(
            &output_dir.join(SCHEMA_FILE),
            &render_ddl(&decomposition.tables, &decomposition.foreign_keys, &profiles),
        )?;
        write_text(
            &output_dir.join(ERD_FILE),
            &render_erd(&decomposition.tables, &decomposition.foreign_keys),
        )?;

        let transform = TransformConfig::from_decomposition(&decomposition, &table.headers);
        transform.save(output_dir.join(TRANSFORM_CONFIG_FILE))?;

        write_text(
            &output_dir.join(README_FILE),
            &render_readme(
                &decomposition.tables,
                &decomposition.foreign_keys,
                target,
                &path.display().to_string(),
            ),
        )?;

        tracing::info!(
            tables = tables.len(),
            output = %output_dir.display(),
            "normalized"
        );

        Ok(NormalizeResult {
            decomposition,
            transform,
            tables,
            output_dir: output_dir.to_path_buf(),
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| NormalizerError::io(path, e))
}
