//! Replaying a recorded decomposition on new data.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::TransformConfig;
use crate::error::{NormalizerError, Result};
use crate::input::{DataTable, Parser, ParserConfig};
use crate::output::{TABLES_DIR, WrittenTable, missing_columns, write_table};
use crate::synthesis::ForeignKey;
use crate::warning::{Warning, WarningKind};

/// Orphan values listed in a warning before it is truncated.
const ORPHAN_SAMPLE: usize = 5;

/// Replay behaviour.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Abort before writing anything when input columns are missing.
    pub strict: bool,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub tables: Vec<WrittenTable>,
    pub warnings: Vec<Warning>,
}

/// Applies a [`TransformConfig`] to new data.
pub struct Replayer {
    options: ReplayOptions,
    parser: Parser,
}

impl Replayer {
    pub fn new() -> Self {
        Self::with_options(ReplayOptions::default())
    }

    pub fn with_options(options: ReplayOptions) -> Self {
        Self {
            options,
            parser: Parser::new(),
        }
    }

    /// Use a specific parser configuration for the input file.
    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    /// Read `input` and write every table of `config` under `output_dir`.
    pub fn replay(
        &self,
        input: impl AsRef<Path>,
        config: &TransformConfig,
        output_dir: impl AsRef<Path>,
    ) -> Result<ReplayReport> {
        let (data, _) = self.parser.parse_file(input)?;
        self.replay_table(&data, config, output_dir.as_ref())
    }

    /// Write every table of `config` projected from `data`.
    pub fn replay_table(&self, data: &DataTable, config: &TransformConfig, output_dir: &Path) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();

        let missing = missing_columns(data, &config.original_columns);
        if !missing.is_empty() {
            if self.options.strict {
                return Err(NormalizerError::MissingColumns { columns: missing });
            }
            report.warnings.push(Warning::new(
                WarningKind::MissingColumns,
                format!("Input is missing columns: {}", missing.join(", ")),
            ));
        }

        let extra: Vec<&str> = data
            .headers
            .iter()
            .filter(|h| !config.original_columns.contains(h))
            .map(String::as_str)
            .collect();
        if !extra.is_empty() {
            report.warnings.push(Warning::new(
                WarningKind::ExtraColumns,
                format!("Input has extra columns that will be ignored: {}", extra.join(", ")),
            ));
        }

        for table in &config.tables {
            let absent = missing_columns(data, &table.columns);
            if !absent.is_empty() {
                report.warnings.push(Warning::new(
                    WarningKind::TableSkipped,
                    format!("Skipping table '{}': missing columns {}", table.name, absent.join(", ")),
                ));
                continue;
            }
            let written = write_table(data, &table.name, &table.columns, &table.primary_key, output_dir)?;
            report.tables.push(written);
        }

        for fk in &config.foreign_keys {
            let written = |name: &str| report.tables.iter().any(|t| t.name == name);
            if !(written(&fk.child_table) && written(&fk.parent_table)) {
                continue;
            }
            if let Some(warning) = check_orphans(fk, output_dir)? {
                report.warnings.push(warning);
            }
        }

        tracing::info!(
            tables = report.tables.len(),
            warnings = report.warnings.len(),
            "replayed transform"
        );
        Ok(report)
    }
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reload both sides of `fk` from disk and report child values absent from
/// the parent key column.
fn check_orphans(fk: &ForeignKey, output_dir: &Path) -> Result<Option<Warning>> {
    let parser = Parser::with_config(ParserConfig {
        delimiter: Some(b','),
        allow_empty: true,
    });
    let tables_dir = output_dir.join(TABLES_DIR);
    let (child, _) = parser.parse_file(tables_dir.join(format!("{}.csv", fk.child_table)))?;
    let (parent, _) = parser.parse_file(tables_dir.join(format!("{}.csv", fk.parent_table)))?;

    let (Some(child_idx), Some(parent_idx)) = (child.column_index(&fk.column), parent.column_index(&fk.parent_column))
    else {
        return Ok(None);
    };

    let parent_values = parent.distinct_values(parent_idx);
    let orphans: BTreeSet<&str> = child
        .column_values(child_idx)
        .filter(|v| !DataTable::is_null_value(v) && !parent_values.contains(v))
        .collect();
    if orphans.is_empty() {
        return Ok(None);
    }

    let sample: Vec<&str> = orphans.iter().take(ORPHAN_SAMPLE).copied().collect();
    Ok(Some(Warning::new(
        WarningKind::OrphanValues,
        format!(
            "{} value(s) of {}.{} missing from {}.{}: {}",
            orphans.len(),
            fk.child_table,
            fk.column,
            fk.parent_table,
            fk.parent_column,
            sample.join(", ")
        ),
    )))
}
