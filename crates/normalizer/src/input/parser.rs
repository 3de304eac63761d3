//! CSV/TSV reading with delimiter detection.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{NormalizerError, Result};

/// Candidate delimiters, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records read when sniffing the delimiter.
const SNIFF_RECORDS: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Accept a header with no data rows.
    pub allow_empty: bool,
}

/// Reads delimited files with a header row.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Read a file, returning its table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| NormalizerError::io(path, e))?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };
        let table = self.parse_bytes(&contents, delimiter)?;
        let format = format_name(delimiter);

        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            format,
            "parsed input"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            format!("sha256:{:x}", Sha256::digest(&contents)),
            contents.len() as u64,
            format.to_string(),
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }

    /// Parse delimited bytes whose first record is the header.
    ///
    /// Header names are trimmed and must be unique. Short rows are padded
    /// with empty cells and long rows truncated to the header width.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if headers.iter().all(String::is_empty) {
            return Err(NormalizerError::EmptyData("No columns found".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(NormalizerError::DuplicateColumn(duplicate.clone()));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let mut row: Vec<String> = record?.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        if rows.is_empty() && !self.config.allow_empty {
            return Err(NormalizerError::EmptyData("No data rows found".to_string()));
        }
        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Pick the delimiter that splits the leading records into the most
/// fields of a consistent width. Quoting is handled by the csv reader.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(NormalizerError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0);
    for &delimiter in DELIMITERS {
        let score = delimiter_score(bytes, delimiter);
        if score > best.1 {
            best = (delimiter, score);
        }
    }
    Ok(best.0)
}

/// Header width times the number of sniffed records sharing it; zero when
/// the header does not split.
fn delimiter_score(bytes: &[u8], delimiter: u8) -> usize {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let widths: Vec<usize> = reader
        .records()
        .take(SNIFF_RECORDS)
        .map_while(|r| r.ok())
        .map(|r| r.len())
        .collect();

    match widths.first() {
        Some(&header) if header > 1 => header * widths.iter().filter(|&&w| w == header).count(),
        _ => 0,
    }
}
