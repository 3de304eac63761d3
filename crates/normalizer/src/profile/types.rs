//! Core type definitions for column profiles.

use serde::{Deserialize, Serialize};

/// Storage type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    String,
    /// Boolean values (true/false).
    Boolean,
    /// Date and time values.
    DateTime,
    /// Date only (no time component).
    Date,
    /// No non-null values to judge from.
    #[default]
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::DateTime | ColumnType::Date)
    }
}

/// Semantic category of a column, used for review questions and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticCategory {
    /// Every non-null value is distinct.
    UniqueIdentifier,
    /// Integer or floating point values.
    Numeric,
    /// Five-digit (optionally ZIP+4) postal codes.
    ZipCode,
    /// Email addresses.
    Email,
    /// Values starting with an ISO date.
    Date,
    /// True/false style values.
    Boolean,
    /// Anything else.
    Text,
    /// Column has no non-null values.
    #[default]
    Empty,
}
