//! SQL DDL rendering.

use crate::profile::{ColumnProfile, ColumnType};
use crate::synthesis::{ForeignKey, Table};

const INT_MAX: f64 = 2_147_483_647.0;
const VARCHAR_PADDING: usize = 50;
const VARCHAR_DEFAULT_LENGTH: usize = 255;

/// SQL column type for a profiled column.
pub fn sql_type(profile: Option<&ColumnProfile>) -> String {
    let Some(profile) = profile else {
        return varchar(None);
    };

    match profile.dtype {
        ColumnType::Integer => {
            if profile.numeric_max.is_some_and(|max| max > INT_MAX) {
                "BIGINT".to_string()
            } else {
                "INTEGER".to_string()
            }
        }
        ColumnType::Float => "DECIMAL(18,6)".to_string(),
        ColumnType::Boolean => "BOOLEAN".to_string(),
        ColumnType::Date | ColumnType::DateTime => "TIMESTAMP".to_string(),
        _ => varchar(profile.max_length),
    }
}

fn varchar(max_length: Option<usize>) -> String {
    format!(
        "VARCHAR({})",
        max_length.unwrap_or(VARCHAR_DEFAULT_LENGTH) + VARCHAR_PADDING
    )
}

/// `CREATE TABLE` statements for every table, with primary and foreign keys.
pub fn render_ddl(tables: &[Table], foreign_keys: &[ForeignKey], profiles: &[ColumnProfile]) -> String {
    let statements: Vec<String> = tables
        .iter()
        .map(|table| {
            let mut lines: Vec<String> = table
                .columns
                .iter()
                .map(|column| {
                    let profile = profiles.iter().find(|p| &p.name == column);
                    let nullability = if table.is_key_column(column) { "NOT NULL" } else { "NULL" };
                    format!("    {} {} {}", column, sql_type(profile), nullability)
                })
                .collect();

            lines.push(format!("    PRIMARY KEY ({})", table.primary_key.join(", ")));
            for fk in foreign_keys.iter().filter(|fk| fk.child_table == table.name) {
                lines.push(format!(
                    "    FOREIGN KEY ({}) REFERENCES {}({})",
                    fk.column, fk.parent_table, fk.parent_column
                ));
            }

            format!("CREATE TABLE {} (\n{}\n);", table.name, lines.join(",\n"))
        })
        .collect();

    let mut ddl = statements.join("\n\n");
    ddl.push('\n');
    ddl
}
