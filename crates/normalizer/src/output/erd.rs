//! Mermaid entity-relationship diagram.

use crate::synthesis::{ForeignKey, Table};

/// Markdown document with a Mermaid `erDiagram` of the schema.
pub fn render_erd(tables: &[Table], foreign_keys: &[ForeignKey]) -> String {
    let mut lines = vec!["erDiagram".to_string()];

    for fk in foreign_keys {
        lines.push(format!("    {} ||--o{{ {} : has", fk.parent_table, fk.child_table));
    }

    for table in tables {
        lines.push(format!("    {} {{", table.name));
        for column in &table.columns {
            let mut marks = Vec::new();
            if table.is_key_column(column) {
                marks.push("PK");
            }
            if foreign_keys
                .iter()
                .any(|fk| fk.child_table == table.name && &fk.column == column)
            {
                marks.push("FK");
            }
            if marks.is_empty() {
                lines.push(format!("        string {}", column));
            } else {
                lines.push(format!("        string {} {}", column, marks.join(",")));
            }
        }
        lines.push("    }".to_string());
    }

    format!(
        "# Entity Relationship Diagram\n\n```mermaid\n{}\n```\n",
        lines.join("\n")
    )
}
