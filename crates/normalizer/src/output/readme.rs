//! README summary for a normalized output directory.

use crate::synthesis::{ForeignKey, Table, TargetForm};

/// Markdown summary of the tables, relationships and how to replay them.
pub fn render_readme(tables: &[Table], foreign_keys: &[ForeignKey], target: TargetForm, source_file: &str) -> String {
    let table_list = tables
        .iter()
        .map(|t| format!("- `{}.csv`: {}", t.name, t.columns.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    let fk_list = if foreign_keys.is_empty() {
        "None".to_string()
    } else {
        foreign_keys
            .iter()
            .map(|fk| {
                format!(
                    "- `{}.{}` → `{}.{}`",
                    fk.child_table, fk.column, fk.parent_table, fk.parent_column
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"# Normalized Database Schema

## Source
- Original file: `{source_file}`
- Target normal form: {target}

## Tables

{table_list}

## Relationships

{fk_list}

## Files

- `tables/` - Normalized CSV files
- `schema.sql` - SQL DDL statements
- `erd.md` - Entity-relationship diagram (Mermaid)
- `transform_config.json` - Reusable transformation config

## Re-running Transformation

To apply this normalization to new data with the same structure:

```bash
normalizer transform new_data.csv --config transform_config.json --output-dir ./output
```

## Importing to Database

```bash
# PostgreSQL example
psql -d yourdb -f schema.sql

# Then load CSVs
for f in tables/*.csv; do
    table=$(basename "$f" .csv)
    psql -d yourdb -c "\copy $table FROM '$f' CSV HEADER"
done
```
"#
    )
}
