//! Example: Analyze a tabular file and print a 3NF decomposition plan.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Nothing is written to disk.

use std::env;
use std::path::Path;

use normalizer::{NormalizationConfig, Normalizer, TargetForm};

fn main() -> normalizer::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Normalizer Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let normalizer = Normalizer::new();
    let report = normalizer.analyze(path)?;

    println!("## Source");
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.rows);
    println!("  Columns: {}", report.columns.len());
    println!();

    println!("## Columns");
    for profile in report.column_types.values() {
        println!(
            "  {:20} {:10} {:12} unique={:.2} nulls={}",
            profile.name,
            format!("{:?}", profile.dtype),
            format!("{:?}", profile.semantic_type),
            profile.unique_ratio,
            profile.null_count
        );
    }
    println!();

    println!("## Functional Dependencies ({} total)", report.functional_dependencies.len());
    for fd in &report.functional_dependencies {
        println!(
            "  {:40} confidence={:.2} status={:?}",
            fd.dependency.to_string(),
            fd.confidence,
            fd.status
        );
    }
    println!();

    println!("## Candidate Keys");
    for key in &report.candidate_keys {
        println!("  [{}]", key.columns.join(", "));
    }
    println!();

    println!("## Normal Form: {}", report.current_normal_form);
    for (form, violations) in &report.violations {
        println!("  {} violations:", form);
        for v in violations {
            println!("    - {}", v);
        }
    }
    println!();

    let decomposition = normalizer.decompose(
        &report.columns,
        &NormalizationConfig::from(&report),
        TargetForm::ThirdNormalForm,
    );
    println!("## 3NF Plan ({} tables)", decomposition.tables.len());
    for table in &decomposition.tables {
        println!(
            "  {} ({}) key=[{}]",
            table.name,
            table.columns.join(", "),
            table.primary_key.join(", ")
        );
    }
    for fk in &decomposition.foreign_keys {
        println!(
            "  {}.{} -> {}.{}",
            fk.child_table, fk.column, fk.parent_table, fk.parent_column
        );
    }
    println!();

    println!("{}", separator);

    Ok(())
}
