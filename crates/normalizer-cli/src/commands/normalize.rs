//! Normalize command - decompose a file into 3NF or BCNF tables.

use std::path::PathBuf;

use colored::Colorize;
use normalizer::{NormalizationConfig, Normalizer, TargetForm};

pub fn run(file: PathBuf, config: PathBuf, target: String, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    // Reject an unknown target before touching any file.
    let target: TargetForm = target.parse()?;

    if !file.exists() {
        return Err(format!("Input file not found: {}", file.display()).into());
    }
    if !config.exists() {
        return Err(format!("Config file not found: {}", config.display()).into());
    }

    println!(
        "{} {} to {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white(),
        target.to_string().white().bold()
    );

    let normalization = NormalizationConfig::load(&config)?;
    let result = Normalizer::new().normalize(&file, &normalization, target, &output)?;

    println!(
        "  Decomposed into {} tables",
        result.decomposition.tables.len().to_string().white().bold()
    );
    println!(
        "  Identified {} foreign key relationships",
        result.decomposition.foreign_keys.len().to_string().white().bold()
    );
    for table in &result.tables {
        println!(
            "  Created {} ({} rows)",
            table.path.display().to_string().white(),
            table.rows
        );
    }
    for warning in result.warnings() {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }

    println!();
    println!(
        "{} {}",
        "Wrote schema to".green().bold(),
        result.output_dir.display().to_string().white()
    );

    Ok(())
}
