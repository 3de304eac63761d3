//! Transform command - replay a saved decomposition on new data.

use std::path::PathBuf;

use colored::Colorize;
use normalizer::{ReplayOptions, Replayer, TransformConfig};

pub fn run(file: PathBuf, config: PathBuf, output: PathBuf, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Input file not found: {}", file.display()).into());
    }

    let transform = TransformConfig::load(&config)?;

    println!(
        "{} {} with {}",
        "Transforming".cyan().bold(),
        file.display().to_string().white(),
        config.display().to_string().white()
    );

    let report = Replayer::with_options(ReplayOptions { strict }).replay(&file, &transform, &output)?;

    for warning in &report.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    for table in &report.tables {
        println!(
            "  Created {} ({} rows)",
            table.path.display().to_string().white(),
            table.rows
        );
    }

    println!();
    if report.warnings.is_empty() {
        println!("{}", "Transformation complete".green().bold());
    } else {
        println!(
            "{} with {} warning(s)",
            "Transformation complete".yellow().bold(),
            report.warnings.len()
        );
    }

    Ok(())
}
