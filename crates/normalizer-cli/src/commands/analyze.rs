//! Analyze command - discover dependencies and write an analysis report.

use std::path::PathBuf;

use colored::Colorize;
use normalizer::{DiscoveryConfig, NormalForm, Normalizer, NormalizerConfig, Question};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    sample: Option<usize>,
    threshold: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Threshold must be between 0 and 1, got {}", threshold).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let normalizer = Normalizer::with_config(NormalizerConfig {
        discovery: DiscoveryConfig {
            confidence_threshold: threshold,
            ..DiscoveryConfig::default()
        },
        sample_rows: sample,
        ..NormalizerConfig::default()
    });
    let report = normalizer.analyze(&file)?;

    println!("  Rows: {}, Columns: {}", report.rows, report.columns.len());
    println!(
        "  Found {} functional dependencies ({} confirmed, {} to review)",
        report.functional_dependencies.len().to_string().white().bold(),
        report.confirmed_count().to_string().green(),
        report.review_count().to_string().yellow()
    );
    println!(
        "  Found {} candidate key(s)",
        report.candidate_keys.len().to_string().white().bold()
    );
    for key in &report.candidate_keys {
        println!("    [{}]", key.columns.join(", "));
    }

    let nf = report.current_normal_form.to_string();
    let nf = if report.current_normal_form == NormalForm::Bcnf {
        nf.green()
    } else {
        nf.yellow()
    };
    println!("  Current normal form: {}", nf.bold());
    for (form, violations) in &report.violations {
        println!("  {} {}", form.to_string().red(), "violations:".red());
        for v in violations {
            println!("    - {}", v);
        }
    }

    if !report.questions.is_empty() {
        println!();
        println!("{}", "Questions for review:".yellow().bold());
        for q in &report.questions {
            let tag = match q {
                Question::FdConfirmation { .. } => "review",
                Question::SemanticFd { .. } => "semantic",
            };
            println!("  [{}] {}", tag.cyan(), q.text());
        }
    }

    for warning in &report.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.analysis.json", stem));
        p
    });
    report.save(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    println!(
        "Review the dependencies, then run {}",
        format!(
            "normalizer normalize {} --config {}",
            file.display(),
            output_path.display()
        )
        .cyan()
        .bold()
    );

    Ok(())
}
