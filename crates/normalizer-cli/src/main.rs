//! Normalizer CLI - functional dependency discovery and schema normalization.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands, LogFormatArg};
use logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            sample,
            threshold,
        } => commands::analyze::run(file, output, sample, threshold),

        Commands::Normalize {
            file,
            config,
            target,
            output,
        } => commands::normalize::run(file, config, target, output),

        Commands::Transform {
            file,
            config,
            output,
            strict,
        } => commands::transform::run(file, config, output, strict),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
