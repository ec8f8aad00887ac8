//! Opencraft Metrics - Main CLI Application
//!
//! Re-analyses the console logs captured from an opencraft benchmark run.

use clap::Parser;
use opencraft_metrics::{
    analyze_run,
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, ErrorContext, ErrorReporter, Result},
    logging::{LogFormat, LoggerFactory},
    types::NodeOutput,
    Opencraft, RunOutput, PKG_NAME, VERSION,
};
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_application(&cli) {
        let reporter = ErrorReporter::new(!cli.no_color, cli.verbose || cli.debug);
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
fn run_application(cli: &Cli) -> Result<()> {
    cli.validate().map_err(AppError::config)?;

    let mut config = load_config(cli)?;
    let format: LogFormat = cli.log_format.parse()?;
    let factory = LoggerFactory::new(config.clone(), format);
    let logger = factory.create_logger("opencraft");

    logger.debug(&format!("{} v{} ({})", PKG_NAME, VERSION, build_info())).log();
    if config.debug {
        logger.debug(&format!("Configuration:\n{}", display_config_summary(&config))).log();
    }

    let run = RunOutput {
        workers: read_logs(&cli.worker_logs)?,
        endpoints: read_logs(&cli.endpoint_logs)?,
        endpoint_names: cli.endpoint_names(),
    };

    let app = Opencraft::new(logger);
    let output = analyze_run(&app, &mut config, &run)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output.rows)?);
    }

    Ok(())
}

/// Read each log file into its lines
fn read_logs(paths: &[PathBuf]) -> Result<Vec<NodeOutput>> {
    paths.iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read log file {}", path.display()))?;
            Ok(content.lines().map(str::to_string).collect())
        })
        .collect()
}

fn build_info() -> String {
    let commit = option_env!("GIT_COMMIT").unwrap_or("unknown");
    let built = option_env!("BUILD_TIME").unwrap_or("unknown");
    format!("commit {}, built {}", commit, built)
}
