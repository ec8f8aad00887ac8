//! Command-line interface for offline analysis of captured console logs

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Opencraft Metrics - parse captured opencraft server and bot logs into run statistics
#[derive(Parser, Debug, Clone)]
#[command(name = "opencraft-metrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Harness configuration as JSON (sections as objects, optional top-level "mode")
    #[arg(short, long, env = "OPENCRAFT_CONFIG", value_name = "FILE")]
    pub config: PathBuf,

    /// Console log of one worker node; repeat in worker order
    #[arg(short, long = "worker-log", value_name = "FILE", action = ArgAction::Append)]
    pub worker_logs: Vec<PathBuf>,

    /// Console log of one endpoint; only the first is aggregated
    #[arg(short, long = "endpoint-log", value_name = "FILE", action = ArgAction::Append)]
    pub endpoint_logs: Vec<PathBuf>,

    /// Override the run mode shown in the output header
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Print the merged metrics as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log output format (console, json, compact)
    #[arg(long, default_value = "console")]
    pub log_format: String,

    /// Show error details with suggestions (log level is unaffected)
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output (includes the CSV dump)
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_logs.is_empty() && self.endpoint_logs.is_empty() {
            return Err("Must specify at least one --worker-log or --endpoint-log".to_string());
        }

        if let Err(e) = self.log_format.parse::<crate::logging::LogFormat>() {
            return Err(e.to_string());
        }

        Ok(())
    }

    /// Endpoint container names derived from the log file stems
    pub fn endpoint_names(&self) -> Vec<String> {
        self.endpoint_logs.iter()
            .map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect()
    }
}
