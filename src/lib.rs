//! Opencraft Metrics
//!
//! Application plugin for an edge/cloud benchmark harness running the
//! opencraft game server with bot load generators. It validates the
//! harness configuration for opencraft, names the container images, and
//! turns the captured console output of servers and bots into tick-rate
//! and response-time statistics.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod gather;
pub mod logging;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::{analyze_run, Application, Opencraft, RunOutput};
pub use error::{AppError, Result};
pub use models::{Config, EndpointMetrics, MergedMetrics, WorkerMetrics};
pub use output::FormattedOutput;
pub use stats::Summary;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    /// Run mode when the configuration names none
    pub const DEFAULT_MODE: &str = "cloud";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
