//! Configuration data model

use crate::types::{AppError, JoinStrategy, Result};
use serde::{Deserialize, Serialize};

/// Typed view of the harness configuration this plugin reads and writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Run mode (e.g. "cloud", "edge"); shown upper-cased in the output header
    #[serde(default = "default_mode")]
    pub mode: String,

    /// The `[benchmark]` section
    pub benchmark: BenchmarkSection,

    /// The `[infrastructure]` section
    pub infrastructure: InfrastructureSection,

    /// Container images, written by `set_container_location`
    #[serde(default)]
    pub images: Option<ContainerImages>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Report errors with suggestions; does not change the log level
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

/// Keys of the `[benchmark]` section used by this plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSection {
    /// Application under test; must be `opencraft`
    pub application: String,

    /// Resource manager used to deploy containers (e.g. "kubernetes", "kubecontrol")
    pub resource_manager: String,

    /// Application caching flag, kept as the raw string the harness supplies
    #[serde(default)]
    pub cache_worker: Option<String>,

    /// Number of bot steps
    #[serde(default)]
    pub steps_bot: Option<u32>,

    /// How bots join the server
    #[serde(default)]
    pub join_strategy: JoinStrategy,
}

/// Keys of the `[infrastructure]` section used by this plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureSection {
    /// Number of cloud nodes
    pub cloud_nodes: u32,

    /// Number of edge nodes
    pub edge_nodes: u32,
}

/// Registry locations of the containerized roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerImages {
    /// Game server image
    pub worker: String,

    /// Bot image
    pub endpoint: String,
}

impl Config {
    /// Create a configuration for the given sections with default flags
    pub fn new(benchmark: BenchmarkSection, infrastructure: InfrastructureSection) -> Self {
        Self {
            mode: default_mode(),
            benchmark,
            infrastructure,
            images: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }

    /// Whether application caching was requested
    pub fn cache_worker_enabled(&self) -> bool {
        self.benchmark.cache_worker.as_deref() == Some("True")
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(mode) = std::env::var("OPENCRAFT_MODE") {
            let mode = mode.trim();
            if !mode.is_empty() {
                self.mode = mode.to_string();
            }
        }

        if let Ok(application) = std::env::var("OPENCRAFT_APPLICATION") {
            self.benchmark.application = application.trim().to_string();
        }

        if let Ok(resource_manager) = std::env::var("OPENCRAFT_RESOURCE_MANAGER") {
            self.benchmark.resource_manager = resource_manager.trim().to_string();
        }

        if let Ok(cloud_nodes) = std::env::var("OPENCRAFT_CLOUD_NODES") {
            self.infrastructure.cloud_nodes = cloud_nodes.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid OPENCRAFT_CLOUD_NODES value '{}': {}", cloud_nodes, e)))?;
        }

        if let Ok(edge_nodes) = std::env::var("OPENCRAFT_EDGE_NODES") {
            self.infrastructure.edge_nodes = edge_nodes.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid OPENCRAFT_EDGE_NODES value '{}': {}", edge_nodes, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_mode() -> String {
    crate::defaults::DEFAULT_MODE.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
