//! Data models and structures for the opencraft metrics plugin

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::{Config, BenchmarkSection, InfrastructureSection, ContainerImages};
pub use metrics::{WorkerMetrics, EndpointMetrics, MergedMetrics, Cell};
