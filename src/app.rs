//! The harness-facing application plugin

use crate::{
    config::{self, OptionDescriptor},
    error::Result,
    gather,
    logging::Logger,
    models::{Config, EndpointMetrics, WorkerMetrics},
    output::{self, FormattedOutput},
    types::{AppVars, NodeOutput},
};

/// Lifecycle hooks the benchmark harness calls on an application
pub trait Application {
    /// Application name as used in `benchmark.application`
    fn name(&self) -> &'static str;

    /// Write the container images of the worker and endpoint roles
    fn set_container_location(&self, config: &mut Config);

    /// Options this application adds to the configuration
    fn add_options(&self) -> Vec<OptionDescriptor>;

    /// Reject configurations this application cannot run under
    fn verify_options(&self, config: &Config) -> Result<()>;

    /// Variables needed when launching the application on workers
    fn start_worker(&self, config: &Config, machines: &[String]) -> AppVars;

    /// Per-node metrics from worker console output
    fn gather_worker_metrics(&self, output_per_node: &[NodeOutput]) -> Result<Vec<WorkerMetrics>>;

    /// Metrics from endpoint console output
    fn gather_endpoint_metrics(
        &self,
        output_per_endpoint: &[NodeOutput],
        container_names: &[String],
    ) -> Result<Vec<EndpointMetrics>>;

    /// Merge and log the final metrics
    fn format_output(
        &self,
        config: &Config,
        worker_metrics: &[WorkerMetrics],
        endpoint_metrics: &[EndpointMetrics],
    ) -> Result<FormattedOutput>;
}

/// Minecraft-like game server benchmarked with bots
pub struct Opencraft {
    logger: Logger,
}

impl Opencraft {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Application for Opencraft {
    fn name(&self) -> &'static str {
        config::APPLICATION_NAME
    }

    fn set_container_location(&self, config: &mut Config) {
        config::set_container_location(config);
    }

    fn add_options(&self) -> Vec<OptionDescriptor> {
        config::add_options()
    }

    fn verify_options(&self, config: &Config) -> Result<()> {
        config::verify_options(config)
    }

    fn start_worker(&self, config: &Config, machines: &[String]) -> AppVars {
        config::start_worker(config, machines)
    }

    fn gather_worker_metrics(&self, output_per_node: &[NodeOutput]) -> Result<Vec<WorkerMetrics>> {
        gather::gather_worker_metrics(&self.logger, output_per_node)
    }

    fn gather_endpoint_metrics(
        &self,
        output_per_endpoint: &[NodeOutput],
        container_names: &[String],
    ) -> Result<Vec<EndpointMetrics>> {
        gather::gather_endpoint_metrics(&self.logger, output_per_endpoint, container_names)
    }

    fn format_output(
        &self,
        config: &Config,
        worker_metrics: &[WorkerMetrics],
        endpoint_metrics: &[EndpointMetrics],
    ) -> Result<FormattedOutput> {
        output::format_output(&self.logger, config, worker_metrics, endpoint_metrics)
    }
}

/// Captured console output of one run
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub workers: Vec<NodeOutput>,
    pub endpoints: Vec<NodeOutput>,
    pub endpoint_names: Vec<String>,
}

/// Run every post-deployment step of an application over captured output:
/// set images, verify the configuration, gather metrics and format them
pub fn analyze_run<A: Application + ?Sized>(
    app: &A,
    config: &mut Config,
    run: &RunOutput,
) -> Result<FormattedOutput> {
    app.set_container_location(config);
    app.verify_options(config)?;

    let worker_metrics = app.gather_worker_metrics(&run.workers)?;
    let endpoint_metrics = app.gather_endpoint_metrics(&run.endpoints, &run.endpoint_names)?;

    app.format_output(config, &worker_metrics, &endpoint_metrics)
}
