//! Final output: pairing worker and endpoint records and logging them
//!
//! The merged rows are logged as an aligned table at info level and as CSV
//! at debug level.

mod formatter;

pub use formatter::{
    format_float,
    Alignment,
    CsvRenderer,
    MetricsRenderer,
    TableFormat,
    TableRenderer,
};

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{Config, EndpointMetrics, MergedMetrics, WorkerMetrics},
};

const RULE: &str = "------------------------------------";

/// Everything `format_output` produced
#[derive(Debug, Clone)]
pub struct FormattedOutput {
    pub rows: Vec<MergedMetrics>,
    pub table: String,
    pub csv: String,
}

/// Pair `workers[i]` with `endpoints[i]` for every worker.
///
/// Extra endpoint records are left unpaired; fewer endpoint records than
/// workers is an error.
pub fn merge_metrics(workers: &[WorkerMetrics], endpoints: &[EndpointMetrics]) -> Result<Vec<MergedMetrics>> {
    if endpoints.len() < workers.len() {
        return Err(AppError::length_mismatch(workers.len(), endpoints.len()));
    }

    Ok(workers.iter()
        .zip(endpoints.iter())
        .map(|(worker, endpoint)| MergedMetrics::new(*worker, *endpoint))
        .collect())
}

/// Merge, render and log the final metrics of a run
pub fn format_output(
    logger: &Logger,
    config: &Config,
    worker_metrics: &[WorkerMetrics],
    endpoint_metrics: &[EndpointMetrics],
) -> Result<FormattedOutput> {
    logger.info(RULE).log();
    logger.info(&format!("{} OUTPUT", config.mode.to_uppercase())).log();
    logger.info(RULE).log();

    let rows = merge_metrics(worker_metrics, endpoint_metrics).inspect_err(|e| {
        logger.error_event(e, Some("Failed to merge metrics"));
    })?;

    let table = TableRenderer::default().render(&rows)?;
    logger.info(&format!("\n{}", table)).log();

    let csv = CsvRenderer.render(&rows)?;
    logger.debug(&format!("Output in csv format\n{}", csv)).log();

    Ok(FormattedOutput { rows, table, csv })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::models::{BenchmarkSection, InfrastructureSection};
    use crate::stats::Summary;
    use crate::types::JoinStrategy;

    fn test_config() -> Config {
        let mut config = Config::new(
            BenchmarkSection {
                application: "opencraft".to_string(),
                resource_manager: "kubernetes".to_string(),
                cache_worker: None,
                steps_bot: Some(1),
                join_strategy: JoinStrategy::Default,
            },
            InfrastructureSection { cloud_nodes: 1, edge_nodes: 0 },
        );
        config.mode = "cloud".to_string();
        config
    }

    fn worker(id: usize) -> WorkerMetrics {
        WorkerMetrics::new(id).with_ticks(Summary::from_values(&[19.0, 20.0, 21.0]))
    }

    fn endpoint() -> EndpointMetrics {
        EndpointMetrics::from_summaries(Summary::from_values(&[5.0, 15.0]), Summary::from_values(&[10.0]))
    }

    #[test]
    fn test_merge_pairs_by_position() {
        let rows = merge_metrics(&[worker(0)], &[endpoint()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worker.worker_id, 0);
        assert_eq!(rows[0].worker.ticks_mean, 20.0);
        assert_eq!(rows[0].endpoint.response_time_dig_mean, 10.0);
    }

    #[test]
    fn test_merge_rejects_more_workers_than_endpoints() {
        let error = merge_metrics(&[worker(0), worker(1)], &[endpoint()]).unwrap_err();
        assert!(matches!(error, AppError::LengthMismatch { workers: 2, endpoints: 1 }));
    }

    #[test]
    fn test_merge_without_workers_is_empty() {
        let rows = merge_metrics(&[], &[endpoint()]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_merge_ignores_unpaired_endpoints() {
        let rows = merge_metrics(&[worker(0)], &[endpoint(), EndpointMetrics::default()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].endpoint.response_time_dig_mean, 10.0);
    }

    #[test]
    fn test_format_output_endpoint_only_run() {
        let (logger, buffer) = Logger::in_memory("OUTPUT");
        let mut config = test_config();
        config.mode = "endpoint".to_string();

        let output = format_output(&logger, &config, &[], &[endpoint()]).unwrap();
        assert!(output.rows.is_empty());
        assert_eq!(output.table.lines().count(), 1);
        assert!(buffer.lock().unwrap().iter().any(|l| l.ends_with("ENDPOINT OUTPUT")));
    }

    #[test]
    fn test_merge_of_empty_lists_is_empty() {
        assert!(merge_metrics(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_format_output_logs_header_table_and_csv() {
        let (mut logger, buffer) = Logger::in_memory("OUTPUT");
        logger.set_level(LogLevel::Debug);

        let output = format_output(&logger, &test_config(), &[worker(0)], &[endpoint()]).unwrap();
        assert_eq!(output.rows.len(), 1);
        assert!(output.table.contains("worker_id"));
        assert!(output.csv.starts_with(",worker_id,"));

        let logged = buffer.lock().unwrap();
        assert!(logged[0].ends_with(RULE));
        assert!(logged[1].ends_with("CLOUD OUTPUT"));
        assert!(logged.iter().any(|l| l.contains("ticks_mean")));
        assert!(logged.iter().any(|l| l.contains("Output in csv format")));
    }

    #[test]
    fn test_csv_not_logged_at_info() {
        let (logger, buffer) = Logger::in_memory("OUTPUT");
        format_output(&logger, &test_config(), &[worker(0)], &[endpoint()]).unwrap();

        let logged = buffer.lock().unwrap();
        assert!(!logged.iter().any(|l| l.contains("Output in csv format")));
    }

    #[test]
    fn test_format_output_fails_on_mismatch() {
        let (logger, _buffer) = Logger::in_memory("OUTPUT");
        let result = format_output(&logger, &test_config(), &[worker(0), worker(1)], &[endpoint()]);
        assert!(matches!(result, Err(AppError::LengthMismatch { .. })));
    }
}
