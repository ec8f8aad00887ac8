//! Tick-rate extraction from game-server console output
//!
//! The server prints free-form console logs first and then a
//! whitespace-separated metrics table introduced by a header row that
//! contains a `timestamp` column. Rows whose third field is `tick` carry
//! one tick measurement in their `value` column.

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::WorkerMetrics,
    stats::{coerce_numeric, Summary},
    types::NodeOutput,
};

/// Substring that marks the metrics table header
pub const HEADER_MARKER: &str = "timestamp";

/// Row key of tick measurements (third field of a row)
pub const TICK_KEY: &str = "tick";

/// Header column holding the measured value
pub const VALUE_COLUMN: &str = "value";

/// Parse every worker node's output into per-node tick statistics.
///
/// `worker_id` is the node's position in `output_per_node`; the result is
/// ordered by it.
pub fn gather_worker_metrics(logger: &Logger, output_per_node: &[NodeOutput]) -> Result<Vec<WorkerMetrics>> {
    if output_per_node.is_empty() {
        return Ok(Vec::new());
    }

    let mut worker_metrics = Vec::with_capacity(output_per_node.len());

    for (worker_id, lines) in output_per_node.iter().enumerate() {
        logger.info(&format!("Parse output from worker node {}", worker_id))
            .field("worker_id", worker_id)
            .field("lines", lines.len())
            .log();

        let values = extract_tick_values(worker_id, lines).inspect_err(|e| {
            logger.error_event(e, Some("Failed to parse worker output"));
        })?;
        let ticks = Summary::from_values(&values);
        crate::log_debug!(logger, "Worker node {} has {} tick samples", worker_id, ticks.count);

        worker_metrics.push(WorkerMetrics::new(worker_id).with_ticks(ticks));
    }

    worker_metrics.sort_by_key(|m| m.worker_id);
    Ok(worker_metrics)
}

/// Index of the first line containing the header marker
pub fn find_header(lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| line.contains(HEADER_MARKER))
}

/// Tick values of one node, in row order; unparseable values are NaN
pub fn extract_tick_values(worker_id: usize, lines: &[String]) -> Result<Vec<f64>> {
    let header_idx = find_header(lines).ok_or_else(|| AppError::missing_header(worker_id))?;

    let value_idx = lines[header_idx]
        .split_whitespace()
        .position(|column| column == VALUE_COLUMN)
        .ok_or_else(|| AppError::MissingColumn {
            node: worker_id,
            column: VALUE_COLUMN.to_string(),
        })?;

    let values = lines[header_idx + 1..]
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|fields| fields.get(2) == Some(&TICK_KEY))
        .map(|fields| fields.get(value_idx).map_or(f64::NAN, |v| coerce_numeric(v)))
        .collect();

    Ok(values)
}

/// Build the metric record of one node
pub fn parse_worker_output(worker_id: usize, lines: &[String]) -> Result<WorkerMetrics> {
    let values = extract_tick_values(worker_id, lines)?;
    Ok(WorkerMetrics::new(worker_id).with_ticks(Summary::from_values(&values)))
}
