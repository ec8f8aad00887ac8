//! Response-time extraction from bot console output
//!
//! The bot reports each operation as `<label>: <latency>`, where the label
//! names a Dig or Place action. Only the first endpoint's output is
//! aggregated; every endpoint's output is logged.

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::EndpointMetrics,
    stats::Summary,
    types::NodeOutput,
};

/// Separator between label and latency
pub const SEPARATOR: &str = ": ";

/// Latency samples split by operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatencySamples {
    pub dig: Vec<i64>,
    pub place: Vec<i64>,
}

/// Parse endpoint output into at most one record of Dig/Place statistics
pub fn gather_endpoint_metrics(
    logger: &Logger,
    output_per_endpoint: &[NodeOutput],
    container_names: &[String],
) -> Result<Vec<EndpointMetrics>> {
    if output_per_endpoint.is_empty() {
        return Ok(Vec::new());
    }

    let mut endpoint_metrics = None;

    for (i, lines) in output_per_endpoint.iter().enumerate() {
        if i == 0 {
            let samples = collect_latencies(lines).inspect_err(|e| {
                logger.error_event(e, Some("Failed to parse endpoint output"));
            })?;
            logger.debug("Collected endpoint latencies")
                .field("dig_samples", samples.dig.len())
                .field("place_samples", samples.place.len())
                .log();
            endpoint_metrics = Some(samples.summarize());
        }

        let mut header = logger.info(&format!("--------------ENDPOINT {} OUTPUT------------\n", i));
        if let Some(name) = container_names.get(i) {
            header = header.field("container", name);
        }
        header.log();

        for line in lines {
            logger.info(line).log();
        }
    }

    Ok(endpoint_metrics.into_iter().collect())
}

/// Collect Dig and Place latencies from one endpoint's lines.
///
/// A line counts when it has a non-empty value after the first `": "` and
/// its label contains `Dig` (checked first) or `Place`. Such a value must be
/// an integer.
pub fn collect_latencies(lines: &[String]) -> Result<LatencySamples> {
    let mut samples = LatencySamples::default();

    for line in lines {
        let Some((label, latency)) = line.split_once(SEPARATOR) else {
            continue;
        };
        if latency.is_empty() {
            continue;
        }

        if label.contains("Dig") {
            samples.dig.push(parse_latency(line, latency)?);
        } else if label.contains("Place") {
            samples.place.push(parse_latency(line, latency)?);
        }
    }

    Ok(samples)
}

fn parse_latency(line: &str, latency: &str) -> Result<i64> {
    latency.trim().parse::<i64>().map_err(|_| AppError::malformed_value(line))
}

impl LatencySamples {
    /// Statistics of both operations
    pub fn summarize(&self) -> EndpointMetrics {
        EndpointMetrics::from_summaries(
            Summary::from_integers(&self.dig),
            Summary::from_integers(&self.place),
        )
    }
}
