//! Metric records produced from worker and endpoint console output
//!
//! Missing statistics are represented as `f64::NAN`, which serializes to
//! JSON `null` and renders as `NaN` in tables and as an empty CSV cell.

use crate::stats::Summary;
use serde::{Deserialize, Serialize};

/// Tick-rate statistics of one game-server node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkerMetrics {
    /// Positional index of the node in the harness output
    pub worker_id: usize,
    pub ticks_mean: f64,
    pub ticks_stdev: f64,
    pub ticks_median: f64,
}

impl WorkerMetrics {
    /// Fresh record with every statistic missing
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ticks_mean: f64::NAN,
            ticks_stdev: f64::NAN,
            ticks_median: f64::NAN,
        }
    }

    /// Fill the tick statistics from a computed summary
    pub fn with_ticks(mut self, ticks: Summary) -> Self {
        self.ticks_mean = ticks.mean;
        self.ticks_median = ticks.median;
        self.ticks_stdev = ticks.stdev;
        self
    }
}

/// Response-time statistics of the bot's Dig and Place operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EndpointMetrics {
    pub response_time_dig_mean: f64,
    pub response_time_dig_median: f64,
    pub response_time_dig_stdev: f64,
    pub response_time_place_mean: f64,
    pub response_time_place_median: f64,
    pub response_time_place_stdev: f64,
}

impl Default for EndpointMetrics {
    fn default() -> Self {
        Self::from_summaries(Summary::empty(), Summary::empty())
    }
}

impl EndpointMetrics {
    /// Build the record from the Dig and Place summaries
    pub fn from_summaries(dig: Summary, place: Summary) -> Self {
        Self {
            response_time_dig_mean: dig.mean,
            response_time_dig_median: dig.median,
            response_time_dig_stdev: dig.stdev,
            response_time_place_mean: place.mean,
            response_time_place_median: place.median,
            response_time_place_stdev: place.stdev,
        }
    }
}

/// One output row: a worker record joined with its endpoint record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MergedMetrics {
    #[serde(flatten)]
    pub worker: WorkerMetrics,
    #[serde(flatten)]
    pub endpoint: EndpointMetrics,
}

/// A single cell of a merged output row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Integer(usize),
    Float(f64),
}

impl MergedMetrics {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 10] = [
        "worker_id",
        "ticks_mean",
        "ticks_stdev",
        "ticks_median",
        "response_time_dig_mean",
        "response_time_dig_median",
        "response_time_dig_stdev",
        "response_time_place_mean",
        "response_time_place_median",
        "response_time_place_stdev",
    ];

    pub fn new(worker: WorkerMetrics, endpoint: EndpointMetrics) -> Self {
        Self { worker, endpoint }
    }

    /// Row values in the order of [`MergedMetrics::COLUMNS`]
    pub fn cells(&self) -> [Cell; 10] {
        let w = &self.worker;
        let e = &self.endpoint;
        [
            Cell::Integer(w.worker_id),
            Cell::Float(w.ticks_mean),
            Cell::Float(w.ticks_stdev),
            Cell::Float(w.ticks_median),
            Cell::Float(e.response_time_dig_mean),
            Cell::Float(e.response_time_dig_median),
            Cell::Float(e.response_time_dig_stdev),
            Cell::Float(e.response_time_place_mean),
            Cell::Float(e.response_time_place_median),
            Cell::Float(e.response_time_place_stdev),
        ]
    }
}
