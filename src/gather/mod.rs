//! Metric extraction from the console output of workers and endpoints

pub mod endpoint;
pub mod worker;

pub use endpoint::{collect_latencies, gather_endpoint_metrics, LatencySamples};
pub use worker::{find_header, gather_worker_metrics, parse_worker_output};
