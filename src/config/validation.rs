//! Cross-field checks of the global configuration against opencraft's requirements

use crate::{
    models::Config,
    error::{AppError, Result},
};

/// Application name the harness must be configured with
pub const APPLICATION_NAME: &str = "opencraft";

/// Reject configurations opencraft cannot run under.
///
/// Only the first violated rule is reported, in this order: wrong
/// application, caching requested, kubecontrol resource manager, mixed
/// cloud and edge nodes.
pub fn verify_options(config: &Config) -> Result<()> {
    let benchmark = &config.benchmark;
    let infrastructure = &config.infrastructure;

    if benchmark.application != APPLICATION_NAME {
        Err(AppError::config("Application should be opencraft"))
    } else if config.cache_worker_enabled() {
        Err(AppError::config("opencraft app does not support application caching"))
    } else if benchmark.resource_manager == "kubecontrol" {
        Err(AppError::config("Application opencraft does not support kubecontrol"))
    } else if infrastructure.edge_nodes >= 1 && infrastructure.cloud_nodes >= 1 {
        Err(AppError::config("Application opencraft does not support both cloud and edge nodes"))
    } else {
        Ok(())
    }
}
