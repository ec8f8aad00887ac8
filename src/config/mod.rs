//! Configuration management module

pub mod env;
pub mod options;
pub mod parser;
pub mod validation;

// Re-export main functionality
pub use env::EnvManager;
pub use options::{
    add_options, resolve_options, set_container_location, start_worker,
    OptionDescriptor, OptionKind, OptionValue, ENDPOINT_IMAGE, WORKER_IMAGE,
};
pub use parser::{display_config_summary, load_config, ConfigParser};
pub use validation::{verify_options, APPLICATION_NAME};

// Re-export from models for convenience
pub use crate::models::Config;
