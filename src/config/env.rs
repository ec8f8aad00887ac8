//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variables that override configuration file values
pub const ENV_OVERRIDES: &[&str] = &[
    "OPENCRAFT_MODE",
    "OPENCRAFT_APPLICATION",
    "OPENCRAFT_RESOURCE_MANAGER",
    "OPENCRAFT_CLOUD_NODES",
    "OPENCRAFT_EDGE_NODES",
];

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {} file: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration overrides from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using configuration file and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Opencraft metrics overrides
#
# Values here override the JSON configuration file; CLI arguments
# override both.

# Run mode shown in the output header (cloud, edge, endpoint)
# OPENCRAFT_MODE=cloud

# [benchmark] section
# OPENCRAFT_APPLICATION=opencraft
# OPENCRAFT_RESOURCE_MANAGER=kubernetes

# [infrastructure] section
# OPENCRAFT_CLOUD_NODES=1
# OPENCRAFT_EDGE_NODES=0
"#.to_string()
    }
}
