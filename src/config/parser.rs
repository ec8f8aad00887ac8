//! Configuration parsing from the harness's section mapping, environment and CLI

use crate::{
    cli::Cli,
    config::{env::EnvManager, options},
    error::{AppError, ErrorContext, Result},
    models::{BenchmarkSection, Config, ContainerImages, InfrastructureSection},
    types::{JoinStrategy, RawConfig},
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Builds a typed [`Config`] from the harness's section -> key -> value mapping
pub struct ConfigParser {
    sections: RawConfig,
    mode: Option<String>,
}

impl ConfigParser {
    /// Create a parser over already-split sections
    pub fn from_raw(sections: RawConfig) -> Self {
        Self { sections, mode: None }
    }

    /// Set the run mode that is stored outside any section
    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Parse a JSON document whose top-level objects are sections.
    ///
    /// The only non-section key allowed at the top level is `mode`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: serde_json::Map<String, Value> = serde_json::from_str(json)?;
        let mut sections = RawConfig::new();
        let mut mode = None;

        for (key, value) in document {
            match value {
                Value::Object(entries) => {
                    sections.insert(key, entries.into_iter().collect());
                }
                Value::String(text) if key == "mode" => mode = Some(text),
                _ => {
                    return Err(AppError::config(format!(
                        "Top-level key '{}' must be a section object",
                        key
                    )))
                }
            }
        }

        Ok(Self { sections, mode })
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Parse and build the typed configuration
    pub fn parse(&self) -> Result<Config> {
        let benchmark_section = self.section("benchmark")?;
        let resolved = options::resolve_options(&options::add_options(), benchmark_section)?;

        let steps_bot = match resolved.get("steps_bot").and_then(|v| v.as_integer()) {
            Some(steps) => Some(u32::try_from(steps).map_err(|_| {
                AppError::validation(format!("steps_bot value {} is out of range", steps))
            })?),
            None => None,
        };

        let join_strategy = match resolved.get("join_strategy").and_then(|v| v.as_text()) {
            Some(name) => name.parse()?,
            None => JoinStrategy::default(),
        };

        let benchmark = BenchmarkSection {
            application: self.require_string("benchmark", "application")?,
            resource_manager: self.require_string("benchmark", "resource_manager")?,
            cache_worker: benchmark_section.get("cache_worker").and_then(flag_text),
            steps_bot,
            join_strategy,
        };

        let infrastructure = InfrastructureSection {
            cloud_nodes: self.require_count("infrastructure", "cloud_nodes")?,
            edge_nodes: self.require_count("infrastructure", "edge_nodes")?,
        };

        let mut config = Config::new(benchmark, infrastructure);

        if let Some(mode) = &self.mode {
            config.mode = mode.clone();
        }

        if self.sections.contains_key("images") {
            config.images = Some(ContainerImages {
                worker: self.require_string("images", "worker")?,
                endpoint: self.require_string("images", "endpoint")?,
            });
        }

        Ok(config)
    }

    fn section(&self, name: &str) -> Result<&BTreeMap<String, Value>> {
        self.sections.get(name).ok_or_else(|| {
            AppError::config(format!("Missing required configuration section '{}'", name))
        })
    }

    fn require(&self, section: &str, key: &str) -> Result<&Value> {
        match self.section(section)?.get(key) {
            Some(Value::Null) | None => Err(AppError::config(format!(
                "Missing required configuration key '{}.{}'",
                section, key
            ))),
            Some(value) => Ok(value),
        }
    }

    fn require_string(&self, section: &str, key: &str) -> Result<String> {
        match self.require(section, key)? {
            Value::String(text) => Ok(text.clone()),
            other => Err(AppError::config(format!(
                "Configuration key '{}.{}' must be a string, got {}",
                section, key, other
            ))),
        }
    }

    /// Node counts arrive as numbers from JSON or as strings from INI readers
    fn require_count(&self, section: &str, key: &str) -> Result<u32> {
        let value = self.require(section, key)?;
        let parsed = match value {
            Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(text) => text.trim().parse::<u32>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| {
            AppError::config(format!(
                "Configuration key '{}.{}' must be a non-negative integer, got {}",
                section, key, value
            ))
        })
    }
}

/// Flags keep the harness's textual form; JSON booleans become "True"/"False"
fn flag_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Load the complete configuration: .env file, JSON file, environment, CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    EnvManager::load_env_file(cli.debug)?;

    let mut config = ConfigParser::from_json_file(&cli.config)?.parse()?;
    config.merge_from_env()?;
    apply_cli_overrides(cli, &mut config);

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(cli: &Cli, config: &mut Config) {
    if let Some(mode) = &cli.mode {
        config.mode = mode.clone();
    }

    if cli.no_color {
        config.enable_color = false;
    }

    config.verbose = cli.verbose;
    config.debug = cli.debug;
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Mode: {}", config.mode));
    summary.push(format!("Application: {}", config.benchmark.application));
    summary.push(format!("Resource Manager: {}", config.benchmark.resource_manager));
    summary.push(format!(
        "Steps Bot: {}",
        config.benchmark.steps_bot.map_or("-".to_string(), |s| s.to_string())
    ));
    summary.push(format!("Join Strategy: {}", config.benchmark.join_strategy));
    summary.push(format!("Cloud Nodes: {}", config.infrastructure.cloud_nodes));
    summary.push(format!("Edge Nodes: {}", config.infrastructure.edge_nodes));
    if let Some(images) = &config.images {
        summary.push(format!("Worker Image: {}", images.worker));
        summary.push(format!("Endpoint Image: {}", images.endpoint));
    }

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"{
        "mode": "cloud",
        "benchmark": {
            "application": "opencraft",
            "resource_manager": "kubernetes",
            "steps_bot": 3,
            "join_strategy": "LinearJoin"
        },
        "infrastructure": {"cloud_nodes": 1, "edge_nodes": "0"}
    }"#;

    #[test]
    fn test_parse_valid_document() {
        let config = ConfigParser::from_json_str(VALID).unwrap().parse().unwrap();

        assert_eq!(config.mode, "cloud");
        assert_eq!(config.benchmark.application, "opencraft");
        assert_eq!(config.benchmark.steps_bot, Some(3));
        assert_eq!(config.benchmark.join_strategy, JoinStrategy::LinearJoin);
        assert_eq!(config.infrastructure.cloud_nodes, 1);
        assert_eq!(config.infrastructure.edge_nodes, 0);
        assert!(config.images.is_none());
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let json = r#"{"benchmark": {"application": "opencraft", "resource_manager": "kubernetes", "steps_bot": 1}}"#;
        let error = ConfigParser::from_json_str(json).unwrap().parse().unwrap_err();
        assert_eq!(error.category(), "CONFIG");
        assert!(error.to_string().contains("'infrastructure'"));
    }

    #[test]
    fn test_each_missing_required_key_is_config_error() {
        for (section, key) in [
            ("benchmark", "application"),
            ("benchmark", "resource_manager"),
            ("infrastructure", "cloud_nodes"),
            ("infrastructure", "edge_nodes"),
        ] {
            let mut document: serde_json::Value = serde_json::from_str(VALID).unwrap();
            document[section].as_object_mut().unwrap().remove(key);

            let error = ConfigParser::from_json_str(&document.to_string())
                .unwrap()
                .parse()
                .unwrap_err();
            assert_eq!(error.category(), "CONFIG", "{}.{}", section, key);
            assert!(error.to_string().contains(&format!("{}.{}", section, key)));
        }
    }

    #[test]
    fn test_missing_steps_bot_is_reported() {
        let json = r#"{
            "benchmark": {"application": "opencraft", "resource_manager": "kubernetes"},
            "infrastructure": {"cloud_nodes": 1, "edge_nodes": 0}
        }"#;
        let error = ConfigParser::from_json_str(json).unwrap().parse().unwrap_err();
        assert!(error.to_string().contains("steps_bot"));
    }

    #[test]
    fn test_invalid_join_strategy_rejected() {
        let json = VALID.replace("LinearJoin", "Teleport");
        let error = ConfigParser::from_json_str(&json).unwrap().parse().unwrap_err();
        assert_eq!(error.category(), "VALIDATION");
    }

    #[test]
    fn test_non_numeric_node_count_rejected() {
        let json = VALID.replace(r#""edge_nodes": "0""#, r#""edge_nodes": "none""#);
        let error = ConfigParser::from_json_str(&json).unwrap().parse().unwrap_err();
        assert!(error.to_string().contains("infrastructure.edge_nodes"));
    }

    #[test]
    fn test_cache_worker_bool_becomes_flag_text() {
        let mut document: serde_json::Value = serde_json::from_str(VALID).unwrap();
        document["benchmark"]["cache_worker"] = serde_json::json!(true);
        let config = ConfigParser::from_json_str(&document.to_string()).unwrap().parse().unwrap();
        assert_eq!(config.benchmark.cache_worker.as_deref(), Some("True"));
        assert!(config.cache_worker_enabled());
    }

    #[test]
    fn test_images_section_is_read() {
        let mut document: serde_json::Value = serde_json::from_str(VALID).unwrap();
        document["images"] = serde_json::json!({"worker": "w:1", "endpoint": "e:1"});
        let config = ConfigParser::from_json_str(&document.to_string()).unwrap().parse().unwrap();
        let images = config.images.unwrap();
        assert_eq!(images.worker, "w:1");
        assert_eq!(images.endpoint, "e:1");
    }

    #[test]
    fn test_unexpected_top_level_value_rejected() {
        let error = ConfigParser::from_json_str(r#"{"benchmark": 3}"#).err().unwrap();
        assert_eq!(error.category(), "CONFIG");
    }

    #[test]
    fn test_from_raw_with_mode() {
        let document: serde_json::Value = serde_json::from_str(VALID).unwrap();
        let mut raw = RawConfig::new();
        for (name, section) in document.as_object().unwrap() {
            if let Some(entries) = section.as_object() {
                raw.insert(name.clone(), entries.clone().into_iter().collect());
            }
        }

        let config = ConfigParser::from_raw(raw).with_mode("edge").parse().unwrap();
        assert_eq!(config.mode, "edge");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let config = ConfigParser::from_json_file(file.path()).unwrap().parse().unwrap();
        assert_eq!(config.benchmark.steps_bot, Some(3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = ConfigParser::from_json_file(Path::new("/nonexistent/opencraft.json")).err().unwrap();
        assert_eq!(error.category(), "IO");
        assert!(error.to_string().contains("opencraft.json"));
    }

    #[test]
    fn test_display_config_summary() {
        let config = ConfigParser::from_json_str(VALID).unwrap().parse().unwrap();
        let summary = display_config_summary(&config);
        assert!(summary.contains("Mode: cloud"));
        assert!(summary.contains("Join Strategy: LinearJoin"));
        assert!(summary.contains("Steps Bot: 3"));
    }
}
