//! Opencraft-specific configuration options and container locations

use crate::{
    error::{AppError, Result},
    models::{Config, ContainerImages},
    types::{AppVars, JoinStrategy},
};
use std::collections::BTreeMap;
use std::fmt;

/// Game server image
pub const WORKER_IMAGE: &str = "2000arp/opencraft_benchmark:opencraft_server";

/// Bot image
pub const ENDPOINT_IMAGE: &str = "2000arp/opencraft_benchmark:opencraft_bot";

/// Type an option value is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Integer,
    Text,
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Integer(i64),
    Text(String),
}

impl OptionValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(v) => Some(*v),
            OptionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(v) => Some(v),
            OptionValue::Integer(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Integer(v) => write!(f, "{}", v),
            OptionValue::Text(v) => f.write_str(v),
        }
    }
}

/// Declaration of one application option for the harness config reader
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub kind: OptionKind,
    pub validator: fn(&OptionValue) -> bool,
    pub required: bool,
    pub default: Option<OptionValue>,
}

impl OptionDescriptor {
    /// Turn the raw configured text (if any) into a checked value.
    ///
    /// An absent value falls back to the default; without a default a
    /// required option is an error and an optional one resolves to `None`.
    pub fn resolve(&self, raw: Option<&str>) -> Result<Option<OptionValue>> {
        let value = match raw {
            Some(raw) => self.parse(raw)?,
            None => match (&self.default, self.required) {
                (Some(default), _) => default.clone(),
                (None, true) => {
                    return Err(AppError::config(format!(
                        "Missing required option '{}'",
                        self.name
                    )))
                }
                (None, false) => return Ok(None),
            },
        };

        if !(self.validator)(&value) {
            return Err(AppError::validation(format!(
                "Invalid value for option '{}': '{}'",
                self.name, value
            )));
        }

        Ok(Some(value))
    }

    fn parse(&self, raw: &str) -> Result<OptionValue> {
        let raw = raw.trim();
        match self.kind {
            OptionKind::Integer => raw.parse::<i64>().map(OptionValue::Integer).map_err(|e| {
                AppError::validation(format!(
                    "Option '{}' expects an integer, got '{}': {}",
                    self.name, raw, e
                ))
            }),
            OptionKind::Text => Ok(OptionValue::Text(raw.to_string())),
        }
    }
}

fn validate_steps_bot(value: &OptionValue) -> bool {
    value.as_integer().is_some_and(|steps| steps >= 1)
}

fn validate_join_strategy(value: &OptionValue) -> bool {
    value.as_text().is_some_and(|name| JoinStrategy::NAMES.contains(&name))
}

/// Options this application adds to the `[benchmark]` section
pub fn add_options() -> Vec<OptionDescriptor> {
    vec![
        OptionDescriptor {
            name: "steps_bot",
            kind: OptionKind::Integer,
            validator: validate_steps_bot,
            required: true,
            default: None,
        },
        OptionDescriptor {
            name: "join_strategy",
            kind: OptionKind::Text,
            validator: validate_join_strategy,
            required: true,
            default: Some(OptionValue::Text(JoinStrategy::Default.as_str().to_string())),
        },
    ]
}

/// Resolve every descriptor against one configuration section.
///
/// Numbers and booleans in the section are read through their textual form,
/// the same way the harness's INI reader hands them over.
pub fn resolve_options(
    descriptors: &[OptionDescriptor],
    section: &BTreeMap<String, serde_json::Value>,
) -> Result<BTreeMap<&'static str, OptionValue>> {
    let mut resolved = BTreeMap::new();

    for descriptor in descriptors {
        let raw = section.get(descriptor.name).and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });

        if let Some(value) = descriptor.resolve(raw.as_deref())? {
            resolved.insert(descriptor.name, value);
        }
    }

    Ok(resolved)
}

/// Point the worker and endpoint roles at the opencraft images
pub fn set_container_location(config: &mut Config) {
    config.images = Some(ContainerImages {
        worker: WORKER_IMAGE.to_string(),
        endpoint: ENDPOINT_IMAGE.to_string(),
    });
}

/// Application variables for launching workers; opencraft needs none
pub fn start_worker(_config: &Config, _machines: &[String]) -> AppVars {
    AppVars::new()
}
