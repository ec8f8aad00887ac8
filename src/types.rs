//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Console output of one container: outer index is the node, inner is its lines in emission order
pub type NodeOutput = Vec<String>;

/// Harness configuration as handed over before typing: section -> key -> value
pub type RawConfig = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Application variables passed to worker containers at launch
pub type AppVars = HashMap<String, String>;

/// Strategy the bots use to join the game server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinStrategy {
    /// All bots join at once
    #[default]
    Default,
    /// Bots join one after another at a steady rate
    LinearJoin,
    /// A fixed number of bots join per step
    FixedJoin,
}

impl JoinStrategy {
    /// All accepted strategy names
    pub const NAMES: &'static [&'static str] = &["LinearJoin", "FixedJoin", "Default"];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStrategy::Default => "Default",
            JoinStrategy::LinearJoin => "LinearJoin",
            JoinStrategy::FixedJoin => "FixedJoin",
        }
    }
}

impl FromStr for JoinStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Default" => Ok(JoinStrategy::Default),
            "LinearJoin" => Ok(JoinStrategy::LinearJoin),
            "FixedJoin" => Ok(JoinStrategy::FixedJoin),
            other => Err(AppError::validation(format!(
                "Invalid join_strategy '{}', expected one of: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_strategy_parsing() {
        assert_eq!("LinearJoin".parse::<JoinStrategy>().unwrap(), JoinStrategy::LinearJoin);
        assert_eq!("FixedJoin".parse::<JoinStrategy>().unwrap(), JoinStrategy::FixedJoin);
        assert_eq!("Default".parse::<JoinStrategy>().unwrap(), JoinStrategy::Default);
        assert!("linearjoin".parse::<JoinStrategy>().is_err());
        assert!("".parse::<JoinStrategy>().is_err());
    }

    #[test]
    fn test_join_strategy_display_round_trip() {
        for name in JoinStrategy::NAMES {
            let strategy: JoinStrategy = name.parse().unwrap();
            assert_eq!(strategy.to_string(), *name);
        }
    }
}
