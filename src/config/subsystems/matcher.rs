// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// Minimum number of shared groups for a pair to count as a match.
pub const DEFAULT_THRESHOLD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStrategy {
    Sequential,
    Parallel,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Sequential => "sequential",
            MatchStrategy::Parallel => "parallel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "parallel" => Some(Self::Parallel),
            _ => None,
        }
    }
}

impl Default for MatchStrategy {
    fn default() -> Self {
        Self::Sequential
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Applied twice: items seen in fewer groups are pruned, and pairs
    /// sharing fewer groups are not reported.
    pub threshold: usize,
    pub strategy: MatchStrategy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            strategy: MatchStrategy::default(),
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "threshold" => {
                match value.parse::<usize>() {
                    Ok(threshold) if threshold > 0 => {
                        self.threshold = threshold;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid threshold (must be > 0): {}", value)
                    ))),
                }
            },
            "strategy" => {
                self.strategy = match MatchStrategy::from_str(value) {
                    Some(strategy) => strategy,
                    None => return Some(Err(Error::Config(
                        format!("Invalid match strategy: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(Error::Config(
                "threshold must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
